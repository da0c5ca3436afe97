use metrics::counter;

/// Count a successful villa mutation (`create`, `update`, `patch`, `delete`).
pub fn record_operation(operation: &'static str) {
    counter!("villa_operations_total", "operation" => operation).increment(1);
}
