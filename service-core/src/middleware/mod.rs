pub mod metrics;
pub mod security_headers;
pub mod tracing;

pub use self::metrics::{init_metrics, metrics_middleware, render_metrics};
pub use self::security_headers::{OPENAPI_JSON_PATH, security_headers_middleware};
pub use self::tracing::{REQUEST_ID_HEADER, make_request_span, request_id_middleware};
