use service_core::middleware::init_metrics;
use service_core::observability::init_tracing;
use villa_service::{config::VillaConfig, Application};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = VillaConfig::load().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        &config.service_name,
        &config.log_level,
        config.otlp_endpoint.as_deref(),
    );
    init_metrics();

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
