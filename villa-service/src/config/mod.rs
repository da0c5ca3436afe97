use serde::Deserialize;
use service_core::config::{self as core_config, load_settings};
use service_core::error::AppError;

/// Villa service settings, read from the optional `configuration` file and
/// `APP__*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct VillaConfig {
    #[serde(flatten)]
    pub server: core_config::Config,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP collector endpoint; span export is off when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
    /// Preload the "Pool View" and "Beach View" demo villas.
    #[serde(default)]
    pub seed_demo_data: bool,
    /// Serve Swagger UI at `/docs`. The OpenAPI document is served either way.
    #[serde(default)]
    pub swagger_enabled: bool,
}

fn default_service_name() -> String {
    "villa-service".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for VillaConfig {
    fn default() -> Self {
        Self {
            server: core_config::Config::default(),
            service_name: default_service_name(),
            log_level: default_log_level(),
            otlp_endpoint: None,
            seed_demo_data: false,
            swagger_enabled: false,
        }
    }
}

impl VillaConfig {
    pub fn load() -> Result<Self, AppError> {
        load_settings()
    }

    /// Settings for an in-process test server on a random local port.
    pub fn for_tests() -> Self {
        Self {
            server: core_config::Config {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            service_name: "villa-service-test".to_string(),
            log_level: "error".to_string(),
            ..Self::default()
        }
    }
}
