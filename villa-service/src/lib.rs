pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use std::sync::Arc;

use config::VillaConfig;
use service_core::error::ErrorResponse;
use services::{InMemoryVillaRepository, VillaRepository};
use utoipa::OpenApi;

pub use startup::{build_router, Application};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health::health_check,
        handlers::villas::list_villas,
        handlers::villas::get_villa,
        handlers::villas::create_villa,
        handlers::villas::update_villa,
        handlers::villas::patch_villa,
        handlers::villas::delete_villa,
    ),
    components(
        schemas(
            models::Villa,
            models::VillaDto,
            models::PatchOperation,
            models::PatchOp,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Villas", description = "Villa records"),
        (name = "Observability", description = "Service health and monitoring"),
    )
)]
pub struct ApiDoc;

/// Shared application state, created once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: VillaConfig,
    pub villas: Arc<dyn VillaRepository>,
}

impl AppState {
    pub fn new(config: VillaConfig, villas: Arc<dyn VillaRepository>) -> Self {
        Self { config, villas }
    }

    /// State backed by a fresh in-memory store, seeded when configured.
    pub fn in_memory(config: VillaConfig) -> Self {
        let villas = if config.seed_demo_data {
            InMemoryVillaRepository::seeded()
        } else {
            InMemoryVillaRepository::new()
        };
        Self::new(config, Arc::new(villas))
    }
}
