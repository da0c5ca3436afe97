//! Application startup and lifecycle management.

use axum::{middleware::from_fn, routing::get, Json, Router};
use service_core::error::AppError;
use service_core::middleware::{
    make_request_span, metrics_middleware, request_id_middleware, security_headers_middleware,
    OPENAPI_JSON_PATH,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::VillaConfig;
use crate::handlers::{self, villas};
use crate::{ApiDoc, AppState};

pub fn build_router(state: AppState) -> Router {
    let villa_routes = Router::new()
        .route("/", get(villas::list_villas).post(villas::create_villa))
        .route(
            "/:id",
            get(villas::get_villa)
                .put(villas::update_villa)
                .patch(villas::patch_villa)
                .delete(villas::delete_villa),
        );

    let mut app = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics));

    if state.config.swagger_enabled {
        app = app.merge(SwaggerUi::new("/docs").url(OPENAPI_JSON_PATH, ApiDoc::openapi()));
    } else {
        // Without the UI the OpenAPI document is still served for tooling.
        app = app.route(OPENAPI_JSON_PATH, get(|| async { Json(ApiDoc::openapi()) }));
    }

    app.nest(villas::VILLAS_PATH, villa_routes)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<axum::body::Body>))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Bind the listener and wire the in-memory store into the router.
    pub async fn build(config: VillaConfig) -> Result<Self, AppError> {
        let address = config.server.bind_address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", address, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        if config.seed_demo_data {
            tracing::info!("Seeding demo villas");
        }
        let state = AppState::in_memory(config);

        tracing::info!("{} listening on port {}", state.config.service_name, port);

        Ok(Self {
            port,
            listener,
            router: build_router(state),
        })
    }

    /// Port the server is bound to (useful when configured with port 0).
    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        axum::serve(self.listener, self.router).await
    }
}
