//! Test helpers for villa-service integration tests.
//!
//! Drives the router in-process; no sockets are opened.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::util::ServiceExt;
use villa_service::{build_router, config::VillaConfig, AppState};

pub struct TestApp {
    pub state: AppState,
    router: Router,
}

impl TestApp {
    /// App over an empty store.
    pub fn spawn() -> Self {
        Self::with_config(VillaConfig::for_tests())
    }

    /// App over the two demo villas.
    pub fn spawn_seeded() -> Self {
        Self::with_config(VillaConfig {
            seed_demo_data: true,
            ..VillaConfig::for_tests()
        })
    }

    /// App with Swagger UI mounted at `/docs`.
    pub fn spawn_with_docs() -> Self {
        Self::with_config(VillaConfig {
            swagger_enabled: true,
            ..VillaConfig::for_tests()
        })
    }

    fn with_config(config: VillaConfig) -> Self {
        let state = AppState::in_memory(config);
        let router = build_router(state.clone());
        Self { state, router }
    }

    pub async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn raw_json(&self, method: &str, uri: &str, body: &'static str) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();

        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> Response {
        self.request("POST", uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> Response {
        self.request("PUT", uri, Some(body)).await
    }

    pub async fn patch(&self, uri: &str, body: Value) -> Response {
        self.request("PATCH", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> Response {
        self.request("DELETE", uri, None).await
    }

    /// POST a villa and return its assigned id, asserting 201.
    pub async fn create(&self, name: &str, occupancy: i32, sqft: f64) -> i64 {
        let response = self
            .post(
                "/villas",
                serde_json::json!({ "name": name, "occupancy": occupancy, "sqft": sqft }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body(response).await["id"].as_i64().unwrap()
    }

    pub async fn list(&self) -> Vec<Value> {
        let response = self.get("/villas").await;
        assert_eq!(response.status(), StatusCode::OK);
        json_body(response).await.as_array().unwrap().clone()
    }
}

pub async fn json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}
