//! HTTP handlers for villa-service.

pub mod health;
pub mod villas;

pub use health::{health_check, metrics, readiness_check};
