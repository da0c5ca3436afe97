//! service-core: Shared HTTP infrastructure for the villa workspace.
pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod observability;
