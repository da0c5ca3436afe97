pub mod metrics;
pub mod repository;

pub use repository::{InMemoryVillaRepository, VillaRepository};
