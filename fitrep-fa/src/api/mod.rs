//! HTTP API handlers for fitrep-fa

pub mod analysis;
pub mod exercises;
pub mod health;
pub mod sessions;

pub use analysis::analysis_routes;
pub use exercises::exercise_routes;
pub use health::health_routes;
pub use sessions::session_routes;
