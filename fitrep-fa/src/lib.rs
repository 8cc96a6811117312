//! # FitRep Form Analyzer Library (fitrep-fa)
//!
//! Turns a stream of 33-point body landmarks into exercise repetition
//! counts, workout stage, calorie estimates, and coaching feedback, per
//! user session.
//!
//! **Architecture:** landmarks → [`angle`] → [`classifier`] state machines,
//! with per-session state held by [`session::SessionStore`] and the whole
//! flow driven by [`pipeline::FrameAnalysisPipeline`]. [`api`] is a thin
//! axum surface over the pipeline.

pub mod angle;
pub mod api;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod session;

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};

pub use classifier::{ExerciseKind, ExerciseState, Stage};
pub use error::{AnalysisError, ApiError, ApiResult};
pub use pipeline::{AnalysisResult, FrameAnalysisPipeline, FrameStatus};
pub use session::SessionStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<FrameAnalysisPipeline>,
    /// Service startup timestamp for uptime reporting
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(pipeline: FrameAnalysisPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health_routes())
        .merge(api::analysis_routes())
        .merge(api::session_routes())
        .merge(api::exercise_routes())
        .with_state(state)
}
