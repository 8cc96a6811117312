//! Frame analysis endpoints
//!
//! Landmarks are accepted as raw JSON values so that non-numeric
//! coordinates come back as an in-band `error` status rather than a
//! request rejection.

use axum::{extract::State, routing::post, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::pipeline::{AnalysisResult, FrameStatus};
use crate::session::DEFAULT_SESSION_ID;
use crate::AppState;

fn default_exercise_type() -> String {
    "push-up".to_string()
}

/// POST /api/real-time-analysis request body
#[derive(Debug, Deserialize)]
pub struct RealTimeRequest {
    #[serde(default = "default_exercise_type", alias = "exerciseType")]
    pub exercise_type: String,
    #[serde(default, alias = "sessionId")]
    pub session_id: Option<String>,
    #[serde(default)]
    pub landmarks: Option<Vec<Value>>,
}

#[derive(Debug, Serialize)]
pub struct RealTimeResponse {
    pub success: bool,
    pub exercise_type: String,
    pub session_id: String,
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub timestamp: DateTime<Utc>,
}

/// POST /api/analyze-form request body
#[derive(Debug, Deserialize)]
pub struct AnalyzeFormRequest {
    #[serde(default = "default_exercise_type", alias = "exerciseName")]
    pub exercise_type: String,
    #[serde(default, alias = "sessionId")]
    pub session_id: Option<String>,
    /// One entry per frame; `null` for frames with no detected person
    pub frames: Vec<Option<Vec<Value>>>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeFormResponse {
    pub success: bool,
    pub exercise_type: String,
    /// Highest count reached across frames
    pub total_count: u32,
    pub calories: f64,
    /// Status of the last frame
    pub status: FrameStatus,
    /// Feedback of the last frame
    pub feedback: String,
    pub frame_analysis: Vec<AnalysisResult>,
    pub timestamp: DateTime<Utc>,
}

/// POST /api/real-time-analysis
///
/// Analyzes one frame against a caller-scoped session.
pub async fn real_time_analysis(
    State(state): State<AppState>,
    Json(request): Json<RealTimeRequest>,
) -> Json<RealTimeResponse> {
    let session_id = request
        .session_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());

    let result = state.pipeline.analyze_json(
        request.landmarks.as_deref(),
        &request.exercise_type,
        &session_id,
    );

    Json(RealTimeResponse {
        success: true,
        exercise_type: request.exercise_type,
        session_id,
        result,
        timestamp: Utc::now(),
    })
}

/// POST /api/analyze-form
///
/// Analyzes an ordered batch of frames through one session. Without a
/// `session_id` the batch runs in a throw-away session that is removed
/// afterwards.
pub async fn analyze_form(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeFormRequest>,
) -> ApiResult<Json<AnalyzeFormResponse>> {
    if request.frames.is_empty() {
        return Err(ApiError::BadRequest("No frames provided".to_string()));
    }

    let (session_id, ephemeral) = match request.session_id.filter(|id| !id.is_empty()) {
        Some(id) => (id, false),
        None => (format!("batch-{}", Uuid::new_v4()), true),
    };

    let pipeline = &state.pipeline;
    let frame_analysis: Vec<AnalysisResult> = request
        .frames
        .iter()
        .map(|frame| pipeline.analyze_json(frame.as_deref(), &request.exercise_type, &session_id))
        .collect();

    if ephemeral {
        pipeline.sessions().remove(&session_id);
    }

    let total_count = frame_analysis.iter().map(|r| r.count).max().unwrap_or(0);
    let calories = frame_analysis
        .iter()
        .map(|r| r.calories)
        .fold(0.0_f64, f64::max);
    let (status, feedback) = frame_analysis
        .last()
        .map(|r| (r.status, r.feedback.clone()))
        .ok_or_else(|| ApiError::Internal("No analysis available".to_string()))?;

    info!(
        "Analyzed {} frames of {}: {} reps",
        frame_analysis.len(),
        request.exercise_type,
        total_count
    );

    Ok(Json(AnalyzeFormResponse {
        success: true,
        exercise_type: request.exercise_type,
        total_count,
        calories,
        status,
        feedback,
        frame_analysis,
        timestamp: Utc::now(),
    }))
}

pub fn analysis_routes() -> Router<AppState> {
    Router::new()
        .route("/api/real-time-analysis", post(real_time_analysis))
        .route("/api/analyze-form", post(analyze_form))
}
