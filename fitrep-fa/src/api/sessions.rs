//! Session inspection and termination endpoints

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::session::SessionSnapshot;
use crate::AppState;

/// GET /api/sessions/:session_id
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<SessionSnapshot>> {
    state
        .pipeline
        .sessions()
        .snapshot(&session_id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("session '{}'", session_id)))
}

/// DELETE /api/sessions/:session_id
///
/// Ends a session and returns its final counters.
pub async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<SessionSnapshot>> {
    let snapshot = state
        .pipeline
        .sessions()
        .remove(&session_id)
        .ok_or_else(|| ApiError::NotFound(format!("session '{}'", session_id)))?;

    info!(
        "Session '{}' ended: {} reps, {:.2} kcal",
        session_id, snapshot.state.counter, snapshot.state.calories
    );
    Ok(Json(snapshot))
}

pub fn session_routes() -> Router<AppState> {
    Router::new().route("/api/sessions/:session_id", get(get_session).delete(end_session))
}
