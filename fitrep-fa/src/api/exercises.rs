//! Exercise catalog endpoints

use axum::{
    extract::{Path, Query},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{self, ExerciseInstructions, FitnessLevel};
use crate::classifier::ExerciseKind;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ExerciseListResponse {
    pub exercises: Vec<ExerciseKind>,
}

/// GET /api/exercises
pub async fn list_exercises() -> Json<ExerciseListResponse> {
    Json(ExerciseListResponse {
        exercises: ExerciseKind::ALL.to_vec(),
    })
}

/// GET /api/exercises/:exercise_type
pub async fn get_instructions(
    Path(exercise_type): Path<String>,
) -> ApiResult<Json<&'static ExerciseInstructions>> {
    let kind = exercise_type
        .parse::<ExerciseKind>()
        .map_err(|e| ApiError::NotFound(e.to_string()))?;
    Ok(Json(catalog::instructions(kind)))
}

/// GET /api/exercise-suggestions query parameters
#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    #[serde(default, alias = "fitnessLevel")]
    pub fitness_level: Option<String>,
    /// Comma-separated goal names
    #[serde(default)]
    pub goals: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub success: bool,
    /// Level actually used for the lookup
    pub fitness_level: FitnessLevel,
    pub goals: Vec<String>,
    pub recommended_exercises: Vec<&'static str>,
    pub timestamp: DateTime<Utc>,
}

/// GET /api/exercise-suggestions
pub async fn exercise_suggestions(
    Query(query): Query<SuggestionQuery>,
) -> Json<SuggestionResponse> {
    let fitness_level =
        FitnessLevel::parse_or_beginner(query.fitness_level.as_deref().unwrap_or(""));
    let goals: Vec<String> = query
        .goals
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|goal| !goal.is_empty())
        .map(str::to_string)
        .collect();

    let recommended_exercises =
        catalog::suggestions(fitness_level, goals.iter().map(String::as_str));

    Json(SuggestionResponse {
        success: true,
        fitness_level,
        goals,
        recommended_exercises,
        timestamp: Utc::now(),
    })
}

pub fn exercise_routes() -> Router<AppState> {
    Router::new()
        .route("/api/exercises", get(list_exercises))
        .route("/api/exercises/:exercise_type", get(get_instructions))
        .route("/api/exercise-suggestions", get(exercise_suggestions))
}
