//! Exercise routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::{parse_date, ExerciseService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use ml_fitness_shared::models::ExerciseEntry;
use ml_fitness_shared::types::{DailyExerciseResponse, LogExerciseRequest};
use uuid::Uuid;

pub fn exercise_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(log_exercise))
        .route("/entries/:id", delete(delete_entry))
        .route("/:date", get(get_day))
}

/// POST /api/v1/exercise
async fn log_exercise(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<LogExerciseRequest>,
) -> ApiResult<(StatusCode, Json<ExerciseEntry>)> {
    let entry = ExerciseService::log(state.db(), auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// DELETE /api/v1/exercise/entries/:id
async fn delete_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    ExerciseService::delete_entry(state.db(), auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/exercise/:date
async fn get_day(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(date): Path<String>,
) -> ApiResult<Json<DailyExerciseResponse>> {
    let date = parse_date(Some(&date))?;
    let day = ExerciseService::day(state.db(), auth.user_id, date).await?;
    Ok(Json(day))
}
