//! Food diary routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::{parse_date, DiaryService};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use ml_fitness_shared::diary::DailyDiary;
use ml_fitness_shared::models::FoodEntry;
use ml_fitness_shared::types::LogFoodRequest;
use uuid::Uuid;

pub fn diary_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(log_food))
        .route("/entries/:id", delete(delete_entry))
        .route("/:date", get(get_day))
}

/// POST /api/v1/diary
async fn log_food(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<LogFoodRequest>,
) -> ApiResult<(StatusCode, Json<FoodEntry>)> {
    let entry = DiaryService::log_food(state.db(), auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// DELETE /api/v1/diary/entries/:id
async fn delete_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    DiaryService::delete_entry(state.db(), auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/diary/:date
async fn get_day(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(date): Path<String>,
) -> ApiResult<Json<DailyDiary>> {
    let date = parse_date(Some(&date))?;
    let diary = DiaryService::day(state.db(), auth.user_id, date).await?;
    Ok(Json(diary))
}
