//! Water routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::{parse_date, WaterService};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use ml_fitness_shared::diary::DailyWater;
use ml_fitness_shared::models::WaterEntry;
use ml_fitness_shared::types::{LogWaterRequest, WaterCupRequest};
use uuid::Uuid;

pub fn water_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(log_water))
        .route("/cup", post(add_cup).delete(remove_cup))
        .route("/entries/:id", delete(delete_entry))
        .route("/:date", get(get_day))
}

/// POST /api/v1/water
async fn log_water(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<LogWaterRequest>,
) -> ApiResult<(StatusCode, Json<WaterEntry>)> {
    let entry = WaterService::log(state.db(), auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// POST /api/v1/water/cup?date=
async fn add_cup(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<WaterCupRequest>,
) -> ApiResult<(StatusCode, Json<WaterEntry>)> {
    let entry = WaterService::add_cup(state.db(), auth.user_id, query.date).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// DELETE /api/v1/water/cup?date=
///
/// Removes the day's most recent entry and returns it.
async fn remove_cup(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<WaterCupRequest>,
) -> ApiResult<Json<WaterEntry>> {
    let removed = WaterService::remove_last(state.db(), auth.user_id, query.date).await?;
    Ok(Json(removed))
}

/// DELETE /api/v1/water/entries/:id
async fn delete_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    WaterService::delete_entry(state.db(), auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/water/:date
async fn get_day(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(date): Path<String>,
) -> ApiResult<Json<DailyWater>> {
    let date = parse_date(Some(&date))?;
    let water = WaterService::day(state.db(), auth.user_id, date).await?;
    Ok(Json(water))
}
