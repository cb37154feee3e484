//! Weight routes
//!
//! Weights arrive in kg or lbs and are stored in kg.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::WeightService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use ml_fitness_shared::models::WeightEntry;
use ml_fitness_shared::types::{LogWeightRequest, WeightHistoryQuery, WeightSummaryResponse};
use uuid::Uuid;

pub fn weight_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(log_weight).get(get_history))
        .route("/summary", get(get_summary))
        .route("/entries/:id", delete(delete_entry))
}

/// POST /api/v1/weight
async fn log_weight(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<LogWeightRequest>,
) -> ApiResult<(StatusCode, Json<WeightEntry>)> {
    let entry = WeightService::log(state.db(), auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/weight?days=
async fn get_history(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<WeightHistoryQuery>,
) -> ApiResult<Json<Vec<WeightEntry>>> {
    let history = WeightService::history(state.db(), auth.user_id, query.days).await?;
    Ok(Json(history))
}

/// GET /api/v1/weight/summary
async fn get_summary(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<WeightSummaryResponse>> {
    let summary = WeightService::summary(state.db(), auth.user_id).await?;
    Ok(Json(summary))
}

/// DELETE /api/v1/weight/entries/:id
async fn delete_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    WeightService::delete_entry(state.db(), auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
