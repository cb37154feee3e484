//! Goal routes
//!
//! Progress updates that reach the target complete the goal; a completed goal
//! can be reopened with `/reactivate`.

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::GoalService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use ml_fitness_shared::goals::{Goal, GoalStatistics};
use ml_fitness_shared::types::{
    CreateGoalRequest, GoalListQuery, GoalListResponse, ReactivateGoalRequest,
    UpcomingGoalsQuery, UpdateGoalProgressRequest, UpdateGoalRequest,
};
use uuid::Uuid;

pub fn goal_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_goal).get(list_goals))
        .route("/statistics", get(get_statistics))
        .route("/upcoming", get(get_upcoming))
        .route("/:id", get(get_goal).put(update_goal).delete(delete_goal))
        .route("/:id/progress", put(update_progress))
        .route("/:id/complete", post(complete_goal))
        .route("/:id/reactivate", post(reactivate_goal))
}

/// POST /api/v1/goals
async fn create_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateGoalRequest>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
    let goal = GoalService::create(state.db(), auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

/// GET /api/v1/goals?active_only=
async fn list_goals(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<GoalListQuery>,
) -> ApiResult<Json<GoalListResponse>> {
    let goals = GoalService::list(state.db(), auth.user_id, query.active_only).await?;
    Ok(Json(GoalListResponse { goals }))
}

/// GET /api/v1/goals/statistics
async fn get_statistics(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<GoalStatistics>> {
    let stats = GoalService::statistics(state.db(), auth.user_id).await?;
    Ok(Json(stats))
}

/// GET /api/v1/goals/upcoming?days=
///
/// Active goals whose deadline falls within the next `days` days (default 7).
async fn get_upcoming(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<UpcomingGoalsQuery>,
) -> ApiResult<Json<GoalListResponse>> {
    let goals = GoalService::upcoming(state.db(), auth.user_id, query.days).await?;
    Ok(Json(GoalListResponse { goals }))
}

async fn get_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Goal>> {
    let goal = GoalService::get(state.db(), auth.user_id, id).await?;
    Ok(Json(goal))
}

async fn update_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateGoalRequest>,
) -> ApiResult<Json<Goal>> {
    let goal = GoalService::update(state.db(), auth.user_id, id, req).await?;
    Ok(Json(goal))
}

async fn delete_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    GoalService::delete(state.db(), auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/goals/:id/progress
async fn update_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateGoalProgressRequest>,
) -> ApiResult<Json<Goal>> {
    let goal = GoalService::update_progress(state.db(), auth.user_id, id, req.current_value).await?;
    Ok(Json(goal))
}

/// POST /api/v1/goals/:id/complete
async fn complete_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Goal>> {
    let goal = GoalService::complete(state.db(), auth.user_id, id).await?;
    Ok(Json(goal))
}

/// POST /api/v1/goals/:id/reactivate
///
/// The body is optional; a new deadline may be given.
async fn reactivate_goal(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    body: Option<Json<ReactivateGoalRequest>>,
) -> ApiResult<Json<Goal>> {
    let deadline = body.and_then(|Json(req)| req.deadline);
    let goal = GoalService::reactivate(state.db(), auth.user_id, id, deadline).await?;
    Ok(Json(goal))
}
