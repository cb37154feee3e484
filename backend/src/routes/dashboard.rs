//! Dashboard route

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::{parse_date, DashboardService};
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use ml_fitness_shared::types::{DashboardQuery, DashboardResponse};

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/", get(get_dashboard))
}

/// GET /api/v1/dashboard?date=YYYY-MM-DD&period=day|week|month
///
/// The period ends on `date` (today when omitted).
async fn get_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<Json<DashboardResponse>> {
    let end_date = parse_date(query.date.as_deref())?;
    let period = query.period.unwrap_or_default();

    let response = DashboardService::summary(state.db(), auth.user_id, end_date, period).await?;
    Ok(Json(response))
}
