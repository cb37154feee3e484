//! Profile routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::ProfileService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use ml_fitness_shared::types::{EnergyResponse, ProfileResponse, UpdateProfileRequest};

pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_profile).put(update_profile))
        .route("/energy", get(get_energy))
}

/// GET /api/v1/profile
async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let profile = ProfileService::get(state.db(), auth.user_id).await?;
    Ok(Json(profile))
}

/// PUT /api/v1/profile
///
/// Only the fields present in the body change.
async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let profile = ProfileService::update(state.db(), auth.user_id, req).await?;
    Ok(Json(profile))
}

/// GET /api/v1/profile/energy
///
/// BMR, TDEE and the recommended calorie goal.
async fn get_energy(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<EnergyResponse>> {
    let energy = ProfileService::energy(state.db(), auth.user_id).await?;
    Ok(Json(energy))
}
