//! Food lookup routes: barcode, stored food search and restaurants

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::FoodService;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use ml_fitness_shared::models::FoodItem;
use ml_fitness_shared::types::{
    BarcodeLookupResponse, FoodSearchQuery, RestaurantSearchQuery, RestaurantSearchResponse,
};

pub fn food_routes() -> Router<AppState> {
    Router::new()
        .route("/barcode/:code", get(lookup_barcode))
        .route("/search", get(search_foods))
        .route("/restaurants", get(search_restaurants))
}

/// GET /api/v1/foods/barcode/:code
async fn lookup_barcode(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(code): Path<String>,
) -> ApiResult<Json<BarcodeLookupResponse>> {
    let response = FoodService::lookup_barcode(
        state.db(),
        &state.nutrition().foods,
        state.config().nutrition.use_mock_fallback,
        &code,
    )
    .await?;
    Ok(Json(response))
}

/// GET /api/v1/foods/search?q=&limit=
async fn search_foods(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<FoodSearchQuery>,
) -> ApiResult<Json<Vec<FoodItem>>> {
    let foods = FoodService::search(state.db(), &query.q, query.limit).await?;
    Ok(Json(foods))
}

/// GET /api/v1/foods/restaurants?q=&restaurant=
async fn search_restaurants(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<RestaurantSearchQuery>,
) -> ApiResult<Json<RestaurantSearchResponse>> {
    let response = FoodService::search_restaurants(&state.nutrition().restaurants, query).await?;
    Ok(Json(response))
}
