//! Supplement routes: catalog, barcode lookup, diary entries and regimes
//!
//! The catalog routes read the shared in-memory catalog; additions made
//! through `POST /catalog` last until the process restarts.

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::services::supplements::search_catalog;
use crate::services::{parse_date, SupplementService};
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use ml_fitness_shared::models::SupplementEntry;
use ml_fitness_shared::supplements::{Supplement, SupplementRegime};
use ml_fitness_shared::types::{
    CreateRegimeRequest, DateQuery, LogSupplementRequest, SupplementCatalogQuery,
    SupplementLookupResponse, UpdateRegimeRequest,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Default, Deserialize)]
struct RegimeListQuery {
    #[serde(default)]
    active_only: bool,
}

#[derive(Debug, Default, Deserialize)]
struct LogDateQuery {
    date: Option<NaiveDate>,
}

pub fn supplement_routes() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(search_catalog_route).post(add_to_catalog))
        .route("/catalog/categories", get(list_categories))
        .route("/catalog/dpn/:dpn", get(lookup_dpn))
        .route("/barcode/:code", get(lookup_barcode))
        .route("/entries", post(log_supplement).get(list_entries))
        .route("/entries/:id", delete(delete_entry))
        .route("/regimes", post(create_regime).get(list_regimes))
        .route(
            "/regimes/:id",
            get(get_regime).put(update_regime).delete(delete_regime),
        )
        .route("/regimes/:id/toggle", post(toggle_regime))
        .route("/regimes/:id/log", post(log_regime))
}

/// GET /api/v1/supplements/catalog?name=&category=&gender=
async fn search_catalog_route(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<SupplementCatalogQuery>,
) -> ApiResult<Json<Vec<Supplement>>> {
    let catalog = state.catalog.read().await;
    Ok(Json(search_catalog(&catalog, &query)))
}

/// POST /api/v1/supplements/catalog
async fn add_to_catalog(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(supplement): Json<Supplement>,
) -> ApiResult<(StatusCode, Json<Supplement>)> {
    let mut catalog = state.catalog.write().await;
    let added = SupplementService::add_to_catalog(&mut catalog, supplement)?;
    Ok((StatusCode::CREATED, Json(added)))
}

/// GET /api/v1/supplements/catalog/categories
async fn list_categories(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<String>>> {
    Ok(Json(state.catalog.read().await.categories()))
}

/// GET /api/v1/supplements/catalog/dpn/:dpn
async fn lookup_dpn(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(dpn): Path<String>,
) -> ApiResult<Json<Supplement>> {
    state
        .catalog
        .read()
        .await
        .search_by_dpn(dpn.trim())
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No supplement with DPN {}", dpn)))
}

/// GET /api/v1/supplements/barcode/:code
///
/// Catalog first, then DSLD, Open Food Facts, USDA and Nutritionix.
async fn lookup_barcode(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(code): Path<String>,
) -> ApiResult<Json<SupplementLookupResponse>> {
    let response =
        SupplementService::lookup_barcode(&state.catalog, &state.nutrition().supplements, &code)
            .await?;
    Ok(Json(response))
}

/// POST /api/v1/supplements/entries
async fn log_supplement(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<LogSupplementRequest>,
) -> ApiResult<(StatusCode, Json<SupplementEntry>)> {
    let entry = SupplementService::log(state.db(), auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/supplements/entries?date=
async fn list_entries(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<DateQuery>,
) -> ApiResult<Json<Vec<SupplementEntry>>> {
    let date = parse_date(query.date.as_deref())?;
    let entries = SupplementService::day(state.db(), auth.user_id, date).await?;
    Ok(Json(entries))
}

/// DELETE /api/v1/supplements/entries/:id
async fn delete_entry(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    SupplementService::delete_entry(state.db(), auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/supplements/regimes
async fn create_regime(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateRegimeRequest>,
) -> ApiResult<(StatusCode, Json<SupplementRegime>)> {
    let regime = SupplementService::create_regime(state.db(), auth.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(regime)))
}

/// GET /api/v1/supplements/regimes?active_only=
async fn list_regimes(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<RegimeListQuery>,
) -> ApiResult<Json<Vec<SupplementRegime>>> {
    let regimes =
        SupplementService::list_regimes(state.db(), auth.user_id, query.active_only).await?;
    Ok(Json(regimes))
}

async fn get_regime(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SupplementRegime>> {
    let regime = SupplementService::get_regime(state.db(), auth.user_id, id).await?;
    Ok(Json(regime))
}

async fn update_regime(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateRegimeRequest>,
) -> ApiResult<Json<SupplementRegime>> {
    let regime = SupplementService::update_regime(state.db(), auth.user_id, id, req).await?;
    Ok(Json(regime))
}

async fn delete_regime(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    SupplementService::delete_regime(state.db(), auth.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/supplements/regimes/:id/toggle
async fn toggle_regime(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<SupplementRegime>> {
    let regime = SupplementService::toggle_regime(state.db(), auth.user_id, id).await?;
    Ok(Json(regime))
}

/// POST /api/v1/supplements/regimes/:id/log?date=
///
/// Logs every supplement in the regime for the day.
async fn log_regime(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(query): Query<LogDateQuery>,
) -> ApiResult<(StatusCode, Json<Vec<SupplementEntry>>)> {
    let entries = SupplementService::log_regime(state.db(), auth.user_id, id, query.date).await?;
    Ok((StatusCode::CREATED, Json(entries)))
}
