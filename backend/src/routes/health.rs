//! Operational endpoints
//!
//! - `/health` answers as long as the process is up
//! - `/health/ready` also checks the database and reports which lookup
//!   providers are configured
//! - `/health/live` is the liveness probe
//! - `/metrics` renders the Prometheus registry when a recorder is installed

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

const SERVICE_NAME: &str = "ml-fitness-backend";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checks: Option<ReadinessChecks>,
}

#[derive(Debug, Serialize)]
pub struct ReadinessChecks {
    pub database: CheckStatus,
    /// Barcode providers in the order they are asked
    pub food_providers: Vec<&'static str>,
    pub supplement_providers: Vec<&'static str>,
    pub mock_fallback: bool,
}

#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn respond(status: &'static str, checks: Option<ReadinessChecks>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status,
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        checks,
    })
}

pub async fn health_check() -> Json<HealthResponse> {
    respond("healthy", None)
}

/// 503 when the database cannot be reached; provider keys never affect
/// readiness since lookups degrade to the mock catalog
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let database = match db::health_check(state.db()).await {
        Ok(latency) => CheckStatus {
            healthy: true,
            latency_ms: Some(latency.as_millis()),
            message: None,
        },
        Err(e) => CheckStatus {
            healthy: false,
            latency_ms: None,
            message: Some(e.to_string()),
        },
    };
    let ready = database.healthy;

    let checks = ReadinessChecks {
        database,
        food_providers: state.nutrition().foods.provider_names(),
        supplement_providers: state.nutrition().supplements.provider_names(),
        mock_fallback: state.config().nutrition.use_mock_fallback,
    };

    if ready {
        Ok(respond("ready", Some(checks)))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, respond("not_ready", Some(checks))))
    }
}

pub async fn liveness_check() -> Json<HealthResponse> {
    respond("alive", None)
}

/// GET /metrics
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics recorder not installed".to_string()),
    }
}
