//! HTTP routing
//!
//! Everything under `/api/v1` except the meal plan catalog requires a bearer
//! token. Operational endpoints sit at the root.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod dashboard;
mod diary;
mod exercise;
mod foods;
mod goals;
mod health;
mod meal_plans;
mod profile;
mod supplements;
mod water;
mod weight;


pub use auth::auth_routes;
pub use dashboard::dashboard_routes;
pub use diary::diary_routes;
pub use exercise::exercise_routes;
pub use foods::food_routes;
pub use goals::goal_routes;
pub use meal_plans::meal_plan_routes;
pub use profile::profile_routes;
pub use supplements::supplement_routes;
pub use water::water_routes;
pub use weight::weight_routes;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(health::metrics))
        .nest("/api/v1", api_routes())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "ML Fitness API v1" }))
        .nest("/auth", auth_routes())
        .nest("/profile", profile_routes())
        .nest("/foods", food_routes())
        .nest("/diary", diary_routes())
        .nest("/water", water_routes())
        .nest("/exercise", exercise_routes())
        .nest("/weight", weight_routes())
        .nest("/supplements", supplement_routes())
        .nest("/goals", goal_routes())
        .nest("/meal-plans", meal_plan_routes())
        .nest("/dashboard", dashboard_routes())
}
