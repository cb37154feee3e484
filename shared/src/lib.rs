//! ML Fitness shared library
//!
//! Domain logic and API types used by the backend and the WASM module:
//! unit conversions, energy calculations, meal plans, the supplement catalog
//! and the diary and dashboard aggregations.

pub mod dashboard;
pub mod diary;
pub mod errors;
pub mod goals;
pub mod health_metrics;
pub mod meal_plans;
pub mod models;
pub mod restaurants;
pub mod supplements;
pub mod types;
pub mod units;
pub mod validation;

pub use errors::*;
pub use health_metrics::*;
pub use units::*;

pub use models::{
    ExerciseEntry, FoodEntry, FoodItem, MealType, NutritionFacts, SupplementEntry, SupplementInfo,
    WaterEntry, WeightEntry,
};
