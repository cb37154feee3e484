//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod exercise;
pub mod food;
pub mod goals;
pub mod profile;
pub mod supplements;
pub mod user;
pub mod water;
pub mod weight;

pub use exercise::{CreateExerciseEntry, ExerciseRepository};
pub use food::{CreateFoodEntry, FoodEntryRepository, FoodItemRepository};
pub use goals::{CreateGoal, GoalRepository};
pub use profile::{ProfileRecord, ProfileRepository, UpdateProfile};
pub use supplements::{SupplementEntryRepository, SupplementRegimeRepository};
pub use user::UserRepository;
pub use water::WaterRepository;
pub use weight::{CreateWeightEntry, WeightRepository};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// NUMERIC columns come back as `Decimal`; the domain works in `f64`
pub(crate) fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_decimal_to_f64() {
        assert_eq!(decimal_to_f64(Decimal::from_str("72.5").unwrap()), 72.5);
        assert_eq!(decimal_to_f64(Decimal::ZERO), 0.0);
    }
}
