//! Food diary: log entries with a nutrition snapshot, list a day by meal

use super::resolve_date;
use crate::error::ApiError;
use crate::repositories::{CreateFoodEntry, FoodEntryRepository};
use chrono::NaiveDate;
use ml_fitness_shared::diary::DailyDiary;
use ml_fitness_shared::models::FoodEntry;
use ml_fitness_shared::types::LogFoodRequest;
use ml_fitness_shared::validation::{
    check_field, validate_calories, validate_not_blank, validate_serving_count,
};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

fn validate(req: &LogFoodRequest) -> Result<(), ApiError> {
    check_field("name", validate_not_blank(&req.name, "Food name"))?;
    check_field("serving_count", validate_serving_count(req.serving_count))?;
    check_field("calories", validate_calories(req.nutrition.calories))?;

    let n = &req.nutrition;
    let macros = [
        ("protein_g", n.protein_g),
        ("carbs_g", n.carbs_g),
        ("fat_g", n.fat_g),
        ("fiber_g", n.fiber_g),
        ("sugar_g", n.sugar_g),
        ("sodium_mg", n.sodium_mg),
    ];
    if let Some((field, _)) = macros.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
        return Err(ApiError::InvalidField {
            field: field.to_string(),
            message: "cannot be negative".to_string(),
        });
    }
    Ok(())
}

pub struct DiaryService;

impl DiaryService {
    pub async fn log_food(
        pool: &PgPool,
        user_id: Uuid,
        req: LogFoodRequest,
    ) -> Result<FoodEntry, ApiError> {
        validate(&req)?;

        let input = CreateFoodEntry {
            user_id,
            date: resolve_date(req.date),
            meal_type: req.meal_type,
            name: req.name.trim().to_string(),
            brand: req.brand,
            barcode: req.barcode,
            serving_size: req.serving_size.unwrap_or_else(|| "1".to_string()),
            serving_unit: req.serving_unit.unwrap_or_else(|| "serving".to_string()),
            serving_count: req.serving_count,
            nutrition: req.nutrition,
        };

        let record = FoodEntryRepository::create(pool, input)
            .await
            .map_err(ApiError::Internal)?;

        debug!(user_id = %user_id, meal = %record.meal_type, "Food entry logged");
        FoodEntry::try_from(record).map_err(ApiError::Internal)
    }

    pub async fn delete_entry(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let deleted = FoodEntryRepository::delete(pool, id, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Food entry not found".to_string()));
        }
        Ok(())
    }

    pub async fn day(pool: &PgPool, user_id: Uuid, date: NaiveDate) -> Result<DailyDiary, ApiError> {
        let entries = FoodEntryRepository::list_by_date(pool, user_id, date)
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .map(FoodEntry::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(ApiError::Internal)?;

        Ok(DailyDiary::build(date, entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ml_fitness_shared::models::{MealType, NutritionFacts};

    fn request() -> LogFoodRequest {
        LogFoodRequest {
            date: None,
            meal_type: MealType::Breakfast,
            name: "Oatmeal".to_string(),
            brand: None,
            barcode: None,
            serving_size: None,
            serving_unit: None,
            serving_count: 1.5,
            nutrition: NutritionFacts {
                calories: 150.0,
                protein_g: 5.0,
                carbs_g: 27.0,
                fat_g: 3.0,
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(validate(&request()).is_ok());
    }

    #[test]
    fn test_negative_macro_is_rejected() {
        let mut req = request();
        req.nutrition.fat_g = -1.0;
        match validate(&req) {
            Err(ApiError::InvalidField { field, .. }) => assert_eq!(field, "fat_g"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_blank_name_and_zero_servings_are_rejected() {
        let mut req = request();
        req.name = " ".to_string();
        assert!(validate(&req).is_err());

        let mut req = request();
        req.serving_count = 0.0;
        assert!(validate(&req).is_err());
    }
}
