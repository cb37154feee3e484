//! Exercise sessions

use super::resolve_date;
use crate::error::ApiError;
use crate::repositories::{CreateExerciseEntry, ExerciseRepository};
use chrono::NaiveDate;
use ml_fitness_shared::models::ExerciseEntry;
use ml_fitness_shared::types::{DailyExerciseResponse, LogExerciseRequest};
use ml_fitness_shared::validation::{
    check_field, validate_calories, validate_duration_minutes, validate_not_blank,
};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

pub struct ExerciseService;

impl ExerciseService {
    pub async fn log(
        pool: &PgPool,
        user_id: Uuid,
        req: LogExerciseRequest,
    ) -> Result<ExerciseEntry, ApiError> {
        check_field("name", validate_not_blank(&req.name, "Exercise name"))?;
        check_field(
            "duration_minutes",
            validate_duration_minutes(req.duration_minutes),
        )?;
        check_field("calories_burned", validate_calories(req.calories_burned))?;

        let category = req
            .category
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "general".to_string());

        let record = ExerciseRepository::create(
            pool,
            CreateExerciseEntry {
                user_id,
                date: resolve_date(req.date),
                name: req.name.trim().to_string(),
                category,
                duration_minutes: req.duration_minutes,
                calories_burned: req.calories_burned,
                notes: req.notes,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        debug!(user_id = %user_id, minutes = record.duration_minutes, "Exercise logged");
        Ok(record.into())
    }

    pub async fn delete_entry(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let deleted = ExerciseRepository::delete(pool, id, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Exercise entry not found".to_string()));
        }
        Ok(())
    }

    pub async fn day(
        pool: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<DailyExerciseResponse, ApiError> {
        let entries: Vec<ExerciseEntry> = ExerciseRepository::list_by_date(pool, user_id, date)
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .map(ExerciseEntry::from)
            .collect();

        Ok(DailyExerciseResponse {
            date,
            total_minutes: entries.iter().map(|e| e.duration_minutes).sum(),
            total_calories_burned: entries.iter().map(|e| e.calories_burned).sum(),
            entries,
        })
    }
}
