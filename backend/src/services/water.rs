//! Water intake. Amounts are converted to fluid ounces before storage.

use super::resolve_date;
use crate::error::ApiError;
use crate::repositories::{ProfileRepository, WaterRepository};
use chrono::NaiveDate;
use ml_fitness_shared::diary::{last_water_entry, DailyWater, OZ_PER_CUP};
use ml_fitness_shared::models::WaterEntry;
use ml_fitness_shared::types::LogWaterRequest;
use ml_fitness_shared::validation::{check_field, validate_water_oz};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

const DEFAULT_GOAL_CUPS: i32 = 8;

pub struct WaterService;

impl WaterService {
    pub async fn log(
        pool: &PgPool,
        user_id: Uuid,
        req: LogWaterRequest,
    ) -> Result<WaterEntry, ApiError> {
        let amount_oz = req.unit.to_fl_oz(req.amount);
        check_field("amount", validate_water_oz(amount_oz))?;

        Self::insert(pool, user_id, resolve_date(req.date), amount_oz).await
    }

    /// One 8 oz cup
    pub async fn add_cup(
        pool: &PgPool,
        user_id: Uuid,
        date: Option<NaiveDate>,
    ) -> Result<WaterEntry, ApiError> {
        Self::insert(pool, user_id, resolve_date(date), OZ_PER_CUP).await
    }

    /// Undo the most recent log of the day
    pub async fn remove_last(
        pool: &PgPool,
        user_id: Uuid,
        date: Option<NaiveDate>,
    ) -> Result<WaterEntry, ApiError> {
        let date = resolve_date(date);
        let entries = Self::entries(pool, user_id, date).await?;
        let last = last_water_entry(&entries)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("No water logged for this day".to_string()))?;

        WaterRepository::delete(pool, last.id, user_id)
            .await
            .map_err(ApiError::Internal)?;

        debug!(user_id = %user_id, date = %date, "Removed last water entry");
        Ok(last)
    }

    pub async fn delete_entry(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let deleted = WaterRepository::delete(pool, id, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Water entry not found".to_string()));
        }
        Ok(())
    }

    pub async fn day(pool: &PgPool, user_id: Uuid, date: NaiveDate) -> Result<DailyWater, ApiError> {
        let goal_cups = ProfileRepository::get(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .map(|p| p.daily_water_goal_cups)
            .unwrap_or(DEFAULT_GOAL_CUPS);
        let entries = Self::entries(pool, user_id, date).await?;

        Ok(DailyWater::build(date, entries, goal_cups))
    }

    async fn insert(
        pool: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
        amount_oz: f64,
    ) -> Result<WaterEntry, ApiError> {
        let record = WaterRepository::create(pool, user_id, date, amount_oz)
            .await
            .map_err(ApiError::Internal)?;

        debug!(user_id = %user_id, amount_oz, "Water logged");
        Ok(record.into())
    }

    async fn entries(
        pool: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<WaterEntry>, ApiError> {
        Ok(WaterRepository::list_by_date(pool, user_id, date)
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .map(WaterEntry::from)
            .collect())
    }
}
