//! Weigh-ins, one row per log

use super::decimal_to_f64;
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use ml_fitness_shared::models::WeightEntry;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WeightEntryRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub entry_date: NaiveDate,
    pub weight_kg: Decimal,
    pub notes: Option<String>,
    pub logged_at: DateTime<Utc>,
}

impl From<WeightEntryRecord> for WeightEntry {
    fn from(r: WeightEntryRecord) -> Self {
        Self {
            id: r.id,
            date: r.entry_date,
            weight_kg: decimal_to_f64(r.weight_kg),
            notes: r.notes,
            logged_at: r.logged_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateWeightEntry {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub weight_kg: f64,
    pub notes: Option<String>,
}

pub struct WeightRepository;

impl WeightRepository {
    pub async fn create(pool: &PgPool, input: CreateWeightEntry) -> Result<WeightEntryRecord> {
        let record = sqlx::query_as::<_, WeightEntryRecord>(
            r#"
            INSERT INTO weight_entries (user_id, entry_date, weight_kg, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, entry_date, weight_kg, notes, logged_at
            "#,
        )
        .bind(input.user_id)
        .bind(input.date)
        .bind(input.weight_kg)
        .bind(&input.notes)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Newest first, optionally bounded below by `since`
    pub async fn history(
        pool: &PgPool,
        user_id: Uuid,
        since: Option<NaiveDate>,
    ) -> Result<Vec<WeightEntryRecord>> {
        let records = sqlx::query_as::<_, WeightEntryRecord>(
            r#"
            SELECT id, user_id, entry_date, weight_kg, notes, logged_at
            FROM weight_entries
            WHERE user_id = $1 AND ($2::DATE IS NULL OR entry_date >= $2)
            ORDER BY entry_date DESC, logged_at DESC
            "#,
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Most recent weigh-in on or before `on_or_before`
    pub async fn latest(
        pool: &PgPool,
        user_id: Uuid,
        on_or_before: NaiveDate,
    ) -> Result<Option<WeightEntryRecord>> {
        let record = sqlx::query_as::<_, WeightEntryRecord>(
            r#"
            SELECT id, user_id, entry_date, weight_kg, notes, logged_at
            FROM weight_entries
            WHERE user_id = $1 AND entry_date <= $2
            ORDER BY entry_date DESC, logged_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(on_or_before)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM weight_entries
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
