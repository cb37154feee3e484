//! Water intake, stored in fluid ounces

use super::decimal_to_f64;
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use ml_fitness_shared::models::WaterEntry;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct WaterEntryRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub entry_date: NaiveDate,
    pub amount_oz: Decimal,
    pub logged_at: DateTime<Utc>,
}

impl From<WaterEntryRecord> for WaterEntry {
    fn from(r: WaterEntryRecord) -> Self {
        Self {
            id: r.id,
            date: r.entry_date,
            amount_oz: decimal_to_f64(r.amount_oz),
            logged_at: r.logged_at,
        }
    }
}

pub struct WaterRepository;

impl WaterRepository {
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
        amount_oz: f64,
    ) -> Result<WaterEntryRecord> {
        let record = sqlx::query_as::<_, WaterEntryRecord>(
            r#"
            INSERT INTO water_entries (user_id, entry_date, amount_oz)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, entry_date, amount_oz, logged_at
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(amount_oz)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    pub async fn list_by_date(
        pool: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<WaterEntryRecord>> {
        let records = sqlx::query_as::<_, WaterEntryRecord>(
            r#"
            SELECT id, user_id, entry_date, amount_oz, logged_at
            FROM water_entries
            WHERE user_id = $1 AND entry_date = $2
            ORDER BY logged_at
            "#,
        )
        .bind(user_id)
        .bind(date)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    pub async fn total_oz(
        pool: &PgPool,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<f64> {
        let total = sqlx::query_scalar::<_, Option<Decimal>>(
            r#"
            SELECT SUM(amount_oz)
            FROM water_entries
            WHERE user_id = $1 AND entry_date BETWEEN $2 AND $3
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await?;

        Ok(total.map(decimal_to_f64).unwrap_or(0.0))
    }

    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM water_entries
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
