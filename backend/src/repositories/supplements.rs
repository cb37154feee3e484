//! Supplement diary entries and saved regimes

use super::decimal_to_f64;
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use ml_fitness_shared::models::SupplementEntry;
use ml_fitness_shared::supplements::{RegimeSupplement, SupplementRegime};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::PgPool;
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SupplementEntryRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub entry_date: NaiveDate,
    pub name: String,
    pub brand: Option<String>,
    pub servings: Decimal,
    pub serving_unit: String,
    pub nutrients: Json<BTreeMap<String, f64>>,
    pub regime_id: Option<Uuid>,
    pub logged_at: DateTime<Utc>,
}

impl From<SupplementEntryRecord> for SupplementEntry {
    fn from(r: SupplementEntryRecord) -> Self {
        Self {
            id: r.id,
            date: r.entry_date,
            name: r.name,
            brand: r.brand,
            servings: decimal_to_f64(r.servings),
            serving_unit: r.serving_unit,
            nutrients: r.nutrients.0,
            regime_id: r.regime_id,
            logged_at: r.logged_at,
        }
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SupplementRegimeRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub supplements: Json<Vec<RegimeSupplement>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<SupplementRegimeRecord> for SupplementRegime {
    fn from(r: SupplementRegimeRecord) -> Self {
        Self {
            id: r.id,
            name: r.name,
            supplements: r.supplements.0,
            is_active: r.is_active,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

const ENTRY_COLUMNS: &str =
    "id, user_id, entry_date, name, brand, servings, serving_unit, nutrients, regime_id, logged_at";

const INSERT_ENTRY: &str = r#"
    INSERT INTO supplement_entries (user_id, entry_date, name, brand, servings,
                                    serving_unit, nutrients, regime_id, logged_at)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
"#;

pub struct SupplementEntryRepository;

impl SupplementEntryRepository {
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        entry: &SupplementEntry,
    ) -> Result<SupplementEntryRecord> {
        let record = sqlx::query_as::<_, SupplementEntryRecord>(&format!(
            "{} RETURNING {}",
            INSERT_ENTRY, ENTRY_COLUMNS
        ))
        .bind(user_id)
        .bind(entry.date)
        .bind(&entry.name)
        .bind(&entry.brand)
        .bind(entry.servings)
        .bind(&entry.serving_unit)
        .bind(Json(&entry.nutrients))
        .bind(entry.regime_id)
        .bind(entry.logged_at)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Insert a batch of entries atomically
    pub async fn create_many(
        pool: &PgPool,
        user_id: Uuid,
        entries: &[SupplementEntry],
    ) -> Result<Vec<SupplementEntryRecord>> {
        let mut tx = pool.begin().await?;
        let mut records = Vec::with_capacity(entries.len());

        for entry in entries {
            let record = sqlx::query_as::<_, SupplementEntryRecord>(&format!(
                "{} RETURNING {}",
                INSERT_ENTRY, ENTRY_COLUMNS
            ))
            .bind(user_id)
            .bind(entry.date)
            .bind(&entry.name)
            .bind(&entry.brand)
            .bind(entry.servings)
            .bind(&entry.serving_unit)
            .bind(Json(&entry.nutrients))
            .bind(entry.regime_id)
            .bind(entry.logged_at)
            .fetch_one(&mut *tx)
            .await?;
            records.push(record);
        }

        tx.commit().await?;

        Ok(records)
    }

    pub async fn list_by_date(
        pool: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<SupplementEntryRecord>> {
        let records = sqlx::query_as::<_, SupplementEntryRecord>(&format!(
            r#"
            SELECT {}
            FROM supplement_entries
            WHERE user_id = $1 AND entry_date = $2
            ORDER BY logged_at
            "#,
            ENTRY_COLUMNS
        ))
        .bind(user_id)
        .bind(date)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM supplement_entries
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

pub struct SupplementRegimeRepository;

impl SupplementRegimeRepository {
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        name: &str,
        supplements: &[RegimeSupplement],
    ) -> Result<SupplementRegimeRecord> {
        let record = sqlx::query_as::<_, SupplementRegimeRecord>(
            r#"
            INSERT INTO supplement_regimes (user_id, name, supplements)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, name, supplements, is_active, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(Json(supplements))
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    pub async fn list(
        pool: &PgPool,
        user_id: Uuid,
        active_only: bool,
    ) -> Result<Vec<SupplementRegimeRecord>> {
        let records = sqlx::query_as::<_, SupplementRegimeRecord>(
            r#"
            SELECT id, user_id, name, supplements, is_active, created_at, updated_at
            FROM supplement_regimes
            WHERE user_id = $1 AND (NOT $2 OR is_active)
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .bind(active_only)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    pub async fn get(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<SupplementRegimeRecord>> {
        let record = sqlx::query_as::<_, SupplementRegimeRecord>(
            r#"
            SELECT id, user_id, name, supplements, is_active, created_at, updated_at
            FROM supplement_regimes
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        user_id: Uuid,
        name: Option<&str>,
        supplements: Option<&[RegimeSupplement]>,
        is_active: Option<bool>,
    ) -> Result<Option<SupplementRegimeRecord>> {
        let record = sqlx::query_as::<_, SupplementRegimeRecord>(
            r#"
            UPDATE supplement_regimes SET
                name = COALESCE($3, name),
                supplements = COALESCE($4, supplements),
                is_active = COALESCE($5, is_active),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, user_id, name, supplements, is_active, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(name)
        .bind(supplements.map(Json))
        .bind(is_active)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM supplement_regimes
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
