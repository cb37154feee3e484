//! Exercise sessions

use super::decimal_to_f64;
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use ml_fitness_shared::models::ExerciseEntry;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ExerciseEntryRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub entry_date: NaiveDate,
    pub name: String,
    pub category: String,
    pub duration_minutes: i32,
    pub calories_burned: Decimal,
    pub notes: Option<String>,
    pub logged_at: DateTime<Utc>,
}

impl From<ExerciseEntryRecord> for ExerciseEntry {
    fn from(r: ExerciseEntryRecord) -> Self {
        Self {
            id: r.id,
            date: r.entry_date,
            name: r.name,
            category: r.category,
            duration_minutes: r.duration_minutes,
            calories_burned: decimal_to_f64(r.calories_burned),
            notes: r.notes,
            logged_at: r.logged_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateExerciseEntry {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub name: String,
    pub category: String,
    pub duration_minutes: i32,
    pub calories_burned: f64,
    pub notes: Option<String>,
}

/// Minutes and calories over a date range
#[derive(Debug, Clone, Copy, Default, sqlx::FromRow)]
pub struct ExerciseTotalsRecord {
    pub minutes: i64,
    pub calories_burned: Decimal,
}

pub struct ExerciseRepository;

impl ExerciseRepository {
    pub async fn create(pool: &PgPool, input: CreateExerciseEntry) -> Result<ExerciseEntryRecord> {
        let record = sqlx::query_as::<_, ExerciseEntryRecord>(
            r#"
            INSERT INTO exercise_entries (user_id, entry_date, name, category,
                                          duration_minutes, calories_burned, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, user_id, entry_date, name, category, duration_minutes,
                      calories_burned, notes, logged_at
            "#,
        )
        .bind(input.user_id)
        .bind(input.date)
        .bind(&input.name)
        .bind(&input.category)
        .bind(input.duration_minutes)
        .bind(input.calories_burned)
        .bind(&input.notes)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    pub async fn list_by_date(
        pool: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<ExerciseEntryRecord>> {
        let records = sqlx::query_as::<_, ExerciseEntryRecord>(
            r#"
            SELECT id, user_id, entry_date, name, category, duration_minutes,
                   calories_burned, notes, logged_at
            FROM exercise_entries
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

    pub async fn totals(
        pool: &PgPool,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ExerciseTotalsRecord> {
        let totals = sqlx::query_as::<_, ExerciseTotalsRecord>(
            r#"
            SELECT COALESCE(SUM(duration_minutes), 0)::BIGINT AS minutes,
                   COALESCE(SUM(calories_burned), 0) AS calories_burned
            FROM exercise_entries
            WHERE user_id = $1 AND entry_date BETWEEN $2 AND $3
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await?;

        Ok(totals)
    }

    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM exercise_entries
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
