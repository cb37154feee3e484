//! Goals repository for database operations

use super::decimal_to_f64;
use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, Utc};
use ml_fitness_shared::goals::{Goal, GoalType};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Goal record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GoalRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub goal_type: String,
    pub title: String,
    pub description: Option<String>,
    pub target_value: Decimal,
    pub current_value: Decimal,
    pub unit: String,
    pub progress: Decimal,
    pub start_date: NaiveDate,
    pub deadline: Option<NaiveDate>,
    pub is_active: bool,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<GoalRecord> for Goal {
    type Error = anyhow::Error;

    fn try_from(r: GoalRecord) -> Result<Self> {
        let goal_type: GoalType = r.goal_type.parse().map_err(|e: String| anyhow!(e))?;
        Ok(Self {
            id: r.id,
            goal_type,
            title: r.title,
            description: r.description,
            target_value: decimal_to_f64(r.target_value),
            current_value: decimal_to_f64(r.current_value),
            unit: r.unit,
            progress: decimal_to_f64(r.progress),
            start_date: r.start_date,
            deadline: r.deadline,
            is_active: r.is_active,
            is_completed: r.is_completed,
            completed_at: r.completed_at,
        })
    }
}

/// Input for creating a goal
#[derive(Debug, Clone)]
pub struct CreateGoal {
    pub user_id: Uuid,
    pub goal_type: GoalType,
    pub title: String,
    pub description: Option<String>,
    pub target_value: f64,
    pub unit: String,
    pub start_date: NaiveDate,
    pub deadline: Option<NaiveDate>,
}

const GOAL_COLUMNS: &str = "id, user_id, goal_type, title, description, target_value, \
     current_value, unit, progress, start_date, deadline, is_active, is_completed, \
     completed_at, created_at, updated_at";

/// Goal repository
pub struct GoalRepository;

impl GoalRepository {
    pub async fn create(pool: &PgPool, input: CreateGoal) -> Result<GoalRecord> {
        let record = sqlx::query_as::<_, GoalRecord>(&format!(
            r#"
            INSERT INTO goals (user_id, goal_type, title, description, target_value,
                               unit, start_date, deadline)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            GOAL_COLUMNS
        ))
        .bind(input.user_id)
        .bind(input.goal_type.as_str())
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.target_value)
        .bind(&input.unit)
        .bind(input.start_date)
        .bind(input.deadline)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<Option<GoalRecord>> {
        let record = sqlx::query_as::<_, GoalRecord>(&format!(
            r#"
            SELECT {}
            FROM goals
            WHERE id = $1 AND user_id = $2
            "#,
            GOAL_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// All goals for a user, optionally only the active ones
    pub async fn get_by_user(
        pool: &PgPool,
        user_id: Uuid,
        active_only: bool,
    ) -> Result<Vec<GoalRecord>> {
        let records = sqlx::query_as::<_, GoalRecord>(&format!(
            r#"
            SELECT {}
            FROM goals
            WHERE user_id = $1 AND (NOT $2 OR is_active)
            ORDER BY created_at DESC
            "#,
            GOAL_COLUMNS
        ))
        .bind(user_id)
        .bind(active_only)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Write back every mutable field of a goal
    pub async fn save(pool: &PgPool, user_id: Uuid, goal: &Goal) -> Result<Option<GoalRecord>> {
        let record = sqlx::query_as::<_, GoalRecord>(&format!(
            r#"
            UPDATE goals SET
                title = $3,
                description = $4,
                target_value = $5,
                current_value = $6,
                unit = $7,
                progress = $8,
                deadline = $9,
                is_active = $10,
                is_completed = $11,
                completed_at = $12,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING {}
            "#,
            GOAL_COLUMNS
        ))
        .bind(goal.id)
        .bind(user_id)
        .bind(&goal.title)
        .bind(&goal.description)
        .bind(goal.target_value)
        .bind(goal.current_value)
        .bind(&goal.unit)
        .bind(goal.progress)
        .bind(goal.deadline)
        .bind(goal.is_active)
        .bind(goal.is_completed)
        .bind(goal.completed_at)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM goals
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
