//! User profile: body measurements, activity and daily goals

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProfileRecord {
    pub user_id: Uuid,
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub sex: String,
    pub height_cm: Option<Decimal>,
    pub current_weight_kg: Option<Decimal>,
    pub goal_weight_kg: Option<Decimal>,
    pub activity_level: String,
    pub unit_system: String,
    pub daily_calorie_goal: i32,
    pub daily_water_goal_cups: i32,
    pub daily_exercise_goal_minutes: i32,
    pub updated_at: DateTime<Utc>,
}

/// Columns to change; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub sex: Option<String>,
    pub height_cm: Option<f64>,
    pub current_weight_kg: Option<f64>,
    pub goal_weight_kg: Option<f64>,
    pub activity_level: Option<String>,
    pub unit_system: Option<String>,
    pub daily_calorie_goal: Option<i32>,
    pub daily_water_goal_cups: Option<i32>,
    pub daily_exercise_goal_minutes: Option<i32>,
}

pub struct ProfileRepository;

impl ProfileRepository {
    pub async fn get(pool: &PgPool, user_id: Uuid) -> Result<Option<ProfileRecord>> {
        let profile = sqlx::query_as::<_, ProfileRecord>(
            r#"
            SELECT user_id, name, birth_date, sex, height_cm, current_weight_kg,
                   goal_weight_kg, activity_level, unit_system, daily_calorie_goal,
                   daily_water_goal_cups, daily_exercise_goal_minutes, updated_at
            FROM profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }

    pub async fn update(
        pool: &PgPool,
        user_id: Uuid,
        updates: UpdateProfile,
    ) -> Result<Option<ProfileRecord>> {
        let profile = sqlx::query_as::<_, ProfileRecord>(
            r#"
            UPDATE profiles SET
                name = COALESCE($2, name),
                birth_date = COALESCE($3, birth_date),
                sex = COALESCE($4, sex),
                height_cm = COALESCE($5, height_cm),
                current_weight_kg = COALESCE($6, current_weight_kg),
                goal_weight_kg = COALESCE($7, goal_weight_kg),
                activity_level = COALESCE($8, activity_level),
                unit_system = COALESCE($9, unit_system),
                daily_calorie_goal = COALESCE($10, daily_calorie_goal),
                daily_water_goal_cups = COALESCE($11, daily_water_goal_cups),
                daily_exercise_goal_minutes = COALESCE($12, daily_exercise_goal_minutes),
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING user_id, name, birth_date, sex, height_cm, current_weight_kg,
                      goal_weight_kg, activity_level, unit_system, daily_calorie_goal,
                      daily_water_goal_cups, daily_exercise_goal_minutes, updated_at
            "#,
        )
        .bind(user_id)
        .bind(updates.name)
        .bind(updates.birth_date)
        .bind(updates.sex)
        .bind(updates.height_cm)
        .bind(updates.current_weight_kg)
        .bind(updates.goal_weight_kg)
        .bind(updates.activity_level)
        .bind(updates.unit_system)
        .bind(updates.daily_calorie_goal)
        .bind(updates.daily_water_goal_cups)
        .bind(updates.daily_exercise_goal_minutes)
        .fetch_optional(pool)
        .await?;

        Ok(profile)
    }

    /// Keep the profile's current weight in step with the latest weigh-in
    pub async fn set_current_weight(pool: &PgPool, user_id: Uuid, weight_kg: f64) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE profiles SET current_weight_kg = $2, updated_at = NOW()
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .bind(weight_kg)
        .execute(pool)
        .await?;

        Ok(())
    }
}
