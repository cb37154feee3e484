//! Dashboard: totals for a day or period measured against the daily goals

use crate::error::ApiError;
use crate::repositories::{
    decimal_to_f64, ExerciseRepository, FoodEntryRepository, ProfileRepository, WaterRepository,
    WeightRepository,
};
use chrono::NaiveDate;
use ml_fitness_shared::dashboard::{
    generate_insights, DashboardGoals, DashboardPeriod, DashboardSummary, DashboardTotals,
};
use ml_fitness_shared::types::DashboardResponse;
use sqlx::PgPool;
use uuid::Uuid;

pub struct DashboardService;

impl DashboardService {
    pub async fn summary(
        pool: &PgPool,
        user_id: Uuid,
        end_date: NaiveDate,
        period: DashboardPeriod,
    ) -> Result<DashboardResponse, ApiError> {
        let (start, end) = period.range_ending(end_date);

        let goals = ProfileRepository::get(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .map(|p| DashboardGoals {
                calories: p.daily_calorie_goal,
                water_cups: p.daily_water_goal_cups,
                exercise_minutes: p.daily_exercise_goal_minutes,
            })
            .unwrap_or_default();

        let (calories_consumed, water_oz, exercise, latest_weight) = tokio::try_join!(
            FoodEntryRepository::total_calories(pool, user_id, start, end),
            WaterRepository::total_oz(pool, user_id, start, end),
            ExerciseRepository::totals(pool, user_id, start, end),
            WeightRepository::latest(pool, user_id, end),
        )
        .map_err(ApiError::Internal)?;

        let totals = DashboardTotals {
            calories_consumed,
            water_oz,
            exercise_minutes: i32::try_from(exercise.minutes).unwrap_or(i32::MAX),
            calories_burned: decimal_to_f64(exercise.calories_burned),
            latest_weight_kg: latest_weight.map(|w| decimal_to_f64(w.weight_kg)),
        };

        let summary = DashboardSummary::build(period, end_date, totals, goals);
        let insights = generate_insights(&summary);

        Ok(DashboardResponse { summary, insights })
    }
}
