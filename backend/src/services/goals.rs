//! Goal tracking: progress, completion and deadlines

use super::today;
use crate::error::ApiError;
use crate::repositories::{CreateGoal, GoalRepository};
use chrono::Utc;
use ml_fitness_shared::goals::{upcoming_deadlines, Goal, GoalStatistics};
use ml_fitness_shared::types::{CreateGoalRequest, UpdateGoalRequest};
use ml_fitness_shared::validation::{check_field, validate_not_blank};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

const DEFAULT_UPCOMING_DAYS: i64 = 7;

fn validate_target(target_value: f64) -> Result<(), ApiError> {
    if !target_value.is_finite() || target_value <= 0.0 {
        return Err(ApiError::InvalidField {
            field: "target_value".to_string(),
            message: "Target value must be positive".to_string(),
        });
    }
    Ok(())
}

pub struct GoalService;

impl GoalService {
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        req: CreateGoalRequest,
    ) -> Result<Goal, ApiError> {
        check_field("title", validate_not_blank(&req.title, "Title"))?;
        check_field("unit", validate_not_blank(&req.unit, "Unit"))?;
        validate_target(req.target_value)?;

        let start_date = req.start_date.unwrap_or_else(today);
        if req.deadline.is_some_and(|d| d < start_date) {
            return Err(ApiError::InvalidField {
                field: "deadline".to_string(),
                message: "Deadline cannot be before the start date".to_string(),
            });
        }

        let record = GoalRepository::create(
            pool,
            CreateGoal {
                user_id,
                goal_type: req.goal_type,
                title: req.title.trim().to_string(),
                description: req.description,
                target_value: req.target_value,
                unit: req.unit.trim().to_string(),
                start_date,
                deadline: req.deadline,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        let mut goal = Goal::try_from(record).map_err(ApiError::Internal)?;
        if req.current_value != 0.0 {
            goal.record_progress(req.current_value, Utc::now());
            goal = Self::save(pool, user_id, &goal).await?;
        }

        info!(user_id = %user_id, goal_id = %goal.id, "Goal created");
        Ok(goal)
    }

    pub async fn list(pool: &PgPool, user_id: Uuid, active_only: bool) -> Result<Vec<Goal>, ApiError> {
        GoalRepository::get_by_user(pool, user_id, active_only)
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .map(Goal::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(ApiError::Internal)
    }

    pub async fn get(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<Goal, ApiError> {
        let record = GoalRepository::get_by_id(pool, id, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Goal not found".to_string()))?;

        Goal::try_from(record).map_err(ApiError::Internal)
    }

    pub async fn update(
        pool: &PgPool,
        user_id: Uuid,
        id: Uuid,
        req: UpdateGoalRequest,
    ) -> Result<Goal, ApiError> {
        let mut goal = Self::get(pool, user_id, id).await?;

        if let Some(title) = req.title {
            check_field("title", validate_not_blank(&title, "Title"))?;
            goal.title = title.trim().to_string();
        }
        if let Some(description) = req.description {
            goal.description = Some(description);
        }
        if let Some(unit) = req.unit {
            check_field("unit", validate_not_blank(&unit, "Unit"))?;
            goal.unit = unit.trim().to_string();
        }
        if let Some(deadline) = req.deadline {
            goal.deadline = Some(deadline);
        }
        if let Some(target) = req.target_value {
            validate_target(target)?;
            goal.target_value = target;
            // a new target moves the percentage
            goal.record_progress(goal.current_value, Utc::now());
        }

        Self::save(pool, user_id, &goal).await
    }

    /// Record a new current value; reaching the target completes the goal
    pub async fn update_progress(
        pool: &PgPool,
        user_id: Uuid,
        id: Uuid,
        current_value: f64,
    ) -> Result<Goal, ApiError> {
        if !current_value.is_finite() {
            return Err(ApiError::InvalidField {
                field: "current_value".to_string(),
                message: "Current value must be a number".to_string(),
            });
        }

        let mut goal = Self::get(pool, user_id, id).await?;
        goal.record_progress(current_value, Utc::now());
        Self::save(pool, user_id, &goal).await
    }

    pub async fn complete(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<Goal, ApiError> {
        let mut goal = Self::get(pool, user_id, id).await?;
        goal.mark_complete(Utc::now());
        Self::save(pool, user_id, &goal).await
    }

    pub async fn reactivate(
        pool: &PgPool,
        user_id: Uuid,
        id: Uuid,
        deadline: Option<chrono::NaiveDate>,
    ) -> Result<Goal, ApiError> {
        let mut goal = Self::get(pool, user_id, id).await?;
        goal.reactivate(deadline);
        Self::save(pool, user_id, &goal).await
    }

    pub async fn delete(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let deleted = GoalRepository::delete(pool, id, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Goal not found".to_string()));
        }
        Ok(())
    }

    pub async fn statistics(pool: &PgPool, user_id: Uuid) -> Result<GoalStatistics, ApiError> {
        let goals = Self::list(pool, user_id, false).await?;
        Ok(GoalStatistics::from_goals(&goals, today()))
    }

    pub async fn upcoming(
        pool: &PgPool,
        user_id: Uuid,
        days: Option<i64>,
    ) -> Result<Vec<Goal>, ApiError> {
        let goals = Self::list(pool, user_id, true).await?;
        let days = days.unwrap_or(DEFAULT_UPCOMING_DAYS).max(0);
        Ok(upcoming_deadlines(&goals, today(), days))
    }

    async fn save(pool: &PgPool, user_id: Uuid, goal: &Goal) -> Result<Goal, ApiError> {
        let record = GoalRepository::save(pool, user_id, goal)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Goal not found".to_string()))?;

        Goal::try_from(record).map_err(ApiError::Internal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_target() {
        assert!(validate_target(10.0).is_ok());
        assert!(validate_target(0.0).is_err());
        assert!(validate_target(-5.0).is_err());
        assert!(validate_target(f64::NAN).is_err());
    }
}
