//! Meal plan routes
//!
//! Plans are static reference content, so these routes need no account.

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{extract::Path, routing::get, Json, Router};
use ml_fitness_shared::meal_plans::{all_plans, find_plan, MealPlanSummary, MealPlanType, WeeklyMealPlan};
use ml_fitness_shared::types::MealPlanDayResponse;

pub fn meal_plan_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_plans))
        .route("/:plan_id", get(get_plan))
        .route("/:plan_id/weeks/:week", get(get_week))
        .route("/:plan_id/weeks/:week/:day", get(get_day))
}

fn plan(plan_id: &str) -> ApiResult<&'static MealPlanType> {
    find_plan(plan_id).ok_or_else(|| ApiError::NotFound(format!("Meal plan '{}' not found", plan_id)))
}

fn week(plan: &'static MealPlanType, week_number: u32) -> ApiResult<&'static WeeklyMealPlan> {
    plan.week(week_number).ok_or_else(|| {
        ApiError::NotFound(format!("Week {} not found in plan '{}'", week_number, plan.id))
    })
}

/// GET /api/v1/meal-plans
async fn list_plans() -> Json<Vec<MealPlanSummary>> {
    Json(all_plans().iter().map(MealPlanSummary::from).collect())
}

/// GET /api/v1/meal-plans/:plan_id
async fn get_plan(Path(plan_id): Path<String>) -> ApiResult<Json<MealPlanType>> {
    Ok(Json(plan(&plan_id)?.clone()))
}

/// GET /api/v1/meal-plans/:plan_id/weeks/:week
async fn get_week(Path((plan_id, week_number)): Path<(String, u32)>) -> ApiResult<Json<WeeklyMealPlan>> {
    Ok(Json(week(plan(&plan_id)?, week_number)?.clone()))
}

/// GET /api/v1/meal-plans/:plan_id/weeks/:week/:day
///
/// `day` is a weekday name such as `monday`.
async fn get_day(
    Path((plan_id, week_number, day_name)): Path<(String, u32, String)>,
) -> ApiResult<Json<MealPlanDayResponse>> {
    let week = week(plan(&plan_id)?, week_number)?;
    let day = week.day(&day_name).ok_or_else(|| {
        ApiError::NotFound(format!("No '{}' in week {} of plan '{}'", day_name, week_number, plan_id))
    })?;

    Ok(Json(MealPlanDayResponse {
        plan_id,
        week_number,
        totals: day.totals(),
        day: day.clone(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_covers_every_plan() {
        let Json(plans) = list_plans().await;
        assert_eq!(plans.len(), all_plans().len());
        assert!(plans.iter().all(|p| p.week_count > 0));
    }

    #[tokio::test]
    async fn test_day_lookup_is_case_insensitive() {
        let first = &all_plans()[0];
        let day_name = first.weeks[0].days[0].day_name.to_uppercase();

        let Json(response) = get_day(Path((first.id.clone(), first.weeks[0].week_number, day_name)))
            .await
            .unwrap();
        assert_eq!(response.plan_id, first.id);
        assert_eq!(response.totals, response.day.totals());
    }

    #[tokio::test]
    async fn test_unknown_plan_and_week_are_not_found() {
        assert!(matches!(
            get_plan(Path("no-such-plan".to_string())).await,
            Err(ApiError::NotFound(_))
        ));

        let first = all_plans()[0].id.clone();
        assert!(matches!(
            get_week(Path((first, 999))).await,
            Err(ApiError::NotFound(_))
        ));
    }
}
