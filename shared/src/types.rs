//! API request and response types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::dashboard::{DashboardPeriod, DashboardSummary, Insight};
use crate::goals::{Goal, GoalType};
use crate::health_metrics::{ActivityLevel, BiologicalSex, BmiCategory, HealthProfile, NutritionTargets};
use crate::meal_plans::{DailyMealPlan, MealTotals};
use crate::models::{FoodItem, MealType, NutritionFacts, SupplementInfo, WeightEntry};
use crate::restaurants::{Restaurant, RestaurantFood};
use crate::supplements::RegimeSupplement;
use crate::units::{UnitSystem, VolumeUnit, WeightUnit};

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// `?date=YYYY-MM-DD`, defaulting to today when absent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

// ============================================================================
// Auth
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Profile
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub sex: BiologicalSex,
    pub height_cm: Option<f64>,
    pub current_weight_kg: Option<f64>,
    pub goal_weight_kg: Option<f64>,
    pub activity_level: ActivityLevel,
    pub activity_label: String,
    pub unit_system: UnitSystem,
    pub daily_calorie_goal: i32,
    pub daily_water_goal_cups: i32,
    pub daily_exercise_goal_minutes: i32,
    /// Height and weights rendered in the user's unit system
    pub display: ProfileDisplay,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileDisplay {
    pub height: Option<String>,
    pub current_weight: Option<String>,
    pub goal_weight: Option<String>,
}

/// Partial profile update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub sex: Option<BiologicalSex>,
    pub height_cm: Option<f64>,
    pub current_weight_kg: Option<f64>,
    pub goal_weight_kg: Option<f64>,
    /// Accepts snake_case values or display labels such as "Very Active"
    pub activity_level: Option<String>,
    pub unit_system: Option<UnitSystem>,
    pub daily_calorie_goal: Option<i32>,
    pub daily_water_goal_cups: Option<i32>,
    pub daily_exercise_goal_minutes: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnergyResponse {
    pub bmr: f64,
    pub tdee: f64,
    pub activity_multiplier: f64,
    pub calorie_goal: i32,
    pub targets: NutritionTargets,
    /// The inputs actually used, after defaults were applied
    pub inputs: HealthProfile,
    pub goal_weight_kg: f64,
}

// ============================================================================
// Foods
// ============================================================================

/// How a barcode was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupOrigin {
    Stored,
    External,
    Mock,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarcodeLookupResponse {
    pub food: FoodItem,
    pub origin: LookupOrigin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodSearchQuery {
    pub q: String,
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantSearchQuery {
    pub q: String,
    /// Narrow the query to one chain's menu
    pub restaurant: Option<Restaurant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantSearchResponse {
    pub items: Vec<RestaurantFood>,
    pub source: String,
}

// ============================================================================
// Diary
// ============================================================================

fn one() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogFoodRequest {
    pub date: Option<NaiveDate>,
    pub meal_type: MealType,
    pub name: String,
    pub brand: Option<String>,
    pub barcode: Option<String>,
    pub serving_size: Option<String>,
    pub serving_unit: Option<String>,
    #[serde(default = "one")]
    pub serving_count: f64,
    /// Per-serving values
    pub nutrition: NutritionFacts,
}

// ============================================================================
// Water
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogWaterRequest {
    pub date: Option<NaiveDate>,
    pub amount: f64,
    #[serde(default)]
    pub unit: VolumeUnit,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaterCupRequest {
    pub date: Option<NaiveDate>,
}

// ============================================================================
// Exercise
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogExerciseRequest {
    pub date: Option<NaiveDate>,
    pub name: String,
    pub category: Option<String>,
    pub duration_minutes: i32,
    #[serde(default)]
    pub calories_burned: f64,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyExerciseResponse {
    pub date: NaiveDate,
    pub entries: Vec<crate::models::ExerciseEntry>,
    pub total_minutes: i32,
    pub total_calories_burned: f64,
}

// ============================================================================
// Weight
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogWeightRequest {
    pub date: Option<NaiveDate>,
    pub weight: f64,
    #[serde(default)]
    pub unit: WeightUnit,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightHistoryQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightSummaryResponse {
    pub latest: Option<WeightEntry>,
    pub latest_display: Option<String>,
    /// Mean of the entries in the last 7 days
    pub weekly_average_kg: Option<f64>,
    /// Latest minus the earliest entry within the last 30 days
    pub monthly_change_kg: Option<f64>,
    pub bmi: Option<f64>,
    pub bmi_category: Option<BmiCategory>,
}

// ============================================================================
// Supplements
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplementCatalogQuery {
    pub name: Option<String>,
    pub category: Option<String>,
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplementLookupResponse {
    pub supplement: SupplementInfo,
    /// Catalog id when the barcode matched the built-in catalog
    pub catalog_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSupplementRequest {
    pub date: Option<NaiveDate>,
    pub name: String,
    pub brand: Option<String>,
    #[serde(default = "one")]
    pub servings: f64,
    pub serving_unit: Option<String>,
    #[serde(default)]
    pub nutrients: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRegimeRequest {
    pub name: String,
    #[serde(default)]
    pub supplements: Vec<RegimeSupplement>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateRegimeRequest {
    pub name: Option<String>,
    pub supplements: Option<Vec<RegimeSupplement>>,
}

// ============================================================================
// Goals
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGoalRequest {
    pub goal_type: GoalType,
    pub title: String,
    pub description: Option<String>,
    pub target_value: f64,
    #[serde(default)]
    pub current_value: f64,
    pub unit: String,
    pub start_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGoalRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub target_value: Option<f64>,
    pub unit: Option<String>,
    pub deadline: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateGoalProgressRequest {
    pub current_value: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReactivateGoalRequest {
    pub deadline: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GoalListQuery {
    #[serde(default)]
    pub active_only: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpcomingGoalsQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalListResponse {
    pub goals: Vec<Goal>,
}

// ============================================================================
// Meal plans and dashboard
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlanDayResponse {
    pub plan_id: String,
    pub week_number: u32,
    pub day: DailyMealPlan,
    pub totals: MealTotals,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardQuery {
    pub date: Option<String>,
    pub period: Option<DashboardPeriod>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub summary: DashboardSummary,
    pub insights: Vec<Insight>,
}
