//! Profile reads, partial updates and the energy plan derived from them

use crate::error::ApiError;
use crate::repositories::{decimal_to_f64, ProfileRecord, ProfileRepository, UpdateProfile};
use chrono::{NaiveDate, Utc};
use ml_fitness_shared::health_metrics::{
    age_from_birth_date, ActivityLevel, BiologicalSex, EnergyPlan, HealthProfile,
    NutritionTargets,
};
use ml_fitness_shared::types::{
    EnergyResponse, ProfileDisplay, ProfileResponse, UpdateProfileRequest,
};
use ml_fitness_shared::units::{format_height, format_weight, UnitSystem};
use ml_fitness_shared::validation::{
    check_field, validate_birth_date, validate_height_cm, validate_weight,
};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

fn positive_goal(field: &str, value: Option<i32>, max: i32) -> Result<(), ApiError> {
    match value {
        Some(v) if v <= 0 || v > max => Err(ApiError::InvalidField {
            field: field.to_string(),
            message: format!("must be between 1 and {}", max),
        }),
        _ => Ok(()),
    }
}

fn to_response(record: ProfileRecord) -> ProfileResponse {
    let unit_system: UnitSystem = record.unit_system.parse().unwrap_or_default();
    let activity_level = ActivityLevel::from_label(&record.activity_level);
    let height_cm = record.height_cm.map(decimal_to_f64);
    let current_weight_kg = record.current_weight_kg.map(decimal_to_f64);
    let goal_weight_kg = record.goal_weight_kg.map(decimal_to_f64);

    ProfileResponse {
        name: record.name,
        birth_date: record.birth_date,
        sex: record.sex.parse().unwrap_or_default(),
        height_cm,
        current_weight_kg,
        goal_weight_kg,
        activity_level,
        activity_label: activity_level.label().to_string(),
        unit_system,
        daily_calorie_goal: record.daily_calorie_goal,
        daily_water_goal_cups: record.daily_water_goal_cups,
        daily_exercise_goal_minutes: record.daily_exercise_goal_minutes,
        display: ProfileDisplay {
            height: height_cm.map(|cm| format_height(cm, unit_system)),
            current_weight: current_weight_kg.map(|kg| format_weight(kg, unit_system)),
            goal_weight: goal_weight_kg.map(|kg| format_weight(kg, unit_system)),
        },
        updated_at: record.updated_at,
    }
}

/// Energy inputs from a stored profile; gaps take the standard defaults
pub fn health_profile(profile: &ProfileResponse, today: NaiveDate) -> HealthProfile {
    let defaults = HealthProfile::default();
    HealthProfile {
        height_cm: profile.height_cm.unwrap_or(defaults.height_cm),
        weight_kg: profile.current_weight_kg.unwrap_or(defaults.weight_kg),
        age_years: profile
            .birth_date
            .map(|b| age_from_birth_date(b, today))
            .unwrap_or(defaults.age_years),
        sex: profile.sex,
        activity_level: profile.activity_level,
    }
}

/// BMR, TDEE and calorie goal; without a goal weight the plan is maintenance
pub fn energy_for(profile: &ProfileResponse, today: NaiveDate) -> EnergyResponse {
    let inputs = health_profile(profile, today);
    let goal_weight_kg = profile.goal_weight_kg.unwrap_or(inputs.weight_kg);
    let plan = EnergyPlan::for_profile(&inputs, goal_weight_kg);

    EnergyResponse {
        bmr: plan.bmr,
        tdee: plan.tdee,
        activity_multiplier: plan.activity_multiplier,
        calorie_goal: plan.calorie_goal,
        targets: NutritionTargets::from_calorie_goal(plan.calorie_goal),
        inputs,
        goal_weight_kg,
    }
}

pub struct ProfileService;

impl ProfileService {
    pub async fn get(pool: &PgPool, user_id: Uuid) -> Result<ProfileResponse, ApiError> {
        let record = ProfileRepository::get(pool, user_id)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

        Ok(to_response(record))
    }

    pub async fn update(
        pool: &PgPool,
        user_id: Uuid,
        req: UpdateProfileRequest,
    ) -> Result<ProfileResponse, ApiError> {
        let today = Utc::now().date_naive();
        if let Some(height) = req.height_cm {
            check_field("height_cm", validate_height_cm(height))?;
        }
        if let Some(weight) = req.current_weight_kg {
            check_field("current_weight_kg", validate_weight(weight))?;
        }
        if let Some(weight) = req.goal_weight_kg {
            check_field("goal_weight_kg", validate_weight(weight))?;
        }
        if let Some(birth_date) = req.birth_date {
            check_field("birth_date", validate_birth_date(birth_date, today))?;
        }
        positive_goal("daily_calorie_goal", req.daily_calorie_goal, 10_000)?;
        positive_goal("daily_water_goal_cups", req.daily_water_goal_cups, 40)?;
        positive_goal(
            "daily_exercise_goal_minutes",
            req.daily_exercise_goal_minutes,
            1440,
        )?;

        let updates = UpdateProfile {
            name: req.name.map(|n| n.trim().to_string()),
            birth_date: req.birth_date,
            sex: req.sex.map(|s: BiologicalSex| s.as_str().to_string()),
            height_cm: req.height_cm,
            current_weight_kg: req.current_weight_kg,
            goal_weight_kg: req.goal_weight_kg,
            activity_level: req
                .activity_level
                .as_deref()
                .map(|l| ActivityLevel::from_label(l).as_str().to_string()),
            unit_system: req.unit_system.map(|u| u.as_str().to_string()),
            daily_calorie_goal: req.daily_calorie_goal,
            daily_water_goal_cups: req.daily_water_goal_cups,
            daily_exercise_goal_minutes: req.daily_exercise_goal_minutes,
        };

        let record = ProfileRepository::update(pool, user_id, updates)
            .await
            .map_err(ApiError::Internal)?
            .ok_or_else(|| ApiError::NotFound("Profile not found".to_string()))?;

        debug!(user_id = %user_id, "Profile updated");
        Ok(to_response(record))
    }

    pub async fn energy(pool: &PgPool, user_id: Uuid) -> Result<EnergyResponse, ApiError> {
        let profile = Self::get(pool, user_id).await?;
        Ok(energy_for(&profile, Utc::now().date_naive()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn profile() -> ProfileResponse {
        ProfileResponse {
            name: None,
            birth_date: None,
            sex: BiologicalSex::Male,
            height_cm: None,
            current_weight_kg: None,
            goal_weight_kg: None,
            activity_level: ActivityLevel::ModeratelyActive,
            activity_label: "Moderately Active".to_string(),
            unit_system: UnitSystem::Metric,
            daily_calorie_goal: 2200,
            daily_water_goal_cups: 8,
            daily_exercise_goal_minutes: 60,
            display: ProfileDisplay::default(),
            updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_energy_uses_defaults_for_missing_inputs() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let energy = energy_for(&profile(), today);

        // 10*70 + 6.25*170 - 5*30 + 5
        assert!((energy.bmr - 1617.5).abs() < 1e-9);
        assert!((energy.tdee - 1617.5 * 1.55).abs() < 1e-9);
        assert_eq!(energy.goal_weight_kg, 70.0);
        assert_eq!(energy.inputs.age_years, 30);
    }

    #[test]
    fn test_energy_uses_birth_date_and_goal_weight() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut p = profile();
        p.birth_date = NaiveDate::from_ymd_opt(1994, 6, 2);
        p.current_weight_kg = Some(80.0);
        p.goal_weight_kg = Some(75.0);
        p.sex = BiologicalSex::Female;

        let energy = energy_for(&p, today);
        assert_eq!(energy.inputs.age_years, 29);
        assert_eq!(energy.goal_weight_kg, 75.0);
        assert!(energy.calorie_goal < energy.tdee.round() as i32);
    }

    #[test]
    fn test_positive_goal_bounds() {
        assert!(positive_goal("daily_water_goal_cups", Some(8), 40).is_ok());
        assert!(positive_goal("daily_water_goal_cups", None, 40).is_ok());
        assert!(matches!(
            positive_goal("daily_water_goal_cups", Some(0), 40),
            Err(ApiError::InvalidField { .. })
        ));
    }
}
