//! ML Fitness WASM module
//!
//! Browser bindings for the unit conversions and energy calculations in
//! `ml-fitness-shared`, so clients show the same numbers the API stores.
//! Text inputs are parsed leniently: an unknown sex or activity label falls
//! back to the shared defaults.

use ml_fitness_shared::health_metrics::{
    self, ActivityLevel, BiologicalSex, EnergyPlan, HealthProfile,
};
use ml_fitness_shared::units::{self, UnitSystem};
use wasm_bindgen::prelude::*;

fn sex(value: &str) -> BiologicalSex {
    value.parse().unwrap_or_default()
}

fn system(value: &str) -> UnitSystem {
    value.parse().unwrap_or_default()
}

#[wasm_bindgen]
pub fn kg_to_lbs(kg: f64) -> f64 {
    units::kg_to_lbs(kg)
}

#[wasm_bindgen]
pub fn lbs_to_kg(lbs: f64) -> f64 {
    units::lbs_to_kg(lbs)
}

#[wasm_bindgen]
pub fn ml_to_oz(ml: f64) -> f64 {
    units::ml_to_oz(ml)
}

#[wasm_bindgen]
pub fn oz_to_ml(oz: f64) -> f64 {
    units::oz_to_ml(oz)
}

#[wasm_bindgen]
pub fn cups_to_ml(cups: f64) -> f64 {
    units::cups_to_ml(cups)
}

#[wasm_bindgen]
pub fn feet_inches_to_cm(feet: u32, inches: u32) -> f64 {
    units::feet_inches_to_cm(feet, inches)
}

/// "80.0 kg" or "176.4 lbs"
#[wasm_bindgen]
pub fn format_weight(kg: f64, unit_system: &str) -> String {
    units::format_weight(kg, system(unit_system))
}

#[wasm_bindgen]
pub fn format_height(cm: f64, unit_system: &str) -> String {
    units::format_height(cm, system(unit_system))
}

/// 0 when the height is not positive
#[wasm_bindgen]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm <= 0.0 {
        return 0.0;
    }
    health_metrics::calculate_bmi(weight_kg, height_cm)
}

#[wasm_bindgen]
pub fn bmi_category(bmi: f64) -> String {
    health_metrics::classify_bmi(bmi).description().to_string()
}

/// Mifflin-St Jeor basal metabolic rate
#[wasm_bindgen]
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: i32, sex_value: &str) -> f64 {
    health_metrics::calculate_bmr_mifflin(weight_kg, height_cm, age_years, sex(sex_value))
}

/// `activity` accepts snake_case values or display labels
#[wasm_bindgen]
pub fn calculate_tdee(bmr: f64, activity: &str) -> f64 {
    health_metrics::calculate_tdee(bmr, ActivityLevel::from_label(activity))
}

#[wasm_bindgen]
pub fn calculate_calorie_goal(tdee: f64, current_weight_kg: f64, goal_weight_kg: f64) -> i32 {
    health_metrics::calculate_calorie_goal(tdee, current_weight_kg, goal_weight_kg)
}

/// BMR, TDEE, multiplier and calorie goal as a JSON object
#[wasm_bindgen]
pub fn energy_plan(
    weight_kg: f64,
    height_cm: f64,
    age_years: i32,
    sex_value: &str,
    activity: &str,
    goal_weight_kg: f64,
) -> String {
    let profile = HealthProfile {
        weight_kg,
        height_cm,
        age_years,
        sex: sex(sex_value),
        activity_level: ActivityLevel::from_label(activity),
    };
    let plan = EnergyPlan::for_profile(&profile, goal_weight_kg);
    serde_json::to_string(&plan).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmr_matches_mifflin() {
        // 10*80 + 6.25*180 - 5*30 + 5
        assert!((calculate_bmr(80.0, 180.0, 30, "male") - 1780.0).abs() < 1e-9);
        assert!((calculate_bmr(80.0, 180.0, 30, "female") - 1614.0).abs() < 1e-9);
    }

    #[test]
    fn test_activity_labels_are_lenient() {
        assert!((calculate_tdee(1000.0, "Very Active") - 1725.0).abs() < 1e-9);
        assert!((calculate_tdee(1000.0, "something else") - 1550.0).abs() < 1e-9);
    }

    #[test]
    fn test_calorie_goal_direction() {
        assert_eq!(calculate_calorie_goal(2500.0, 90.0, 80.0), 2000);
        assert_eq!(calculate_calorie_goal(2500.0, 70.0, 80.0), 2800);
        assert_eq!(calculate_calorie_goal(2500.0, 80.0, 80.0), 2500);
    }

    #[test]
    fn test_energy_plan_json() {
        let json: serde_json::Value =
            serde_json::from_str(&energy_plan(80.0, 180.0, 30, "male", "sedentary", 75.0)).unwrap();
        assert_eq!(json["bmr"], 1780.0);
        assert_eq!(json["activity_multiplier"], 1.2);
        assert_eq!(json["calorie_goal"], 1636);
    }

    #[test]
    fn test_bmi_and_units() {
        assert!((calculate_bmi(70.0, 175.0) - 22.86).abs() < 0.1);
        assert_eq!(calculate_bmi(70.0, 0.0), 0.0);
        assert!((lbs_to_kg(kg_to_lbs(80.0)) - 80.0).abs() < 1e-9);
        assert_eq!(format_weight(80.0, "metric"), "80.0 kg");
    }
}
