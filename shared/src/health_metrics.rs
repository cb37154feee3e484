//! Health metric calculations
//!
//! BMR, TDEE and calorie goals follow the Mifflin-St Jeor equation. All
//! functions here are pure and take metric inputs.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Daily deficit applied when the user wants to lose weight
pub const WEIGHT_LOSS_DEFICIT_KCAL: f64 = 500.0;
/// Daily surplus applied when the user wants to gain weight
pub const WEIGHT_GAIN_SURPLUS_KCAL: f64 = 300.0;

// ============================================================================
// Profile Inputs
// ============================================================================

/// Biological sex for physiological calculations only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    #[default]
    Male,
    Female,
}

impl BiologicalSex {
    pub fn as_str(&self) -> &'static str {
        match self {
            BiologicalSex::Male => "male",
            BiologicalSex::Female => "female",
        }
    }
}

impl std::str::FromStr for BiologicalSex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(BiologicalSex::Male),
            "female" | "f" => Ok(BiologicalSex::Female),
            _ => Err(format!("Unknown biological sex: {}", s)),
        }
    }
}

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    #[default]
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Very hard exercise or a physical job
    ExtraActive,
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtraActive,
    ];

    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }

    /// Label shown in the profile picker
    pub fn label(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::LightlyActive => "Lightly Active",
            ActivityLevel::ModeratelyActive => "Moderately Active",
            ActivityLevel::VeryActive => "Very Active",
            ActivityLevel::ExtraActive => "Extra Active",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::ExtraActive => "extra_active",
        }
    }

    /// Lenient parse of a stored label. Anything unrecognized counts as
    /// moderately active.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "lightly_active" | "light" => Ok(ActivityLevel::LightlyActive),
            "moderately_active" | "moderate" => Ok(ActivityLevel::ModeratelyActive),
            "very_active" => Ok(ActivityLevel::VeryActive),
            "extra_active" | "extremely_active" => Ok(ActivityLevel::ExtraActive),
            _ => Err(format!("Unknown activity level: {}", s)),
        }
    }
}

/// Inputs needed for the energy calculations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthProfile {
    pub height_cm: f64,
    pub weight_kg: f64,
    pub age_years: i32,
    pub sex: BiologicalSex,
    pub activity_level: ActivityLevel,
}

impl Default for HealthProfile {
    fn default() -> Self {
        Self {
            height_cm: 170.0,
            weight_kg: 70.0,
            age_years: 30,
            sex: BiologicalSex::Male,
            activity_level: ActivityLevel::ModeratelyActive,
        }
    }
}

/// Whole years between `birth` and `today`; zero for future dates
pub fn age_from_birth_date(birth: NaiveDate, today: NaiveDate) -> i32 {
    if birth > today {
        return 0;
    }
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

// ============================================================================
// Energy
// ============================================================================

/// Basal Metabolic Rate using Mifflin-St Jeor
///
/// Men: 10 × weight(kg) + 6.25 × height(cm) − 5 × age + 5
/// Women: 10 × weight(kg) + 6.25 × height(cm) − 5 × age − 161
pub fn calculate_bmr_mifflin(weight_kg: f64, height_cm: f64, age_years: i32, sex: BiologicalSex) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64;
    match sex {
        BiologicalSex::Male => base + 5.0,
        BiologicalSex::Female => base - 161.0,
    }
}

pub fn calculate_tdee(bmr: f64, activity_level: ActivityLevel) -> f64 {
    bmr * activity_level.multiplier()
}

/// Recommended daily calories given where the user is and wants to be.
///
/// Losing weight subtracts 500 kcal from TDEE, gaining adds 300, and
/// maintaining returns TDEE unchanged.
pub fn calculate_calorie_goal(tdee: f64, current_weight_kg: f64, goal_weight_kg: f64) -> i32 {
    let target = if current_weight_kg > goal_weight_kg {
        tdee - WEIGHT_LOSS_DEFICIT_KCAL
    } else if current_weight_kg < goal_weight_kg {
        tdee + WEIGHT_GAIN_SURPLUS_KCAL
    } else {
        tdee
    };
    target.round() as i32
}

/// BMR, TDEE and the resulting calorie goal for one profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnergyPlan {
    pub bmr: f64,
    pub tdee: f64,
    pub activity_multiplier: f64,
    pub calorie_goal: i32,
}

impl EnergyPlan {
    pub fn for_profile(profile: &HealthProfile, goal_weight_kg: f64) -> Self {
        let bmr = calculate_bmr_mifflin(
            profile.weight_kg,
            profile.height_cm,
            profile.age_years,
            profile.sex,
        );
        let tdee = calculate_tdee(bmr, profile.activity_level);
        Self {
            bmr,
            tdee,
            activity_multiplier: profile.activity_level.multiplier(),
            calorie_goal: calculate_calorie_goal(tdee, profile.weight_kg, goal_weight_kg),
        }
    }
}

/// Daily nutrition targets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct NutritionTargets {
    pub calories: i32,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub water_cups: i32,
}

impl Default for NutritionTargets {
    fn default() -> Self {
        Self {
            calories: 2000,
            protein_g: 50.0,
            carbs_g: 250.0,
            fat_g: 65.0,
            water_cups: 8,
        }
    }
}

impl NutritionTargets {
    /// Split a calorie goal 20/50/30 across protein, carbs and fat
    pub fn from_calorie_goal(calories: i32) -> Self {
        let kcal = calories.max(0) as f64;
        Self {
            calories,
            protein_g: (kcal * 0.20 / 4.0).round(),
            carbs_g: (kcal * 0.50 / 4.0).round(),
            fat_g: (kcal * 0.30 / 9.0).round(),
            water_cups: 8,
        }
    }
}

// ============================================================================
// BMI
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn description(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

/// BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}
