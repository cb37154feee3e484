//! Domain records for food, logs and lookups
//!
//! These are plain value types. The backend maps database rows into them and
//! the diary and dashboard modules aggregate over them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, AddAssign};
use uuid::Uuid;

// ============================================================================
// Meal Type
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    /// Diary display order
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snack,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" | "snacks" => Ok(MealType::Snack),
            _ => Err(format!(
                "Invalid meal type '{}'. Must be one of: breakfast, lunch, dinner, snack",
                s
            )),
        }
    }
}

// ============================================================================
// Nutrition
// ============================================================================

/// Nutrient amounts for one serving, or a sum of servings
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionFacts {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
    pub sugar_g: f64,
    pub sodium_mg: f64,
}

impl NutritionFacts {
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            calories: self.calories * factor,
            protein_g: self.protein_g * factor,
            carbs_g: self.carbs_g * factor,
            fat_g: self.fat_g * factor,
            fiber_g: self.fiber_g * factor,
            sugar_g: self.sugar_g * factor,
            sodium_mg: self.sodium_mg * factor,
        }
    }
}

impl Add for NutritionFacts {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            calories: self.calories + rhs.calories,
            protein_g: self.protein_g + rhs.protein_g,
            carbs_g: self.carbs_g + rhs.carbs_g,
            fat_g: self.fat_g + rhs.fat_g,
            fiber_g: self.fiber_g + rhs.fiber_g,
            sugar_g: self.sugar_g + rhs.sugar_g,
            sodium_mg: self.sodium_mg + rhs.sodium_mg,
        }
    }
}

impl AddAssign for NutritionFacts {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for NutritionFacts {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// A food resolved from a barcode, a search or the user's own catalog.
///
/// Values are per serving as described by `serving_size` and `serving_unit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub brand: Option<String>,
    pub barcode: Option<String>,
    pub calories: i32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar: f64,
    /// Milligrams
    pub sodium: f64,
    pub serving_size: String,
    pub serving_unit: String,
    /// Where the item came from, e.g. "Open Food Facts"
    pub source: String,
}

impl FoodItem {
    pub fn nutrition(&self) -> NutritionFacts {
        NutritionFacts {
            calories: self.calories as f64,
            protein_g: self.protein,
            carbs_g: self.carbs,
            fat_g: self.fat,
            fiber_g: self.fiber,
            sugar_g: self.sugar,
            sodium_mg: self.sodium,
        }
    }
}

/// Supplement label details resolved from a barcode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplementInfo {
    pub name: String,
    pub brand: Option<String>,
    pub barcode: Option<String>,
    pub ingredients: Vec<String>,
    pub serving_size: Option<String>,
    pub nutrients: BTreeMap<String, f64>,
    pub source: String,
}

// ============================================================================
// Log Entries
// ============================================================================

/// One food logged to the diary. `nutrition` is per serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub name: String,
    pub brand: Option<String>,
    pub barcode: Option<String>,
    pub serving_size: String,
    pub serving_unit: String,
    pub serving_count: f64,
    pub nutrition: NutritionFacts,
    pub logged_at: DateTime<Utc>,
}

impl FoodEntry {
    /// Nutrition for all servings eaten
    pub fn totals(&self) -> NutritionFacts {
        self.nutrition.scaled(self.serving_count)
    }
}

/// Water intake, stored in US fluid ounces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub amount_oz: f64,
    pub logged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub name: String,
    pub category: String,
    pub duration_minutes: i32,
    pub calories_burned: f64,
    pub notes: Option<String>,
    pub logged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub weight_kg: f64,
    pub notes: Option<String>,
    pub logged_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplementEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub name: String,
    pub brand: Option<String>,
    pub servings: f64,
    pub serving_unit: String,
    pub nutrients: BTreeMap<String, f64>,
    pub regime_id: Option<Uuid>,
    pub logged_at: DateTime<Utc>,
}
