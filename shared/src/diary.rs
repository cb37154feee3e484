//! Daily food diary aggregation

use crate::models::{FoodEntry, MealType, NutritionFacts, WaterEntry};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fluid ounces in one cup of water
pub const OZ_PER_CUP: f64 = 8.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealGroup {
    pub meal_type: MealType,
    pub entries: Vec<FoodEntry>,
    pub totals: NutritionFacts,
}

/// Everything eaten on one day, grouped by meal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyDiary {
    pub date: NaiveDate,
    pub meals: Vec<MealGroup>,
    pub totals: NutritionFacts,
    pub entry_count: usize,
}

impl DailyDiary {
    /// Group entries by meal in breakfast, lunch, dinner, snack order.
    ///
    /// Every meal type is present even when empty so clients can render fixed
    /// sections. Entries keep their logged order within a meal.
    pub fn build(date: NaiveDate, entries: Vec<FoodEntry>) -> Self {
        let entry_count = entries.len();
        let mut meals: Vec<MealGroup> = MealType::ALL
            .iter()
            .map(|meal_type| MealGroup {
                meal_type: *meal_type,
                entries: Vec::new(),
                totals: NutritionFacts::default(),
            })
            .collect();

        for entry in entries {
            // ALL is indexed in declaration order
            let idx = MealType::ALL
                .iter()
                .position(|m| *m == entry.meal_type)
                .unwrap_or(MealType::ALL.len() - 1);
            meals[idx].totals += entry.totals();
            meals[idx].entries.push(entry);
        }

        let totals = meals.iter().map(|m| m.totals).sum();
        Self {
            date,
            meals,
            totals,
            entry_count,
        }
    }

    pub fn meal(&self, meal_type: MealType) -> Option<&MealGroup> {
        self.meals.iter().find(|m| m.meal_type == meal_type)
    }
}

/// Water drunk on one day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyWater {
    pub date: NaiveDate,
    pub total_oz: f64,
    pub cups: i32,
    pub goal_cups: i32,
    pub entries: Vec<WaterEntry>,
}

impl DailyWater {
    pub fn build(date: NaiveDate, entries: Vec<WaterEntry>, goal_cups: i32) -> Self {
        let total_oz: f64 = entries.iter().map(|e| e.amount_oz).sum();
        Self {
            date,
            total_oz,
            cups: oz_to_whole_cups(total_oz),
            goal_cups,
            entries,
        }
    }
}

/// Whole cups, rounding down
pub fn oz_to_whole_cups(oz: f64) -> i32 {
    (oz / OZ_PER_CUP).floor().max(0.0) as i32
}

/// The entry "remove a cup" deletes: the most recently logged one
pub fn last_water_entry(entries: &[WaterEntry]) -> Option<&WaterEntry> {
    entries.iter().max_by_key(|e| e.logged_at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 10).unwrap()
    }

    fn entry(meal_type: MealType, calories: f64, servings: f64) -> FoodEntry {
        FoodEntry {
            id: Uuid::new_v4(),
            date: date(),
            meal_type,
            name: "Food".to_string(),
            brand: None,
            barcode: None,
            serving_size: "1".to_string(),
            serving_unit: "serving".to_string(),
            serving_count: servings,
            nutrition: NutritionFacts {
                calories,
                protein_g: 10.0,
                ..Default::default()
            },
            logged_at: Utc::now(),
        }
    }

    #[test]
    fn test_diary_groups_in_meal_order() {
        let diary = DailyDiary::build(
            date(),
            vec![
                entry(MealType::Snack, 100.0, 1.0),
                entry(MealType::Breakfast, 300.0, 2.0),
                entry(MealType::Breakfast, 50.0, 1.0),
            ],
        );

        let order: Vec<_> = diary.meals.iter().map(|m| m.meal_type).collect();
        assert_eq!(order, MealType::ALL.to_vec());
        assert_eq!(diary.meal(MealType::Breakfast).unwrap().entries.len(), 2);
        assert_eq!(diary.meal(MealType::Breakfast).unwrap().totals.calories, 650.0);
        assert!(diary.meal(MealType::Lunch).unwrap().entries.is_empty());
        assert_eq!(diary.totals.calories, 750.0);
        assert_eq!(diary.totals.protein_g, 40.0);
        assert_eq!(diary.entry_count, 3);
    }

    #[test]
    fn test_empty_diary() {
        let diary = DailyDiary::build(date(), vec![]);
        assert_eq!(diary.totals, NutritionFacts::default());
        assert_eq!(diary.meals.len(), 4);
    }

    #[test]
    fn test_water_cups_and_last_entry() {
        let base = Utc.with_ymd_and_hms(2024, 2, 10, 8, 0, 0).unwrap();
        let entries: Vec<WaterEntry> = (0..3)
            .map(|i| WaterEntry {
                id: Uuid::new_v4(),
                date: date(),
                amount_oz: 8.0 + i as f64 * 4.0,
                logged_at: base + Duration::hours(i),
            })
            .collect();

        let last_id = entries[2].id;
        assert_eq!(last_water_entry(&entries).unwrap().id, last_id);

        let water = DailyWater::build(date(), entries, 8);
        assert_eq!(water.total_oz, 36.0);
        assert_eq!(water.cups, 4);
    }
}
