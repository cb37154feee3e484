//! Multi-week meal plans
//!
//! Each plan runs four weeks. A few days are hand-written; every other day is
//! filled by the generator helpers below. Generated meals are deterministic so
//! the same plan, week and day always render the same values.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

pub const WEEKS_PER_PLAN: u32 = 4;
pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: String,
    pub name: String,
    pub description: String,
    pub calories: i32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub prep_time_minutes: i32,
    pub cook_time_minutes: i32,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMealPlan {
    pub id: String,
    pub day_name: String,
    pub breakfast: Meal,
    pub lunch: Meal,
    pub dinner: Meal,
    pub snacks: Vec<Meal>,
}

/// Summed macros for a planned day
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MealTotals {
    pub calories: i32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
}

impl DailyMealPlan {
    pub fn meals(&self) -> impl Iterator<Item = &Meal> {
        [&self.breakfast, &self.lunch, &self.dinner]
            .into_iter()
            .chain(self.snacks.iter())
    }

    pub fn totals(&self) -> MealTotals {
        self.meals().fold(MealTotals::default(), |acc, m| MealTotals {
            calories: acc.calories + m.calories,
            protein: acc.protein + m.protein,
            carbs: acc.carbs + m.carbs,
            fat: acc.fat + m.fat,
            fiber: acc.fiber + m.fiber,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyMealPlan {
    pub id: String,
    pub week_number: u32,
    pub days: Vec<DailyMealPlan>,
}

impl WeeklyMealPlan {
    /// Look a day up by name, case-insensitive
    pub fn day(&self, day_name: &str) -> Option<&DailyMealPlan> {
        self.days
            .iter()
            .find(|d| d.day_name.eq_ignore_ascii_case(day_name))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanType {
    pub id: String,
    pub name: String,
    pub description: String,
    pub benefits: Vec<String>,
    pub restrictions: Vec<String>,
    pub weeks: Vec<WeeklyMealPlan>,
}

impl MealPlanType {
    pub fn week(&self, week_number: u32) -> Option<&WeeklyMealPlan> {
        self.weeks.iter().find(|w| w.week_number == week_number)
    }
}

/// Plan header without the weekly content, for listings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MealPlanSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub benefits: Vec<String>,
    pub restrictions: Vec<String>,
    pub week_count: usize,
}

impl From<&MealPlanType> for MealPlanSummary {
    fn from(plan: &MealPlanType) -> Self {
        Self {
            id: plan.id.clone(),
            name: plan.name.clone(),
            description: plan.description.clone(),
            benefits: plan.benefits.clone(),
            restrictions: plan.restrictions.clone(),
            week_count: plan.weeks.len(),
        }
    }
}

// ============================================================================
// Plan definitions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealSlot {
    fn index(&self) -> u64 {
        match self {
            MealSlot::Breakfast => 0,
            MealSlot::Lunch => 1,
            MealSlot::Dinner => 2,
            MealSlot::Snack => 3,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "Breakfast",
            MealSlot::Lunch => "Lunch",
            MealSlot::Dinner => "Dinner",
            MealSlot::Snack => "Snack",
        }
    }
}

struct PlanProfile {
    id: &'static str,
    name: &'static str,
    /// Prefix for week, day and meal ids
    prefix: &'static str,
    /// Word used in generated meal names, e.g. "Keto Lunch 3"
    label: &'static str,
    description: &'static str,
    benefits: &'static [&'static str],
    restrictions: &'static [&'static str],
    /// Fixed kcal per slot; `None` draws from 300..=600
    slot_calories: Option<[i32; 4]>,
    fasting_breakfast: bool,
}

const PLAN_PROFILES: [PlanProfile; 8] = [
    PlanProfile {
        id: "mediterranean",
        name: "Mediterranean",
        prefix: "med",
        label: "Mediterranean",
        description: "Heart-healthy diet rich in fruits, vegetables, whole grains, and olive oil",
        benefits: &["Reduces heart disease risk", "Supports brain health", "Anti-inflammatory", "Promotes longevity"],
        restrictions: &["Limited red meat", "Moderate dairy", "No processed foods"],
        slot_calories: None,
        fasting_breakfast: false,
    },
    PlanProfile {
        id: "keto",
        name: "Keto",
        prefix: "keto",
        label: "Keto",
        description: "High-fat, low-carb diet for ketosis and weight loss",
        benefits: &["Rapid weight loss", "Improved mental clarity", "Reduced appetite", "Better blood sugar control"],
        restrictions: &["Less than 20g carbs daily", "No grains or sugar", "Limited fruits", "No starchy vegetables"],
        slot_calories: None,
        fasting_breakfast: false,
    },
    PlanProfile {
        id: "intermittent-fasting",
        name: "Intermittent Fasting (16:8)",
        prefix: "if",
        label: "IF",
        description: "Time-restricted eating with 16-hour fast and 8-hour eating window",
        benefits: &["Weight loss", "Improved insulin sensitivity", "Cellular repair", "Mental clarity", "Longevity benefits"],
        restrictions: &["No calories during fasting window", "Eating window: 12pm-8pm", "Stay hydrated during fast"],
        slot_calories: None,
        fasting_breakfast: true,
    },
    PlanProfile {
        id: "family-friendly",
        name: "Family Friendly",
        prefix: "family",
        label: "Family",
        description: "Kid-approved meals that are healthy and delicious for the whole family",
        benefits: &["Appeals to all ages", "Hidden vegetables", "Balanced nutrition", "Easy to prepare", "Budget-friendly"],
        restrictions: &["No overly spicy foods", "Familiar flavors", "Fun presentations"],
        slot_calories: None,
        fasting_breakfast: false,
    },
    PlanProfile {
        id: "vegetarian",
        name: "Vegetarian",
        prefix: "veg",
        label: "Vegetarian",
        description: "Plant-based meals rich in protein and nutrients",
        benefits: &["High fiber intake", "Lower carbon footprint", "Heart healthy", "Rich in antioxidants", "Diverse flavors"],
        restrictions: &["No meat or fish", "Focus on protein sources", "B12 supplementation recommended"],
        slot_calories: None,
        fasting_breakfast: false,
    },
    PlanProfile {
        id: "paleo",
        name: "Paleo",
        prefix: "paleo",
        label: "Paleo",
        description: "Eat like our ancestors - whole foods, no grains, dairy, or processed foods",
        benefits: &["Reduced inflammation", "Improved blood sugar control", "Weight loss", "Increased energy", "Better digestion"],
        restrictions: &["No grains or legumes", "No dairy products", "No processed foods", "No refined sugar", "No artificial ingredients"],
        slot_calories: Some([400, 480, 520, 150]),
        fasting_breakfast: false,
    },
    PlanProfile {
        id: "whole30",
        name: "Whole30",
        prefix: "whole30",
        label: "Whole30",
        description: "30-day reset focusing on whole foods to identify food sensitivities",
        benefits: &["Identify food sensitivities", "Reset eating habits", "Improved energy levels", "Better sleep quality", "Reduced cravings", "Clearer skin"],
        restrictions: &["No sugar or sweeteners", "No alcohol", "No grains", "No legumes", "No dairy"],
        slot_calories: Some([380, 450, 500, 140]),
        fasting_breakfast: false,
    },
    PlanProfile {
        id: "vegan",
        name: "Vegan",
        prefix: "vegan",
        label: "Vegan",
        description: "100% plant-based diet with no animal products for health and ethics",
        benefits: &["Lower carbon footprint", "Reduced risk of heart disease", "High fiber intake", "Weight management", "Improved gut health", "Ethical eating"],
        restrictions: &["No meat or poultry", "No fish or seafood", "No dairy products", "No eggs", "No honey"],
        slot_calories: Some([400, 500, 450, 160]),
        fasting_breakfast: false,
    },
];

fn profile(plan_id: &str) -> Option<&'static PlanProfile> {
    PLAN_PROFILES.iter().find(|p| p.id == plan_id)
}

// ============================================================================
// Generators
// ============================================================================

/// FNV-1a over the plan id, slot and day number
fn seed(plan_id: &str, slot: MealSlot, day_number: u32) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    let bytes = plan_id
        .bytes()
        .chain(slot.index().to_le_bytes())
        .chain(day_number.to_le_bytes());
    for b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    hash
}

/// Pick a value in `lo..=hi` from a seed, consuming a few bits per draw
fn draw(state: &mut u64, lo: i32, hi: i32) -> i32 {
    let span = (hi - lo + 1) as u64;
    let value = lo + (*state % span) as i32;
    *state = state.rotate_right(11) ^ 0x9e37_79b9_7f4a_7c15;
    value
}

/// Day number within a plan, 1-based across weeks
pub fn day_number(week_number: u32, day_index: usize) -> u32 {
    (week_number.saturating_sub(1)) * 7 + day_index as u32 + 1
}

/// Placeholder meal for a plan slot on a given day.
///
/// Returns `None` for an unknown plan id.
pub fn generate_meal(plan_id: &str, slot: MealSlot, day_number: u32) -> Option<Meal> {
    let plan = profile(plan_id)?;
    let id = format!("{}-d{}-{}", plan.prefix, day_number, slot.label().to_lowercase());

    if plan.fasting_breakfast && slot == MealSlot::Breakfast {
        return Some(Meal {
            id,
            name: "Fasting Period".to_string(),
            description: "Water, black coffee or plain tea only".to_string(),
            calories: 0,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
            fiber: 0.0,
            prep_time_minutes: 0,
            cook_time_minutes: 0,
            ingredients: Vec::new(),
            instructions: Vec::new(),
            tags: vec!["fasting".to_string()],
        });
    }

    let name = match (plan.fasting_breakfast, slot) {
        (true, MealSlot::Lunch) => format!("{} Breaking Fast Meal {}", plan.label, day_number),
        (true, MealSlot::Dinner) => format!("{} Last Meal {}", plan.label, day_number),
        _ => format!("{} {} {}", plan.label, slot.label(), day_number),
    };

    let mut state = seed(plan.id, slot, day_number);
    let calories = match plan.slot_calories {
        Some(fixed) => fixed[slot.index() as usize],
        None => draw(&mut state, 300, 600),
    };

    Some(Meal {
        id,
        name,
        description: format!("Delicious {} meal", plan.id),
        calories,
        protein: draw(&mut state, 15, 40) as f64,
        carbs: draw(&mut state, 20, 60) as f64,
        fat: draw(&mut state, 10, 30) as f64,
        fiber: draw(&mut state, 3, 10) as f64,
        prep_time_minutes: draw(&mut state, 5, 20),
        cook_time_minutes: draw(&mut state, 0, 30),
        ingredients: vec![
            "Ingredient 1".to_string(),
            "Ingredient 2".to_string(),
            "Ingredient 3".to_string(),
        ],
        instructions: vec!["Step 1".to_string(), "Step 2".to_string(), "Step 3".to_string()],
        tags: vec![plan.id.to_string(), "healthy".to_string()],
    })
}

/// Generated day `day_index` (0 = Monday) of `week_number`
pub fn generate_day(plan_id: &str, week_number: u32, day_index: usize) -> Option<DailyMealPlan> {
    let plan = profile(plan_id)?;
    let day_name = DAY_NAMES.get(day_index)?;
    let n = day_number(week_number, day_index);

    Some(DailyMealPlan {
        id: format!("{}-w{}-{}", plan.prefix, week_number, day_name.to_lowercase()),
        day_name: day_name.to_string(),
        breakfast: generate_meal(plan_id, MealSlot::Breakfast, n)?,
        lunch: generate_meal(plan_id, MealSlot::Lunch, n)?,
        dinner: generate_meal(plan_id, MealSlot::Dinner, n)?,
        snacks: vec![generate_meal(plan_id, MealSlot::Snack, n)?],
    })
}

/// A full generated week, Monday through Sunday
pub fn generate_week(plan_id: &str, week_number: u32) -> Option<WeeklyMealPlan> {
    let plan = profile(plan_id)?;
    let days = (0..DAY_NAMES.len())
        .map(|idx| generate_day(plan_id, week_number, idx))
        .collect::<Option<Vec<_>>>()?;

    Some(WeeklyMealPlan {
        id: format!("{}-week-{}", plan.prefix, week_number),
        week_number,
        days,
    })
}

// ============================================================================
// Authored days
// ============================================================================

#[allow(clippy::too_many_arguments)]
fn authored(
    id: &str,
    name: &str,
    description: &str,
    calories: i32,
    macros: (f64, f64, f64, f64),
    times: (i32, i32),
    ingredients: &[&str],
    instructions: &[&str],
    tags: &[&str],
) -> Meal {
    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    Meal {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        calories,
        protein: macros.0,
        carbs: macros.1,
        fat: macros.2,
        fiber: macros.3,
        prep_time_minutes: times.0,
        cook_time_minutes: times.1,
        ingredients: owned(ingredients),
        instructions: owned(instructions),
        tags: owned(tags),
    }
}

/// Hand-written days that replace generated ones, keyed by (plan, week, day)
fn authored_day(plan_id: &str, week_number: u32, day_index: usize) -> Option<DailyMealPlan> {
    match (plan_id, week_number, day_index) {
        ("mediterranean", 1, 0) => Some(DailyMealPlan {
            id: "med-w1-monday".to_string(),
            day_name: "Monday".to_string(),
            breakfast: authored(
                "med-b1",
                "Greek Yogurt Parfait",
                "Creamy Greek yogurt layered with honey, walnuts, and fresh berries",
                350,
                (18.0, 42.0, 12.0, 5.0),
                (5, 0),
                &["1 cup Greek yogurt", "2 tbsp honey", "1/4 cup walnuts", "1/2 cup mixed berries", "1 tbsp chia seeds"],
                &["Layer yogurt in a bowl", "Drizzle with honey", "Top with berries, walnuts, and chia seeds"],
                &["vegetarian", "high-protein", "quick"],
            ),
            lunch: authored(
                "med-l1",
                "Mediterranean Quinoa Bowl",
                "Fluffy quinoa topped with roasted vegetables, feta, and olive tapenade",
                480,
                (16.0, 58.0, 22.0, 9.0),
                (15, 25),
                &["1 cup quinoa", "1 zucchini", "1 bell pepper", "1/4 cup feta", "2 tbsp olive tapenade", "Cherry tomatoes", "Olive oil"],
                &["Cook quinoa", "Roast vegetables with olive oil", "Assemble bowl with quinoa base", "Top with vegetables, feta, and tapenade"],
                &["vegetarian", "meal-prep", "fiber-rich"],
            ),
            dinner: authored(
                "med-d1",
                "Lemon Herb Salmon",
                "Oven-baked salmon with lemon, garlic and oregano over greens",
                520,
                (38.0, 12.0, 34.0, 4.0),
                (10, 20),
                &["6 oz salmon fillet", "1 lemon", "2 cloves garlic", "1 tsp oregano", "2 cups mixed greens", "Olive oil"],
                &["Season salmon with garlic, oregano and lemon", "Bake at 400F for 15-20 minutes", "Serve over dressed greens"],
                &["pescatarian", "omega-3", "high-protein"],
            ),
            snacks: vec![authored(
                "med-s1",
                "Hummus and Veggies",
                "Classic hummus with crunchy raw vegetables",
                180,
                (6.0, 18.0, 9.0, 5.0),
                (5, 0),
                &["1/4 cup hummus", "Carrot sticks", "Cucumber slices"],
                &["Slice vegetables", "Serve with hummus"],
                &["vegan", "quick"],
            )],
        }),
        ("keto", 1, 0) => Some(DailyMealPlan {
            id: "keto-w1-monday".to_string(),
            day_name: "Monday".to_string(),
            breakfast: authored(
                "keto-b1",
                "Bacon and Spinach Scramble",
                "Eggs scrambled in butter with bacon and wilted spinach",
                450,
                (26.0, 4.0, 36.0, 2.0),
                (5, 10),
                &["3 eggs", "2 strips bacon", "1 cup spinach", "1 tbsp butter"],
                &["Cook bacon and set aside", "Wilt spinach in butter", "Scramble eggs with spinach and crumbled bacon"],
                &["low-carb", "high-fat"],
            ),
            lunch: authored(
                "keto-l1",
                "Avocado Chicken Salad",
                "Shredded chicken tossed with avocado, lime and cilantro",
                520,
                (35.0, 8.0, 38.0, 7.0),
                (15, 0),
                &["6 oz cooked chicken", "1 avocado", "1 lime", "Cilantro", "Mayonnaise"],
                &["Shred chicken", "Mash avocado with lime", "Fold together with cilantro and mayonnaise"],
                &["low-carb", "meal-prep"],
            ),
            dinner: authored(
                "keto-d1",
                "Garlic Butter Steak with Asparagus",
                "Pan-seared ribeye finished with garlic butter",
                640,
                (45.0, 6.0, 48.0, 3.0),
                (5, 15),
                &["8 oz ribeye", "1 bunch asparagus", "2 tbsp butter", "3 cloves garlic"],
                &["Sear steak 4 minutes per side", "Baste with garlic butter", "Roast asparagus alongside"],
                &["low-carb", "high-protein"],
            ),
            snacks: vec![authored(
                "keto-s1",
                "Cheese and Almonds",
                "Cheddar cubes with a handful of almonds",
                220,
                (10.0, 4.0, 19.0, 2.0),
                (2, 0),
                &["1 oz cheddar", "1 oz almonds"],
                &["Portion and serve"],
                &["low-carb", "quick"],
            )],
        }),
        _ => None,
    }
}

fn build_plan(profile: &PlanProfile) -> MealPlanType {
    let weeks = (1..=WEEKS_PER_PLAN)
        .map(|week_number| WeeklyMealPlan {
            id: format!("{}-week-{}", profile.prefix, week_number),
            week_number,
            days: (0..DAY_NAMES.len())
                .filter_map(|idx| {
                    authored_day(profile.id, week_number, idx)
                        .or_else(|| generate_day(profile.id, week_number, idx))
                })
                .collect(),
        })
        .collect();

    MealPlanType {
        id: profile.id.to_string(),
        name: profile.name.to_string(),
        description: profile.description.to_string(),
        benefits: profile.benefits.iter().map(|s| s.to_string()).collect(),
        restrictions: profile.restrictions.iter().map(|s| s.to_string()).collect(),
        weeks,
    }
}

static ALL_PLANS: Lazy<Vec<MealPlanType>> = Lazy::new(|| PLAN_PROFILES.iter().map(build_plan).collect());

pub fn all_plans() -> &'static [MealPlanType] {
    &ALL_PLANS
}

pub fn find_plan(plan_id: &str) -> Option<&'static MealPlanType> {
    ALL_PLANS.iter().find(|p| p.id == plan_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_catalog_has_every_plan_with_four_full_weeks() {
        let ids: Vec<_> = all_plans().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["mediterranean", "keto", "intermittent-fasting", "family-friendly", "vegetarian", "paleo", "whole30", "vegan"]
        );
        for plan in all_plans() {
            assert_eq!(plan.weeks.len(), 4, "{}", plan.id);
            assert!(plan.weeks.iter().all(|w| w.days.len() == 7), "{}", plan.id);
        }
    }

    #[test]
    fn test_authored_day_wins_over_generated() {
        let monday = find_plan("mediterranean").unwrap().week(1).unwrap().day("monday").unwrap();
        assert_eq!(monday.breakfast.name, "Greek Yogurt Parfait");
        assert_eq!(monday.totals().calories, 350 + 480 + 520 + 180);

        let tuesday = find_plan("mediterranean").unwrap().week(1).unwrap().day("Tuesday").unwrap();
        assert_eq!(tuesday.breakfast.name, "Mediterranean Breakfast 2");
    }

    #[test]
    fn test_generated_names_and_ids_use_day_number() {
        let day = generate_day("vegan", 2, 3).unwrap();
        assert_eq!(day.id, "vegan-w2-thursday");
        assert_eq!(day.day_name, "Thursday");
        assert_eq!(day.lunch.name, "Vegan Lunch 11");
        assert_eq!(day.lunch.calories, 500);
        assert_eq!(day.snacks[0].calories, 160);
    }

    #[test]
    fn test_fasting_breakfast() {
        let day = generate_day("intermittent-fasting", 3, 0).unwrap();
        assert_eq!(day.breakfast.name, "Fasting Period");
        assert_eq!(day.breakfast.calories, 0);
        assert_eq!(day.lunch.name, "IF Breaking Fast Meal 15");
        assert_eq!(day.dinner.name, "IF Last Meal 15");
    }

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(generate_week("keto", 3), generate_week("keto", 3));
        assert_ne!(
            generate_meal("keto", MealSlot::Lunch, 5),
            generate_meal("keto", MealSlot::Lunch, 6)
        );
    }

    #[test]
    fn test_unknown_plan_and_day() {
        assert!(find_plan("carnivore").is_none());
        assert!(generate_week("carnivore", 1).is_none());
        assert!(generate_day("keto", 1, 7).is_none());
        assert!(find_plan("keto").unwrap().week(5).is_none());
    }

    proptest! {
        #[test]
        fn prop_generated_values_in_range(plan_idx in 0usize..8, week in 1u32..=4, day in 0usize..7) {
            let plan_id = PLAN_PROFILES[plan_idx].id;
            let generated = generate_day(plan_id, week, day).unwrap();
            for meal in generated.meals().filter(|m| m.name != "Fasting Period") {
                prop_assert!((100..=600).contains(&meal.calories));
                prop_assert!((15.0..=40.0).contains(&meal.protein));
                prop_assert!((20.0..=60.0).contains(&meal.carbs));
                prop_assert!((10.0..=30.0).contains(&meal.fat));
                prop_assert!((3.0..=10.0).contains(&meal.fiber));
                prop_assert!((5..=20).contains(&meal.prep_time_minutes));
                prop_assert!((0..=30).contains(&meal.cook_time_minutes));
            }
        }
    }
}
