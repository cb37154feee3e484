//! Dashboard summary and insight rules
//!
//! A summary covers one day or a trailing period. Insights are evaluated
//! against per-day averages so a week view raises the same alerts a typical
//! day in that week would.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::diary::{oz_to_whole_cups, OZ_PER_CUP};

/// Minutes of exercise below which a movement reminder is raised
pub const MOVEMENT_REMINDER_MINUTES: i32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardPeriod {
    #[default]
    Day,
    Week,
    Month,
}

impl DashboardPeriod {
    pub fn days(&self) -> i64 {
        match self {
            DashboardPeriod::Day => 1,
            DashboardPeriod::Week => 7,
            DashboardPeriod::Month => 30,
        }
    }

    /// Inclusive date range ending on `end`
    pub fn range_ending(&self, end: NaiveDate) -> (NaiveDate, NaiveDate) {
        (end - Duration::days(self.days() - 1), end)
    }
}

impl std::str::FromStr for DashboardPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(DashboardPeriod::Day),
            "week" => Ok(DashboardPeriod::Week),
            "month" => Ok(DashboardPeriod::Month),
            _ => Err(format!("Unknown dashboard period: {}", s)),
        }
    }
}

/// Daily targets the dashboard measures against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashboardGoals {
    pub calories: i32,
    pub water_cups: i32,
    pub exercise_minutes: i32,
}

impl Default for DashboardGoals {
    fn default() -> Self {
        Self {
            calories: 2200,
            water_cups: 8,
            exercise_minutes: 60,
        }
    }
}

impl DashboardGoals {
    pub fn water_oz(&self) -> f64 {
        self.water_cups as f64 * OZ_PER_CUP
    }
}

/// Raw totals gathered for a period before they are summarized
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardTotals {
    pub calories_consumed: f64,
    pub water_oz: f64,
    pub exercise_minutes: i32,
    pub calories_burned: f64,
    pub latest_weight_kg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub period: DashboardPeriod,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub totals: DashboardTotals,
    pub days: i64,
    pub avg_calories: f64,
    pub avg_water_oz: f64,
    pub avg_exercise_minutes: f64,
    pub water_cups: i32,
    pub net_calories: f64,
    pub calories_percent: f64,
    pub water_percent: f64,
    pub exercise_percent: f64,
    pub goals: DashboardGoals,
}

fn percent_of(value: f64, goal: f64) -> f64 {
    if goal <= 0.0 {
        return 0.0;
    }
    (value / goal * 100.0).clamp(0.0, 100.0)
}

impl DashboardSummary {
    pub fn build(
        period: DashboardPeriod,
        end_date: NaiveDate,
        totals: DashboardTotals,
        goals: DashboardGoals,
    ) -> Self {
        let (start_date, end_date) = period.range_ending(end_date);
        let days = period.days();
        let per_day = |v: f64| v / days as f64;

        let avg_calories = per_day(totals.calories_consumed);
        let avg_water_oz = per_day(totals.water_oz);
        let avg_exercise_minutes = per_day(totals.exercise_minutes as f64);

        Self {
            period,
            start_date,
            end_date,
            totals,
            days,
            avg_calories,
            avg_water_oz,
            avg_exercise_minutes,
            water_cups: oz_to_whole_cups(avg_water_oz),
            net_calories: totals.calories_consumed - totals.calories_burned,
            calories_percent: percent_of(avg_calories, goals.calories as f64),
            water_percent: percent_of(avg_water_oz, goals.water_oz()),
            exercise_percent: percent_of(avg_exercise_minutes, goals.exercise_minutes as f64),
            goals,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightPriority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightType {
    Nutrition,
    Hydration,
    Exercise,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub title: String,
    pub description: String,
    pub insight_type: InsightType,
    pub priority: InsightPriority,
}

/// Rule-based nudges for the summary, highest priority first
pub fn generate_insights(summary: &DashboardSummary) -> Vec<Insight> {
    let goals = &summary.goals;
    let mut insights = Vec::new();

    let water_goal = goals.water_oz();
    if summary.avg_water_oz < water_goal {
        let percentage = if summary.avg_water_oz > 0.0 && water_goal > 0.0 {
            (summary.avg_water_oz / water_goal * 100.0) as i32
        } else {
            0
        };
        insights.push(Insight {
            title: "Hydration Alert".to_string(),
            description: format!("You're {}% below your daily water goal", 100 - percentage),
            insight_type: InsightType::Hydration,
            priority: if percentage < 30 {
                InsightPriority::High
            } else {
                InsightPriority::Medium
            },
        });
    }

    if summary.avg_calories > goals.calories as f64 {
        insights.push(Insight {
            title: "Calorie Alert".to_string(),
            description: "You've exceeded your daily calorie goal".to_string(),
            insight_type: InsightType::Nutrition,
            priority: InsightPriority::Medium,
        });
    }

    let minutes = summary.avg_exercise_minutes.floor() as i32;
    if minutes < MOVEMENT_REMINDER_MINUTES {
        insights.push(Insight {
            title: "Movement Reminder".to_string(),
            description: format!(
                "Time to get moving! Only {} minutes to reach your goal",
                MOVEMENT_REMINDER_MINUTES - minutes
            ),
            insight_type: InsightType::Exercise,
            priority: InsightPriority::Low,
        });
    }

    // stable sort keeps rule order among equal priorities
    insights.sort_by(|a, b| b.priority.cmp(&a.priority));
    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, 4).unwrap()
    }

    fn day_summary(calories: f64, water_oz: f64, minutes: i32) -> DashboardSummary {
        DashboardSummary::build(
            DashboardPeriod::Day,
            today(),
            DashboardTotals {
                calories_consumed: calories,
                water_oz,
                exercise_minutes: minutes,
                calories_burned: 0.0,
                latest_weight_kg: Some(75.5),
            },
            DashboardGoals::default(),
        )
    }

    #[test]
    fn test_default_goals() {
        let goals = DashboardGoals::default();
        assert_eq!(goals.calories, 2200);
        assert_eq!(goals.water_cups, 8);
        assert_eq!(goals.exercise_minutes, 60);
        assert_eq!(goals.water_oz(), 64.0);
    }

    #[test]
    fn test_summary_cups_and_percentages() {
        let s = day_summary(1500.0, 48.0, 45);
        assert_eq!(s.water_cups, 6);
        assert_eq!(s.water_percent, 75.0);
        assert_eq!(s.exercise_percent, 75.0);
        assert_eq!(s.totals.latest_weight_kg, Some(75.5));
    }

    #[test]
    fn test_low_water_is_high_priority() {
        let insights = generate_insights(&day_summary(1000.0, 16.0, 60));
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].title, "Hydration Alert");
        assert_eq!(insights[0].priority, InsightPriority::High);
        assert_eq!(insights[0].description, "You're 75% below your daily water goal");
    }

    #[rstest]
    #[case(0.0, InsightPriority::High, "You're 100% below your daily water goal")]
    #[case(32.0, InsightPriority::Medium, "You're 50% below your daily water goal")]
    fn test_hydration_priority(#[case] oz: f64, #[case] priority: InsightPriority, #[case] text: &str) {
        let insights = generate_insights(&day_summary(1000.0, oz, 60));
        let hydration = insights.iter().find(|i| i.insight_type == InsightType::Hydration).unwrap();
        assert_eq!(hydration.priority, priority);
        assert_eq!(hydration.description, text);
    }

    #[test]
    fn test_all_insights_sorted_by_priority() {
        let insights = generate_insights(&day_summary(2500.0, 40.0, 10));
        let titles: Vec<_> = insights.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Hydration Alert", "Calorie Alert", "Movement Reminder"]);
        assert_eq!(insights[2].description, "Time to get moving! Only 20 minutes to reach your goal");
    }

    #[test]
    fn test_no_insights_when_on_track() {
        assert!(generate_insights(&day_summary(2000.0, 64.0, 30)).is_empty());
    }

    #[test]
    fn test_week_uses_daily_averages() {
        let s = DashboardSummary::build(
            DashboardPeriod::Week,
            today(),
            DashboardTotals {
                calories_consumed: 14000.0,
                water_oz: 448.0,
                exercise_minutes: 420,
                calories_burned: 2100.0,
                latest_weight_kg: None,
            },
            DashboardGoals::default(),
        );
        assert_eq!(s.start_date, NaiveDate::from_ymd_opt(2024, 6, 28).unwrap());
        assert_eq!(s.avg_calories, 2000.0);
        assert_eq!(s.water_cups, 8);
        assert_eq!(s.net_calories, 11900.0);
        assert!(generate_insights(&s).is_empty());
    }
}
