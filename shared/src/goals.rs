//! User goals and progress tracking

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    WeightLoss,
    Calories,
    Exercise,
    Water,
    Steps,
    Nutrition,
}

impl GoalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::WeightLoss => "weight_loss",
            GoalType::Calories => "calories",
            GoalType::Exercise => "exercise",
            GoalType::Water => "water",
            GoalType::Steps => "steps",
            GoalType::Nutrition => "nutrition",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GoalType::WeightLoss => "Weight Loss",
            GoalType::Calories => "Daily Calories",
            GoalType::Exercise => "Exercise",
            GoalType::Water => "Water Intake",
            GoalType::Steps => "Daily Steps",
            GoalType::Nutrition => "Nutrition",
        }
    }
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for GoalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weight_loss" => Ok(GoalType::WeightLoss),
            "calories" => Ok(GoalType::Calories),
            "exercise" => Ok(GoalType::Exercise),
            "water" => Ok(GoalType::Water),
            "steps" => Ok(GoalType::Steps),
            "nutrition" => Ok(GoalType::Nutrition),
            _ => Err(format!("Unknown goal type: {}", s)),
        }
    }
}

/// Progress percentage in 0..=100. A non-positive target reports zero.
pub fn goal_progress_percent(current_value: f64, target_value: f64) -> f64 {
    if target_value <= 0.0 || !current_value.is_finite() {
        return 0.0;
    }
    (current_value / target_value * 100.0).clamp(0.0, 100.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: Uuid,
    pub goal_type: GoalType,
    pub title: String,
    pub description: Option<String>,
    pub target_value: f64,
    pub current_value: f64,
    pub unit: String,
    pub progress: f64,
    pub start_date: NaiveDate,
    pub deadline: Option<NaiveDate>,
    pub is_active: bool,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Goal {
    /// Record a new current value and recompute progress.
    ///
    /// Reaching 100% marks the goal completed; dropping below clears it.
    pub fn record_progress(&mut self, current_value: f64, now: DateTime<Utc>) {
        self.current_value = current_value;
        self.progress = goal_progress_percent(current_value, self.target_value);
        if self.progress >= 100.0 {
            self.is_completed = true;
            self.completed_at.get_or_insert(now);
        } else {
            self.is_completed = false;
            self.completed_at = None;
        }
    }

    pub fn mark_complete(&mut self, now: DateTime<Utc>) {
        self.is_completed = true;
        self.is_active = false;
        self.progress = 100.0;
        self.completed_at = Some(now);
    }

    /// Start the goal over with a fresh deadline
    pub fn reactivate(&mut self, deadline: Option<NaiveDate>) {
        self.is_completed = false;
        self.is_active = true;
        self.progress = 0.0;
        self.completed_at = None;
        self.deadline = deadline;
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_active && !self.is_completed && self.deadline.is_some_and(|d| d < today)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalStatistics {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
    pub overdue: usize,
}

impl GoalStatistics {
    pub fn from_goals(goals: &[Goal], today: NaiveDate) -> Self {
        Self {
            total: goals.len(),
            active: goals.iter().filter(|g| g.is_active).count(),
            completed: goals.iter().filter(|g| g.is_completed).count(),
            overdue: goals.iter().filter(|g| g.is_overdue(today)).count(),
        }
    }
}

/// Longest window `upcoming_deadlines` will look ahead
pub const MAX_LOOKAHEAD_DAYS: i64 = 3650;

/// Active goals due between today and `days` from now, soonest first
pub fn upcoming_deadlines(goals: &[Goal], today: NaiveDate, days: i64) -> Vec<Goal> {
    let horizon = today + Duration::days(days.clamp(0, MAX_LOOKAHEAD_DAYS));
    let mut upcoming: Vec<Goal> = goals
        .iter()
        .filter(|g| g.is_active)
        .filter(|g| g.deadline.is_some_and(|d| d >= today && d <= horizon))
        .cloned()
        .collect();
    upcoming.sort_by_key(|g| g.deadline);
    upcoming
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn goal(target: f64, deadline: Option<NaiveDate>) -> Goal {
        Goal {
            id: Uuid::new_v4(),
            goal_type: GoalType::Water,
            title: "Drink more".to_string(),
            description: None,
            target_value: target,
            current_value: 0.0,
            unit: "oz".to_string(),
            progress: 0.0,
            start_date: day(1),
            deadline,
            is_active: true,
            is_completed: false,
            completed_at: None,
        }
    }

    #[test]
    fn test_progress_completes_at_target() {
        let mut g = goal(64.0, None);
        g.record_progress(32.0, Utc::now());
        assert_eq!(g.progress, 50.0);
        assert!(!g.is_completed);

        g.record_progress(80.0, Utc::now());
        assert_eq!(g.progress, 100.0);
        assert!(g.is_completed);
        assert!(g.completed_at.is_some());
    }

    #[test]
    fn test_zero_target_reports_zero() {
        assert_eq!(goal_progress_percent(10.0, 0.0), 0.0);
    }

    #[test]
    fn test_complete_and_reactivate() {
        let mut g = goal(10.0, Some(day(3)));
        g.mark_complete(Utc::now());
        assert!(g.is_completed && !g.is_active);

        g.reactivate(Some(day(20)));
        assert!(g.is_active && !g.is_completed);
        assert_eq!(g.progress, 0.0);
        assert_eq!(g.deadline, Some(day(20)));
    }

    #[test]
    fn test_statistics_and_overdue() {
        let overdue = goal(10.0, Some(day(2)));
        let mut done = goal(10.0, Some(day(2)));
        done.mark_complete(Utc::now());
        let open = goal(10.0, None);

        let stats = GoalStatistics::from_goals(&[overdue, done, open], day(10));
        assert_eq!(stats, GoalStatistics { total: 3, active: 2, completed: 1, overdue: 1 });
    }

    #[test]
    fn test_upcoming_deadlines_window_and_order() {
        let goals = vec![
            goal(1.0, Some(day(15))),
            goal(1.0, Some(day(11))),
            goal(1.0, Some(day(9))),  // past
            goal(1.0, Some(day(25))), // beyond window
            goal(1.0, None),
        ];
        let upcoming = upcoming_deadlines(&goals, day(10), 7);
        let deadlines: Vec<_> = upcoming.iter().map(|g| g.deadline.unwrap()).collect();
        assert_eq!(deadlines, vec![day(11), day(15)]);
    }

    #[test]
    fn test_upcoming_deadlines_caps_huge_windows() {
        let far = day(10) + Duration::days(MAX_LOOKAHEAD_DAYS + 1);
        let goals = vec![goal(1.0, Some(day(20))), goal(1.0, Some(far))];

        let upcoming = upcoming_deadlines(&goals, day(10), 1_000_000_000);
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming_deadlines(&goals, day(10), i64::MAX).len(), 1);
        assert!(upcoming_deadlines(&goals, day(10), -5).is_empty());
    }

    proptest! {
        #[test]
        fn prop_progress_is_bounded(current in -1e6f64..1e6, target in -1e3f64..1e6) {
            let p = goal_progress_percent(current, target);
            prop_assert!((0.0..=100.0).contains(&p));
        }
    }
}
