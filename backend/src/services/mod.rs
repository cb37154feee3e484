//! Tracking, lookup and account services
//!
//! Each service validates its input, then talks to the repositories or the
//! nutrition provider chains.

pub mod dashboard;
pub mod diary;
pub mod exercise;
pub mod food;
pub mod goals;
pub mod profile;
pub mod supplements;
pub mod user;
pub mod water;
pub mod weight;

pub use dashboard::DashboardService;
pub use diary::DiaryService;
pub use exercise::ExerciseService;
pub use food::FoodService;
pub use goals::GoalService;
pub use profile::ProfileService;
pub use supplements::SupplementService;
pub use user::UserService;
pub use water::WaterService;
pub use weight::WeightService;

use crate::error::ApiError;
use chrono::{NaiveDate, Utc};

/// Today's date in UTC
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Entries without a date belong to today
pub fn resolve_date(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(today)
}

/// Parse a `YYYY-MM-DD` query value, defaulting to today when absent
pub fn parse_date(value: Option<&str>) -> Result<NaiveDate, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(today()),
        Some(v) => NaiveDate::parse_from_str(v, "%Y-%m-%d").map_err(|_| ApiError::InvalidField {
            field: "date".to_string(),
            message: format!("Invalid date '{}', expected YYYY-MM-DD", v),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("2024-02-29"), NaiveDate::from_ymd_opt(2024, 2, 29))]
    #[case(Some(" 2023-12-31 "), NaiveDate::from_ymd_opt(2023, 12, 31))]
    fn test_parse_date_valid(#[case] input: Option<&str>, #[case] expected: Option<NaiveDate>) {
        assert_eq!(parse_date(input).ok(), expected);
    }

    #[rstest]
    #[case("2023-02-29")]
    #[case("31/12/2023")]
    #[case("yesterday")]
    fn test_parse_date_invalid(#[case] input: &str) {
        assert!(matches!(
            parse_date(Some(input)),
            Err(ApiError::InvalidField { .. })
        ));
    }

    #[test]
    fn test_missing_date_is_today() {
        assert_eq!(parse_date(None).unwrap(), today());
        assert_eq!(parse_date(Some("")).unwrap(), today());
        assert_eq!(resolve_date(None), today());
    }
}
