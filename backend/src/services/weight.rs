//! Weight tracking
//!
//! Weigh-ins are stored in kilograms whatever unit they were entered in.
//! The newest weigh-in also becomes the profile's current weight.

use super::{resolve_date, today};
use crate::error::ApiError;
use crate::repositories::{
    decimal_to_f64, CreateWeightEntry, ProfileRepository, WeightRepository,
};
use chrono::{Duration, NaiveDate};
use ml_fitness_shared::health_metrics::{calculate_bmi, classify_bmi};
use ml_fitness_shared::models::WeightEntry;
use ml_fitness_shared::types::{LogWeightRequest, WeightSummaryResponse};
use ml_fitness_shared::units::{format_weight, UnitSystem};
use ml_fitness_shared::validation::{check_field, validate_weight};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

const WEEK_DAYS: i64 = 7;
const MONTH_DAYS: i64 = 30;
const DEFAULT_HISTORY_DAYS: i64 = 90;
const MAX_HISTORY_DAYS: i64 = 3650;

/// First day of a history window ending today
fn history_start(today: NaiveDate, days: Option<i64>) -> NaiveDate {
    let days = days
        .unwrap_or(DEFAULT_HISTORY_DAYS)
        .clamp(1, MAX_HISTORY_DAYS);
    today - Duration::days(days - 1)
}

/// Summary over weigh-ins ordered newest first
pub fn summarize(
    entries: &[WeightEntry],
    today: NaiveDate,
    height_cm: Option<f64>,
    unit_system: UnitSystem,
) -> WeightSummaryResponse {
    let latest = entries.first().cloned();

    let week_start = today - Duration::days(WEEK_DAYS - 1);
    let week: Vec<f64> = entries
        .iter()
        .filter(|e| e.date >= week_start && e.date <= today)
        .map(|e| e.weight_kg)
        .collect();
    let weekly_average_kg = (!week.is_empty()).then(|| week.iter().sum::<f64>() / week.len() as f64);

    let month_start = today - Duration::days(MONTH_DAYS - 1);
    let month: Vec<&WeightEntry> = entries
        .iter()
        .filter(|e| e.date >= month_start && e.date <= today)
        .collect();
    let monthly_change_kg = match (month.first(), month.last()) {
        (Some(newest), Some(oldest)) if month.len() > 1 => Some(newest.weight_kg - oldest.weight_kg),
        _ => None,
    };

    let bmi = latest
        .as_ref()
        .zip(height_cm)
        .map(|(e, h)| calculate_bmi(e.weight_kg, h))
        .filter(|b| b.is_finite() && *b > 0.0);

    WeightSummaryResponse {
        latest_display: latest.as_ref().map(|e| format_weight(e.weight_kg, unit_system)),
        latest,
        weekly_average_kg,
        monthly_change_kg,
        bmi,
        bmi_category: bmi.map(classify_bmi),
    }
}

pub struct WeightService;

impl WeightService {
    pub async fn log(
        pool: &PgPool,
        user_id: Uuid,
        req: LogWeightRequest,
    ) -> Result<WeightEntry, ApiError> {
        let weight_kg = req.unit.to_kg(req.weight);
        check_field("weight", validate_weight(weight_kg))?;

        let date = resolve_date(req.date);
        let record = WeightRepository::create(
            pool,
            CreateWeightEntry {
                user_id,
                date,
                weight_kg,
                notes: req.notes,
            },
        )
        .await
        .map_err(ApiError::Internal)?;

        let newest = WeightRepository::latest(pool, user_id, date.max(today()))
            .await
            .map_err(ApiError::Internal)?;
        if newest.as_ref().is_some_and(|n| n.id == record.id) {
            ProfileRepository::set_current_weight(pool, user_id, weight_kg)
                .await
                .map_err(ApiError::Internal)?;
        }

        debug!(user_id = %user_id, weight_kg, "Weight logged");
        Ok(record.into())
    }

    pub async fn delete_entry(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let deleted = WeightRepository::delete(pool, id, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Weight entry not found".to_string()));
        }
        Ok(())
    }

    pub async fn history(
        pool: &PgPool,
        user_id: Uuid,
        days: Option<i64>,
    ) -> Result<Vec<WeightEntry>, ApiError> {
        let since = history_start(today(), days);

        Ok(WeightRepository::history(pool, user_id, Some(since))
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .map(WeightEntry::from)
            .collect())
    }

    pub async fn summary(pool: &PgPool, user_id: Uuid) -> Result<WeightSummaryResponse, ApiError> {
        let today = today();
        let profile = ProfileRepository::get(pool, user_id)
            .await
            .map_err(ApiError::Internal)?;
        let height_cm = profile
            .as_ref()
            .and_then(|p| p.height_cm)
            .map(decimal_to_f64);
        let unit_system = profile
            .as_ref()
            .and_then(|p| p.unit_system.parse::<UnitSystem>().ok())
            .unwrap_or_default();

        let mut entries: Vec<WeightEntry> =
            WeightRepository::history(pool, user_id, Some(today - Duration::days(MONTH_DAYS - 1)))
                .await
                .map_err(ApiError::Internal)?
                .into_iter()
                .map(WeightEntry::from)
                .collect();

        // the newest weigh-in may be older than the 30 day window
        if entries.is_empty() {
            if let Some(latest) = WeightRepository::latest(pool, user_id, today)
                .await
                .map_err(ApiError::Internal)?
            {
                entries.push(latest.into());
            }
        }

        Ok(summarize(&entries, today, height_cm, unit_system))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ml_fitness_shared::health_metrics::BmiCategory;

    fn entry(date: NaiveDate, kg: f64) -> WeightEntry {
        WeightEntry {
            id: Uuid::new_v4(),
            date,
            weight_kg: kg,
            notes: None,
            logged_at: Utc::now(),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_history_start_window() {
        assert_eq!(history_start(day(31), Some(7)), day(25));
        assert_eq!(history_start(day(31), Some(0)), day(31));
        assert_eq!(history_start(day(31), None), day(31) - Duration::days(89));
    }

    #[test]
    fn test_history_start_caps_huge_windows() {
        let start = history_start(day(31), Some(1_000_000_000));
        assert_eq!(start, day(31) - Duration::days(MAX_HISTORY_DAYS - 1));
        assert_eq!(history_start(day(31), Some(i64::MAX)), start);
    }

    #[test]
    fn test_summary_of_no_entries() {
        let summary = summarize(&[], day(31), Some(175.0), UnitSystem::Metric);
        assert!(summary.latest.is_none());
        assert!(summary.weekly_average_kg.is_none());
        assert!(summary.monthly_change_kg.is_none());
        assert!(summary.bmi.is_none());
    }

    #[test]
    fn test_weekly_average_and_monthly_change() {
        let entries = vec![
            entry(day(31), 80.0),
            entry(day(28), 81.0),
            entry(day(20), 82.0),
            entry(day(5), 84.0),
        ];
        let summary = summarize(&entries, day(31), Some(180.0), UnitSystem::Metric);

        assert_eq!(summary.weekly_average_kg, Some(80.5));
        assert_eq!(summary.monthly_change_kg, Some(-4.0));
        assert_eq!(summary.latest.as_ref().map(|e| e.weight_kg), Some(80.0));
        assert_eq!(summary.latest_display.as_deref(), Some("80.0 kg"));
    }

    #[test]
    fn test_single_entry_has_no_monthly_change() {
        let summary = summarize(&[entry(day(31), 70.0)], day(31), None, UnitSystem::Metric);
        assert_eq!(summary.weekly_average_kg, Some(70.0));
        assert!(summary.monthly_change_kg.is_none());
        assert!(summary.bmi.is_none());
    }

    #[test]
    fn test_bmi_uses_profile_height() {
        let summary = summarize(&[entry(day(31), 70.0)], day(31), Some(175.0), UnitSystem::Metric);
        let bmi = summary.bmi.unwrap();
        assert!((bmi - 22.857).abs() < 0.01);
        assert_eq!(summary.bmi_category, Some(BmiCategory::Normal));
    }
}
