//! Supplement catalog, barcode lookup, diary entries and regimes
//!
//! Barcodes are checked against the in-memory catalog before any external
//! provider is asked.

use super::resolve_date;
use crate::error::ApiError;
use crate::nutrition::SupplementLookupChain;
use crate::repositories::{SupplementEntryRepository, SupplementRegimeRepository};
use chrono::{NaiveDate, Utc};
use ml_fitness_shared::models::{SupplementEntry, SupplementInfo};
use ml_fitness_shared::supplements::{RegimeSupplement, Supplement, SupplementCatalog, SupplementRegime};
use ml_fitness_shared::types::{
    CreateRegimeRequest, LogSupplementRequest, SupplementCatalogQuery, SupplementLookupResponse,
    UpdateRegimeRequest,
};
use ml_fitness_shared::validation::{check_field, validate_not_blank, validate_serving_count};
use sqlx::PgPool;
use std::collections::HashSet;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// Catalog entries matching every filter present in the query
pub fn search_catalog(catalog: &SupplementCatalog, query: &SupplementCatalogQuery) -> Vec<Supplement> {
    let blank = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);

    let mut results: Vec<&Supplement> = match blank(&query.name) {
        Some(name) => catalog.search_by_name(&name),
        None => catalog.all().iter().collect(),
    };

    if let Some(category) = blank(&query.category) {
        let ids: HashSet<&str> = catalog
            .search_by_category(&category)
            .into_iter()
            .map(|s| s.id.as_str())
            .collect();
        results.retain(|s| ids.contains(s.id.as_str()));
    }

    if let Some(gender) = blank(&query.gender) {
        let ids: HashSet<&str> = catalog
            .search_by_gender(&gender)
            .into_iter()
            .map(|s| s.id.as_str())
            .collect();
        results.retain(|s| ids.contains(s.id.as_str()));
    }

    results.into_iter().cloned().collect()
}

fn validate_regime_items(items: &[RegimeSupplement]) -> Result<(), ApiError> {
    for item in items {
        check_field("supplements.name", validate_not_blank(&item.name, "Supplement name"))?;
        check_field(
            "supplements.serving_count",
            validate_serving_count(item.serving_count),
        )?;
    }
    Ok(())
}

pub struct SupplementService;

impl SupplementService {
    /// The catalog lock is released before any provider is called
    pub async fn lookup_barcode(
        catalog: &RwLock<SupplementCatalog>,
        chain: &SupplementLookupChain,
        barcode: &str,
    ) -> Result<SupplementLookupResponse, ApiError> {
        let barcode = barcode.trim();
        check_field("barcode", validate_not_blank(barcode, "Barcode"))?;

        let listed = catalog
            .read()
            .await
            .search_by_barcode(barcode)
            .map(|s| (SupplementInfo::from(s), s.id.clone()));
        if let Some((supplement, id)) = listed {
            debug!(barcode = %barcode, id = %id, "Supplement found in catalog");
            return Ok(SupplementLookupResponse {
                supplement,
                catalog_id: Some(id),
            });
        }

        chain
            .lookup(barcode)
            .await
            .map(|supplement| SupplementLookupResponse {
                supplement,
                catalog_id: None,
            })
            .ok_or_else(|| ApiError::NotFound(format!("No supplement found for barcode {}", barcode)))
    }

    pub fn add_to_catalog(
        catalog: &mut SupplementCatalog,
        supplement: Supplement,
    ) -> Result<Supplement, ApiError> {
        check_field("id", validate_not_blank(&supplement.id, "Supplement id"))?;
        check_field("name", validate_not_blank(&supplement.name, "Supplement name"))?;

        catalog.add_custom(supplement.clone())?;
        info!(id = %supplement.id, "Custom supplement added to catalog");
        Ok(supplement)
    }

    pub async fn log(
        pool: &PgPool,
        user_id: Uuid,
        req: LogSupplementRequest,
    ) -> Result<SupplementEntry, ApiError> {
        check_field("name", validate_not_blank(&req.name, "Supplement name"))?;
        check_field("servings", validate_serving_count(req.servings))?;

        let entry = SupplementEntry {
            id: Uuid::new_v4(),
            date: resolve_date(req.date),
            name: req.name.trim().to_string(),
            brand: req.brand,
            servings: req.servings,
            serving_unit: req.serving_unit.unwrap_or_else(|| "serving".to_string()),
            nutrients: req.nutrients,
            regime_id: None,
            logged_at: Utc::now(),
        };

        let record = SupplementEntryRepository::create(pool, user_id, &entry)
            .await
            .map_err(ApiError::Internal)?;
        Ok(record.into())
    }

    pub async fn day(
        pool: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<SupplementEntry>, ApiError> {
        Ok(SupplementEntryRepository::list_by_date(pool, user_id, date)
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .map(SupplementEntry::from)
            .collect())
    }

    pub async fn delete_entry(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let deleted = SupplementEntryRepository::delete(pool, id, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Supplement entry not found".to_string()));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Regimes
    // ------------------------------------------------------------------

    pub async fn create_regime(
        pool: &PgPool,
        user_id: Uuid,
        req: CreateRegimeRequest,
    ) -> Result<SupplementRegime, ApiError> {
        check_field("name", validate_not_blank(&req.name, "Regime name"))?;
        validate_regime_items(&req.supplements)?;

        let record =
            SupplementRegimeRepository::create(pool, user_id, req.name.trim(), &req.supplements)
                .await
                .map_err(ApiError::Internal)?;
        Ok(record.into())
    }

    pub async fn list_regimes(
        pool: &PgPool,
        user_id: Uuid,
        active_only: bool,
    ) -> Result<Vec<SupplementRegime>, ApiError> {
        Ok(SupplementRegimeRepository::list(pool, user_id, active_only)
            .await
            .map_err(ApiError::Internal)?
            .into_iter()
            .map(SupplementRegime::from)
            .collect())
    }

    pub async fn get_regime(
        pool: &PgPool,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<SupplementRegime, ApiError> {
        SupplementRegimeRepository::get(pool, id, user_id)
            .await
            .map_err(ApiError::Internal)?
            .map(SupplementRegime::from)
            .ok_or_else(|| ApiError::NotFound("Regime not found".to_string()))
    }

    pub async fn update_regime(
        pool: &PgPool,
        user_id: Uuid,
        id: Uuid,
        req: UpdateRegimeRequest,
    ) -> Result<SupplementRegime, ApiError> {
        if let Some(name) = &req.name {
            check_field("name", validate_not_blank(name, "Regime name"))?;
        }
        if let Some(items) = &req.supplements {
            validate_regime_items(items)?;
        }

        SupplementRegimeRepository::update(
            pool,
            id,
            user_id,
            req.name.as_deref().map(str::trim),
            req.supplements.as_deref(),
            None,
        )
        .await
        .map_err(ApiError::Internal)?
        .map(SupplementRegime::from)
        .ok_or_else(|| ApiError::NotFound("Regime not found".to_string()))
    }

    /// Flip a regime between active and paused
    pub async fn toggle_regime(
        pool: &PgPool,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<SupplementRegime, ApiError> {
        let current = Self::get_regime(pool, user_id, id).await?;

        SupplementRegimeRepository::update(pool, id, user_id, None, None, Some(!current.is_active))
            .await
            .map_err(ApiError::Internal)?
            .map(SupplementRegime::from)
            .ok_or_else(|| ApiError::NotFound("Regime not found".to_string()))
    }

    pub async fn delete_regime(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<(), ApiError> {
        let deleted = SupplementRegimeRepository::delete(pool, id, user_id)
            .await
            .map_err(ApiError::Internal)?;

        if !deleted {
            return Err(ApiError::NotFound("Regime not found".to_string()));
        }
        Ok(())
    }

    /// One diary entry per supplement in the regime, written together
    pub async fn log_regime(
        pool: &PgPool,
        user_id: Uuid,
        id: Uuid,
        date: Option<NaiveDate>,
    ) -> Result<Vec<SupplementEntry>, ApiError> {
        let regime = Self::get_regime(pool, user_id, id).await?;
        if regime.supplements.is_empty() {
            return Err(ApiError::BadRequest("Regime has no supplements".to_string()));
        }

        let entries = regime.entries_for(resolve_date(date), Utc::now());
        let records = SupplementEntryRepository::create_many(pool, user_id, &entries)
            .await
            .map_err(ApiError::Internal)?;

        info!(user_id = %user_id, regime = %regime.name, count = records.len(), "Regime logged");
        Ok(records.into_iter().map(SupplementEntry::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(name: Option<&str>, category: Option<&str>, gender: Option<&str>) -> SupplementCatalogQuery {
        SupplementCatalogQuery {
            name: name.map(String::from),
            category: category.map(String::from),
            gender: gender.map(String::from),
        }
    }

    #[test]
    fn test_empty_query_returns_whole_catalog() {
        let catalog = SupplementCatalog::builtin();
        assert_eq!(search_catalog(&catalog, &query(None, None, None)).len(), catalog.all().len());
        assert_eq!(
            search_catalog(&catalog, &query(Some("  "), None, None)).len(),
            catalog.all().len()
        );
    }

    #[test]
    fn test_filters_are_combined() {
        let catalog = SupplementCatalog::builtin();
        let category = catalog.all()[0].category.clone();

        let results = search_catalog(&catalog, &query(None, Some(&category), Some("female")));
        assert!(results.iter().all(|s| s.category.eq_ignore_ascii_case(&category)));
        assert!(results
            .iter()
            .all(|s| s.target_gender.as_deref().map_or(true, |g| g.eq_ignore_ascii_case("female"))));
    }

    #[test]
    fn test_add_to_catalog_rejects_duplicates() {
        let mut catalog = SupplementCatalog::builtin();
        let existing = catalog.all()[0].clone();
        assert!(matches!(
            SupplementService::add_to_catalog(&mut catalog, existing),
            Err(ApiError::Conflict(_))
        ));

        let mut custom = catalog.all()[0].clone();
        custom.id = "custom-magnesium".to_string();
        custom.barcode = None;
        assert!(SupplementService::add_to_catalog(&mut catalog, custom).is_ok());
        assert!(catalog.all().iter().any(|s| s.id == "custom-magnesium"));
    }

    #[tokio::test]
    async fn test_catalog_barcode_wins_over_providers() {
        let builtin = SupplementCatalog::builtin();
        let Some(known) = builtin.all().iter().find(|s| s.barcode.is_some()).cloned() else {
            return;
        };
        let catalog = RwLock::new(builtin);
        let chain = SupplementLookupChain::new(Vec::new());

        let response = SupplementService::lookup_barcode(&catalog, &chain, known.barcode.as_deref().unwrap())
            .await
            .unwrap();
        assert_eq!(response.catalog_id.as_deref(), Some(known.id.as_str()));
        assert_eq!(response.supplement.name, known.name);
    }

    #[tokio::test]
    async fn test_unknown_barcode_with_no_providers_is_not_found() {
        let catalog = RwLock::new(SupplementCatalog::builtin());
        let chain = SupplementLookupChain::new(Vec::new());
        let result = SupplementService::lookup_barcode(&catalog, &chain, "000000000000").await;
        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }
}
