//! Barcode resolution, stored food search and restaurant lookups

use crate::error::ApiError;
use crate::metrics::LookupMetrics;
use crate::nutrition::{mock_food_item, BarcodeLookupChain, RestaurantSearch};
use crate::repositories::FoodItemRepository;
use ml_fitness_shared::models::FoodItem;
use ml_fitness_shared::types::{
    BarcodeLookupResponse, LookupOrigin, RestaurantSearchQuery, RestaurantSearchResponse,
};
use ml_fitness_shared::validation::{check_field, validate_barcode, validate_not_blank};
use sqlx::PgPool;
use tracing::{debug, info, warn};

const DEFAULT_SEARCH_LIMIT: i64 = 20;
const MAX_SEARCH_LIMIT: i64 = 100;

pub struct FoodService;

impl FoodService {
    /// Resolve a barcode: stored foods first, then the external chain, then
    /// the mock catalog when it is enabled.
    ///
    /// External hits are written to `food_items` so the next scan is served
    /// locally. A failed write is logged and the item is still returned.
    pub async fn lookup_barcode(
        pool: &PgPool,
        chain: &BarcodeLookupChain,
        use_mock_fallback: bool,
        barcode: &str,
    ) -> Result<BarcodeLookupResponse, ApiError> {
        let barcode = barcode.trim();
        check_field("barcode", validate_barcode(barcode))?;

        if let Some(record) = FoodItemRepository::find_by_barcode(pool, barcode)
            .await
            .map_err(ApiError::Internal)?
        {
            debug!(barcode = %barcode, "Barcode served from stored foods");
            LookupMetrics::record("stored", "hit");
            return Ok(BarcodeLookupResponse {
                food: record.into(),
                origin: LookupOrigin::Stored,
            });
        }

        if let Some(food) = chain.lookup(barcode).await {
            if let Err(e) = FoodItemRepository::upsert(pool, &food).await {
                warn!(barcode = %barcode, error = %e, "Failed to store looked up food");
            }
            return Ok(BarcodeLookupResponse {
                food,
                origin: LookupOrigin::External,
            });
        }

        if use_mock_fallback {
            info!(barcode = %barcode, "No provider knew the barcode, using mock catalog");
            LookupMetrics::record("mock", "hit");
            return Ok(BarcodeLookupResponse {
                food: mock_food_item(barcode),
                origin: LookupOrigin::Mock,
            });
        }

        Err(ApiError::NotFound(format!(
            "No food found for barcode {}",
            barcode
        )))
    }

    pub async fn search(
        pool: &PgPool,
        query: &str,
        limit: Option<i64>,
    ) -> Result<Vec<FoodItem>, ApiError> {
        check_field("q", validate_not_blank(query, "Search query"))?;
        let limit = limit
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
            .clamp(1, MAX_SEARCH_LIMIT);

        let records = FoodItemRepository::search(pool, query, limit)
            .await
            .map_err(ApiError::Internal)?;

        Ok(records.into_iter().map(FoodItem::from).collect())
    }

    pub async fn search_restaurants(
        search: &RestaurantSearch,
        query: RestaurantSearchQuery,
    ) -> Result<RestaurantSearchResponse, ApiError> {
        check_field("q", validate_not_blank(&query.q, "Search query"))?;

        let text = match query.restaurant {
            Some(restaurant) => restaurant.menu_query(query.q.trim()),
            None => query.q.trim().to_string(),
        };

        let (items, source) = search.search(&text).await;
        Ok(RestaurantSearchResponse {
            items,
            source: source.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_restaurant_search_rejects_blank_query() {
        let search = RestaurantSearch::new(reqwest::Client::new(), "http://localhost:9", None);
        let result = FoodService::search_restaurants(
            &search,
            RestaurantSearchQuery {
                q: "   ".to_string(),
                restaurant: None,
            },
        )
        .await;
        assert!(matches!(result, Err(ApiError::InvalidField { .. })));
    }

    #[tokio::test]
    async fn test_restaurant_search_offline_without_credentials() {
        let search = RestaurantSearch::new(reqwest::Client::new(), "http://localhost:9", None);
        let response = FoodService::search_restaurants(
            &search,
            RestaurantSearchQuery {
                q: "big mac".to_string(),
                restaurant: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(response.source, crate::nutrition::restaurants::OFFLINE_SOURCE);
    }
}
