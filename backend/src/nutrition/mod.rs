//! External nutrition lookups
//!
//! Barcode lookups walk a fixed-priority chain of providers:
//! Open Food Facts, USDA FoodData Central, Spoonacular, then Nutritionix.
//! Each provider answers `Ok(None)` for a miss and `Err` for a failure; the
//! chain treats both as "try the next one".

mod mock;
mod nutritionix;
mod open_food_facts;
pub mod restaurants;
mod spoonacular;
pub mod supplements;
mod usda;

pub use mock::mock_food_item;
pub use nutritionix::Nutritionix;
pub use open_food_facts::OpenFoodFacts;
pub use restaurants::RestaurantSearch;
pub use spoonacular::Spoonacular;
pub use supplements::{Dsld, SupplementLookupChain, SupplementProvider};
pub use usda::Usda;

use crate::config::NutritionConfig;
use crate::metrics::LookupMetrics;
use async_trait::async_trait;
use ml_fitness_shared::models::FoodItem;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider returned HTTP {0}")]
    Status(u16),

    #[error("Could not parse provider response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

/// A source of food data keyed by barcode
#[async_trait]
pub trait NutritionProvider: Send + Sync {
    /// Display name, also recorded as `FoodItem::source`
    fn name(&self) -> &'static str;

    /// Whether the provider has the credentials it needs
    fn is_configured(&self) -> bool;

    async fn lookup_barcode(&self, barcode: &str) -> Result<Option<FoodItem>, LookupError>;
}

/// Build the HTTP client every provider shares
pub fn http_client(config: &NutritionConfig) -> Result<reqwest::Client, LookupError> {
    reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.request_timeout())
        .build()
        .map_err(|e| LookupError::Network(e.to_string()))
}

/// Send a request and decode the JSON body.
///
/// 404 is a miss, not a failure.
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<Option<T>, LookupError> {
    let response = request
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| LookupError::Network(e.to_string()))?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !status.is_success() {
        return Err(LookupError::Status(status.as_u16()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| LookupError::Network(e.to_string()))?;
    Ok(Some(serde_json::from_str(&body)?))
}

/// Read a JSON number, accepting numeric strings
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Read a JSON scalar as text, skipping blanks
pub(crate) fn as_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

pub(crate) fn field_text(object: &Value, key: &str) -> Option<String> {
    object.get(key).and_then(as_text)
}

pub(crate) fn field_number(object: &Value, key: &str) -> Option<f64> {
    object.get(key).and_then(as_number)
}

/// Providers tried in priority order until one resolves the barcode
#[derive(Clone)]
pub struct BarcodeLookupChain {
    providers: Vec<Arc<dyn NutritionProvider>>,
}

impl BarcodeLookupChain {
    pub fn new(providers: Vec<Arc<dyn NutritionProvider>>) -> Self {
        Self { providers }
    }

    /// Open Food Facts, USDA, Spoonacular and Nutritionix sharing one client
    pub fn from_config(client: reqwest::Client, config: &NutritionConfig) -> Self {
        Self::new(vec![
            Arc::new(OpenFoodFacts::new(client.clone(), &config.open_food_facts_url)),
            Arc::new(Usda::new(client.clone(), &config.usda_url, config.usda_key())),
            Arc::new(Spoonacular::new(
                client.clone(),
                &config.spoonacular_url,
                config.spoonacular_key(),
            )),
            Arc::new(Nutritionix::new(
                client,
                &config.nutritionix_url,
                config.nutritionix_credentials(),
            )),
        ])
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// First structured result across the configured providers
    pub async fn lookup(&self, barcode: &str) -> Option<FoodItem> {
        for provider in &self.providers {
            let name = provider.name();
            if !provider.is_configured() {
                debug!(provider = name, "Skipping unconfigured provider");
                LookupMetrics::record(name, "skipped");
                continue;
            }

            debug!(provider = name, barcode = %barcode, "Looking up barcode");
            match provider.lookup_barcode(barcode).await {
                Ok(Some(item)) => {
                    info!(provider = name, barcode = %barcode, "Barcode resolved");
                    LookupMetrics::record(name, "hit");
                    return Some(item);
                }
                Ok(None) => {
                    debug!(provider = name, barcode = %barcode, "Barcode not found");
                    LookupMetrics::record(name, "miss");
                }
                Err(e) => {
                    warn!(provider = name, barcode = %barcode, error = %e, "Provider failed, trying next");
                    LookupMetrics::record(name, "error");
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Outcome {
        Hit,
        Miss,
        Fail,
    }

    struct Stub {
        name: &'static str,
        configured: bool,
        outcome: Outcome,
        calls: AtomicUsize,
    }

    impl Stub {
        fn new(name: &'static str, configured: bool, outcome: Outcome) -> Arc<Self> {
            Arc::new(Self {
                name,
                configured,
                outcome,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl NutritionProvider for Stub {
        fn name(&self) -> &'static str {
            self.name
        }

        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn lookup_barcode(&self, barcode: &str) -> Result<Option<FoodItem>, LookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.outcome {
                Outcome::Hit => {
                    let mut item = mock_food_item(barcode);
                    item.source = self.name.to_string();
                    Ok(Some(item))
                }
                Outcome::Miss => Ok(None),
                Outcome::Fail => Err(LookupError::Status(500)),
            }
        }
    }

    #[tokio::test]
    async fn test_chain_returns_first_hit_in_order() {
        let first = Stub::new("first", true, Outcome::Miss);
        let second = Stub::new("second", true, Outcome::Hit);
        let third = Stub::new("third", true, Outcome::Hit);
        let chain = BarcodeLookupChain::new(vec![first.clone(), second.clone(), third.clone()]);

        let item = chain.lookup("012345678901").await.unwrap();

        assert_eq!(item.source, "second");
        assert_eq!(first.calls.load(Ordering::SeqCst), 1);
        assert_eq!(third.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_chain_continues_after_failure_and_skips_unconfigured() {
        let failing = Stub::new("failing", true, Outcome::Fail);
        let unconfigured = Stub::new("unconfigured", false, Outcome::Hit);
        let last = Stub::new("last", true, Outcome::Hit);
        let chain = BarcodeLookupChain::new(vec![failing, unconfigured.clone(), last]);

        let item = chain.lookup("012345678901").await.unwrap();

        assert_eq!(item.source, "last");
        assert_eq!(unconfigured.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_chain_all_miss() {
        let chain = BarcodeLookupChain::new(vec![
            Stub::new("a", true, Outcome::Miss),
            Stub::new("b", true, Outcome::Fail),
        ]);
        assert!(chain.lookup("00000000").await.is_none());
    }

    #[test]
    fn test_default_chain_order() {
        let config = NutritionConfig::default();
        let chain = BarcodeLookupChain::from_config(http_client(&config).unwrap(), &config);
        assert_eq!(
            chain.provider_names(),
            vec!["Open Food Facts", "USDA FoodData Central", "Spoonacular", "Nutritionix"]
        );
    }

    #[test]
    fn test_lenient_json_readers() {
        let value = json!({"a": "12.5", "b": 3, "c": "  ", "d": null});
        assert_eq!(field_number(&value, "a"), Some(12.5));
        assert_eq!(field_number(&value, "b"), Some(3.0));
        assert_eq!(field_text(&value, "b").as_deref(), Some("3"));
        assert_eq!(field_text(&value, "c"), None);
        assert_eq!(field_number(&value, "d"), None);
    }
}
