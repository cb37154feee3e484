//! Supplement label lookups
//!
//! Order: NIH DSLD, Open Food Facts (supplement categories only), USDA
//! dietary supplements, then Nutritionix. Callers check the built-in catalog
//! before reaching for this chain.

use super::{
    fetch_json, field_number, field_text, LookupError, Nutritionix, OpenFoodFacts, Usda,
};
use crate::config::NutritionConfig;
use crate::metrics::LookupMetrics;
use async_trait::async_trait;
use ml_fitness_shared::models::SupplementInfo;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

const DSLD_SOURCE: &str = "NIH DSLD";

#[async_trait]
pub trait SupplementProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_configured(&self) -> bool;

    async fn lookup_supplement(&self, barcode: &str) -> Result<Option<SupplementInfo>, LookupError>;
}

/// NIH Dietary Supplement Label Database, free and keyless
pub struct Dsld {
    client: reqwest::Client,
    base_url: String,
}

impl Dsld {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn by_upc(&self, barcode: &str) -> Result<Option<Value>, LookupError> {
        let request = self
            .client
            .get(format!("{}/label", self.base_url))
            .query(&[("upc", barcode)]);
        fetch_json(request).await
    }

    /// First label matching a free-text search
    pub async fn search_by_name(&self, query: &str) -> Result<Option<SupplementInfo>, LookupError> {
        let request = self
            .client
            .get(format!("{}/browse", self.base_url))
            .query(&[("search", query), ("limit", "1")]);
        let Some(body): Option<Value> = fetch_json(request).await? else {
            return Ok(None);
        };

        let dsld_id = body
            .get("products")
            .and_then(Value::as_array)
            .and_then(|products| products.first())
            .and_then(|product| field_text(product, "dsld_id"));
        match dsld_id {
            Some(id) => self.label(&id).await,
            None => Ok(None),
        }
    }

    async fn label(&self, dsld_id: &str) -> Result<Option<SupplementInfo>, LookupError> {
        let request = self.client.get(format!("{}/label/{}", self.base_url, dsld_id));
        let body: Option<Value> = fetch_json(request).await?;
        Ok(body.map(|product| parse_label(&product, None)))
    }
}

pub(crate) fn parse_label(product: &Value, barcode: Option<&str>) -> SupplementInfo {
    let mut ingredients = Vec::new();
    let mut nutrients = BTreeMap::new();

    for ingredient in product
        .get("ingredients")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
    {
        let Some(name) = field_text(ingredient, "ingredient_name") else {
            continue;
        };
        let amount = field_number(ingredient, "amount");
        let unit = field_text(ingredient, "unit");
        match (amount, unit) {
            (Some(amount), Some(unit)) => {
                ingredients.push(format!("{}: {}{}", name, amount, unit));
                nutrients.insert(name, amount);
            }
            _ => ingredients.push(name),
        }
    }

    SupplementInfo {
        name: field_text(product, "product_name")
            .unwrap_or_else(|| "Unknown Supplement".to_string()),
        brand: field_text(product, "brand_name"),
        barcode: barcode.map(str::to_string),
        ingredients,
        serving_size: field_text(product, "serving_size"),
        nutrients,
        source: DSLD_SOURCE.to_string(),
    }
}

#[async_trait]
impl SupplementProvider for Dsld {
    fn name(&self) -> &'static str {
        DSLD_SOURCE
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn lookup_supplement(&self, barcode: &str) -> Result<Option<SupplementInfo>, LookupError> {
        match self.by_upc(barcode).await {
            Ok(Some(body)) => Ok(body
                .as_array()
                .and_then(|labels| labels.first())
                .map(|label| parse_label(label, Some(barcode)))),
            // the UPC endpoint is unreliable; search the label text instead
            Ok(None) | Err(LookupError::Status(_)) => {
                debug!(barcode = %barcode, "DSLD UPC lookup failed, searching labels");
                self.search_by_name(barcode).await
            }
            Err(e) => Err(e),
        }
    }
}

#[derive(Clone)]
pub struct SupplementLookupChain {
    providers: Vec<Arc<dyn SupplementProvider>>,
}

impl SupplementLookupChain {
    pub fn new(providers: Vec<Arc<dyn SupplementProvider>>) -> Self {
        Self { providers }
    }

    pub fn from_config(client: reqwest::Client, config: &NutritionConfig) -> Self {
        Self::new(vec![
            Arc::new(Dsld::new(client.clone(), &config.dsld_url)),
            Arc::new(OpenFoodFacts::new(client.clone(), &config.open_food_facts_url)),
            Arc::new(Usda::new(client.clone(), &config.usda_url, config.usda_key())),
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

    pub async fn lookup(&self, barcode: &str) -> Option<SupplementInfo> {
        for provider in &self.providers {
            let name = provider.name();
            if !provider.is_configured() {
                LookupMetrics::record(name, "skipped");
                continue;
            }

            match provider.lookup_supplement(barcode).await {
                Ok(Some(info)) => {
                    info!(provider = name, barcode = %barcode, "Supplement resolved");
                    LookupMetrics::record(name, "hit");
                    return Some(info);
                }
                Ok(None) => {
                    debug!(provider = name, barcode = %barcode, "Supplement not found");
                    LookupMetrics::record(name, "miss");
                }
                Err(e) => {
                    warn!(provider = name, barcode = %barcode, error = %e, "Supplement provider failed, trying next");
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
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn label() -> Value {
        json!({
            "product_name": "Vitamin D3 1000 IU",
            "brand_name": "Jamieson",
            "serving_size": "1 tablet",
            "ingredients": [
                {"ingredient_name": "Vitamin D3", "amount": 25, "unit": "mcg"},
                {"ingredient_name": "Microcrystalline cellulose"}
            ]
        })
    }

    fn config_for(server: &MockServer) -> NutritionConfig {
        NutritionConfig {
            dsld_url: server.uri(),
            open_food_facts_url: server.uri(),
            ..NutritionConfig::default()
        }
    }

    #[test]
    fn test_parse_label_ingredients() {
        let info = parse_label(&label(), Some("064642078049"));
        assert_eq!(info.ingredients, vec!["Vitamin D3: 25mcg", "Microcrystalline cellulose"]);
        assert_eq!(info.nutrients.get("Vitamin D3"), Some(&25.0));
        assert_eq!(info.nutrients.len(), 1);
        assert_eq!(info.source, "NIH DSLD");
    }

    #[test]
    fn test_parse_label_defaults_name() {
        let info = parse_label(&json!({}), None);
        assert_eq!(info.name, "Unknown Supplement");
        assert!(info.ingredients.is_empty());
    }

    #[test]
    fn test_default_order() {
        let config = NutritionConfig::default();
        let chain = SupplementLookupChain::from_config(reqwest::Client::new(), &config);
        assert_eq!(
            chain.provider_names(),
            vec!["NIH DSLD", "Open Food Facts", "USDA FoodData Central", "Nutritionix"]
        );
    }

    #[tokio::test]
    async fn test_dsld_upc_hit() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/label"))
            .and(query_param("upc", "064642078049"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([label()])))
            .mount(&server)
            .await;

        let chain = SupplementLookupChain::from_config(reqwest::Client::new(), &config_for(&server));
        let info = chain.lookup("064642078049").await.unwrap();
        assert_eq!(info.name, "Vitamin D3 1000 IU");
        assert_eq!(info.barcode.as_deref(), Some("064642078049"));
    }

    #[tokio::test]
    async fn test_dsld_falls_back_to_browse_then_label() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/label"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/browse"))
            .and(query_param("search", "064642078049"))
            .and(query_param("limit", "1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"products": [{"dsld_id": 17450}]})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/label/17450"))
            .respond_with(ResponseTemplate::new(200).set_body_json(label()))
            .expect(1)
            .mount(&server)
            .await;

        let dsld = Dsld::new(reqwest::Client::new(), &server.uri());
        let info = dsld.lookup_supplement("064642078049").await.unwrap().unwrap();
        assert_eq!(info.brand.as_deref(), Some("Jamieson"));
        assert!(info.barcode.is_none());
    }

    #[tokio::test]
    async fn test_dsld_network_failure_skips_label_search() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/label"))
            .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(2)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/browse"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
            .expect(0)
            .mount(&server)
            .await;

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_millis(200))
            .build()
            .unwrap();
        let dsld = Dsld::new(client, &server.uri());
        let result = dsld.lookup_supplement("064642078049").await;
        assert!(matches!(result, Err(LookupError::Network(_))));
    }

    #[tokio::test]
    async fn test_chain_moves_to_open_food_facts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/label"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/product/0123456789.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": 1,
                "product": {
                    "product_name": "Omega-3 Fish Oil",
                    "categories": "Dietary supplements",
                    "nutriments": {}
                }
            })))
            .mount(&server)
            .await;

        let chain = SupplementLookupChain::from_config(reqwest::Client::new(), &config_for(&server));
        let info = chain.lookup("0123456789").await.unwrap();
        assert_eq!(info.source, "Open Food Facts");
        assert_eq!(info.name, "Omega-3 Fish Oil");
    }
}
