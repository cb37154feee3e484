//! Open Food Facts, free and keyless
//!
//! Nutriments are reported per 100 g and scaled to the product's serving.

use super::supplements::SupplementProvider;
use super::{fetch_json, field_number, field_text, LookupError, NutritionProvider};
use async_trait::async_trait;
use ml_fitness_shared::models::{FoodItem, SupplementInfo};
use serde_json::Value;
use std::collections::BTreeMap;

const SOURCE: &str = "Open Food Facts";

/// `nutriments` keys reported for supplements, with display names
const SUPPLEMENT_NUTRIMENTS: [(&str, &str); 12] = [
    ("vitamin-a_100g", "Vitamin A"),
    ("vitamin-c_100g", "Vitamin C"),
    ("vitamin-d_100g", "Vitamin D"),
    ("vitamin-e_100g", "Vitamin E"),
    ("vitamin-b1_100g", "Thiamine"),
    ("vitamin-b2_100g", "Riboflavin"),
    ("vitamin-b6_100g", "Vitamin B6"),
    ("vitamin-b12_100g", "Vitamin B12"),
    ("calcium_100g", "Calcium"),
    ("iron_100g", "Iron"),
    ("magnesium_100g", "Magnesium"),
    ("zinc_100g", "Zinc"),
];

pub struct OpenFoodFacts {
    client: reqwest::Client,
    base_url: String,
}

impl OpenFoodFacts {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn product(&self, barcode: &str) -> Result<Option<Value>, LookupError> {
        let url = format!("{}/api/v2/product/{}.json", self.base_url, barcode);
        fetch_json(self.client.get(url)).await
    }
}

/// The `product` object of a found response
fn found_product(body: &Value) -> Option<&Value> {
    if field_number(body, "status") != Some(1.0) {
        return None;
    }
    body.get("product").filter(|p| p.is_object())
}

pub(crate) fn parse_food(body: &Value, barcode: &str) -> Option<FoodItem> {
    let product = found_product(body)?;
    let name = field_text(product, "product_name")
        .or_else(|| field_text(product, "product_name_en"))?;
    let nutriments = product.get("nutriments").filter(|n| n.is_object())?;

    let serving_size = field_text(product, "serving_size").unwrap_or_else(|| "100g".to_string());
    let factor = field_number(product, "serving_quantity").unwrap_or(100.0) / 100.0;
    let per_serving = |key: &str| field_number(nutriments, key).unwrap_or(0.0) * factor;

    Some(FoodItem {
        name,
        brand: field_text(product, "brands"),
        barcode: Some(barcode.to_string()),
        calories: per_serving("energy-kcal_100g") as i32,
        protein: per_serving("proteins_100g"),
        carbs: per_serving("carbohydrates_100g"),
        fat: per_serving("fat_100g"),
        fiber: per_serving("fiber_100g"),
        sugar: per_serving("sugars_100g"),
        sodium: per_serving("sodium_100g") * 1000.0,
        serving_size,
        serving_unit: "serving".to_string(),
        source: SOURCE.to_string(),
    })
}

/// Only products categorized as supplements or vitamins count
pub(crate) fn parse_supplement(body: &Value, barcode: &str) -> Option<SupplementInfo> {
    let product = found_product(body)?;
    let categories = field_text(product, "categories")
        .unwrap_or_default()
        .to_lowercase();
    if !categories.contains("supplement") && !categories.contains("vitamin") {
        return None;
    }

    let ingredients = field_text(product, "ingredients_text")
        .map(|text| {
            text.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    let mut nutrients = BTreeMap::new();
    if let Some(nutriments) = product.get("nutriments") {
        for (key, display) in SUPPLEMENT_NUTRIMENTS {
            if let Some(amount) = field_number(nutriments, key) {
                nutrients.insert(display.to_string(), amount);
            }
        }
    }

    Some(SupplementInfo {
        name: field_text(product, "product_name").unwrap_or_else(|| "Unknown".to_string()),
        brand: field_text(product, "brands"),
        barcode: Some(barcode.to_string()),
        ingredients,
        serving_size: field_text(product, "serving_size"),
        nutrients,
        source: SOURCE.to_string(),
    })
}

#[async_trait]
impl NutritionProvider for OpenFoodFacts {
    fn name(&self) -> &'static str {
        SOURCE
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn lookup_barcode(&self, barcode: &str) -> Result<Option<FoodItem>, LookupError> {
        Ok(self
            .product(barcode)
            .await?
            .and_then(|body| parse_food(&body, barcode)))
    }
}

#[async_trait]
impl SupplementProvider for OpenFoodFacts {
    fn name(&self) -> &'static str {
        SOURCE
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn lookup_supplement(&self, barcode: &str) -> Result<Option<SupplementInfo>, LookupError> {
        Ok(self
            .product(barcode)
            .await?
            .and_then(|body| parse_supplement(&body, barcode)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn granola() -> Value {
        json!({
            "status": 1,
            "product": {
                "product_name": "Crunchy Granola",
                "brands": "Nature Valley",
                "serving_size": "42 g",
                "serving_quantity": "42",
                "nutriments": {
                    "energy-kcal_100g": 471,
                    "proteins_100g": 8.0,
                    "carbohydrates_100g": 64.0,
                    "fat_100g": 19.0,
                    "fiber_100g": 5.0,
                    "sugars_100g": 26.0,
                    "sodium_100g": 0.3
                }
            }
        })
    }

    #[test]
    fn test_parse_scales_to_serving() {
        let item = parse_food(&granola(), "016000275263").unwrap();
        assert_eq!(item.name, "Crunchy Granola");
        assert_eq!(item.brand.as_deref(), Some("Nature Valley"));
        // 471 * 0.42 = 197.82, truncated
        assert_eq!(item.calories, 197);
        assert!((item.protein - 3.36).abs() < 1e-9);
        assert!((item.sodium - 126.0).abs() < 1e-9);
        assert_eq!(item.serving_size, "42 g");
        assert_eq!(item.serving_unit, "serving");
        assert_eq!(item.source, "Open Food Facts");
    }

    #[test]
    fn test_parse_defaults_to_100g() {
        let body = json!({
            "status": 1,
            "product": {
                "product_name_en": "Plain Oats",
                "nutriments": {"energy-kcal_100g": 389.9}
            }
        });
        let item = parse_food(&body, "123").unwrap();
        assert_eq!(item.name, "Plain Oats");
        assert_eq!(item.calories, 389);
        assert_eq!(item.serving_size, "100g");
        assert_eq!(item.protein, 0.0);
    }

    #[test]
    fn test_parse_requires_status_name_and_nutriments() {
        assert!(parse_food(&json!({"status": 0, "product": {}}), "1").is_none());
        assert!(parse_food(&json!({"status": 1, "product": {"nutriments": {}}}), "1").is_none());
        assert!(parse_food(&json!({"status": 1, "product": {"product_name": "X"}}), "1").is_none());
    }

    #[test]
    fn test_supplement_requires_category() {
        let mut body = granola();
        assert!(parse_supplement(&body, "1").is_none());

        body["product"]["categories"] = json!("Dietary supplements, Vitamins");
        body["product"]["ingredients_text"] = json!("Calcium carbonate, Vitamin D3 ,");
        body["product"]["nutriments"]["calcium_100g"] = json!(1.2);
        let info = parse_supplement(&body, "1").unwrap();
        assert_eq!(info.ingredients, vec!["Calcium carbonate", "Vitamin D3"]);
        assert_eq!(info.nutrients.get("Calcium"), Some(&1.2));
        assert_eq!(info.nutrients.len(), 1);
    }

    #[tokio::test]
    async fn test_lookup_against_mock_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/product/016000275263.json"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(granola()))
            .mount(&server)
            .await;

        let client = reqwest::Client::builder().user_agent("test").build().unwrap();
        let provider = OpenFoodFacts::new(client, &server.uri());
        let item = provider.lookup_barcode("016000275263").await.unwrap().unwrap();
        assert_eq!(item.barcode.as_deref(), Some("016000275263"));
    }

    #[tokio::test]
    async fn test_not_found_is_a_miss_and_bad_json_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v2/product/404404404404.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/product/111111111111.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let provider = OpenFoodFacts::new(reqwest::Client::new(), &server.uri());
        assert!(provider.lookup_barcode("404404404404").await.unwrap().is_none());
        assert!(matches!(
            provider.lookup_barcode("111111111111").await,
            Err(LookupError::Parse(_))
        ));
    }
}
