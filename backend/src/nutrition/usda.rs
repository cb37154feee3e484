//! USDA FoodData Central
//!
//! Search by barcode text and take the first hit. Values are per 100 g.

use super::supplements::SupplementProvider;
use super::{fetch_json, field_number, field_text, LookupError, NutritionProvider};
use async_trait::async_trait;
use ml_fitness_shared::models::{FoodItem, SupplementInfo};
use serde_json::Value;
use std::collections::BTreeMap;

const SOURCE: &str = "USDA FoodData Central";
const SUPPLEMENT_DATA_TYPE: &str = "Dietary Supplement";

pub struct Usda {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl Usda {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
        }
    }

    async fn first_food(
        &self,
        barcode: &str,
        data_type: Option<&str>,
    ) -> Result<Option<Value>, LookupError> {
        let api_key = self.api_key.as_deref().ok_or(LookupError::NotConfigured(SOURCE))?;

        let mut params = vec![("query", barcode)];
        if let Some(data_type) = data_type {
            params.push(("dataType", data_type));
        }
        params.push(("api_key", api_key));

        let request = self
            .client
            .get(format!("{}/foods/search", self.base_url))
            .query(&params);
        let body: Option<Value> = fetch_json(request).await?;

        Ok(body.and_then(|b| b.get("foods")?.as_array()?.first().cloned()))
    }
}

fn nutrients(food: &Value) -> Option<impl Iterator<Item = (String, f64)> + '_> {
    let list = food.get("foodNutrients")?.as_array()?;
    Some(list.iter().filter_map(|n| {
        let name = field_text(n, "nutrientName")?;
        Some((name, field_number(n, "value").unwrap_or(0.0)))
    }))
}

pub(crate) fn parse_food(food: &Value, barcode: &str) -> Option<FoodItem> {
    let name = field_text(food, "description")?;

    let mut item = FoodItem {
        name,
        brand: field_text(food, "brandOwner"),
        barcode: Some(barcode.to_string()),
        calories: 0,
        protein: 0.0,
        carbs: 0.0,
        fat: 0.0,
        fiber: 0.0,
        sugar: 0.0,
        sodium: 0.0,
        serving_size: "100".to_string(),
        serving_unit: "g".to_string(),
        source: SOURCE.to_string(),
    };

    for (nutrient, value) in nutrients(food)? {
        let nutrient = nutrient.to_lowercase();
        // first matching rule wins for a given nutrient name
        if nutrient.contains("energy") {
            item.calories = value as i32;
        } else if nutrient.contains("protein") {
            item.protein = value;
        } else if nutrient.contains("carbohydrate") {
            item.carbs = value;
        } else if nutrient.contains("total lipid") {
            item.fat = value;
        } else if nutrient.contains("fiber") {
            item.fiber = value;
        } else if nutrient.contains("sugars") {
            item.sugar = value;
        } else if nutrient.contains("sodium") {
            item.sodium = value;
        }
    }

    Some(item)
}

pub(crate) fn parse_supplement(food: &Value, barcode: &str) -> SupplementInfo {
    let ingredients = field_text(food, "ingredients")
        .map(|text| text.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect())
        .unwrap_or_default();

    let nutrients: BTreeMap<String, f64> = food
        .get("foodNutrients")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(|n| Some((field_text(n, "nutrientName")?, field_number(n, "value")?)))
                .collect()
        })
        .unwrap_or_default();

    SupplementInfo {
        name: field_text(food, "description").unwrap_or_else(|| "Unknown".to_string()),
        brand: field_text(food, "brandOwner"),
        barcode: Some(barcode.to_string()),
        ingredients,
        serving_size: field_text(food, "servingSize"),
        nutrients,
        source: SOURCE.to_string(),
    }
}

#[async_trait]
impl NutritionProvider for Usda {
    fn name(&self) -> &'static str {
        SOURCE
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn lookup_barcode(&self, barcode: &str) -> Result<Option<FoodItem>, LookupError> {
        Ok(self
            .first_food(barcode, None)
            .await?
            .and_then(|food| parse_food(&food, barcode)))
    }
}

#[async_trait]
impl SupplementProvider for Usda {
    fn name(&self) -> &'static str {
        SOURCE
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn lookup_supplement(&self, barcode: &str) -> Result<Option<SupplementInfo>, LookupError> {
        Ok(self
            .first_food(barcode, Some(SUPPLEMENT_DATA_TYPE))
            .await?
            .map(|food| parse_supplement(&food, barcode)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn search_body() -> Value {
        json!({
            "totalHits": 1,
            "foods": [{
                "description": "CHEDDAR CHEESE",
                "brandOwner": "Tillamook",
                "foodNutrients": [
                    {"nutrientName": "Protein", "value": 25.0},
                    {"nutrientName": "Total lipid (fat)", "value": 33.3},
                    {"nutrientName": "Carbohydrate, by difference", "value": 1.3},
                    {"nutrientName": "Energy", "value": 403.7},
                    {"nutrientName": "Fiber, total dietary", "value": 0},
                    {"nutrientName": "Sugars, total including NLEA", "value": 0.5},
                    {"nutrientName": "Sodium, Na", "value": 621}
                ]
            }]
        })
    }

    #[test]
    fn test_parse_matches_nutrient_names() {
        let food = &search_body()["foods"][0];
        let item = parse_food(food, "072830000000").unwrap();
        assert_eq!(item.name, "CHEDDAR CHEESE");
        assert_eq!(item.brand.as_deref(), Some("Tillamook"));
        assert_eq!(item.calories, 403);
        assert_eq!(item.protein, 25.0);
        assert_eq!(item.fat, 33.3);
        assert_eq!(item.carbs, 1.3);
        assert_eq!(item.sugar, 0.5);
        assert_eq!(item.sodium, 621.0);
        assert_eq!(item.serving_size, "100");
        assert_eq!(item.serving_unit, "g");
    }

    #[test]
    fn test_parse_requires_description() {
        assert!(parse_food(&json!({"foodNutrients": []}), "1").is_none());
    }

    #[tokio::test]
    async fn test_unconfigured_refuses_to_call() {
        let provider = Usda::new(reqwest::Client::new(), "http://127.0.0.1:9", None);
        assert!(!NutritionProvider::is_configured(&provider));
        assert!(matches!(
            provider.lookup_barcode("123").await,
            Err(LookupError::NotConfigured(_))
        ));
    }

    #[tokio::test]
    async fn test_lookup_sends_key_and_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/foods/search"))
            .and(query_param("query", "072830000000"))
            .and(query_param("api_key", "usda-test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(search_body()))
            .expect(1)
            .mount(&server)
            .await;

        let provider = Usda::new(reqwest::Client::new(), &server.uri(), Some("usda-test-key"));
        let item = provider.lookup_barcode("072830000000").await.unwrap().unwrap();
        assert_eq!(item.source, "USDA FoodData Central");
    }

    #[tokio::test]
    async fn test_empty_results_and_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/foods/search"))
            .and(query_param("query", "000"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"foods": []})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/foods/search"))
            .and(query_param("query", "500"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let provider = Usda::new(reqwest::Client::new(), &server.uri(), Some("k"));
        assert!(provider.lookup_barcode("000").await.unwrap().is_none());
        assert!(matches!(
            provider.lookup_barcode("500").await,
            Err(LookupError::Status(503))
        ));
    }

    #[tokio::test]
    async fn test_supplement_search_filters_data_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/foods/search"))
            .and(query_param("dataType", "Dietary Supplement"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "foods": [{
                    "description": "VITAMIN D3",
                    "servingSize": 1,
                    "ingredients": "Cholecalciferol, Olive oil",
                    "foodNutrients": [{"nutrientName": "Vitamin D (D2 + D3)", "value": 25}]
                }]
            })))
            .mount(&server)
            .await;

        let provider = Usda::new(reqwest::Client::new(), &server.uri(), Some("k"));
        let info = provider.lookup_supplement("123").await.unwrap().unwrap();
        assert_eq!(info.name, "VITAMIN D3");
        assert_eq!(info.serving_size.as_deref(), Some("1"));
        assert_eq!(info.ingredients.len(), 2);
        assert_eq!(info.nutrients.get("Vitamin D (D2 + D3)"), Some(&25.0));
    }
}
