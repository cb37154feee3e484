//! Restaurant menu search through Nutritionix natural-language nutrients
//!
//! Without credentials, or when the request fails or finds nothing, answers
//! come from the offline menu instead.

use super::nutritionix::{Credentials, SOURCE as NUTRITIONIX};
use super::{fetch_json, field_number, field_text, LookupError};
use crate::config::NutritionConfig;
use ml_fitness_shared::restaurants::{offline_menu_search, RestaurantCategory, RestaurantFood};
use serde_json::{json, Value};
use tracing::warn;

pub const OFFLINE_SOURCE: &str = "Offline Menu";

#[derive(Clone)]
pub struct RestaurantSearch {
    client: reqwest::Client,
    base_url: String,
    credentials: Option<Credentials>,
}

pub(crate) fn parse_food(food: &Value) -> Option<RestaurantFood> {
    let name = field_text(food, "food_name")?;
    let number = |key: &str| field_number(food, key).unwrap_or(0.0);

    Some(RestaurantFood {
        restaurant: field_text(food, "brand_name").unwrap_or_else(|| "Restaurant".to_string()),
        calories: number("nf_calories") as i32,
        protein: number("nf_protein"),
        carbs: number("nf_total_carbohydrate"),
        fat: number("nf_total_fat"),
        fiber: number("nf_dietary_fiber"),
        sugar: number("nf_sugars"),
        sodium: number("nf_sodium"),
        saturated_fat: number("nf_saturated_fat"),
        cholesterol: number("nf_cholesterol"),
        serving_qty: field_number(food, "serving_qty").unwrap_or(1.0),
        serving_unit: field_text(food, "serving_unit").unwrap_or_else(|| "serving".to_string()),
        serving_weight_grams: field_number(food, "serving_weight_grams"),
        category: RestaurantCategory::classify(&name),
        name,
    })
}

impl RestaurantSearch {
    pub fn new(client: reqwest::Client, base_url: &str, credentials: Option<(&str, &str)>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: Credentials::from_pair(credentials),
        }
    }

    pub fn from_config(client: reqwest::Client, config: &NutritionConfig) -> Self {
        Self::new(client, &config.nutritionix_url, config.nutritionix_credentials())
    }

    async fn natural(&self, credentials: &Credentials, query: &str) -> Result<Vec<RestaurantFood>, LookupError> {
        let request = credentials.apply(
            self.client
                .post(format!("{}/natural/nutrients", self.base_url))
                .json(&json!({ "query": query })),
        );
        let body: Option<Value> = fetch_json(request).await?;

        Ok(body
            .as_ref()
            .and_then(|b| b.get("foods"))
            .and_then(Value::as_array)
            .map(|foods| foods.iter().filter_map(parse_food).collect())
            .unwrap_or_default())
    }

    /// Matching menu items and the name of the source that produced them
    pub async fn search(&self, query: &str) -> (Vec<RestaurantFood>, &'static str) {
        let offline = || (offline_menu_search(query), OFFLINE_SOURCE);

        let Some(credentials) = &self.credentials else {
            return offline();
        };

        match self.natural(credentials, query).await {
            Ok(items) if !items.is_empty() => (items, NUTRITIONIX),
            Ok(_) => offline(),
            Err(e) => {
                warn!(query = %query, error = %e, "Restaurant search failed, using offline menu");
                offline()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_parse_food_defaults() {
        let food = parse_food(&json!({
            "food_name": "Grande Caffe Latte",
            "nf_calories": 190.4,
            "nf_saturated_fat": 4.5,
            "serving_weight_grams": 473
        }))
        .unwrap();
        assert_eq!(food.restaurant, "Restaurant");
        assert_eq!(food.calories, 190);
        assert_eq!(food.serving_qty, 1.0);
        assert_eq!(food.serving_unit, "serving");
        assert_eq!(food.serving_weight_grams, Some(473.0));
        assert_eq!(food.category, RestaurantCategory::Beverage);
        assert!(parse_food(&json!({"brand_name": "x"})).is_none());
    }

    #[tokio::test]
    async fn test_unconfigured_uses_offline_menu() {
        let search = RestaurantSearch::new(reqwest::Client::new(), "http://127.0.0.1:9", None);
        let (items, source) = search.search("big mac").await;
        assert_eq!(source, OFFLINE_SOURCE);
        assert_eq!(items.len(), 1);
    }

    #[tokio::test]
    async fn test_natural_language_search() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/natural/nutrients"))
            .and(header("x-app-id", "id"))
            .and(body_json(json!({"query": "big mac from mcdonalds"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "foods": [{
                    "food_name": "big mac",
                    "brand_name": "McDonald's",
                    "nf_calories": 563,
                    "serving_qty": 1,
                    "serving_unit": "burger"
                }]
            })))
            .mount(&server)
            .await;

        let search = RestaurantSearch::new(reqwest::Client::new(), &server.uri(), Some(("id", "key")));
        let (items, source) = search.search("big mac from mcdonalds").await;
        assert_eq!(source, "Nutritionix");
        assert_eq!(items[0].restaurant, "McDonald's");
        assert_eq!(items[0].calories, 563);
    }

    #[tokio::test]
    async fn test_errors_and_empty_results_fall_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/natural/nutrients"))
            .and(body_json(json!({"query": "starbucks"})))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/natural/nutrients"))
            .and(body_json(json!({"query": "chipotle"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"foods": []})))
            .mount(&server)
            .await;

        let search = RestaurantSearch::new(reqwest::Client::new(), &server.uri(), Some(("id", "key")));
        let (items, source) = search.search("starbucks").await;
        assert_eq!(source, OFFLINE_SOURCE);
        assert_eq!(items.len(), 2);

        let (items, source) = search.search("chipotle").await;
        assert_eq!(source, OFFLINE_SOURCE);
        assert_eq!(items.len(), 2);
    }
}
