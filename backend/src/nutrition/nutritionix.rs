//! Nutritionix item search by UPC
//!
//! Requests authenticate with the `x-app-id` and `x-app-key` headers.

use super::supplements::SupplementProvider;
use super::{fetch_json, field_number, field_text, LookupError, NutritionProvider};
use async_trait::async_trait;
use ml_fitness_shared::models::{FoodItem, SupplementInfo};
use serde_json::Value;
use std::collections::BTreeMap;

pub(crate) const SOURCE: &str = "Nutritionix";

/// Percent daily value fields reported on supplement items
const DAILY_VALUE_FIELDS: [(&str, &str); 4] = [
    ("nf_vitamin_a_dv", "Vitamin A"),
    ("nf_vitamin_c_dv", "Vitamin C"),
    ("nf_calcium_dv", "Calcium"),
    ("nf_iron_dv", "Iron"),
];

#[derive(Clone)]
pub(crate) struct Credentials {
    pub app_id: String,
    pub app_key: String,
}

impl Credentials {
    pub(crate) fn from_pair(pair: Option<(&str, &str)>) -> Option<Self> {
        pair.map(|(app_id, app_key)| Self {
            app_id: app_id.to_string(),
            app_key: app_key.to_string(),
        })
    }

    pub(crate) fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("x-app-id", &self.app_id)
            .header("x-app-key", &self.app_key)
    }
}

pub struct Nutritionix {
    client: reqwest::Client,
    base_url: String,
    credentials: Option<Credentials>,
}

impl Nutritionix {
    pub fn new(client: reqwest::Client, base_url: &str, credentials: Option<(&str, &str)>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials: Credentials::from_pair(credentials),
        }
    }

    async fn first_item(&self, barcode: &str) -> Result<Option<Value>, LookupError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(LookupError::NotConfigured(SOURCE))?;
        let request = credentials.apply(
            self.client
                .get(format!("{}/search/item", self.base_url))
                .query(&[("upc", barcode)]),
        );

        let body: Option<Value> = fetch_json(request).await?;
        Ok(body.and_then(|b| b.get("foods")?.as_array()?.first().cloned()))
    }
}

pub(crate) fn parse_item(item: &Value, barcode: &str) -> Option<FoodItem> {
    let name = field_text(item, "food_name").or_else(|| field_text(item, "item_name"))?;
    let number = |key: &str| field_number(item, key).unwrap_or(0.0);

    Some(FoodItem {
        name,
        brand: field_text(item, "brand_name"),
        barcode: Some(barcode.to_string()),
        calories: number("nf_calories") as i32,
        protein: number("nf_protein"),
        carbs: number("nf_total_carbohydrate"),
        fat: number("nf_total_fat"),
        fiber: number("nf_dietary_fiber"),
        sugar: number("nf_sugars"),
        sodium: number("nf_sodium"),
        serving_size: field_text(item, "serving_qty").unwrap_or_else(|| "1".to_string()),
        serving_unit: field_text(item, "serving_unit").unwrap_or_else(|| "serving".to_string()),
        source: SOURCE.to_string(),
    })
}

pub(crate) fn parse_supplement(item: &Value, barcode: &str) -> SupplementInfo {
    let nutrients: BTreeMap<String, f64> = DAILY_VALUE_FIELDS
        .iter()
        .filter_map(|(key, display)| Some((display.to_string(), field_number(item, key)?)))
        .collect();

    SupplementInfo {
        name: field_text(item, "item_name").unwrap_or_else(|| "Unknown".to_string()),
        brand: field_text(item, "brand_name"),
        barcode: Some(barcode.to_string()),
        ingredients: Vec::new(),
        serving_size: field_text(item, "serving_qty"),
        nutrients,
        source: SOURCE.to_string(),
    }
}

#[async_trait]
impl NutritionProvider for Nutritionix {
    fn name(&self) -> &'static str {
        SOURCE
    }

    fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    async fn lookup_barcode(&self, barcode: &str) -> Result<Option<FoodItem>, LookupError> {
        Ok(self
            .first_item(barcode)
            .await?
            .and_then(|item| parse_item(&item, barcode)))
    }
}

#[async_trait]
impl SupplementProvider for Nutritionix {
    fn name(&self) -> &'static str {
        SOURCE
    }

    fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    async fn lookup_supplement(&self, barcode: &str) -> Result<Option<SupplementInfo>, LookupError> {
        Ok(self
            .first_item(barcode)
            .await?
            .map(|item| parse_supplement(&item, barcode)))
    }
}
