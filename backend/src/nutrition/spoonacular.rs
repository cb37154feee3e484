//! Spoonacular grocery products by UPC

use super::{fetch_json, field_number, field_text, LookupError, NutritionProvider};
use async_trait::async_trait;
use ml_fitness_shared::models::FoodItem;
use serde_json::Value;

const SOURCE: &str = "Spoonacular";

pub struct Spoonacular {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl Spoonacular {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: Option<&str>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(str::to_string),
        }
    }
}

pub(crate) fn parse_product(product: &Value, barcode: &str) -> Option<FoodItem> {
    let name = field_text(product, "title")?;
    let nutrients = product.get("nutrition")?.get("nutrients")?.as_array()?;

    let mut item = FoodItem {
        name,
        brand: field_text(product, "brand"),
        barcode: Some(barcode.to_string()),
        calories: 0,
        protein: 0.0,
        carbs: 0.0,
        fat: 0.0,
        fiber: 0.0,
        sugar: 0.0,
        sodium: 0.0,
        serving_size: field_text(product, "serving_size").unwrap_or_else(|| "1".to_string()),
        serving_unit: field_text(product, "serving_unit").unwrap_or_else(|| "serving".to_string()),
        source: SOURCE.to_string(),
    };

    for nutrient in nutrients {
        let Some(name) = field_text(nutrient, "name") else {
            continue;
        };
        let amount = field_number(nutrient, "amount").unwrap_or(0.0);
        match name.as_str() {
            "Calories" => item.calories = amount as i32,
            "Protein" => item.protein = amount,
            "Carbohydrates" => item.carbs = amount,
            "Fat" => item.fat = amount,
            "Fiber" => item.fiber = amount,
            "Sugar" => item.sugar = amount,
            "Sodium" => item.sodium = amount,
            _ => {}
        }
    }

    Some(item)
}

#[async_trait]
impl NutritionProvider for Spoonacular {
    fn name(&self) -> &'static str {
        SOURCE
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn lookup_barcode(&self, barcode: &str) -> Result<Option<FoodItem>, LookupError> {
        let api_key = self.api_key.as_deref().ok_or(LookupError::NotConfigured(SOURCE))?;
        let request = self
            .client
            .get(format!("{}/food/products/upc/{}", self.base_url, barcode))
            .query(&[("apiKey", api_key)]);

        let body: Option<Value> = fetch_json(request).await?;
        Ok(body.and_then(|product| parse_product(&product, barcode)))
    }
}
