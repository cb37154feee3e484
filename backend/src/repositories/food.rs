//! Stored food items and diary entries

use super::decimal_to_f64;
use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, Utc};
use ml_fitness_shared::models::{FoodEntry, FoodItem, MealType, NutritionFacts};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FoodItemRecord {
    pub id: Uuid,
    pub barcode: Option<String>,
    pub name: String,
    pub brand: Option<String>,
    pub calories: i32,
    pub protein: Decimal,
    pub carbs: Decimal,
    pub fat: Decimal,
    pub fiber: Decimal,
    pub sugar: Decimal,
    pub sodium: Decimal,
    pub serving_size: String,
    pub serving_unit: String,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

impl From<FoodItemRecord> for FoodItem {
    fn from(r: FoodItemRecord) -> Self {
        Self {
            name: r.name,
            brand: r.brand,
            barcode: r.barcode,
            calories: r.calories,
            protein: decimal_to_f64(r.protein),
            carbs: decimal_to_f64(r.carbs),
            fat: decimal_to_f64(r.fat),
            fiber: decimal_to_f64(r.fiber),
            sugar: decimal_to_f64(r.sugar),
            sodium: decimal_to_f64(r.sodium),
            serving_size: r.serving_size,
            serving_unit: r.serving_unit,
            source: r.source,
        }
    }
}

const FOOD_ITEM_COLUMNS: &str = "id, barcode, name, brand, calories, protein, carbs, fat, fiber, \
     sugar, sodium, serving_size, serving_unit, source, created_at";

pub struct FoodItemRepository;

impl FoodItemRepository {
    pub async fn find_by_barcode(pool: &PgPool, barcode: &str) -> Result<Option<FoodItemRecord>> {
        let record = sqlx::query_as::<_, FoodItemRecord>(&format!(
            "SELECT {} FROM food_items WHERE barcode = $1",
            FOOD_ITEM_COLUMNS
        ))
        .bind(barcode)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Case-insensitive name or brand search
    pub async fn search(pool: &PgPool, query: &str, limit: i64) -> Result<Vec<FoodItemRecord>> {
        let pattern = format!("%{}%", query.trim().to_lowercase());
        let records = sqlx::query_as::<_, FoodItemRecord>(&format!(
            r#"
            SELECT {}
            FROM food_items
            WHERE LOWER(name) LIKE $1 OR LOWER(COALESCE(brand, '')) LIKE $1
            ORDER BY name
            LIMIT $2
            "#,
            FOOD_ITEM_COLUMNS
        ))
        .bind(pattern)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Store an item, refreshing the row when the barcode is already known
    pub async fn upsert(pool: &PgPool, item: &FoodItem) -> Result<FoodItemRecord> {
        let record = sqlx::query_as::<_, FoodItemRecord>(&format!(
            r#"
            INSERT INTO food_items (barcode, name, brand, calories, protein, carbs, fat,
                                    fiber, sugar, sodium, serving_size, serving_unit, source)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (barcode) DO UPDATE SET
                name = EXCLUDED.name,
                brand = EXCLUDED.brand,
                calories = EXCLUDED.calories,
                protein = EXCLUDED.protein,
                carbs = EXCLUDED.carbs,
                fat = EXCLUDED.fat,
                fiber = EXCLUDED.fiber,
                sugar = EXCLUDED.sugar,
                sodium = EXCLUDED.sodium,
                serving_size = EXCLUDED.serving_size,
                serving_unit = EXCLUDED.serving_unit,
                source = EXCLUDED.source
            RETURNING {}
            "#,
            FOOD_ITEM_COLUMNS
        ))
        .bind(&item.barcode)
        .bind(&item.name)
        .bind(&item.brand)
        .bind(item.calories)
        .bind(item.protein)
        .bind(item.carbs)
        .bind(item.fat)
        .bind(item.fiber)
        .bind(item.sugar)
        .bind(item.sodium)
        .bind(&item.serving_size)
        .bind(&item.serving_unit)
        .bind(&item.source)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FoodEntryRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub entry_date: NaiveDate,
    pub meal_type: String,
    pub name: String,
    pub brand: Option<String>,
    pub barcode: Option<String>,
    pub serving_size: String,
    pub serving_unit: String,
    pub serving_count: Decimal,
    pub calories: Decimal,
    pub protein_g: Decimal,
    pub carbs_g: Decimal,
    pub fat_g: Decimal,
    pub fiber_g: Decimal,
    pub sugar_g: Decimal,
    pub sodium_mg: Decimal,
    pub logged_at: DateTime<Utc>,
}

impl TryFrom<FoodEntryRecord> for FoodEntry {
    type Error = anyhow::Error;

    fn try_from(r: FoodEntryRecord) -> Result<Self> {
        let meal_type: MealType = r.meal_type.parse().map_err(|e: String| anyhow!(e))?;
        Ok(Self {
            id: r.id,
            date: r.entry_date,
            meal_type,
            name: r.name,
            brand: r.brand,
            barcode: r.barcode,
            serving_size: r.serving_size,
            serving_unit: r.serving_unit,
            serving_count: decimal_to_f64(r.serving_count),
            nutrition: NutritionFacts {
                calories: decimal_to_f64(r.calories),
                protein_g: decimal_to_f64(r.protein_g),
                carbs_g: decimal_to_f64(r.carbs_g),
                fat_g: decimal_to_f64(r.fat_g),
                fiber_g: decimal_to_f64(r.fiber_g),
                sugar_g: decimal_to_f64(r.sugar_g),
                sodium_mg: decimal_to_f64(r.sodium_mg),
            },
            logged_at: r.logged_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CreateFoodEntry {
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub name: String,
    pub brand: Option<String>,
    pub barcode: Option<String>,
    pub serving_size: String,
    pub serving_unit: String,
    pub serving_count: f64,
    pub nutrition: NutritionFacts,
}

const FOOD_ENTRY_COLUMNS: &str = "id, user_id, entry_date, meal_type, name, brand, barcode, \
     serving_size, serving_unit, serving_count, calories, protein_g, carbs_g, fat_g, fiber_g, \
     sugar_g, sodium_mg, logged_at";

pub struct FoodEntryRepository;

impl FoodEntryRepository {
    pub async fn create(pool: &PgPool, input: CreateFoodEntry) -> Result<FoodEntryRecord> {
        let n = input.nutrition;
        let record = sqlx::query_as::<_, FoodEntryRecord>(&format!(
            r#"
            INSERT INTO food_entries (user_id, entry_date, meal_type, name, brand, barcode,
                                      serving_size, serving_unit, serving_count, calories,
                                      protein_g, carbs_g, fat_g, fiber_g, sugar_g, sodium_mg)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {}
            "#,
            FOOD_ENTRY_COLUMNS
        ))
        .bind(input.user_id)
        .bind(input.date)
        .bind(input.meal_type.as_str())
        .bind(&input.name)
        .bind(&input.brand)
        .bind(&input.barcode)
        .bind(&input.serving_size)
        .bind(&input.serving_unit)
        .bind(input.serving_count)
        .bind(n.calories)
        .bind(n.protein_g)
        .bind(n.carbs_g)
        .bind(n.fat_g)
        .bind(n.fiber_g)
        .bind(n.sugar_g)
        .bind(n.sodium_mg)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    pub async fn list_by_date(
        pool: &PgPool,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<FoodEntryRecord>> {
        let records = sqlx::query_as::<_, FoodEntryRecord>(&format!(
            r#"
            SELECT {}
            FROM food_entries
            WHERE user_id = $1 AND entry_date = $2
            ORDER BY logged_at
            "#,
            FOOD_ENTRY_COLUMNS
        ))
        .bind(user_id)
        .bind(date)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Calories eaten between two dates, inclusive, counting every serving
    pub async fn total_calories(
        pool: &PgPool,
        user_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<f64> {
        let total = sqlx::query_scalar::<_, Option<Decimal>>(
            r#"
            SELECT SUM(calories * serving_count)
            FROM food_entries
            WHERE user_id = $1 AND entry_date BETWEEN $2 AND $3
            "#,
        )
        .bind(user_id)
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await?;

        Ok(total.map(decimal_to_f64).unwrap_or(0.0))
    }

    pub async fn delete(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM food_entries
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
