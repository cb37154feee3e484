//! Input validation
//!
//! Range checks for logged values and profile fields. Every check returns a
//! human-readable message on failure.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex_lite::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    // literal pattern, always compiles
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
});

static BARCODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{8,14}$").unwrap());

fn finite(value: f64, what: &str) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err(format!("{} must be a valid number", what));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    if !EMAIL_RE.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Weight in kg, 20 to 500
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    finite(weight_kg, "Weight")?;
    if weight_kg < 20.0 {
        return Err("Weight must be at least 20 kg".to_string());
    }
    if weight_kg > 500.0 {
        return Err("Weight must be at most 500 kg".to_string());
    }
    Ok(())
}

/// Height in cm, 50 to 300
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    finite(height_cm, "Height")?;
    if height_cm < 50.0 {
        return Err("Height must be at least 50 cm".to_string());
    }
    if height_cm > 300.0 {
        return Err("Height must be at most 300 cm".to_string());
    }
    Ok(())
}

/// Calories for a single food entry
pub fn validate_calories(calories: f64) -> Result<(), String> {
    finite(calories, "Calories")?;
    if calories < 0.0 {
        return Err("Calories cannot be negative".to_string());
    }
    if calories > 10000.0 {
        return Err("Calories cannot exceed 10000 per entry".to_string());
    }
    Ok(())
}

/// Water for a single log, in fluid ounces
pub fn validate_water_oz(amount_oz: f64) -> Result<(), String> {
    finite(amount_oz, "Water amount")?;
    if amount_oz <= 0.0 {
        return Err("Water amount must be positive".to_string());
    }
    if amount_oz > 200.0 {
        return Err("Water amount cannot exceed 200 oz per entry".to_string());
    }
    Ok(())
}

pub fn validate_duration_minutes(minutes: i32) -> Result<(), String> {
    if minutes < 1 {
        return Err("Duration must be at least 1 minute".to_string());
    }
    if minutes > 1440 {
        return Err("Duration cannot exceed 24 hours".to_string());
    }
    Ok(())
}

pub fn validate_serving_count(servings: f64) -> Result<(), String> {
    finite(servings, "Serving count")?;
    if servings <= 0.0 {
        return Err("Serving count must be positive".to_string());
    }
    if servings > 100.0 {
        return Err("Serving count cannot exceed 100".to_string());
    }
    Ok(())
}

/// UPC/EAN style barcodes: 8 to 14 digits
pub fn validate_barcode(code: &str) -> Result<(), String> {
    if BARCODE_RE.is_match(code) {
        Ok(())
    } else {
        Err("Barcode must be 8 to 14 digits".to_string())
    }
}

/// Birth date must be in the past, age 1 to 150
pub fn validate_birth_date(birth_date: NaiveDate, today: NaiveDate) -> Result<(), String> {
    if birth_date > today {
        return Err("Birth date cannot be in the future".to_string());
    }
    match today.years_since(birth_date) {
        Some(age) if age < 1 => Err("Age must be at least 1 year".to_string()),
        Some(age) if age > 150 => Err("Age cannot exceed 150 years".to_string()),
        None => Err("Invalid birth date".to_string()),
        _ => Ok(()),
    }
}

pub fn validate_not_blank(value: &str, what: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} cannot be empty", what));
    }
    Ok(())
}

/// Map field names to display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "weight" | "weight_kg" | "current_weight_kg" => "Current Weight",
        "goal_weight_kg" => "Goal Weight",
        "height" | "height_cm" => "Height",
        "birth_date" => "Birth Date",
        "sex" => "Sex",
        "activity_level" => "Activity Level",
        "unit_system" => "Unit System",
        "calories" => "Calories",
        "amount_oz" => "Water Amount",
        "duration_minutes" => "Duration",
        "serving_count" | "servings" => "Servings",
        "barcode" => "Barcode",
        "daily_calorie_goal" => "Daily Calorie Goal",
        "daily_water_goal_cups" => "Daily Water Goal",
        "daily_exercise_goal_minutes" => "Daily Exercise Goal",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

/// Run a check and attach the field name to its failure
pub fn check_field(field: &str, result: Result<(), String>) -> Result<(), ValidationError> {
    result.map_err(|message| ValidationError::new(field, &message))
}
