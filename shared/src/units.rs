//! Unit conversion and display formatting
//!
//! Stored values are metric (kg, cm, ml, km, °C). Conversion to the user's
//! preferred system happens at the edges, when a value is shown or read back.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pounds per kilogram
pub const LBS_PER_KG: f64 = 2.20462;
/// Centimeters per inch
pub const CM_PER_INCH: f64 = 2.54;
/// Milliliters per US fluid ounce
pub const ML_PER_FL_OZ: f64 = 29.5735;
/// Milliliters per US cup
pub const ML_PER_CUP: f64 = 236.588;
/// Miles per kilometer
pub const MILES_PER_KM: f64 = 0.621371;

// ============================================================================
// Unit System
// ============================================================================

/// Measurement system chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "metric",
            UnitSystem::Imperial => "imperial",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "si" => Ok(UnitSystem::Metric),
            "imperial" | "us" => Ok(UnitSystem::Imperial),
            _ => Err(format!("Unknown unit system: {}", s)),
        }
    }
}

// ============================================================================
// Weight
// ============================================================================

/// Weight unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    /// Convert a value in this unit to kilograms
    pub fn to_kg(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lbs => lbs_to_kg(value),
        }
    }

    /// Convert kilograms to this unit
    pub fn from_kg(&self, kg: f64) -> f64 {
        match self {
            WeightUnit::Kg => kg,
            WeightUnit::Lbs => kg_to_lbs(kg),
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kg" | "kgs" | "kilogram" | "kilograms" => Ok(WeightUnit::Kg),
            "lb" | "lbs" | "pound" | "pounds" => Ok(WeightUnit::Lbs),
            _ => Err(format!("Unknown weight unit: {}", s)),
        }
    }
}

pub fn kg_to_lbs(kg: f64) -> f64 {
    kg * LBS_PER_KG
}

pub fn lbs_to_kg(lbs: f64) -> f64 {
    lbs / LBS_PER_KG
}

/// Format a weight stored in kg for display, one decimal place
pub fn format_weight(kg: f64, system: UnitSystem) -> String {
    match system {
        UnitSystem::Metric => format!("{:.1} kg", kg),
        UnitSystem::Imperial => format!("{:.1} lbs", kg_to_lbs(kg)),
    }
}

// ============================================================================
// Height
// ============================================================================

/// Height unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HeightUnit {
    #[default]
    Cm,
    Inches,
    FeetInches, // carried as total inches
}

impl HeightUnit {
    pub fn to_cm(&self, value: f64) -> f64 {
        match self {
            HeightUnit::Cm => value,
            HeightUnit::Inches | HeightUnit::FeetInches => value * CM_PER_INCH,
        }
    }

    pub fn from_cm(&self, cm: f64) -> f64 {
        match self {
            HeightUnit::Cm => cm,
            HeightUnit::Inches | HeightUnit::FeetInches => cm / CM_PER_INCH,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            HeightUnit::Cm => "cm",
            HeightUnit::Inches => "in",
            HeightUnit::FeetInches => "ft/in",
        }
    }
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for HeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cm" | "centimeter" | "centimeters" => Ok(HeightUnit::Cm),
            "in" | "inch" | "inches" => Ok(HeightUnit::Inches),
            "ft" | "feet" | "ft/in" | "feet_inches" => Ok(HeightUnit::FeetInches),
            _ => Err(format!("Unknown height unit: {}", s)),
        }
    }
}

/// Whole feet plus whole inches, as shown on an imperial height picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeetInches {
    pub feet: u32,
    pub inches: u32,
}

impl FeetInches {
    pub fn to_cm(&self) -> f64 {
        feet_inches_to_cm(self.feet, self.inches)
    }
}

impl fmt::Display for FeetInches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'{}\"", self.feet, self.inches)
    }
}

/// Split a height in cm into feet and rounded inches.
///
/// Inches are rounded to the nearest whole number; a result of 12 rolls over
/// into the next foot.
pub fn cm_to_feet_inches(cm: f64) -> FeetInches {
    let total_inches = (cm / CM_PER_INCH).max(0.0);
    let mut feet = (total_inches / 12.0).floor() as u32;
    let mut inches = (total_inches % 12.0).round() as u32;
    if inches == 12 {
        feet += 1;
        inches = 0;
    }
    FeetInches { feet, inches }
}

pub fn feet_inches_to_cm(feet: u32, inches: u32) -> f64 {
    (feet as f64 * 12.0 + inches as f64) * CM_PER_INCH
}

pub fn format_height(cm: f64, system: UnitSystem) -> String {
    match system {
        UnitSystem::Metric => format!("{:.0} cm", cm),
        UnitSystem::Imperial => cm_to_feet_inches(cm).to_string(),
    }
}

// ============================================================================
// Volume
// ============================================================================

/// Liquid volume unit, used for water logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VolumeUnit {
    Ml,
    #[default]
    FlOz,
    Cups,
}

impl VolumeUnit {
    pub fn to_ml(&self, value: f64) -> f64 {
        match self {
            VolumeUnit::Ml => value,
            VolumeUnit::FlOz => oz_to_ml(value),
            VolumeUnit::Cups => cups_to_ml(value),
        }
    }

    pub fn from_ml(&self, ml: f64) -> f64 {
        match self {
            VolumeUnit::Ml => ml,
            VolumeUnit::FlOz => ml_to_oz(ml),
            VolumeUnit::Cups => ml_to_cups(ml),
        }
    }

    /// Convert a value in this unit to US fluid ounces
    pub fn to_fl_oz(&self, value: f64) -> f64 {
        match self {
            VolumeUnit::FlOz => value,
            VolumeUnit::Cups => value * 8.0,
            VolumeUnit::Ml => ml_to_oz(value),
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            VolumeUnit::Ml => "ml",
            VolumeUnit::FlOz => "oz",
            VolumeUnit::Cups => "cups",
        }
    }
}

impl fmt::Display for VolumeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for VolumeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ml" | "milliliter" | "milliliters" => Ok(VolumeUnit::Ml),
            "oz" | "fl_oz" | "fl oz" | "ounce" | "ounces" => Ok(VolumeUnit::FlOz),
            "cup" | "cups" => Ok(VolumeUnit::Cups),
            _ => Err(format!("Unknown volume unit: {}", s)),
        }
    }
}

pub fn ml_to_oz(ml: f64) -> f64 {
    ml / ML_PER_FL_OZ
}

pub fn oz_to_ml(oz: f64) -> f64 {
    oz * ML_PER_FL_OZ
}

pub fn ml_to_cups(ml: f64) -> f64 {
    ml / ML_PER_CUP
}

pub fn cups_to_ml(cups: f64) -> f64 {
    cups * ML_PER_CUP
}

// ============================================================================
// Distance
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnit {
    #[default]
    Km,
    Miles,
}

impl DistanceUnit {
    pub fn to_km(&self, value: f64) -> f64 {
        match self {
            DistanceUnit::Km => value,
            DistanceUnit::Miles => miles_to_km(value),
        }
    }

    pub fn from_km(&self, km: f64) -> f64 {
        match self {
            DistanceUnit::Km => km,
            DistanceUnit::Miles => km_to_miles(km),
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            DistanceUnit::Km => "km",
            DistanceUnit::Miles => "mi",
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for DistanceUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "km" | "kilometer" | "kilometers" => Ok(DistanceUnit::Km),
            "mi" | "mile" | "miles" => Ok(DistanceUnit::Miles),
            _ => Err(format!("Unknown distance unit: {}", s)),
        }
    }
}

pub fn km_to_miles(km: f64) -> f64 {
    km * MILES_PER_KM
}

pub fn miles_to_km(miles: f64) -> f64 {
    miles / MILES_PER_KM
}

pub fn format_distance(km: f64, system: UnitSystem) -> String {
    match system {
        UnitSystem::Metric => format!("{:.2} km", km),
        UnitSystem::Imperial => format!("{:.2} mi", km_to_miles(km)),
    }
}

// ============================================================================
// Temperature
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn to_celsius(&self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => fahrenheit_to_celsius(value),
        }
    }

    pub fn from_celsius(&self, celsius: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius_to_fahrenheit(celsius),
        }
    }
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * 5.0 / 9.0
}

// ============================================================================
// Preferences
// ============================================================================

/// Per-quantity display units derived from a unit system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UnitPreferences {
    pub weight: WeightUnit,
    pub height: HeightUnit,
    pub volume: VolumeUnit,
    pub distance: DistanceUnit,
    pub temperature: TemperatureUnit,
}

impl UnitPreferences {
    pub fn metric() -> Self {
        Self {
            weight: WeightUnit::Kg,
            height: HeightUnit::Cm,
            volume: VolumeUnit::Ml,
            distance: DistanceUnit::Km,
            temperature: TemperatureUnit::Celsius,
        }
    }

    pub fn imperial() -> Self {
        Self {
            weight: WeightUnit::Lbs,
            height: HeightUnit::FeetInches,
            volume: VolumeUnit::FlOz,
            distance: DistanceUnit::Miles,
            temperature: TemperatureUnit::Fahrenheit,
        }
    }

    pub fn for_system(system: UnitSystem) -> Self {
        match system {
            UnitSystem::Metric => Self::metric(),
            UnitSystem::Imperial => Self::imperial(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn approx(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // =========================================================================
    // Reference values
    // =========================================================================

    #[test]
    fn test_kg_to_lbs_reference() {
        assert!(approx(kg_to_lbs(70.0), 154.32, 0.01));
        assert!(approx(lbs_to_kg(150.0), 68.04, 0.01));
    }

    #[test]
    fn test_height_reference() {
        let h = cm_to_feet_inches(180.34);
        assert_eq!(h, FeetInches { feet: 5, inches: 11 });
        assert!(approx(feet_inches_to_cm(5, 10), 177.8, 0.01));
    }

    #[test]
    fn test_inches_round_up_into_next_foot() {
        // 71.8 in rounds to 6'0", not 5'12"
        let h = cm_to_feet_inches(71.8 * CM_PER_INCH);
        assert_eq!(h, FeetInches { feet: 6, inches: 0 });
    }

    #[test]
    fn test_volume_reference() {
        assert!(approx(ml_to_oz(250.0), 8.45, 0.01));
        assert!(approx(cups_to_ml(1.0), 236.588, 1e-9));
        assert!(approx(VolumeUnit::Cups.to_fl_oz(2.0), 16.0, 1e-9));
    }

    #[test]
    fn test_distance_reference() {
        assert!(approx(km_to_miles(5.0), 3.11, 0.01));
    }

    #[test]
    fn test_temperature_reference() {
        assert!(approx(celsius_to_fahrenheit(25.0), 77.0, 1e-9));
        assert!(approx(fahrenheit_to_celsius(212.0), 100.0, 1e-9));
    }

    // =========================================================================
    // Formatting
    // =========================================================================

    #[rstest]
    #[case(70.0, UnitSystem::Metric, "70.0 kg")]
    #[case(70.0, UnitSystem::Imperial, "154.3 lbs")]
    fn test_format_weight(#[case] kg: f64, #[case] system: UnitSystem, #[case] expected: &str) {
        assert_eq!(format_weight(kg, system), expected);
    }

    #[rstest]
    #[case(177.8, UnitSystem::Metric, "178 cm")]
    #[case(177.8, UnitSystem::Imperial, "5'10\"")]
    fn test_format_height(#[case] cm: f64, #[case] system: UnitSystem, #[case] expected: &str) {
        assert_eq!(format_height(cm, system), expected);
    }

    #[rstest]
    #[case(5.0, UnitSystem::Metric, "5.00 km")]
    #[case(5.0, UnitSystem::Imperial, "3.11 mi")]
    fn test_format_distance(#[case] km: f64, #[case] system: UnitSystem, #[case] expected: &str) {
        assert_eq!(format_distance(km, system), expected);
    }

    // =========================================================================
    // Round trips
    // =========================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_weight_roundtrip(kg in 20.0f64..500.0) {
            let back = WeightUnit::Lbs.to_kg(WeightUnit::Lbs.from_kg(kg));
            prop_assert!(approx(kg, back, kg * 1e-9));
        }

        #[test]
        fn prop_volume_roundtrip(ml in 1.0f64..5000.0) {
            let via_oz = oz_to_ml(ml_to_oz(ml));
            let via_cups = cups_to_ml(ml_to_cups(ml));
            prop_assert!(approx(ml, via_oz, ml * 1e-9));
            prop_assert!(approx(ml, via_cups, ml * 1e-9));
        }

        #[test]
        fn prop_distance_roundtrip(km in 0.1f64..500.0) {
            prop_assert!(approx(km, miles_to_km(km_to_miles(km)), km * 1e-9));
        }

        #[test]
        fn prop_temperature_roundtrip(c in -50.0f64..60.0) {
            prop_assert!(approx(c, fahrenheit_to_celsius(celsius_to_fahrenheit(c)), 1e-9));
        }

        /// Whole-inch heights survive the trip through cm
        #[test]
        fn prop_feet_inches_roundtrip(feet in 3u32..8, inches in 0u32..12) {
            let cm = feet_inches_to_cm(feet, inches);
            prop_assert_eq!(cm_to_feet_inches(cm), FeetInches { feet, inches });
        }

        #[test]
        fn prop_inches_never_twelve(cm in 50.0f64..300.0) {
            prop_assert!(cm_to_feet_inches(cm).inches < 12);
        }
    }

    // =========================================================================
    // Parsing
    // =========================================================================

    #[test]
    fn test_unit_parsing() {
        assert_eq!("pounds".parse::<WeightUnit>().unwrap(), WeightUnit::Lbs);
        assert_eq!("oz".parse::<VolumeUnit>().unwrap(), VolumeUnit::FlOz);
        assert_eq!("mi".parse::<DistanceUnit>().unwrap(), DistanceUnit::Miles);
        assert_eq!("Imperial".parse::<UnitSystem>().unwrap(), UnitSystem::Imperial);
        assert!("stone".parse::<WeightUnit>().is_err());
    }

    #[test]
    fn test_preferences_for_system() {
        let prefs = UnitPreferences::for_system(UnitSystem::Imperial);
        assert_eq!(prefs.weight, WeightUnit::Lbs);
        assert_eq!(prefs.volume, VolumeUnit::FlOz);
        assert_eq!(UnitPreferences::for_system(UnitSystem::Metric).height, HeightUnit::Cm);
    }
}
