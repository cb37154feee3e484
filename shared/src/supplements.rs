//! Supplement catalog and regimes
//!
//! The catalog holds common retail formulations that can be matched by
//! barcode or Canadian drug product number before any external lookup runs.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult};
use crate::models::{SupplementEntry, SupplementInfo};

/// Vitamins per serving. A/D/K/folate/B12/biotin in mcg, the rest in mg.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VitaminContent {
    pub vitamin_a: f64,
    pub vitamin_c: f64,
    pub vitamin_d: f64,
    pub vitamin_e: f64,
    pub vitamin_k: f64,
    pub thiamine: f64,
    pub riboflavin: f64,
    pub niacin: f64,
    pub vitamin_b6: f64,
    pub folate: f64,
    pub vitamin_b12: f64,
    pub biotin: f64,
    pub pantothenic_acid: f64,
}

/// Minerals per serving. Selenium, chromium, molybdenum and iodine in mcg.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MineralContent {
    pub calcium: f64,
    pub iron: f64,
    pub magnesium: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    pub sodium: f64,
    pub zinc: f64,
    pub copper: f64,
    pub manganese: f64,
    pub selenium: f64,
    pub chromium: f64,
    pub molybdenum: f64,
    pub iodine: f64,
}

impl VitaminContent {
    fn named(&self) -> [(&'static str, f64); 13] {
        [
            ("Vitamin A", self.vitamin_a),
            ("Vitamin C", self.vitamin_c),
            ("Vitamin D", self.vitamin_d),
            ("Vitamin E", self.vitamin_e),
            ("Vitamin K", self.vitamin_k),
            ("Thiamine", self.thiamine),
            ("Riboflavin", self.riboflavin),
            ("Niacin", self.niacin),
            ("Vitamin B6", self.vitamin_b6),
            ("Folate", self.folate),
            ("Vitamin B12", self.vitamin_b12),
            ("Biotin", self.biotin),
            ("Pantothenic Acid", self.pantothenic_acid),
        ]
    }
}

impl MineralContent {
    fn named(&self) -> [(&'static str, f64); 13] {
        [
            ("Calcium", self.calcium),
            ("Iron", self.iron),
            ("Magnesium", self.magnesium),
            ("Phosphorus", self.phosphorus),
            ("Potassium", self.potassium),
            ("Sodium", self.sodium),
            ("Zinc", self.zinc),
            ("Copper", self.copper),
            ("Manganese", self.manganese),
            ("Selenium", self.selenium),
            ("Chromium", self.chromium),
            ("Molybdenum", self.molybdenum),
            ("Iodine", self.iodine),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplement {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub description: String,
    pub serving_size: String,
    pub servings_per_container: Option<u32>,
    pub barcode: Option<String>,
    /// Drug Product Number (Canada)
    pub dpn: Option<String>,
    pub vitamins: VitaminContent,
    pub minerals: MineralContent,
    pub other_ingredients: Vec<String>,
    pub target_gender: Option<String>,
    pub target_age: Option<String>,
    pub warnings: Vec<String>,
    pub certifications: Vec<String>,
}

impl Supplement {
    /// Non-zero vitamins and minerals keyed by display name
    pub fn nutrients(&self) -> BTreeMap<String, f64> {
        self.vitamins
            .named()
            .into_iter()
            .chain(self.minerals.named())
            .filter(|(_, amount)| *amount > 0.0)
            .map(|(name, amount)| (name.to_string(), amount))
            .collect()
    }
}

/// Source label for catalog matches
pub const CATALOG_SOURCE: &str = "ML Fitness Catalog";

impl From<&Supplement> for SupplementInfo {
    fn from(s: &Supplement) -> Self {
        Self {
            name: s.name.clone(),
            brand: Some(s.brand.clone()),
            barcode: s.barcode.clone(),
            ingredients: s.other_ingredients.clone(),
            serving_size: Some(s.serving_size.clone()),
            nutrients: s.nutrients(),
            source: CATALOG_SOURCE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SupplementCatalog {
    supplements: Vec<Supplement>,
}

impl SupplementCatalog {
    pub fn new(supplements: Vec<Supplement>) -> Self {
        Self { supplements }
    }

    /// Catalog seeded with the built-in formulations
    pub fn builtin() -> Self {
        Self::new(BUILTIN.clone())
    }

    pub fn all(&self) -> &[Supplement] {
        &self.supplements
    }

    pub fn search_by_barcode(&self, barcode: &str) -> Option<&Supplement> {
        self.supplements
            .iter()
            .find(|s| s.barcode.as_deref() == Some(barcode))
    }

    pub fn search_by_dpn(&self, dpn: &str) -> Option<&Supplement> {
        self.supplements.iter().find(|s| s.dpn.as_deref() == Some(dpn))
    }

    /// Case-insensitive substring match on name or brand
    pub fn search_by_name(&self, query: &str) -> Vec<&Supplement> {
        let term = query.to_lowercase();
        self.supplements
            .iter()
            .filter(|s| s.name.to_lowercase().contains(&term) || s.brand.to_lowercase().contains(&term))
            .collect()
    }

    pub fn search_by_category(&self, category: &str) -> Vec<&Supplement> {
        self.supplements
            .iter()
            .filter(|s| s.category.eq_ignore_ascii_case(category))
            .collect()
    }

    /// Supplements for `gender` plus those without a target
    pub fn search_by_gender(&self, gender: &str) -> Vec<&Supplement> {
        self.supplements
            .iter()
            .filter(|s| {
                s.target_gender
                    .as_deref()
                    .map_or(true, |target| target.eq_ignore_ascii_case(gender))
            })
            .collect()
    }

    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self.supplements.iter().map(|s| s.category.clone()).collect();
        categories.sort();
        categories.dedup();
        categories
    }

    pub fn add_custom(&mut self, supplement: Supplement) -> DomainResult<()> {
        if self.supplements.iter().any(|s| s.id == supplement.id) {
            return Err(DomainError::Duplicate(format!(
                "Supplement '{}' already exists",
                supplement.id
            )));
        }
        self.supplements.push(supplement);
        Ok(())
    }
}

// ============================================================================
// Regimes
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeSupplement {
    pub name: String,
    pub brand: Option<String>,
    pub serving_size: String,
    pub serving_unit: String,
    #[serde(default = "default_serving_count")]
    pub serving_count: f64,
    pub barcode: Option<String>,
    #[serde(default)]
    pub nutrients: BTreeMap<String, f64>,
    pub notes: Option<String>,
}

fn default_serving_count() -> f64 {
    1.0
}

/// A named stack taken together, e.g. "Morning Vitamins"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplementRegime {
    pub id: Uuid,
    pub name: String,
    pub supplements: Vec<RegimeSupplement>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SupplementRegime {
    /// One diary entry per supplement in the regime
    pub fn entries_for(&self, date: NaiveDate, logged_at: DateTime<Utc>) -> Vec<SupplementEntry> {
        self.supplements
            .iter()
            .map(|s| SupplementEntry {
                id: Uuid::new_v4(),
                date,
                name: s.name.clone(),
                brand: s.brand.clone(),
                servings: s.serving_count,
                serving_unit: s.serving_unit.clone(),
                nutrients: s.nutrients.clone(),
                regime_id: Some(self.id),
                logged_at,
            })
            .collect()
    }
}

// ============================================================================
// Built-in catalog
// ============================================================================

struct Listing {
    id: &'static str,
    name: &'static str,
    brand: &'static str,
    category: &'static str,
    description: &'static str,
    serving_size: &'static str,
    servings_per_container: Option<u32>,
    barcode: Option<&'static str>,
    dpn: Option<&'static str>,
    target_gender: Option<&'static str>,
}

fn supplement(
    listing: Listing,
    vitamins: VitaminContent,
    minerals: MineralContent,
    other_ingredients: &[&str],
    certifications: &[&str],
) -> Supplement {
    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    Supplement {
        id: listing.id.to_string(),
        name: listing.name.to_string(),
        brand: listing.brand.to_string(),
        category: listing.category.to_string(),
        description: listing.description.to_string(),
        serving_size: listing.serving_size.to_string(),
        servings_per_container: listing.servings_per_container,
        barcode: listing.barcode.map(str::to_string),
        dpn: listing.dpn.map(str::to_string),
        vitamins,
        minerals,
        other_ingredients: owned(other_ingredients),
        target_gender: listing.target_gender.map(str::to_string),
        target_age: None,
        warnings: Vec::new(),
        certifications: owned(certifications),
    }
}

static BUILTIN: Lazy<Vec<Supplement>> = Lazy::new(|| {
    let mut materna = supplement(
        Listing {
            id: "materna-prenatal",
            name: "Materna Prenatal Multivitamin",
            brand: "Materna",
            category: "Prenatal",
            description: "Complete prenatal vitamin with DHA",
            serving_size: "1 tablet + 1 softgel",
            servings_per_container: Some(30),
            barcode: Some("060815008622"),
            dpn: Some("02343398"),
            target_gender: Some("female"),
        },
        VitaminContent {
            vitamin_a: 600.0,
            vitamin_c: 85.0,
            vitamin_d: 15.0,
            vitamin_e: 13.5,
            vitamin_k: 90.0,
            thiamine: 1.4,
            riboflavin: 1.4,
            niacin: 18.0,
            vitamin_b6: 1.9,
            folate: 1000.0,
            vitamin_b12: 2.6,
            biotin: 30.0,
            pantothenic_acid: 6.0,
        },
        MineralContent {
            calcium: 300.0,
            iron: 27.0,
            magnesium: 50.0,
            zinc: 11.0,
            copper: 1.0,
            manganese: 2.0,
            selenium: 30.0,
            chromium: 30.0,
            molybdenum: 50.0,
            iodine: 220.0,
            ..Default::default()
        },
        &["DHA 200mg", "Choline"],
        &[],
    );
    materna.target_age = Some("18-45".to_string());
    materna.warnings = vec!["For pregnant and lactating women only".to_string()];

    vec![
        supplement(
            Listing {
                id: "centrum-men",
                name: "Centrum Men",
                brand: "Centrum",
                category: "Multivitamin",
                description: "Complete multivitamin specially formulated for men",
                serving_size: "1 tablet",
                servings_per_container: Some(90),
                barcode: Some("062107073806"),
                dpn: Some("02248186"),
                target_gender: Some("male"),
            },
            VitaminContent {
                vitamin_a: 1050.0,
                vitamin_c: 90.0,
                vitamin_d: 25.0,
                vitamin_e: 15.0,
                vitamin_k: 120.0,
                thiamine: 1.2,
                riboflavin: 1.3,
                niacin: 16.0,
                vitamin_b6: 1.7,
                folate: 400.0,
                vitamin_b12: 2.4,
                biotin: 30.0,
                pantothenic_acid: 5.0,
            },
            MineralContent {
                calcium: 210.0,
                magnesium: 140.0,
                phosphorus: 125.0,
                potassium: 80.0,
                zinc: 11.0,
                copper: 0.9,
                manganese: 2.3,
                selenium: 55.0,
                chromium: 35.0,
                molybdenum: 45.0,
                iodine: 150.0,
                ..Default::default()
            },
            &["Lycopene", "Lutein"],
            &["USP Verified"],
        ),
        supplement(
            Listing {
                id: "one-a-day-mens",
                name: "One A Day Men's Complete Multivitamin",
                brand: "One A Day",
                category: "Multivitamin",
                description: "Complete multivitamin for men's health",
                serving_size: "1 tablet",
                servings_per_container: Some(200),
                barcode: Some("016500535454"),
                dpn: None,
                target_gender: Some("male"),
            },
            VitaminContent {
                vitamin_a: 1050.0,
                vitamin_c: 60.0,
                vitamin_d: 17.5,
                vitamin_e: 10.0,
                vitamin_k: 20.0,
                thiamine: 1.35,
                riboflavin: 1.7,
                niacin: 16.0,
                vitamin_b6: 2.0,
                folate: 400.0,
                vitamin_b12: 6.0,
                biotin: 30.0,
                pantothenic_acid: 5.0,
            },
            MineralContent {
                calcium: 210.0,
                magnesium: 140.0,
                zinc: 11.0,
                copper: 0.9,
                manganese: 2.3,
                selenium: 55.0,
                chromium: 120.0,
                iodine: 150.0,
                ..Default::default()
            },
            &["Lycopene"],
            &[],
        ),
        supplement(
            Listing {
                id: "centrum-women",
                name: "Centrum Women",
                brand: "Centrum",
                category: "Multivitamin",
                description: "Complete multivitamin specially formulated for women",
                serving_size: "1 tablet",
                servings_per_container: Some(90),
                barcode: Some("062107073813"),
                dpn: Some("02248187"),
                target_gender: Some("female"),
            },
            VitaminContent {
                vitamin_a: 750.0,
                vitamin_c: 75.0,
                vitamin_d: 25.0,
                vitamin_e: 13.5,
                vitamin_k: 90.0,
                thiamine: 1.1,
                riboflavin: 1.1,
                niacin: 14.0,
                vitamin_b6: 1.5,
                folate: 400.0,
                vitamin_b12: 2.4,
                biotin: 30.0,
                pantothenic_acid: 5.0,
            },
            MineralContent {
                calcium: 500.0,
                iron: 18.0,
                magnesium: 50.0,
                phosphorus: 125.0,
                potassium: 80.0,
                zinc: 8.0,
                copper: 0.9,
                manganese: 1.8,
                selenium: 55.0,
                chromium: 25.0,
                molybdenum: 45.0,
                iodine: 150.0,
                ..Default::default()
            },
            &["Biotin", "Lutein"],
            &["USP Verified"],
        ),
        materna,
        supplement(
            Listing {
                id: "jamieson-d3-1000",
                name: "Vitamin D3 1000 IU",
                brand: "Jamieson",
                category: "Single Vitamin",
                description: "Helps maintain bone and immune health",
                serving_size: "1 tablet",
                servings_per_container: Some(375),
                barcode: Some("064642020130"),
                dpn: Some("80001227"),
                target_gender: None,
            },
            VitaminContent {
                vitamin_d: 25.0,
                ..Default::default()
            },
            MineralContent::default(),
            &[],
            &["NPN Approved", "TRU-ID Certified"],
        ),
        supplement(
            Listing {
                id: "nordic-naturals-omega3",
                name: "Ultimate Omega",
                brand: "Nordic Naturals",
                category: "Omega-3",
                description: "High-concentration omega-3 fish oil",
                serving_size: "2 softgels",
                servings_per_container: Some(60),
                barcode: Some("768990017605"),
                dpn: None,
                target_gender: None,
            },
            VitaminContent::default(),
            MineralContent::default(),
            &["EPA 650mg", "DHA 450mg", "Other Omega-3s 180mg"],
            &["Third-Party Tested", "Non-GMO", "Friend of the Sea"],
        ),
        supplement(
            Listing {
                id: "kirkland-multi",
                name: "Daily Multi",
                brand: "Kirkland Signature",
                category: "Multivitamin",
                description: "USP verified daily multivitamin",
                serving_size: "1 tablet",
                servings_per_container: Some(500),
                barcode: Some("096619756346"),
                dpn: None,
                target_gender: None,
            },
            VitaminContent {
                vitamin_a: 1050.0,
                vitamin_c: 60.0,
                vitamin_d: 10.0,
                vitamin_e: 13.5,
                vitamin_k: 25.0,
                thiamine: 1.5,
                riboflavin: 1.7,
                niacin: 20.0,
                vitamin_b6: 2.0,
                folate: 400.0,
                vitamin_b12: 6.0,
                biotin: 30.0,
                pantothenic_acid: 10.0,
            },
            MineralContent {
                calcium: 160.0,
                iron: 18.0,
                magnesium: 100.0,
                phosphorus: 125.0,
                zinc: 11.0,
                copper: 0.9,
                manganese: 2.3,
                selenium: 55.0,
                chromium: 35.0,
                molybdenum: 45.0,
                iodine: 150.0,
                ..Default::default()
            },
            &[],
            &["USP Verified"],
        ),
        supplement(
            Listing {
                id: "canprev-magnesium",
                name: "Magnesium Bisglycinate 200",
                brand: "CanPrev",
                category: "Single Mineral",
                description: "Gentle magnesium for better absorption",
                serving_size: "1 capsule",
                servings_per_container: Some(120),
                barcode: Some("886646502173"),
                dpn: Some("80077834"),
                target_gender: None,
            },
            VitaminContent::default(),
            MineralContent {
                magnesium: 200.0,
                ..Default::default()
            },
            &[],
            &["NPN Approved", "Third-Party Tested"],
        ),
        supplement(
            Listing {
                id: "nature-made-her",
                name: "Multi For Her",
                brand: "Nature Made",
                category: "Multivitamin",
                description: "Women's multivitamin with iron",
                serving_size: "1 tablet",
                servings_per_container: Some(90),
                barcode: Some("031604026585"),
                dpn: None,
                target_gender: Some("female"),
            },
            VitaminContent {
                vitamin_a: 750.0,
                vitamin_c: 120.0,
                vitamin_d: 25.0,
                vitamin_e: 15.0,
                vitamin_k: 90.0,
                thiamine: 1.1,
                riboflavin: 1.1,
                niacin: 14.0,
                vitamin_b6: 1.3,
                folate: 665.0,
                vitamin_b12: 2.4,
                biotin: 30.0,
                pantothenic_acid: 5.0,
            },
            MineralContent {
                calcium: 300.0,
                iron: 18.0,
                magnesium: 50.0,
                zinc: 8.0,
                selenium: 55.0,
                copper: 0.9,
                manganese: 1.8,
                chromium: 25.0,
                molybdenum: 45.0,
                iodine: 150.0,
                ..Default::default()
            },
            &[],
            &["USP Verified"],
        ),
        supplement(
            Listing {
                id: "webber-b-complex",
                name: "B Complex 50",
                brand: "Webber Naturals",
                category: "B Complex",
                description: "High potency B vitamin complex",
                serving_size: "1 tablet",
                servings_per_container: Some(60),
                barcode: Some("625273030068"),
                dpn: Some("02246123"),
                target_gender: None,
            },
            VitaminContent {
                thiamine: 50.0,
                riboflavin: 50.0,
                niacin: 50.0,
                vitamin_b6: 50.0,
                folate: 400.0,
                vitamin_b12: 50.0,
                biotin: 50.0,
                pantothenic_acid: 50.0,
                ..Default::default()
            },
            MineralContent::default(),
            &["Inositol 50mg", "Choline 50mg"],
            &["NPN Approved"],
        ),
        supplement(
            Listing {
                id: "superbelly-probiotic",
                name: "Strawberry Hibiscus Probiotic",
                brand: "SuperBelly",
                category: "Probiotic",
                description: "Probiotic with apple cider vinegar and prebiotics",
                serving_size: "1 packet (4g)",
                servings_per_container: None,
                barcode: None,
                dpn: None,
                target_gender: None,
            },
            VitaminContent {
                vitamin_c: 9.0,
                ..Default::default()
            },
            MineralContent {
                sodium: 65.0,
                ..Default::default()
            },
            &[
                "Probiotics: 1 billion CFU Bacillus coagulans GBI-30 6086",
                "Inulin (prebiotic): 1g",
                "Apple cider vinegar powder",
            ],
            &[],
        ),
    ]
});
