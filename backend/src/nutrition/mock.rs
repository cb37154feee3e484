//! Demo catalog for barcodes no provider knows

use ml_fitness_shared::models::FoodItem;

pub const MOCK_SOURCE: &str = "Mock";

#[allow(clippy::too_many_arguments)]
fn item(
    barcode: &str,
    name: &str,
    brand: &str,
    calories: i32,
    protein: f64,
    carbs: f64,
    fat: f64,
    fiber: f64,
    sugar: f64,
    sodium: f64,
    serving_unit: &str,
) -> FoodItem {
    FoodItem {
        name: name.to_string(),
        brand: Some(brand.to_string()),
        barcode: Some(barcode.to_string()),
        calories,
        protein,
        carbs,
        fat,
        fiber,
        sugar,
        sodium,
        serving_size: "1".to_string(),
        serving_unit: serving_unit.to_string(),
        source: MOCK_SOURCE.to_string(),
    }
}

/// A canned item for the demo barcodes, otherwise a generic placeholder
pub fn mock_food_item(barcode: &str) -> FoodItem {
    match barcode {
        "012345678901" => item(
            barcode, "Organic Granola Bar", "Nature Valley",
            140, 3.0, 19.0, 6.0, 2.0, 7.0, 95.0, "bar (35g)",
        ),
        "038000358210" => item(
            barcode, "Special K Cereal", "Kellogg's",
            120, 6.0, 22.0, 0.5, 3.0, 4.0, 220.0, "cup (31g)",
        ),
        "034000052011" => item(
            barcode, "Kit Kat", "Nestle",
            210, 3.0, 27.0, 11.0, 1.0, 21.0, 30.0, "package (42g)",
        ),
        _ => item(
            barcode, "Unknown Product", "Generic",
            100, 2.0, 20.0, 2.0, 1.0, 5.0, 50.0, "serving",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("012345678901", "Organic Granola Bar", 140)]
    #[case("038000358210", "Special K Cereal", 120)]
    #[case("034000052011", "Kit Kat", 210)]
    #[case("99999999", "Unknown Product", 100)]
    fn test_mock_items(#[case] barcode: &str, #[case] name: &str, #[case] calories: i32) {
        let item = mock_food_item(barcode);
        assert_eq!(item.name, name);
        assert_eq!(item.calories, calories);
        assert_eq!(item.barcode.as_deref(), Some(barcode));
        assert_eq!(item.source, MOCK_SOURCE);
    }
}
