//! Restaurant menu items
//!
//! Chain metadata, menu classification and a small offline menu used when no
//! nutrition API is reachable.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Restaurant chains with their display and search names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Restaurant {
    Mcdonalds,
    BurgerKing,
    Wendys,
    Subway,
    Chipotle,
    Starbucks,
    Dunkin,
    TacoBell,
    Kfc,
    PizzaHut,
    Dominos,
    PapaJohns,
    ChickFilA,
    Panera,
    FiveGuys,
    InNOut,
    Arbys,
    Popeyes,
    Sonic,
    CarlsJr,
    Whataburger,
    ShakeShack,
    PandaExpress,
    JimmyJohns,
    Qdoba,
}

impl Restaurant {
    pub const ALL: [Restaurant; 25] = [
        Restaurant::Mcdonalds,
        Restaurant::BurgerKing,
        Restaurant::Wendys,
        Restaurant::Subway,
        Restaurant::Chipotle,
        Restaurant::Starbucks,
        Restaurant::Dunkin,
        Restaurant::TacoBell,
        Restaurant::Kfc,
        Restaurant::PizzaHut,
        Restaurant::Dominos,
        Restaurant::PapaJohns,
        Restaurant::ChickFilA,
        Restaurant::Panera,
        Restaurant::FiveGuys,
        Restaurant::InNOut,
        Restaurant::Arbys,
        Restaurant::Popeyes,
        Restaurant::Sonic,
        Restaurant::CarlsJr,
        Restaurant::Whataburger,
        Restaurant::ShakeShack,
        Restaurant::PandaExpress,
        Restaurant::JimmyJohns,
        Restaurant::Qdoba,
    ];

    pub fn display_name(&self) -> &'static str {
        self.names().0
    }

    /// Name used when building a natural-language nutrition query
    pub fn search_name(&self) -> &'static str {
        self.names().1
    }

    fn names(&self) -> (&'static str, &'static str) {
        match self {
            Restaurant::Mcdonalds => ("McDonald's", "mcdonalds"),
            Restaurant::BurgerKing => ("Burger King", "burger king"),
            Restaurant::Wendys => ("Wendy's", "wendys"),
            Restaurant::Subway => ("Subway", "subway"),
            Restaurant::Chipotle => ("Chipotle", "chipotle"),
            Restaurant::Starbucks => ("Starbucks", "starbucks"),
            Restaurant::Dunkin => ("Dunkin'", "dunkin"),
            Restaurant::TacoBell => ("Taco Bell", "taco bell"),
            Restaurant::Kfc => ("KFC", "kfc"),
            Restaurant::PizzaHut => ("Pizza Hut", "pizza hut"),
            Restaurant::Dominos => ("Domino's", "dominos"),
            Restaurant::PapaJohns => ("Papa John's", "papa johns"),
            Restaurant::ChickFilA => ("Chick-fil-A", "chick fil a"),
            Restaurant::Panera => ("Panera Bread", "panera"),
            Restaurant::FiveGuys => ("Five Guys", "five guys"),
            Restaurant::InNOut => ("In-N-Out", "in n out"),
            Restaurant::Arbys => ("Arby's", "arbys"),
            Restaurant::Popeyes => ("Popeyes", "popeyes"),
            Restaurant::Sonic => ("Sonic", "sonic"),
            Restaurant::CarlsJr => ("Carl's Jr", "carls jr"),
            Restaurant::Whataburger => ("Whataburger", "whataburger"),
            Restaurant::ShakeShack => ("Shake Shack", "shake shack"),
            Restaurant::PandaExpress => ("Panda Express", "panda express"),
            Restaurant::JimmyJohns => ("Jimmy John's", "jimmy johns"),
            Restaurant::Qdoba => ("Qdoba", "qdoba"),
        }
    }

    /// Natural-language query for one item on this chain's menu
    pub fn menu_query(&self, item: &str) -> String {
        format!("{} from {}", item.trim(), self.search_name())
    }
}

/// Menu section a restaurant item falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestaurantCategory {
    Breakfast,
    Lunch,
    Dinner,
    Beverage,
    Side,
    Main,
}

impl RestaurantCategory {
    /// Keyword classification on the item name, first match wins
    pub fn classify(name: &str) -> Self {
        let name = name.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| name.contains(w));

        if has(&["breakfast"]) {
            RestaurantCategory::Breakfast
        } else if has(&["lunch"]) {
            RestaurantCategory::Lunch
        } else if has(&["dinner"]) {
            RestaurantCategory::Dinner
        } else if has(&["coffee", "latte", "frappuccino"]) {
            RestaurantCategory::Beverage
        } else if has(&["fries", "chips"]) {
            RestaurantCategory::Side
        } else {
            RestaurantCategory::Main
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantFood {
    pub name: String,
    pub restaurant: String,
    pub calories: i32,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub sodium: f64,
    pub saturated_fat: f64,
    pub cholesterol: f64,
    pub serving_qty: f64,
    pub serving_unit: String,
    pub serving_weight_grams: Option<f64>,
    pub category: RestaurantCategory,
}

impl RestaurantFood {
    /// Lower calorie, lower saturated fat, lower sodium, decent fiber
    pub fn is_healthy_option(&self) -> bool {
        self.calories < 500 && self.saturated_fat < 10.0 && self.sodium < 1000.0 && self.fiber > 3.0
    }

    /// Case-insensitive match of a free-text query against this item
    pub fn matches_query(&self, query: &str) -> bool {
        let term = query.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        let name = self.name.to_lowercase();
        name.contains(&term) || self.restaurant.to_lowercase().contains(&term) || term.contains(&name)
    }
}

#[allow(clippy::too_many_arguments)]
fn menu_item(
    name: &str,
    restaurant: &str,
    calories: i32,
    protein: f64,
    carbs: f64,
    fat: f64,
    fiber: f64,
    sugar: f64,
    sodium: f64,
    saturated_fat: f64,
    serving_qty: f64,
    serving_unit: &str,
) -> RestaurantFood {
    RestaurantFood {
        name: name.to_string(),
        restaurant: restaurant.to_string(),
        calories,
        protein,
        carbs,
        fat,
        fiber,
        sugar,
        sodium,
        saturated_fat,
        cholesterol: 0.0,
        serving_qty,
        serving_unit: serving_unit.to_string(),
        serving_weight_grams: None,
        category: RestaurantCategory::classify(name),
    }
}

static OFFLINE_MENU: Lazy<Vec<RestaurantFood>> = Lazy::new(|| {
    vec![
        menu_item("Big Mac", "McDonald's", 563, 26.0, 45.0, 33.0, 3.0, 9.0, 1010.0, 11.0, 1.0, "burger"),
        menu_item("Quarter Pounder with Cheese", "McDonald's", 520, 30.0, 42.0, 26.0, 2.0, 10.0, 1140.0, 12.0, 1.0, "burger"),
        menu_item("Medium French Fries", "McDonald's", 320, 4.0, 43.0, 15.0, 4.0, 0.0, 260.0, 2.0, 1.0, "medium"),
        menu_item("10 Piece Chicken McNuggets", "McDonald's", 420, 23.0, 26.0, 25.0, 1.0, 0.0, 840.0, 4.0, 10.0, "pieces"),
        menu_item("Grande Caffe Latte", "Starbucks", 190, 13.0, 19.0, 7.0, 0.0, 17.0, 170.0, 4.5, 16.0, "fl oz"),
        menu_item("Venti Caramel Frappuccino", "Starbucks", 470, 5.0, 72.0, 17.0, 0.0, 68.0, 320.0, 11.0, 24.0, "fl oz"),
        menu_item("6\" Italian BMT", "Subway", 390, 19.0, 40.0, 17.0, 3.0, 5.0, 1260.0, 6.0, 1.0, "6 inch sub"),
        menu_item("Footlong Turkey Breast", "Subway", 560, 36.0, 92.0, 8.0, 10.0, 14.0, 1460.0, 2.0, 1.0, "footlong"),
        menu_item("Chicken Burrito Bowl", "Chipotle", 625, 41.0, 58.0, 23.0, 11.0, 6.0, 1435.0, 8.0, 1.0, "bowl"),
        menu_item("Chips and Guacamole", "Chipotle", 770, 9.0, 82.0, 47.0, 12.0, 4.0, 850.0, 7.0, 1.0, "serving"),
    ]
});

/// Offline menu items matching `query`
pub fn offline_menu_search(query: &str) -> Vec<RestaurantFood> {
    OFFLINE_MENU
        .iter()
        .filter(|item| item.matches_query(query))
        .cloned()
        .collect()
}
