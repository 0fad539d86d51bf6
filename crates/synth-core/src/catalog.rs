//! Static reference records: categories, products and users.
//!
//! These are built once before the simulation starts. After that only the
//! `current_stock` of a product changes, and only through the inventory
//! ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product category with its subcategories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Identifier of the form `cat_NNN`
    pub category_id: String,

    /// Display name
    pub name: String,

    /// Subcategories in creation order
    pub subcategories: Vec<Subcategory>,
}

/// A subcategory nested inside a [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subcategory {
    /// Identifier of the form `sub_NNN_SS`
    pub subcategory_id: String,

    pub name: String,

    /// Profit margin fraction in `[0.1, 0.4]`
    pub profit_margin: f64,
}

/// One entry of a product's price history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricePoint {
    pub price: f64,

    /// When this price took effect
    pub date: DateTime<Utc>,
}

/// A product offered in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Identifier of the form `prod_NNNNN`
    pub product_id: String,

    pub name: String,

    /// Owning category
    pub category_id: String,

    /// Current price, always the last entry of `price_history`
    pub base_price: f64,

    /// Units left in stock. Never negative.
    pub current_stock: u32,

    pub is_active: bool,

    /// Price changes sorted ascending by date
    pub price_history: Vec<PricePoint>,

    /// Date of the first price history entry
    pub creation_date: DateTime<Utc>,
}

impl Product {
    /// Whether the product can be shown as purchasable right now.
    pub fn is_available(&self) -> bool {
        self.is_active && self.current_stock > 0
    }
}

/// Geographic descriptor of a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeoData {
    pub city: String,

    /// Two-letter state abbreviation
    pub state: String,

    pub country: String,
}

/// A registered shopper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Identifier of the form `user_NNNNNN`
    pub user_id: String,

    pub geo_data: GeoData,

    pub registration_date: DateTime<Utc>,

    /// Never earlier than `registration_date`
    pub last_active: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_product(stock: u32, active: bool) -> Product {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Product {
            product_id: "prod_00000".to_string(),
            name: "Sample".to_string(),
            category_id: "cat_000".to_string(),
            base_price: 10.0,
            current_stock: stock,
            is_active: active,
            price_history: vec![PricePoint { price: 10.0, date }],
            creation_date: date,
        }
    }

    #[test]
    fn test_product_availability() {
        assert!(sample_product(5, true).is_available());
        assert!(!sample_product(0, true).is_available());
        assert!(!sample_product(5, false).is_available());
    }

    #[test]
    fn test_product_serializes_iso_timestamps() {
        let json = serde_json::to_value(sample_product(3, true)).unwrap();
        assert_eq!(json["creation_date"], "2024-01-01T00:00:00Z");
        assert_eq!(json["price_history"][0]["date"], "2024-01-01T00:00:00Z");
        assert_eq!(json["current_stock"], 3);
    }
}
