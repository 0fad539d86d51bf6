//! Activity records: browsing sessions and transactions.
//!
//! Sessions and transactions are appended by the generation driver and
//! never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Page types of the browsing state machine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum PageType {
    Home,
    Search,
    CategoryListing,
    ProductDetail,
    Cart,
    Checkout,
    Confirmation,
}

impl PageType {
    /// All page types in funnel order.
    pub const ALL: [PageType; 7] = [
        PageType::Home,
        PageType::Search,
        PageType::CategoryListing,
        PageType::ProductDetail,
        PageType::Cart,
        PageType::Checkout,
        PageType::Confirmation,
    ];

    /// Name as it appears in exported records.
    pub fn as_str(&self) -> &'static str {
        match self {
            PageType::Home => "home",
            PageType::Search => "search",
            PageType::CategoryListing => "category_listing",
            PageType::ProductDetail => "product_detail",
            PageType::Cart => "cart",
            PageType::Checkout => "checkout",
            PageType::Confirmation => "confirmation",
        }
    }

    /// Pages on which a non-empty cart may convert.
    pub fn is_purchase_step(&self) -> bool {
        matches!(self, PageType::Checkout | PageType::Confirmation)
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single page view inside a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageView {
    pub timestamp: DateTime<Utc>,
    pub page_type: PageType,
    pub product_id: Option<String>,
    pub category_id: Option<String>,

    /// Seconds spent on the page, in `[5, 180]`
    pub view_duration: u32,
}

/// A cart line keyed by product id in [`Session::cart_contents`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub quantity: u32,

    /// Unit price captured when the product was first added
    pub price: f64,
}

/// Outcome of a browsing session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConversionStatus {
    /// Reached checkout with a cart and committed to buy
    Converted,
    /// Left with items in the cart
    Abandoned,
    /// Never put anything in the cart
    Browsed,
}

impl ConversionStatus {
    /// Derive the status from the converted flag and the final cart.
    pub fn from_outcome(converted: bool, cart_is_empty: bool) -> Self {
        if converted {
            ConversionStatus::Converted
        } else if !cart_is_empty {
            ConversionStatus::Abandoned
        } else {
            ConversionStatus::Browsed
        }
    }
}

/// Where the visitor came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Referrer {
    Direct,
    Email,
    Social,
    SearchEngine,
    Affiliate,
}

impl Referrer {
    pub const ALL: [Referrer; 5] = [
        Referrer::Direct,
        Referrer::Email,
        Referrer::Social,
        Referrer::SearchEngine,
        Referrer::Affiliate,
    ];
}

/// Session location: the owning user's geo data plus an IP address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionGeo {
    pub city: String,
    pub state: String,
    pub country: String,
    pub ip_address: String,
}

/// Device used during a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceProfile {
    #[serde(rename = "type")]
    pub device_type: String,
    pub os: String,
    pub browser: String,
}

/// A simulated browsing session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub session_id: String,
    pub user_id: String,
    pub start_time: DateTime<Utc>,

    /// `start_time + duration_seconds`
    pub end_time: DateTime<Utc>,
    pub duration_seconds: u32,
    pub geo_data: SessionGeo,
    pub device_profile: DeviceProfile,

    /// Distinct products seen on product pages
    pub viewed_products: BTreeSet<String>,

    /// Page views in visiting order, timestamps non-decreasing
    pub page_views: Vec<PageView>,

    /// Only lines with a positive quantity
    pub cart_contents: BTreeMap<String, CartLine>,
    pub conversion_status: ConversionStatus,
    pub referrer: Referrer,
}

/// A purchased line of a [`Transaction`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    pub product_id: String,
    pub quantity: u32,
    pub unit_price: f64,

    /// `quantity * unit_price`, rounded to cents
    pub subtotal: f64,
}

/// How a transaction was paid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    Paypal,
    ApplePay,
    Crypto,
    BankTransfer,
    GiftCard,
}

impl PaymentMethod {
    /// Methods offered at the end of a browsing session.
    pub const CHECKOUT: [PaymentMethod; 4] = [
        PaymentMethod::CreditCard,
        PaymentMethod::Paypal,
        PaymentMethod::ApplePay,
        PaymentMethod::Crypto,
    ];

    /// Methods used by orders placed outside a tracked session.
    pub const OFFLINE: [PaymentMethod; 4] = [
        PaymentMethod::CreditCard,
        PaymentMethod::Paypal,
        PaymentMethod::BankTransfer,
        PaymentMethod::GiftCard,
    ];
}

/// Fulfilment status of a transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Completed,
    Processing,
    Shipped,
    Delivered,
}

impl TransactionStatus {
    pub const ALL: [TransactionStatus; 4] = [
        TransactionStatus::Completed,
        TransactionStatus::Processing,
        TransactionStatus::Shipped,
        TransactionStatus::Delivered,
    ];
}

/// A committed purchase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub transaction_id: String,

    /// `None` for transactions generated outside a session
    pub session_id: Option<String>,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub items: Vec<LineItem>,
    pub subtotal: f64,
    pub discount: f64,

    /// `subtotal - discount`, rounded to cents
    pub total: f64,
    pub payment_method: PaymentMethod,
    pub status: TransactionStatus,
}

impl Transaction {
    /// Total units across all line items.
    pub fn units(&self) -> u64 {
        self.items.iter().map(|item| item.quantity as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_type_wire_names() {
        for page in PageType::ALL {
            let json = serde_json::to_value(page).unwrap();
            assert_eq!(json, page.as_str());
        }
    }

    #[test]
    fn test_conversion_status_from_outcome() {
        assert_eq!(
            ConversionStatus::from_outcome(true, false),
            ConversionStatus::Converted
        );
        assert_eq!(
            ConversionStatus::from_outcome(false, false),
            ConversionStatus::Abandoned
        );
        assert_eq!(
            ConversionStatus::from_outcome(false, true),
            ConversionStatus::Browsed
        );
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_value(Referrer::SearchEngine).unwrap(),
            "search_engine"
        );
        assert_eq!(
            serde_json::to_value(PaymentMethod::ApplePay).unwrap(),
            "apple_pay"
        );
        assert_eq!(
            serde_json::to_value(PaymentMethod::GiftCard).unwrap(),
            "gift_card"
        );
        assert_eq!(
            serde_json::to_value(TransactionStatus::Delivered).unwrap(),
            "delivered"
        );
    }

    #[test]
    fn test_device_profile_type_field() {
        let profile = DeviceProfile {
            device_type: "mobile".to_string(),
            os: "iOS".to_string(),
            browser: "Safari".to_string(),
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["type"], "mobile");
    }
}
