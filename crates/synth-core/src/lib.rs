//! Core records and configuration for the shop-synth dataset generator.
//!
//! This crate provides the foundational types shared by the generator,
//! the JSON exporter and the MongoDB loader:
//!
//! - [`Category`], [`Product`], [`User`] - static reference data built once
//! - [`Session`], [`Transaction`] - activity records appended by the driver
//! - [`Dataset`] - every generated collection, owned together
//! - [`GenerationConfig`] - counts, seed and time span loaded from YAML
//!
//! # Architecture
//!
//! ```text
//! synth-core (this crate)
//!    │
//!    ├─── synth-generator     (builds a Dataset from a GenerationConfig)
//!    ├─── synth-export        (writes a Dataset as JSON files)
//!    └─── synth-load-mongodb  (reads the JSON files into MongoDB)
//! ```
//!
//! # Example
//!
//! ```rust
//! use synth_core::GenerationConfig;
//!
//! let config = GenerationConfig::from_yaml(r#"
//! seed: 7
//! num_users: 100
//! num_sessions: 500
//! "#).unwrap();
//!
//! assert_eq!(config.seed, 7);
//! assert_eq!(config.num_products, 5000);
//! config.validate().unwrap();
//! ```

pub mod activity;
pub mod catalog;
pub mod config;
pub mod money;

// Re-exports for convenience
pub use activity::{
    CartLine, ConversionStatus, DeviceProfile, LineItem, PageType, PageView, PaymentMethod,
    Referrer, Session, SessionGeo, Transaction, TransactionStatus,
};
pub use catalog::{Category, GeoData, PricePoint, Product, Subcategory, User};
pub use config::{ConfigError, GenerationConfig};
pub use money::round2;

/// Every collection produced by one generation run.
///
/// Products carry their post-simulation stock.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub categories: Vec<Category>,
    pub products: Vec<Product>,
    pub users: Vec<User>,
    pub sessions: Vec<Session>,
    pub transactions: Vec<Transaction>,
}
