//! Dataset generator for shop-synth.
//!
//! This crate builds the e-commerce reference catalog and simulates browsing
//! sessions and purchases on top of it. A single seeded RNG drives every
//! draw, so the same configuration always yields the same catalog.
//!
//! # Architecture
//!
//! ```text
//! GenerationConfig
//!        │
//!        ▼
//! ┌──────────────────┐      ┌──────────────────┐
//! │  CatalogBuilder  │─────▶│ InventoryLedger  │◀──────────┐
//! └────────┬─────────┘      └────────┬─────────┘           │
//!          │                         │ stock reads          │ reserve()
//!          ▼                         ▼                      │
//! ┌──────────────────┐      ┌──────────────────┐   ┌────────┴─────────┐
//! │  DataGenerator   │─────▶│ JourneySimulator │──▶│    Settlement    │
//! │  (driver loop)   │      └──────────────────┘   └──────────────────┘
//! └────────┬─────────┘
//!          ▼
//!   Dataset + GenerationStats
//! ```
//!
//! # Example
//!
//! ```rust
//! use synth_core::GenerationConfig;
//! use synth_generator::DataGenerator;
//!
//! let config = GenerationConfig {
//!     num_users: 10,
//!     num_products: 5,
//!     num_categories: 2,
//!     num_sessions: 20,
//!     num_transactions: 20,
//!     ..Default::default()
//! };
//!
//! let (dataset, stats) = DataGenerator::new(config).unwrap().generate().unwrap();
//! assert_eq!(dataset.users.len(), 10);
//! assert!(stats.transactions() <= 20);
//! ```

pub mod catalog;
pub mod driver;
pub mod generators;
pub mod ids;
pub mod inventory;
pub mod journey;
pub mod settlement;

// Re-exports for convenience
pub use catalog::{Catalog, CatalogBuilder};
pub use driver::{DataGenerator, GenerationStats};
pub use ids::IdGenerator;
pub use inventory::InventoryLedger;
pub use journey::{Journey, JourneySimulator};
pub use settlement::{AbortedCheckout, CheckoutOutcome, Pricing, Settlement};
