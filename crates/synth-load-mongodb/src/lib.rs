//! MongoDB loader for shop-synth datasets.
//!
//! Reads the JSON collection files written by `synth-export` and inserts
//! them into MongoDB in batches, then creates the query indexes and reports
//! document counts.
//!
//! # Example
//!
//! ```ignore
//! use synth_load_mongodb::MongoDBLoader;
//!
//! let loader = MongoDBLoader::connect("mongodb://localhost:27017", "ecommerce_analytics")
//!     .await?
//!     .with_batch_size(50_000);
//! let report = loader.load_dataset("data").await?;
//! println!("Total revenue: {:.2}", report.total_revenue);
//! ```

pub mod args;
pub mod error;
pub mod indexes;
pub mod insert;
pub mod loader;
pub mod logging;

pub use args::MongoDBLoadArgs;
pub use error::LoaderError;
pub use indexes::INDEX_PLAN;
pub use insert::DEFAULT_BATCH_SIZE;
pub use loader::{LoadMetrics, LoadReport, MongoDBLoader, COLLECTIONS};
pub use logging::mask_connection_password;
