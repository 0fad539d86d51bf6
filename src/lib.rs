//! shop-synth library
//!
//! Synthesizes an e-commerce analytics dataset (categories, products, users,
//! browsing sessions and transactions) and loads it into MongoDB.
//!
//! # Crates
//!
//! - `synth_core` - records, configuration and money rounding
//! - `synth_generator` - catalog builder, journey simulation, settlement
//! - `synth_export` - JSON export and the matching reader
//! - `synth_load_mongodb` - batched MongoDB loader
//!
//! # CLI Usage
//!
//! ```bash
//! # Generate the default-sized dataset into ./data
//! shop-synth generate --output-dir data
//!
//! # Smaller run from a config file with a fixed seed
//! shop-synth generate --config generation.yaml --seed 7 --sessions 10000
//!
//! # Load into MongoDB
//! shop-synth load --data-dir data --mongodb-connection-string mongodb://localhost:27017
//! ```

pub mod commands;

pub use commands::{run_generate, run_load};
