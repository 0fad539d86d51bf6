//! Value providers used while building records.
//!
//! These stand in for a faker library: every value is drawn from the
//! caller's RNG so that a seeded run is reproducible.

pub mod geo;
pub mod text;
pub mod timestamp;
pub mod weighted;

pub use weighted::{weighted_choice, WeightedTable};
