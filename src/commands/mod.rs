//! Command handlers for the `generate` and `load` subcommands.

pub mod generate;
pub mod load;

pub use generate::run_generate;
pub use load::run_load;
