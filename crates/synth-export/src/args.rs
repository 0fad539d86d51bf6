//! CLI argument definitions for dataset generation.

use clap::Args;
use std::path::PathBuf;
use synth_core::{ConfigError, GenerationConfig};

/// Arguments of the `generate` command.
///
/// Values given on the command line override the config file, which in
/// turn overrides the built-in defaults.
#[derive(Args, Clone, Debug, Default)]
pub struct GenerateArgs {
    /// Path to a generation config YAML file
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Directory the JSON files are written to
    #[arg(long, default_value = "data")]
    pub output_dir: PathBuf,

    /// Random seed for deterministic generation (same seed = same catalog)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Target number of sessions
    #[arg(long)]
    pub sessions: Option<usize>,

    /// Target number of transactions
    #[arg(long)]
    pub transactions: Option<usize>,

    /// Number of users
    #[arg(long)]
    pub users: Option<usize>,

    /// Number of products
    #[arg(long)]
    pub products: Option<usize>,

    /// Number of categories
    #[arg(long)]
    pub categories: Option<usize>,

    /// Length of the activity window in days
    #[arg(long)]
    pub timespan_days: Option<u32>,

    /// Maximum sessions per sessions_N.json file
    #[arg(long)]
    pub session_chunk_size: Option<usize>,

    /// Release earlier reservations when a checkout fails part way
    #[arg(long)]
    pub rollback_failed_checkout: bool,

    /// Generate and report statistics without writing any files
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateArgs {
    /// Build the effective config from the optional file plus overrides.
    pub fn resolve(&self) -> Result<GenerationConfig, ConfigError> {
        let base = match &self.config {
            Some(path) => GenerationConfig::from_file(path)?,
            None => GenerationConfig::default(),
        };
        let config = self.apply(base);
        config.validate()?;
        Ok(config)
    }

    /// Overlay the command-line values onto `config`.
    pub fn apply(&self, mut config: GenerationConfig) -> GenerationConfig {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(sessions) = self.sessions {
            config.num_sessions = sessions;
        }
        if let Some(transactions) = self.transactions {
            config.num_transactions = transactions;
        }
        if let Some(users) = self.users {
            config.num_users = users;
        }
        if let Some(products) = self.products {
            config.num_products = products;
        }
        if let Some(categories) = self.categories {
            config.num_categories = categories;
        }
        if let Some(days) = self.timespan_days {
            config.timespan_days = days;
        }
        if let Some(chunk) = self.session_chunk_size {
            config.session_chunk_size = chunk;
        }
        if self.rollback_failed_checkout {
            config.rollback_failed_checkout = true;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_overrides() {
        let args = GenerateArgs::default();
        let config = args.resolve().unwrap();
        assert_eq!(config, GenerationConfig::default());
    }

    #[test]
    fn test_overrides_win_over_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "seed: 1\nnum_users: 50\nnum_sessions: 10").unwrap();

        let args = GenerateArgs {
            config: Some(file.path().to_path_buf()),
            seed: Some(99),
            sessions: Some(3),
            ..Default::default()
        };
        let config = args.resolve().unwrap();

        assert_eq!(config.seed, 99);
        assert_eq!(config.num_sessions, 3);
        assert_eq!(config.num_users, 50);
        assert_eq!(config.num_products, 5000);
        assert!(!config.rollback_failed_checkout);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let args = GenerateArgs {
            users: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            args.resolve(),
            Err(ConfigError::ZeroCount { field: "num_users" })
        ));
    }

    #[test]
    fn test_rollback_flag() {
        let args = GenerateArgs {
            rollback_failed_checkout: true,
            ..Default::default()
        };
        assert!(args.apply(GenerationConfig::default()).rollback_failed_checkout);
    }
}
