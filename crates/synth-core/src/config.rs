//! Generation configuration loaded from YAML.
//!
//! Every field has a default, so a config file only needs to name the
//! values it changes:
//!
//! ```yaml
//! seed: 42
//! num_users: 10000
//! num_products: 5000
//! num_categories: 25
//! num_sessions: 2000000
//! num_transactions: 500000
//! timespan_days: 90
//! session_chunk_size: 100000
//! now: "2024-06-01T00:00:00Z"   # optional; omit to anchor at the wall clock
//! ```

use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Error type for configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading config file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// A count that must be positive was zero
    #[error("'{field}' must be greater than zero")]
    ZeroCount { field: &'static str },

    /// The activity window reaches outside the representable date range
    #[error("'timespan_days' of {days} reaches past the earliest representable date")]
    TimespanTooLong { days: u32 },
}

/// Users register up to this many spans before `now`.
const HISTORY_SPANS: i64 = 3;

/// Counts, seed and time window of one generation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Seed for every random draw (same seed and config = same catalog)
    pub seed: u64,

    pub num_users: usize,
    pub num_products: usize,
    pub num_categories: usize,

    /// Target number of sessions
    pub num_sessions: usize,

    /// Target number of transactions
    pub num_transactions: usize,

    /// Length in days of the activity window ending at `now`
    pub timespan_days: u32,

    /// Maximum sessions per exported chunk file
    pub session_chunk_size: usize,

    /// Driver iterations between progress log lines
    pub progress_interval: u64,

    /// Release earlier reservations when a later cart line cannot be
    /// reserved during checkout. Off by default, in which case that stock
    /// is consumed without a transaction to account for it.
    pub rollback_failed_checkout: bool,

    /// Fixed reference instant. `None` uses the current time.
    pub now: Option<DateTime<Utc>>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            num_users: 10_000,
            num_products: 5_000,
            num_categories: 25,
            num_sessions: 2_000_000,
            num_transactions: 500_000,
            timespan_days: 90,
            session_chunk_size: 100_000,
            progress_interval: 10_000,
            rollback_failed_checkout: false,
            now: None,
        }
    }
}

impl GenerationConfig {
    /// Load a config from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: GenerationConfig = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Reject configurations the catalog builder cannot satisfy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_at(self.anchor())
    }

    /// Like [`validate`](Self::validate), with the dated history ending at `now`.
    pub fn validate_at(&self, now: DateTime<Utc>) -> Result<(), ConfigError> {
        let positive: [(&'static str, u64); 6] = [
            ("num_users", self.num_users as u64),
            ("num_products", self.num_products as u64),
            ("num_categories", self.num_categories as u64),
            ("timespan_days", self.timespan_days as u64),
            ("session_chunk_size", self.session_chunk_size as u64),
            ("progress_interval", self.progress_interval),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::ZeroCount { field });
            }
        }

        let days = self.timespan_days;
        Duration::try_days(HISTORY_SPANS * i64::from(days))
            .and_then(|history| now.checked_sub_signed(history))
            .ok_or(ConfigError::TimespanTooLong { days })?;
        Ok(())
    }

    /// Hard bound on driver iterations.
    pub fn max_iterations(&self) -> u64 {
        2 * (self.num_sessions as u64 + self.num_transactions as u64)
    }

    /// The reference instant, truncated to whole seconds.
    pub fn anchor(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now).trunc_subsecs(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = GenerationConfig::default();
        assert_eq!(config.num_users, 10_000);
        assert_eq!(config.num_categories, 25);
        assert_eq!(config.max_iterations(), 5_000_000);
        assert!(!config.rollback_failed_checkout);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = GenerationConfig::from_yaml(
            r#"
num_users: 10
num_sessions: 20
now: "2024-06-01T12:00:00Z"
"#,
        )
        .unwrap();

        assert_eq!(config.num_users, 10);
        assert_eq!(config.num_sessions, 20);
        assert_eq!(config.num_products, 5_000);
        assert_eq!(
            config.anchor(),
            Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_zero_count_rejected() {
        let config = GenerationConfig {
            num_products: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ZeroCount {
                field: "num_products"
            }
        ));
    }

    #[test]
    fn test_zero_targets_allowed() {
        let config = GenerationConfig {
            num_sessions: 0,
            num_transactions: 0,
            ..Default::default()
        };
        config.validate().unwrap();
        assert_eq!(config.max_iterations(), 0);
    }

    #[test]
    fn test_timespan_beyond_date_range_rejected() {
        let config = GenerationConfig {
            timespan_days: 100_000_000,
            now: Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TimespanTooLong { days: 100_000_000 })
        ));

        let config = GenerationConfig {
            timespan_days: 36_500,
            ..config
        };
        config.validate().unwrap();
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed: 9\ntimespan_days: 30").unwrap();

        let config = GenerationConfig::from_file(file.path()).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.timespan_days, 30);
    }

    #[test]
    fn test_invalid_yaml() {
        let result = GenerationConfig::from_yaml("num_users: [not, a, number]");
        assert!(matches!(result, Err(ConfigError::YamlError(_))));
    }
}
