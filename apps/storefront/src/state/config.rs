//! # Configuration State
//!
//! Stores configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_STORE_NAME="Corner Bistro"                              │
//! │     STOREFRONT_DELIVERY_FEE_CENTS=500                                  │
//! │     STOREFRONT_SUBMISSION_DELAY_MS=1500                                │
//! │     STOREFRONT_CATALOG_PATH=./menu.json                                │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     explicit path, else <platform config dir>/storefront.toml          │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! store_name = "Corner Bistro"
//! currency_symbol = "$"
//! currency_decimals = 2
//! delivery_fee_cents = 500
//! submission_delay_ms = 1500
//! catalog_path = "/srv/storefront/menu.json"
//! ```
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use storefront_core::{Money, PricingRules, DEFAULT_DELIVERY_FEE};
use thiserror::Error;
use tracing::{debug, info};

/// `Money` is a count of cents.
const CENT_DECIMALS: u8 = 2;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store name (shown in the front-end header and on confirmations)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency. Amounts are held in cents,
    /// so `validate` accepts only 2.
    pub currency_decimals: u8,

    /// Flat delivery fee in cents, charged only in delivery mode
    pub delivery_fee_cents: i64,

    /// Latency of the simulated order submission
    pub submission_delay_ms: u64,

    /// JSON catalog file. `None` uses the built-in demo menu.
    pub catalog_path: Option<PathBuf>,
}

impl Default for StoreConfig {
    /// Development defaults: USD, $5.00 delivery, 1.5s submission.
    fn default() -> Self {
        StoreConfig {
            store_name: "Storefront Dev Kitchen".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            delivery_fee_cents: DEFAULT_DELIVERY_FEE.cents(),
            submission_delay_ms: 1500,
            catalog_path: None,
        }
    }
}

impl StoreConfig {
    /// Loads configuration from file, then environment, then validates.
    ///
    /// A missing file is not an error; defaults are used.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = StoreConfig::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading store config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML file without env overrides or validation.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Platform config location of `storefront.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "storefront", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    /// Applies `STOREFRONT_*` overrides read through `lookup`.
    ///
    /// Taking the lookup as a function keeps tests off the process
    /// environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup("STOREFRONT_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(fee) = lookup("STOREFRONT_DELIVERY_FEE_CENTS") {
            self.delivery_fee_cents = parse_env("STOREFRONT_DELIVERY_FEE_CENTS", &fee)?;
        }

        if let Some(delay) = lookup("STOREFRONT_SUBMISSION_DELAY_MS") {
            self.submission_delay_ms = parse_env("STOREFRONT_SUBMISSION_DELAY_MS", &delay)?;
        }

        if let Some(path) = lookup("STOREFRONT_CATALOG_PATH") {
            self.catalog_path = Some(PathBuf::from(path));
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "store_name".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        if self.delivery_fee_cents < 0 {
            return Err(ConfigError::Invalid {
                field: "delivery_fee_cents".to_string(),
                reason: format!("must not be negative, got {}", self.delivery_fee_cents),
            });
        }

        if self.currency_decimals != CENT_DECIMALS {
            return Err(ConfigError::Invalid {
                field: "currency_decimals".to_string(),
                reason: format!(
                    "amounts are stored in cents, so it must be {}, got {}",
                    CENT_DECIMALS, self.currency_decimals
                ),
            });
        }

        Ok(())
    }

    /// Pricing rules handed to every new cart.
    pub fn pricing_rules(&self) -> PricingRules {
        PricingRules::new(Money::from_cents(self.delivery_fee_cents))
    }

    /// Formats an amount with the configured symbol, two decimals.
    ///
    /// ## Example
    /// ```rust
    /// use storefront::state::StoreConfig;
    /// use storefront_core::Money;
    ///
    /// let config = StoreConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// assert_eq!(config.format_currency(Money::from_cents(-500)), "-$5.00");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();

        format!(
            "{}{}{}.{:02}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            (cents / 100).unsigned_abs(),
            (cents % 100).unsigned_abs()
        )
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> ConfigResult<T> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        field: key.to_string(),
        reason: format!("'{}' is not a valid number", value),
    })
}
