//! # Store Configuration
//!
//! Configuration loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`KITSTORE_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Read-only after initialization, so no mutex needed.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use kitstore_core::validation::{validate_price, validate_required, validate_tax_rate_bps};
use kitstore_core::{Money, PricingSettings, TaxRate, DEFAULT_SHIPPING_COST, DEFAULT_TAX_RATE_BPS};

pub const ENV_STORE_NAME: &str = "KITSTORE_STORE_NAME";
pub const ENV_TAX_RATE: &str = "KITSTORE_TAX_RATE";
pub const ENV_SHIPPING_COST: &str = "KITSTORE_SHIPPING_COST";
pub const ENV_DB_PATH: &str = "KITSTORE_DB_PATH";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable holds a value that can't be used.
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    /// The data directory for the database could not be created.
    #[error("Could not prepare data directory: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    fn invalid(key: &str, value: &str, reason: impl ToString) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Storefront configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Store name (shown at checkout).
    pub store_name: String,

    /// Currency code (ISO 4217).
    pub currency_code: String,

    /// Currency symbol (for display).
    pub currency_symbol: String,

    /// GST rate in basis points, e.g. 1800 = 18%.
    pub tax_rate_bps: u32,

    /// Flat shipping charge per order.
    pub shipping_cost: Money,

    /// SQLite catalog file, or `:memory:`.
    pub database_path: PathBuf,
}

impl Default for StoreConfig {
    /// ## Default Values
    /// - Store: "KitStore"
    /// - Currency: INR (₹)
    /// - Tax: 18% GST
    /// - Shipping: 50.00
    /// - Database: platform data directory
    fn default() -> Self {
        StoreConfig {
            store_name: "KitStore".to_string(),
            currency_code: "INR".to_string(),
            currency_symbol: "₹".to_string(),
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            shipping_cost: Money::new(DEFAULT_SHIPPING_COST),
            database_path: default_database_path(),
        }
    }
}

impl StoreConfig {
    /// Loads configuration from `KITSTORE_*` environment variables over the
    /// defaults.
    ///
    /// ## Environment Variables
    /// - `KITSTORE_STORE_NAME`: Store name
    /// - `KITSTORE_TAX_RATE`: Tax rate in percent (e.g. "18")
    /// - `KITSTORE_SHIPPING_COST`: Flat shipping charge (e.g. "50")
    /// - `KITSTORE_DB_PATH`: Catalog database file
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = StoreConfig::default();

        if let Some(name) = lookup(ENV_STORE_NAME) {
            config.store_name = validate_required("store_name", &name, 100)
                .map_err(|e| ConfigError::invalid(ENV_STORE_NAME, &name, e))?;
        }

        if let Some(raw) = lookup(ENV_TAX_RATE) {
            let pct: f64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(ENV_TAX_RATE, &raw, "not a number"))?;
            if !pct.is_finite() || pct < 0.0 {
                return Err(ConfigError::invalid(ENV_TAX_RATE, &raw, "must be 0 or more"));
            }
            if ((pct * 100.0) - (pct * 100.0).round()).abs() > 1e-6 {
                return Err(ConfigError::invalid(
                    ENV_TAX_RATE,
                    &raw,
                    "finer than 0.01% (one basis point)",
                ));
            }
            let bps = TaxRate::from_percentage(pct).bps();
            validate_tax_rate_bps(bps).map_err(|e| ConfigError::invalid(ENV_TAX_RATE, &raw, e))?;
            config.tax_rate_bps = bps;
        }

        if let Some(raw) = lookup(ENV_SHIPPING_COST) {
            let amount: f64 = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(ENV_SHIPPING_COST, &raw, "not a number"))?;
            let shipping = Money::new(amount);
            validate_price(shipping).map_err(|e| ConfigError::invalid(ENV_SHIPPING_COST, &raw, e))?;
            config.shipping_cost = shipping;
        }

        if let Some(path) = lookup(ENV_DB_PATH).filter(|p| !p.trim().is_empty()) {
            config.database_path = PathBuf::from(path);
        }

        Ok(config)
    }

    /// Tax and shipping settings for the pricing calculator.
    pub fn pricing_settings(&self) -> PricingSettings {
        PricingSettings::new(TaxRate::from_bps(self.tax_rate_bps), self.shipping_cost)
    }

    /// Formats an amount for display, rounded to 2 decimals.
    ///
    /// ## Example
    /// ```rust
    /// use kitstore_core::Money;
    /// use kitstore_storefront::state::StoreConfig;
    ///
    /// let config = StoreConfig::default();
    /// assert_eq!(config.format_currency(Money::new(262.4)), "₹262.40");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let sign = if amount.cents() < 0 { "-" } else { "" };
        format!(
            "{}{}{}",
            sign,
            self.currency_symbol,
            Money::new(amount.amount().abs())
        )
    }
}

/// Default catalog location.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/in.kitstore.storefront/kitstore.db`
/// - **Windows**: `%APPDATA%\kitstore\storefront\data\kitstore.db`
/// - **Linux**: `~/.local/share/storefront/kitstore.db`
///
/// Falls back to `./kitstore.db` when no home directory is known.
pub fn default_database_path() -> PathBuf {
    ProjectDirs::from("in", "kitstore", "storefront")
        .map(|dirs| dirs.data_dir().join("kitstore.db"))
        .unwrap_or_else(|| PathBuf::from("kitstore.db"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = StoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.currency_code, "INR");
        assert_eq!(config.tax_rate_bps, 1800);
        assert_eq!(config.shipping_cost, Money::new(50.0));

        let settings = config.pricing_settings();
        assert_eq!(settings.tax_rate.bps(), 1800);
        assert_eq!(settings.shipping_cost, Money::new(50.0));
    }

    #[test]
    fn test_overrides() {
        let config = StoreConfig::from_lookup(lookup(&[
            (ENV_STORE_NAME, " Maker Hub "),
            (ENV_TAX_RATE, "12.5"),
            (ENV_SHIPPING_COST, "0"),
            (ENV_DB_PATH, ":memory:"),
        ]))
        .unwrap();

        assert_eq!(config.store_name, "Maker Hub");
        assert_eq!(config.tax_rate_bps, 1250);
        assert!(config.shipping_cost.is_zero());
        assert_eq!(config.database_path, PathBuf::from(":memory:"));
    }

    #[test]
    fn test_tax_rate_accepts_whole_basis_points() {
        let config = StoreConfig::from_lookup(lookup(&[(ENV_TAX_RATE, "18.01")])).unwrap();
        assert_eq!(config.tax_rate_bps, 1801);
    }

    #[test]
    fn test_invalid_values() {
        for (key, value) in [
            (ENV_TAX_RATE, "eighteen"),
            (ENV_TAX_RATE, "-1"),
            (ENV_TAX_RATE, "150"),
            (ENV_TAX_RATE, "12.345"),
            (ENV_SHIPPING_COST, "-5"),
            (ENV_SHIPPING_COST, "NaN"),
            (ENV_STORE_NAME, "   "),
        ] {
            let err = StoreConfig::from_lookup(lookup(&[(key, value)])).unwrap_err();
            assert!(
                matches!(&err, ConfigError::InvalidValue { key: k, .. } if k == key),
                "{key}={value} gave {err}"
            );
        }
    }

    #[test]
    fn test_format_currency() {
        let config = StoreConfig::default();
        assert_eq!(config.format_currency(Money::new(262.4)), "₹262.40");
        assert_eq!(config.format_currency(Money::new(0.005)), "₹0.01");
        assert_eq!(config.format_currency(Money::zero()), "₹0.00");
        assert_eq!(config.format_currency(Money::new(-12.34)), "-₹12.34");
    }
}
