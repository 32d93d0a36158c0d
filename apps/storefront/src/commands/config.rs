//! # Config Commands
//!
//! Commands for retrieving storefront configuration.

use serde::Serialize;
use tracing::debug;

use crate::state::StoreConfig;
use kitstore_core::Money;

/// What the UI needs to label prices. The database path stays server-side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub store_name: String,
    pub currency_code: String,
    pub currency_symbol: String,

    /// Tax rate in percent, e.g. 18.0.
    pub tax_rate_percent: f64,
    pub shipping_cost: Money,
}

/// Gets the current storefront configuration.
///
/// ## When Used
/// - Storefront startup (to label prices and the tax line)
/// - Currency formatting
pub fn get_config(config: &StoreConfig) -> ConfigResponse {
    debug!("get_config command");

    ConfigResponse {
        store_name: config.store_name.clone(),
        currency_code: config.currency_code.clone(),
        currency_symbol: config.currency_symbol.clone(),
        tax_rate_percent: config.pricing_settings().tax_rate.percentage(),
        shipping_cost: config.shipping_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_config() {
        let response = get_config(&StoreConfig::default());
        assert_eq!(response.currency_code, "INR");
        assert_eq!(response.tax_rate_percent, 18.0);
        assert_eq!(response.shipping_cost, Money::new(50.0));
    }
}
