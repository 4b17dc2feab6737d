//! # Config Commands
//!
//! Read-only store configuration for UI surfaces.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::state::StoreConfig;

/// The parts of [`StoreConfig`] a front-end needs to render prices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse {
    pub store_name: String,
    pub currency_symbol: String,
    pub currency_decimals: u8,
    pub delivery_fee_cents: i64,
}

/// Gets the current store configuration.
///
/// ## When Used
/// - App startup (header, currency formatting)
/// - Showing the delivery fee before the customer picks a mode
pub fn get_config(config: &StoreConfig) -> ConfigResponse {
    debug!("get_config command");
    ConfigResponse {
        store_name: config.store_name.clone(),
        currency_symbol: config.currency_symbol.clone(),
        currency_decimals: config.currency_decimals,
        delivery_fee_cents: config.delivery_fee_cents,
    }
}
