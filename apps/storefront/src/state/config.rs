//! # Configuration State
//!
//! Display settings taken from the loaded [`ClientConfig`].
//!
//! ## Thread Safety
//! Read-only after startup, so no mutex.

use serde::{Deserialize, Serialize};
use yetta_client::ClientConfig;
use yetta_core::Money;

/// Shop name and currency formatting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Shown in the shell banner
    pub store_name: String,

    /// Prefix for every amount, e.g. `Ksh.`
    pub currency_symbol: String,

    /// Where the bakery API lives (for `whoami`)
    pub api_url: String,
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState::from_client_config(&ClientConfig::default())
    }
}

impl ConfigState {
    pub fn from_client_config(config: &ClientConfig) -> Self {
        ConfigState {
            store_name: config.store.name.clone(),
            currency_symbol: config.store.currency_symbol.clone(),
            api_url: config.base_url().to_string(),
        }
    }

    /// Formats an amount for display.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(4200)), "Ksh. 42.00");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        if amount.is_negative() {
            format!("-{} {}", self.currency_symbol, Money::zero() - amount)
        } else {
            format!("{} {}", self.currency_symbol, amount)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_positive() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(4200)), "Ksh. 42.00");
        assert_eq!(config.format_currency(Money::from_cents(1)), "Ksh. 0.01");
        assert_eq!(config.format_currency(Money::zero()), "Ksh. 0.00");
    }

    #[test]
    fn test_format_currency_negative() {
        let config = ConfigState::default();
        assert_eq!(config.format_currency(Money::from_cents(-1234)), "-Ksh. 12.34");
    }

    #[test]
    fn test_custom_symbol() {
        let mut client = ClientConfig::default();
        client.store.currency_symbol = "KES".to_string();
        let config = ConfigState::from_client_config(&client);
        assert_eq!(config.format_currency(Money::from_cents(123456)), "KES 1234.56");
    }
}
