//! Conversion between two currencies over the current rate table.

use std::fmt;

use tracing::debug;

use crate::currency;
use crate::rates::RateStore;

/// Failure kinds for a conversion. Variants render user-facing messages.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("Please enter a positive numeric amount to convert.")]
    InvalidAmount,

    #[error("{code:?} is not a supported currency. Please select a valid option from the list.")]
    InvalidSelection { code: String },

    #[error("Exchange rates not loaded.")]
    NotLoaded,

    #[error("No exchange rate available for {code}.")]
    RateUnavailable { code: String },
}

/// A converted amount ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    /// Converted value rendered with exactly 2 decimal digits.
    pub amount: String,
    /// Display symbol of the target currency.
    pub symbol: String,
}

impl fmt::Display for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.symbol, self.amount)
    }
}

/// Converts amounts using the rates held by a [`RateStore`]. Reads the
/// store, never mutates it.
pub struct ConversionService<'a> {
    store: &'a RateStore,
}

impl<'a> ConversionService<'a> {
    pub fn new(store: &'a RateStore) -> Self {
        ConversionService { store }
    }

    /// Converts `amount` from one currency to another.
    ///
    /// Validation order, first failure wins: the amount must parse as a
    /// positive finite number, both codes must be supported, rates must be
    /// loaded, and both codes must be present in the rate table.
    ///
    /// The rate table is keyed off a single base currency, so conversion
    /// goes through it: `usd = amount / rate[from]`, then
    /// `converted = usd * rate[to]`.
    pub fn convert(
        &self,
        amount: &str,
        from: &str,
        to: &str,
    ) -> Result<ConversionResult, ConvertError> {
        let amount: f64 = amount
            .trim()
            .parse()
            .map_err(|_| ConvertError::InvalidAmount)?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ConvertError::InvalidAmount);
        }

        if !currency::is_supported(from) {
            return Err(ConvertError::InvalidSelection {
                code: from.to_string(),
            });
        }
        // Every supported currency has a symbol, so this doubles as the
        // selection check for the target.
        let symbol = currency::symbol(to).ok_or_else(|| ConvertError::InvalidSelection {
            code: to.to_string(),
        })?;

        let table = self.store.table().ok_or(ConvertError::NotLoaded)?;
        let from_rate = table.get(from).ok_or_else(|| ConvertError::RateUnavailable {
            code: from.to_string(),
        })?;
        let to_rate = table.get(to).ok_or_else(|| ConvertError::RateUnavailable {
            code: to.to_string(),
        })?;

        let usd = amount / from_rate;
        let converted = usd * to_rate;
        debug!("Converted {amount} {from} -> {converted} {to} (via {usd} USD)");

        Ok(ConversionResult {
            amount: format!("{converted:.2}"),
            symbol: symbol.to_string(),
        })
    }
}

/// Reverses a source/target selection. No validation: either side may be
/// empty or unset, the caller decides how to apply the result.
pub fn swap<'a>(from: &'a str, to: &'a str) -> (&'a str, &'a str) {
    (to, from)
}
