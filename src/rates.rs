//! Snapshot of exchange rates and the store that holds the current one.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::rate_provider::{FetchError, RateProvider};

/// No successful refresh has happened yet.
#[derive(Debug, thiserror::Error)]
#[error("Exchange rates not loaded.")]
pub struct NotLoaded;

/// Immutable snapshot mapping currency code to its rate, expressed as units
/// of that currency per 1 unit of the base currency (USD).
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    rates: BTreeMap<String, f64>,
}

impl RateTable {
    /// Builds a table from raw upstream entries. Non-positive or non-finite
    /// rates are dropped so the positive-rate invariant holds throughout.
    pub fn from_raw(raw: BTreeMap<String, f64>) -> Self {
        let rates = raw
            .into_iter()
            .filter(|(code, rate)| {
                if rate.is_finite() && *rate > 0.0 {
                    true
                } else {
                    warn!("Discarding invalid rate for {code}: {rate}");
                    false
                }
            })
            .collect();
        RateTable { rates }
    }

    pub fn get(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    /// Entries in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(c, r)| (c.as_str(), *r))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Owns the current [`RateTable`]. Empty until the first successful
/// [`RateStore::refresh`]; a failed refresh never disturbs the held table.
#[derive(Debug, Default)]
pub struct RateStore {
    table: Option<RateTable>,
}

impl RateStore {
    pub fn new() -> Self {
        RateStore { table: None }
    }

    /// Fetches a fresh table from the provider and replaces the held one
    /// wholesale. On failure the previous table stays in place.
    pub async fn refresh(&mut self, provider: &dyn RateProvider) -> Result<(), FetchError> {
        let table = provider.fetch_rates().await?;
        debug!("Loaded {} exchange rates", table.len());
        self.table = Some(table);
        Ok(())
    }

    /// Read access for conversion logic.
    pub fn table(&self) -> Option<&RateTable> {
        self.table.as_ref()
    }

    /// All rates as `(code, rate formatted to 6 decimals)` pairs, in
    /// ascending code order.
    pub fn list_rates(&self) -> Result<Vec<(String, String)>, NotLoaded> {
        let table = self.table.as_ref().ok_or(NotLoaded)?;
        Ok(table
            .iter()
            .map(|(code, rate)| (code.to_string(), format!("{rate:.6}")))
            .collect())
    }
}
