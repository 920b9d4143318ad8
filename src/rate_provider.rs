//! Exchange rate provider abstraction.

use async_trait::async_trait;

use crate::rates::RateTable;

/// Failure kinds for a rate fetch. Each variant renders a message suitable
/// for showing to the user directly.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("The request timed out. Please check your internet connection.")]
    Timeout,

    #[error("Unable to connect to the currency service.")]
    Connection,

    #[error("The currency service returned an error: {status}")]
    Service { status: reqwest::StatusCode },

    #[error("Received invalid data from the currency service.")]
    MalformedData,

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches a fresh snapshot of all rates relative to the base currency.
    async fn fetch_rates(&self) -> Result<RateTable, FetchError>;
}
