use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::rate_provider::{FetchError, RateProvider};
use crate::rates::RateTable;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Provider for freecurrencyapi-style services: a single GET with an
/// `apikey` query parameter returning `{"data": {code: rate, ...}}` with
/// all rates relative to USD.
pub struct FreeCurrencyProvider {
    base_url: String,
    api_key: String,
    timeout: Duration,
}

impl FreeCurrencyProvider {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        FreeCurrencyProvider {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            timeout: REQUEST_TIMEOUT,
        }
    }

    /// Overrides the request timeout. Used by tests.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    data: Option<BTreeMap<String, f64>>,
}

fn transport_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::Connection
    } else {
        FetchError::Unexpected(e.to_string())
    }
}

#[async_trait]
impl RateProvider for FreeCurrencyProvider {
    #[instrument(name = "RateFetch", skip(self))]
    async fn fetch_rates(&self) -> Result<RateTable, FetchError> {
        // The key stays out of logs.
        let url = format!("{}?apikey={}", self.base_url, self.api_key);
        debug!("Requesting exchange rates from {}", self.base_url);

        let client = reqwest::Client::builder()
            .user_agent("fxc/0.2")
            .timeout(self.timeout)
            .build()
            .map_err(|e| FetchError::Unexpected(e.to_string()))?;

        let response = client.get(&url).send().await.map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Service { status });
        }

        let text = response.text().await.map_err(transport_error)?;
        let parsed: LatestRatesResponse = serde_json::from_str(&text).map_err(|e| {
            debug!("Failed to parse rates response: {e}");
            FetchError::MalformedData
        })?;

        let data = parsed.data.ok_or(FetchError::MalformedData)?;
        Ok(RateTable::from_raw(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const API_KEY: &str = "test-key";

    async fn create_mock_server(response: ResponseTemplate) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/latest"))
            .and(query_param("apikey", API_KEY))
            .respond_with(response)
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn provider_for(server: &MockServer) -> FreeCurrencyProvider {
        FreeCurrencyProvider::new(&format!("{}/v1/latest", server.uri()), API_KEY)
    }

    #[tokio::test]
    async fn test_successful_rates_fetch() {
        let mock_response = r#"{
            "data": {
                "EUR": 0.9,
                "JPY": 150.0,
                "USD": 1.0
            }
        }"#;
        let mock_server =
            create_mock_server(ResponseTemplate::new(200).set_body_string(mock_response)).await;

        let provider = provider_for(&mock_server);
        let table = provider.fetch_rates().await.unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.get("EUR"), Some(0.9));
        assert_eq!(table.get("JPY"), Some(150.0));
        assert_eq!(table.get("USD"), Some(1.0));
    }

    #[tokio::test]
    async fn test_invalid_rates_are_dropped() {
        let mock_response = r#"{"data": {"EUR": -0.9, "USD": 1.0}}"#;
        let mock_server =
            create_mock_server(ResponseTemplate::new(200).set_body_string(mock_response)).await;

        let provider = provider_for(&mock_server);
        let table = provider.fetch_rates().await.unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("EUR"), None);
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let mock_server = create_mock_server(ResponseTemplate::new(500)).await;

        let provider = provider_for(&mock_server);
        let result = provider.fetch_rates().await;

        match result {
            Err(FetchError::Service { status }) => assert_eq!(status.as_u16(), 500),
            other => panic!("expected Service error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_data_field() {
        let mock_response = r#"{"meta": {"last_updated_at": "2024-01-01T00:00:00Z"}}"#;
        let mock_server =
            create_mock_server(ResponseTemplate::new(200).set_body_string(mock_response)).await;

        let provider = provider_for(&mock_server);
        let result = provider.fetch_rates().await;
        assert!(matches!(result, Err(FetchError::MalformedData)));
    }

    #[tokio::test]
    async fn test_body_is_not_json() {
        let mock_server =
            create_mock_server(ResponseTemplate::new(200).set_body_string("not json at all"))
                .await;

        let provider = provider_for(&mock_server);
        let result = provider.fetch_rates().await;
        assert!(matches!(result, Err(FetchError::MalformedData)));
    }

    #[tokio::test]
    async fn test_slow_response_times_out() {
        let response = ResponseTemplate::new(200)
            .set_body_string(r#"{"data": {"USD": 1.0}}"#)
            .set_delay(Duration::from_millis(500));
        let mock_server = create_mock_server(response).await;

        let provider = provider_for(&mock_server).with_timeout(Duration::from_millis(50));
        let result = provider.fetch_rates().await;
        assert!(matches!(result, Err(FetchError::Timeout)));
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        // Nothing listens on this port.
        let provider = FreeCurrencyProvider::new("http://127.0.0.1:1/v1/latest", API_KEY);
        let result = provider.fetch_rates().await;
        assert!(matches!(result, Err(FetchError::Connection)));
    }
}
