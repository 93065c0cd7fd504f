//! HTTP client for the Rates Fetch Service.
//!
//! The service is keyed by `latest` or `historical/<ISO-date>` and responds
//! with a JSON object mapping currency code to numeric rate, including the
//! reference currency.

use tracing::{debug, warn};

use grosz_core::rates::{RateQuery, RateTable};
use grosz_shared::{AppError, AppResult};

/// Client for the historical exchange-rates endpoint.
#[derive(Debug, Clone)]
pub struct RatesClient {
    http: reqwest::Client,
    base_url: String,
}

impl RatesClient {
    /// Creates a client against the given base URL. Requests append the
    /// query path: `<base_url>/latest` or `<base_url>/historical/<date>`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetches the rate table for the given query.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ExternalService` when the request fails, the
    /// service answers with a non-success status, or the body is not a
    /// currency-to-rate mapping.
    pub async fn fetch(&self, query: &RateQuery) -> AppResult<RateTable> {
        let url = self.request_url(query);
        debug!(%url, "fetching rate table");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("rates request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "rates service answered with an error status");
            return Err(AppError::ExternalService(format!(
                "rates service answered {status}"
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::ExternalService(format!("rates body unreadable: {e}")))?;

        let table = parse_rate_table(&body)?;
        debug!(currencies = table.len(), "rate table fetched");
        Ok(table)
    }

    fn request_url(&self, query: &RateQuery) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), query.path())
    }
}

/// Decodes a response body into a rate table.
///
/// # Errors
///
/// Returns `AppError::ExternalService` when the body is not a JSON object
/// of currency code to numeric rate.
pub fn parse_rate_table(body: &str) -> AppResult<RateTable> {
    serde_json::from_str::<RateTable>(body)
        .map_err(|e| AppError::ExternalService(format!("malformed rate table: {e}")))
}
