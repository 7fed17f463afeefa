//! Flight search HTTP client.

use std::future::Future;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::debug;

use crate::airport::{DEFAULT_API_HOST, DEFAULT_BASE_URL};

use super::error::SearchError;
use super::query::FlightQuery;
use super::types::SearchFlightsResponse;

/// Trait for issuing `searchFlights` requests.
///
/// This abstraction allows the session to be tested with mock responses.
pub trait FlightProvider {
    /// Send one `searchFlights` request and parse the response.
    fn search_flights(
        &self,
        query: FlightQuery<'_>,
    ) -> impl Future<Output = Result<SearchFlightsResponse, SearchError>> + Send;
}

/// Configuration for the flight search client.
#[derive(Debug, Clone)]
pub struct FlightClientConfig {
    /// Provider key, sent as `X-RapidAPI-Key`
    pub api_key: String,
    /// Provider host, sent as `X-RapidAPI-Host`
    pub api_host: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FlightClientConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_host: DEFAULT_API_HOST.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the host header value.
    pub fn with_api_host(mut self, host: impl Into<String>) -> Self {
        self.api_host = host.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the provider's flight search endpoint.
#[derive(Debug, Clone)]
pub struct FlightClient {
    http: reqwest::Client,
    base_url: String,
}

impl FlightClient {
    /// Create a new flight search client.
    pub fn new(config: FlightClientConfig) -> Result<Self, SearchError> {
        let mut headers = HeaderMap::new();

        let key = HeaderValue::from_str(config.api_key.trim())
            .map_err(|_| SearchError::Validation("Invalid API key format".to_string()))?;
        headers.insert(HeaderName::from_static("x-rapidapi-key"), key);

        let host = HeaderValue::from_str(&config.api_host)
            .map_err(|_| SearchError::Validation("Invalid API host format".to_string()))?;
        headers.insert(HeaderName::from_static("x-rapidapi-host"), host);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
        })
    }

    /// Send one `searchFlights` request.
    pub async fn search(
        &self,
        query: FlightQuery<'_>,
    ) -> Result<SearchFlightsResponse, SearchError> {
        let url = query.url(&self.base_url)?;
        debug!(polling = query.session_id.is_some(), "searchFlights request");

        let response = self.http.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(SearchError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Http {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let body = response.text().await?;
        parse_response(&body)
    }
}

impl FlightProvider for FlightClient {
    async fn search_flights(
        &self,
        query: FlightQuery<'_>,
    ) -> Result<SearchFlightsResponse, SearchError> {
        self.search(query).await
    }
}

impl<T: FlightProvider + Sync> FlightProvider for &T {
    fn search_flights(
        &self,
        query: FlightQuery<'_>,
    ) -> impl Future<Output = Result<SearchFlightsResponse, SearchError>> + Send {
        (**self).search_flights(query)
    }
}

/// Parse a raw `searchFlights` body.
pub(crate) fn parse_response(body: &str) -> Result<SearchFlightsResponse, SearchError> {
    serde_json::from_str(body).map_err(|e| {
        let snippet: String = body.chars().take(200).collect();
        SearchError::MalformedResponse(format!("{e} (body: {snippet})"))
    })
}
