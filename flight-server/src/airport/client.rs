//! Remote airport search client.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use tracing::debug;

use super::error::AirportError;
use super::record::AirportRecord;

/// Default base URL for the flight-data provider.
pub(crate) const DEFAULT_BASE_URL: &str = "https://sky-scrapper.p.rapidapi.com";

/// Default value of the host header the provider gateway routes on.
pub(crate) const DEFAULT_API_HOST: &str = "sky-scrapper.p.rapidapi.com";

/// Key value shipped in sample `.env` files; never valid.
const PLACEHOLDER_KEY: &str = "your_rapidapi_key_here";

/// Maximum airports kept from one remote response.
const MAX_REMOTE_RESULTS: usize = 8;

/// Entity type of entries that denote a single airport.
const AIRPORT_ENTITY: &str = "AIRPORT";

/// Wrapper for the airport search response.
#[derive(Debug, Deserialize)]
pub struct AirportSearchResponse {
    pub status: bool,
    pub data: Option<Vec<AirportEntry>>,
}

/// One place suggestion from the provider (airport, city or region).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportEntry {
    pub sky_id: String,
    pub entity_id: String,
    pub presentation: Presentation,
    pub navigation: Navigation,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub title: String,
    pub suggestion_title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigation {
    pub entity_id: String,
    pub entity_type: String,
    pub localized_name: String,
}

impl AirportEntry {
    /// Whether this entry is an airport rather than a city or region.
    pub fn is_airport(&self) -> bool {
        self.navigation.entity_type == AIRPORT_ENTITY
    }

    fn into_record(self) -> AirportRecord {
        AirportRecord {
            code: self.sky_id,
            name: self.navigation.localized_name,
            city: self.presentation.title,
            country: self.presentation.subtitle,
            full_name: self.presentation.suggestion_title,
            provider_id: Some(self.entity_id),
        }
    }
}

/// Keep airport entries only, map them to records and cap the list.
pub(crate) fn to_records(entries: Vec<AirportEntry>) -> Vec<AirportRecord> {
    entries
        .into_iter()
        .filter(AirportEntry::is_airport)
        .map(AirportEntry::into_record)
        .take(MAX_REMOTE_RESULTS)
        .collect()
}

/// Whether a configured key is usable at all.
pub(crate) fn is_usable_key(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && key != PLACEHOLDER_KEY
}

/// Configuration for the airport search client.
#[derive(Debug, Clone)]
pub struct AirportClientConfig {
    /// Provider key, sent as `X-RapidAPI-Key`
    pub api_key: String,
    /// Provider host, sent as `X-RapidAPI-Host`
    pub api_host: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl AirportClientConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_host: DEFAULT_API_HOST.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 10,
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

/// Client for the provider's airport search endpoint.
#[derive(Debug, Clone)]
pub struct AirportClient {
    http: reqwest::Client,
    base_url: String,
    has_key: bool,
}

impl AirportClient {
    /// Create a new airport search client.
    pub fn new(config: AirportClientConfig) -> Result<Self, AirportError> {
        let has_key = is_usable_key(&config.api_key);
        let mut headers = HeaderMap::new();

        if has_key {
            let key = HeaderValue::from_str(config.api_key.trim()).map_err(|_| {
                AirportError::Api {
                    status: 0,
                    message: "Invalid API key format".to_string(),
                }
            })?;
            headers.insert(HeaderName::from_static("x-rapidapi-key"), key);
        }

        let host = HeaderValue::from_str(&config.api_host).map_err(|_| AirportError::Api {
            status: 0,
            message: "Invalid API host format".to_string(),
        })?;
        headers.insert(HeaderName::from_static("x-rapidapi-host"), host);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            has_key,
        })
    }

    /// Whether a usable API key is configured.
    pub fn has_key(&self) -> bool {
        self.has_key
    }

    /// Search the provider for airports matching `query`.
    pub async fn search(&self, query: &str) -> Result<Vec<AirportRecord>, AirportError> {
        if !self.has_key {
            return Err(AirportError::MissingApiKey);
        }

        let url = format!("{}/api/v1/flights/searchAirport", self.base_url);
        debug!(query, "remote airport search");

        let response = self.http.get(&url).query(&[("query", query)]).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AirportError::RateLimited);
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AirportError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AirportError::Api {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let body = response.text().await?;
        parse_response(&body)
    }
}

/// Parse a raw airport search body into records.
pub(crate) fn parse_response(body: &str) -> Result<Vec<AirportRecord>, AirportError> {
    let response: AirportSearchResponse =
        serde_json::from_str(body).map_err(|e| AirportError::Json {
            message: e.to_string(),
        })?;

    if !response.status {
        return Err(AirportError::Malformed("status is false".to_string()));
    }

    let entries = response
        .data
        .ok_or_else(|| AirportError::Malformed("missing data array".to_string()))?;

    Ok(to_records(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_json(sky_id: &str, entity_id: &str, entity_type: &str, city: &str) -> String {
        format!(
            r#"{{
                "skyId": "{sky_id}",
                "entityId": "{entity_id}",
                "presentation": {{
                    "title": "{city}",
                    "suggestionTitle": "{city} ({sky_id})",
                    "subtitle": "Spain"
                }},
                "navigation": {{
                    "entityId": "{entity_id}",
                    "entityType": "{entity_type}",
                    "localizedName": "{city} Airport",
                    "relevantFlightParams": {{
                        "skyId": "{sky_id}",
                        "entityId": "{entity_id}",
                        "flightPlaceType": "{entity_type}",
                        "localizedName": "{city}"
                    }}
                }}
            }}"#
        )
    }

    #[test]
    fn config_defaults() {
        let config = AirportClientConfig::new("test-api-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api_host, DEFAULT_API_HOST);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn config_with_base_url() {
        let config =
            AirportClientConfig::new("test-api-key").with_base_url("http://localhost:8080");
        assert_eq!(config.base_url, "http://localhost:8080");
    }

    #[test]
    fn placeholder_key_is_not_usable() {
        assert!(is_usable_key("abc123"));
        assert!(!is_usable_key(""));
        assert!(!is_usable_key("   "));
        assert!(!is_usable_key("your_rapidapi_key_here"));
    }

    #[tokio::test]
    async fn missing_key_never_hits_network() {
        let client = AirportClient::new(
            AirportClientConfig::new("").with_base_url("http://127.0.0.1:9"),
        )
        .unwrap();
        assert!(!client.has_key());
        assert!(matches!(
            client.search("madrid").await,
            Err(AirportError::MissingApiKey)
        ));
    }

    #[test]
    fn parse_keeps_only_airports() {
        let body = format!(
            r#"{{"status": true, "timestamp": 1, "data": [{}, {}, {}]}}"#,
            entry_json("MAD", "95565077", "AIRPORT", "Madrid"),
            entry_json("MADR", "27544850", "CITY", "Madrid"),
            entry_json("TOJ", "95565087", "AIRPORT", "Madrid Torrejon"),
        );

        let records = parse_response(&body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].code, "MAD");
        assert_eq!(records[0].provider_id.as_deref(), Some("95565077"));
        assert_eq!(records[0].name, "Madrid Airport");
        assert_eq!(records[0].city, "Madrid");
        assert_eq!(records[0].country, "Spain");
        assert_eq!(records[0].full_name, "Madrid (MAD)");
        assert_eq!(records[1].code, "TOJ");
    }

    #[test]
    fn parse_caps_results() {
        let entries: Vec<String> = (0..12)
            .map(|i| entry_json(&format!("A{i:02}"), &i.to_string(), "AIRPORT", "Somewhere"))
            .collect();
        let body = format!(r#"{{"status": true, "data": [{}]}}"#, entries.join(","));

        let records = parse_response(&body).unwrap();
        assert_eq!(records.len(), 8);
        assert_eq!(records[0].code, "A00");
        assert_eq!(records[7].code, "A07");
    }

    #[test]
    fn parse_rejects_false_status() {
        let body = r#"{"status": false, "data": []}"#;
        assert!(matches!(
            parse_response(body),
            Err(AirportError::Malformed(_))
        ));
    }

    #[test]
    fn parse_rejects_missing_data() {
        let body = r#"{"status": true}"#;
        assert!(matches!(
            parse_response(body),
            Err(AirportError::Malformed(_))
        ));
    }

    #[test]
    fn parse_rejects_invalid_json() {
        assert!(matches!(
            parse_response("<html>oops</html>"),
            Err(AirportError::Json { .. })
        ));
    }
}
