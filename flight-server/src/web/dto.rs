//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::airport::AirportRecord;
use crate::flights::{SearchError, SearchErrorKind};
use crate::format::{FlightStats, FormattedFlight};

/// Autocomplete request.
#[derive(Debug, Deserialize)]
pub struct AirportSuggestionsRequest {
    /// Text typed so far
    #[serde(default)]
    pub q: String,

    /// Caller's request sequence number, echoed back unchanged
    pub seq: Option<u64>,
}

/// Autocomplete response.
///
/// Clients keep only the response whose `seq` matches their latest
/// request; earlier answers arriving late are dropped.
#[derive(Debug, Serialize, Deserialize)]
pub struct AirportSuggestionsResponse {
    pub seq: Option<u64>,
    pub airports: Vec<AirportSuggestion>,
}

/// One airport suggestion.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirportSuggestion {
    pub code: String,
    pub name: String,
    pub city: String,
    pub country: String,
    pub full_name: String,

    /// Provider entity id, submitted with the form
    pub id: Option<String>,

    /// Text to put in the input, e.g. "Madrid (MAD)"
    pub label: String,
}

impl From<AirportRecord> for AirportSuggestion {
    fn from(record: AirportRecord) -> Self {
        Self {
            label: record.display_value(),
            code: record.code,
            name: record.name,
            city: record.city,
            country: record.country,
            full_name: record.full_name,
            id: record.provider_id,
        }
    }
}

/// Flight search response.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub status: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub flights: Option<Vec<FormattedFlight>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<FlightStats>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl SearchResponse {
    pub fn success(
        session_id: String,
        flights: Vec<FormattedFlight>,
        stats: Option<FlightStats>,
    ) -> Self {
        Self {
            status: true,
            session_id: Some(session_id),
            flights: Some(flights),
            stats,
            error: None,
        }
    }

    pub fn failure(err: &SearchError) -> Self {
        Self {
            status: false,
            session_id: None,
            flights: None,
            stats: None,
            error: Some(ErrorBody {
                kind: err.kind(),
                message: err.to_string(),
            }),
        }
    }
}

/// Tagged error description.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: SearchErrorKind,
    pub message: String,
}

/// Generic error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestion_from_record() {
        let record = AirportRecord {
            code: "MAD".into(),
            name: "Madrid Barajas".into(),
            city: "Madrid".into(),
            country: "España".into(),
            full_name: "Aeropuerto Adolfo Suárez Madrid-Barajas".into(),
            provider_id: Some("95565077".into()),
        };

        let suggestion = AirportSuggestion::from(record);
        assert_eq!(suggestion.label, "Madrid (MAD)");
        assert_eq!(suggestion.id.as_deref(), Some("95565077"));
    }

    #[test]
    fn failure_response_shape() {
        let response = SearchResponse::failure(&SearchError::MissingSessionToken);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], false);
        assert_eq!(json["error"]["kind"], "MissingSessionToken");
        assert_eq!(json["error"]["message"], "no session token in search response");
        assert!(json.get("flights").is_none());
    }

    #[test]
    fn empty_success_still_lists_flights() {
        let response = SearchResponse::success("abc123".into(), Vec::new(), None);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["status"], true);
        assert_eq!(json["session_id"], "abc123");
        assert_eq!(json["flights"], serde_json::json!([]));
        assert!(json.get("error").is_none());
    }
}
