//! Airport lookup error types.

use super::governor::GovernorRejection;

/// Errors from the remote airport search.
///
/// None of these reach callers of `AirportLookup::search`: every one is
/// logged and answered from the local table instead.
#[derive(Debug, thiserror::Error)]
pub enum AirportError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Key rejected by the provider
    #[error("unauthorized: check RAPIDAPI_KEY")]
    Unauthorized,

    /// Provider answered 429
    #[error("rate limited by airport provider")]
    RateLimited,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Response parsed but lacks the expected fields
    #[error("malformed response: {0}")]
    Malformed(String),

    /// No usable API key configured
    #[error("no API key configured")]
    MissingApiKey,

    /// The local governor refused the call
    #[error("governor rejected call: {0}")]
    Governor(#[from] GovernorRejection),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = AirportError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = AirportError::Malformed("status false".into());
        assert_eq!(err.to_string(), "malformed response: status false");

        assert_eq!(
            AirportError::RateLimited.to_string(),
            "rate limited by airport provider"
        );
    }
}
