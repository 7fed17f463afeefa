//! Flight search error types.

use std::fmt;

use serde::Serialize;

/// Errors that end a flight search session.
///
/// A session never recovers from any of these; the caller receives the
/// error and decides how to present it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Required user input missing or invalid
    #[error("{0}")]
    Validation(String),

    /// Provider answered 429
    #[error("rate limited by flight provider")]
    RateLimited,

    /// Provider answered a non-2xx status
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// Response is not the expected shape
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Step 1 returned no session token
    #[error("no session token in search response")]
    MissingSessionToken,

    /// Network failure, timeout or similar
    #[error("transport error: {0}")]
    Transport(String),
}

impl SearchError {
    /// The error's kind, for tagged responses.
    pub fn kind(&self) -> SearchErrorKind {
        match self {
            SearchError::Validation(_) => SearchErrorKind::ValidationError,
            SearchError::RateLimited => SearchErrorKind::RateLimited,
            SearchError::Http { .. } => SearchErrorKind::HttpError,
            SearchError::MalformedResponse(_) => SearchErrorKind::MalformedResponse,
            SearchError::MissingSessionToken => SearchErrorKind::MissingSessionToken,
            SearchError::Transport(_) => SearchErrorKind::TransportError,
        }
    }

    /// Whether the user can fix this by changing the form.
    pub fn is_user_error(&self) -> bool {
        matches!(self, SearchError::Validation(_))
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Transport(err.to_string())
    }
}

/// Discriminant of `SearchError`, serialized as its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SearchErrorKind {
    ValidationError,
    RateLimited,
    HttpError,
    MalformedResponse,
    MissingSessionToken,
    TransportError,
}

impl fmt::Display for SearchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchErrorKind::ValidationError => "ValidationError",
            SearchErrorKind::RateLimited => "RateLimited",
            SearchErrorKind::HttpError => "HttpError",
            SearchErrorKind::MalformedResponse => "MalformedResponse",
            SearchErrorKind::MissingSessionToken => "MissingSessionToken",
            SearchErrorKind::TransportError => "TransportError",
        };
        f.write_str(name)
    }
}
