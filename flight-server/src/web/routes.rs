//! HTTP route handlers.

use std::path::Path;

use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::flights::{SearchError, UserSearchParams};
use crate::format::{flight_stats, format_itineraries};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/search", get(search_flights))
        .route("/api/airports", get(airport_suggestions))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Index page with search form.
async fn index_page() -> Result<Html<String>, AppError> {
    let template = IndexTemplate {
        form: SearchFormView::default(),
    };
    render(&template).map(Html)
}

/// Airport suggestions for the autocomplete inputs.
async fn airport_suggestions(
    State(state): State<AppState>,
    Query(req): Query<AirportSuggestionsRequest>,
) -> Json<AirportSuggestionsResponse> {
    let airports = state
        .airports
        .search(&req.q)
        .await
        .into_iter()
        .map(AirportSuggestion::from)
        .collect();

    Json(AirportSuggestionsResponse {
        seq: req.seq,
        airports,
    })
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// HTTP status reported for a failed search.
fn status_for(err: &SearchError) -> StatusCode {
    match err {
        SearchError::Validation(_) => StatusCode::BAD_REQUEST,
        SearchError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        SearchError::Http { .. }
        | SearchError::MalformedResponse(_)
        | SearchError::MissingSessionToken
        | SearchError::Transport(_) => StatusCode::BAD_GATEWAY,
    }
}

/// Run a flight search.
async fn search_flights(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<UserSearchParams>, QueryRejection>,
) -> Result<Response, AppError> {
    let html = accepts_html(&headers);
    let (user, outcome) = match query {
        Ok(Query(user)) => {
            let outcome = state.flights.run(&user).await;
            (user, outcome)
        }
        Err(rejection) => (
            UserSearchParams::default(),
            Err(SearchError::Validation(format!(
                "Invalid search parameters: {}",
                rejection.body_text()
            ))),
        ),
    };
    let form = SearchFormView::from(&user);

    let payload = match outcome {
        Ok(payload) => payload,
        Err(err) => {
            let status = status_for(&err);
            if !err.is_user_error() {
                warn!(kind = %err.kind(), error = %err, "search failed");
            }

            if !html {
                return Ok((status, Json(SearchResponse::failure(&err))).into_response());
            }

            let (title, details) = if err.is_user_error() {
                ("Check your search", None)
            } else {
                ("Search failed", Some(err.kind().to_string()))
            };
            let template = ErrorTemplate {
                title: title.to_string(),
                message: err.to_string(),
                details,
                form,
            };
            return Ok((status, Html(render(&template)?)).into_response());
        }
    };

    let flights = format_itineraries(&payload);
    let stats = flight_stats(&payload);

    if html {
        let template = ResultsTemplate {
            form,
            flights,
            stats,
        };
        Ok(Html(render(&template)?).into_response())
    } else {
        Ok(Json(SearchResponse::success(payload.session_id, flights, stats)).into_response())
    }
}

fn render<T: Template>(template: &T) -> Result<String, AppError> {
    Ok(template.render()?)
}

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self, "internal error");
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
