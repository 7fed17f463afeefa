//! Two-step flight search session.
//!
//! The provider's search is asynchronous on its side. The first request,
//! without a token, starts a search and returns a session token at
//! `data.context.sessionId`. The second request repeats every parameter
//! and adds the token to retrieve the results.
//!
//! ```text
//! Init -> AwaitingToken -> Fetching -> Complete
//!              |               |
//!              +---> Failed <--+
//! ```
//!
//! There are no retries: a failure at either step ends the session.

use std::mem;

use tracing::{debug, info, warn};

use super::client::FlightProvider;
use super::error::SearchError;
use super::query::FlightQuery;
use super::resolve::resolve;
use super::types::{
    RawItineraryPayload, SearchDefaults, SearchFlightsResponse, SearchParams, UserSearchParams,
};

/// Where a session is in the two-step protocol.
#[derive(Debug, Clone)]
pub enum SessionState {
    /// Parameters resolved, nothing sent yet
    Init,
    /// Step 1 about to be sent
    AwaitingToken,
    /// Step 1 returned this token; step 2 about to be sent
    Fetching { token: String },
    /// Step 2 returned results
    Complete(RawItineraryPayload),
    /// Either step failed
    Failed(SearchError),
}

impl SessionState {
    fn name(&self) -> &'static str {
        match self {
            SessionState::Init => "init",
            SessionState::AwaitingToken => "awaiting_token",
            SessionState::Fetching { .. } => "fetching",
            SessionState::Complete(_) => "complete",
            SessionState::Failed(_) => "failed",
        }
    }

    /// Whether the session has finished.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Complete(_) | SessionState::Failed(_))
    }
}

/// One search, from token acquisition to results.
///
/// Created per search and consumed by `run`; nothing survives between
/// searches.
pub struct FlightSearchSession<'a, P> {
    provider: &'a P,
    params: SearchParams,
    state: SessionState,
}

impl<'a, P: FlightProvider> FlightSearchSession<'a, P> {
    /// Create a session for already-resolved parameters.
    pub fn new(provider: &'a P, params: SearchParams) -> Self {
        Self {
            provider,
            params,
            state: SessionState::Init,
        }
    }

    /// Current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The parameters this session searches with.
    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Advance by one transition. Returns the new state.
    pub async fn step(&mut self) -> &SessionState {
        let next = match mem::replace(&mut self.state, SessionState::Init) {
            SessionState::Init => SessionState::AwaitingToken,
            SessionState::AwaitingToken => match self.request_token().await {
                Ok(token) => SessionState::Fetching { token },
                Err(e) => SessionState::Failed(e),
            },
            SessionState::Fetching { token } => match self.fetch_results(&token).await {
                Ok(payload) => SessionState::Complete(payload),
                Err(e) => SessionState::Failed(e),
            },
            terminal @ (SessionState::Complete(_) | SessionState::Failed(_)) => terminal,
        };
        debug!(state = next.name(), "flight search session transition");
        self.state = next;
        &self.state
    }

    /// Drive the session to completion.
    pub async fn run(mut self) -> Result<RawItineraryPayload, SearchError> {
        loop {
            match mem::replace(&mut self.state, SessionState::Init) {
                SessionState::Complete(payload) => {
                    info!(
                        itineraries = payload.itineraries.len(),
                        origin = %self.params.origin_code,
                        destination = %self.params.destination_code,
                        "flight search complete"
                    );
                    return Ok(payload);
                }
                SessionState::Failed(err) => {
                    warn!(kind = %err.kind(), error = %err, "flight search failed");
                    return Err(err);
                }
                pending => {
                    self.state = pending;
                    self.step().await;
                }
            }
        }
    }

    /// Step 1: start the search and extract its token.
    async fn request_token(&self) -> Result<String, SearchError> {
        let response = self
            .provider
            .search_flights(FlightQuery::start(&self.params))
            .await?;

        match response.session_id() {
            Some(token) => {
                debug!(token, "session token acquired");
                Ok(token.to_string())
            }
            None => Err(SearchError::MissingSessionToken),
        }
    }

    /// Step 2: fetch results for the started search.
    async fn fetch_results(&self, token: &str) -> Result<RawItineraryPayload, SearchError> {
        let response = self
            .provider
            .search_flights(FlightQuery::poll(&self.params, token))
            .await?;

        into_payload(response, token)
    }
}

/// Extract the itinerary payload from a step-2 response.
fn into_payload(
    response: SearchFlightsResponse,
    token: &str,
) -> Result<RawItineraryPayload, SearchError> {
    if response.status == Some(false) {
        return Err(SearchError::MalformedResponse(
            "provider reported status false".to_string(),
        ));
    }

    let data = response
        .data
        .ok_or_else(|| SearchError::MalformedResponse("missing data".to_string()))?;

    let itineraries = data
        .itineraries
        .ok_or_else(|| SearchError::MalformedResponse("missing itineraries".to_string()))?;

    let (context_status, total_results, session_id) = match data.context {
        Some(ctx) => (
            ctx.status,
            ctx.total_results,
            ctx.session_id.filter(|s| !s.is_empty()),
        ),
        None => (None, None, None),
    };

    Ok(RawItineraryPayload {
        session_id: session_id.unwrap_or_else(|| token.to_string()),
        context_status,
        total_results,
        itineraries,
        filter_stats: data.filter_stats,
    })
}

/// Flight search entry point: validates form input, then runs a session.
pub struct FlightSearch<P> {
    provider: P,
    defaults: SearchDefaults,
}

impl<P: FlightProvider> FlightSearch<P> {
    pub fn new(provider: P, defaults: SearchDefaults) -> Self {
        Self { provider, defaults }
    }

    /// Run a complete search for the given form input.
    pub async fn run(&self, user: &UserSearchParams) -> Result<RawItineraryPayload, SearchError> {
        let params = resolve(user, &self.defaults)?;
        FlightSearchSession::new(&self.provider, params).run().await
    }

    /// Market defaults applied to every search.
    pub fn defaults(&self) -> &SearchDefaults {
        &self.defaults
    }
}
