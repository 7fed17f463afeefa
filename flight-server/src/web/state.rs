//! Application state for the web layer.

use std::sync::Arc;

use crate::airport::{AirportClient, AirportLookup};
use crate::flights::{FlightClient, FlightSearch};

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Airport autocomplete with cache, rate governor and local fallback
    pub airports: Arc<AirportLookup<AirportClient>>,

    /// Flight search sessions
    pub flights: Arc<FlightSearch<FlightClient>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(airports: AirportLookup<AirportClient>, flights: FlightSearch<FlightClient>) -> Self {
        Self {
            airports: Arc::new(airports),
            flights: Arc::new(flights),
        }
    }
}
