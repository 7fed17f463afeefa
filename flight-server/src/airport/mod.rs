//! Airport lookup: local table, remote provider search, cache and rate governor.
//!
//! Lookups are driven by user text input. Results come from a short-lived
//! cache when possible, otherwise from the remote provider (subject to the
//! rate governor), and degrade to the local table on any failure.

mod client;
pub mod data;
mod error;
mod governor;
mod lookup;
mod normalize;
mod record;
mod tracker;

pub use client::{AirportClient, AirportClientConfig, AirportEntry, AirportSearchResponse};
pub(crate) use client::{DEFAULT_API_HOST, DEFAULT_BASE_URL};
pub use error::AirportError;
pub use governor::{CallTicket, GovernorConfig, GovernorRejection, RateGovernor, RateSnapshot};
pub use lookup::{AirportLookup, AirportProvider, LookupConfig, LookupState, search_local};
pub use normalize::normalize;
pub use record::AirportRecord;
pub use tracker::{SuggestionTracker, Ticket};
