//! Flight search: form validation, the two-step provider session, and the
//! provider's wire types.

mod client;
mod error;
mod query;
mod resolve;
mod session;
mod types;

pub use client::{FlightClient, FlightClientConfig, FlightProvider};
pub use error::{SearchError, SearchErrorKind};
pub use query::{FlightQuery, SEARCH_FLIGHTS_PATH};
pub use resolve::{MAX_PASSENGERS, extract_code, resolve};
pub use session::{FlightSearch, FlightSearchSession, SessionState};
pub use types::*;
