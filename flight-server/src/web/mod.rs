//! Web layer for the flight search front end.
//!
//! Serves the search form, runs searches, and answers autocomplete
//! requests for airports.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
