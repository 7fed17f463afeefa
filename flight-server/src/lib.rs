//! Flight search server.
//!
//! A web front end for a third-party flight data provider: airport
//! autocomplete with caching, rate limiting and a local fallback, and a
//! two-step session protocol for flight searches.

pub mod airport;
pub mod config;
pub mod flights;
pub mod format;
pub mod web;
