//! Web calculator front end for the Optira pricing library.
//!
//! Serves a single-page HTML form that collects market parameters, a
//! payoff expression and an optional JSON object of extra constants, then
//! prices the payoff by Monte Carlo simulation and renders the result (or
//! the engine's error text) back into the page.
//!
//! The server is a thin adapter: it owns HTTP, forms and markup, while all
//! validation and numerical work happens in the pricer crates. A malformed
//! expression can only ever produce an error message on the page, never
//! crash the process.

pub mod config;
pub mod routes;
pub mod server;

/// Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
