//! Web layer for the flight search.
//!
//! Provides a JSON API for running searches and reading the current
//! results.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, WebFlightSearch};
