//! Flight search server.
//!
//! Resolves free-text origin and destination to places, runs an
//! asynchronous search session against the remote flight API, polls it to
//! completion and serves the results for display and re-sorting.

pub mod app;
pub mod domain;
pub mod present;
pub mod search;
pub mod skyscanner;
pub mod web;
