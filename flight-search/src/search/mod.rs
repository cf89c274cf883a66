//! Flight search: location resolution, session creation and bounded polling.
//!
//! The [`Orchestrator`] owns the sequence. It talks to the remote API only
//! through the [`FlightApi`] trait so tests can script responses.

mod api;
mod config;
mod error;
mod orchestrator;
mod query;
mod resolver;


pub use api::FlightApi;
pub use config::{CompletionPolicy, SearchConfig, UnknownCompletionPolicy};
pub use error::{Endpoint, ResolutionFailure, SearchError, SearchErrorKind};
pub use orchestrator::{Orchestrator, SearchPhase};
pub use query::build_query;
pub use resolver::LocationResolver;
