//! Application state for the web layer.

use std::sync::Arc;

use crate::app::FlightSearch;
use crate::present::LogNotifier;
use crate::search::{Orchestrator, SearchConfig};
use crate::skyscanner::SkyscannerClient;

/// The flight search as served over HTTP.
pub type WebFlightSearch = FlightSearch<SkyscannerClient, LogNotifier>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<WebFlightSearch>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(client: SkyscannerClient, config: SearchConfig) -> Self {
        let orchestrator = Orchestrator::new(client, config);
        Self {
            search: Arc::new(FlightSearch::new(orchestrator, LogNotifier)),
        }
    }
}
