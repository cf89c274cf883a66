//! Application flow: one form submission from request to displayed results.

use tracing::debug;

use crate::domain::{FormatError, SearchRequest};
use crate::present::{Notifier, ResultsView, render};
use crate::search::{FlightApi, Orchestrator, SearchError};

/// Message shown to the user when a search fails.
pub const GENERIC_ERROR_MESSAGE: &str =
    "An error occurred while searching for flights. Please try again.";

/// What happened to a submitted search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Results are now on display
    Published { generation: u64, count: usize },

    /// A newer search started before this one finished
    Superseded,
}

/// Error from a submitted search that was still current when it failed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("failed to render results: {0}")]
    Render(#[from] FormatError),
}

/// Ties the orchestrator, the results view and the notifier together.
pub struct FlightSearch<A, N> {
    orchestrator: Orchestrator<A>,
    view: ResultsView,
    notifier: N,
}

impl<A: FlightApi, N: Notifier> FlightSearch<A, N> {
    pub fn new(orchestrator: Orchestrator<A>, notifier: N) -> Self {
        Self {
            orchestrator,
            view: ResultsView::new(),
            notifier,
        }
    }

    pub fn orchestrator(&self) -> &Orchestrator<A> {
        &self.orchestrator
    }

    pub fn view(&self) -> &ResultsView {
        &self.view
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Run a search and publish its results.
    ///
    /// Starting a search cancels the one in flight. A search that is
    /// superseded never touches the view and never notifies.
    pub async fn submit(&self, request: &SearchRequest) -> Result<SubmitOutcome, SubmitError> {
        let ticket = self.view.begin_search().await;
        let generation = ticket.generation();

        let result = match self.orchestrator.search(request, ticket.cancel_token()).await {
            Ok(itineraries) => render(itineraries).map_err(SubmitError::from),
            Err(e) => Err(SubmitError::from(e)),
        };

        match result {
            Ok(records) => {
                let count = records.len();
                if self.view.publish(&ticket, records).await {
                    debug!(generation, count, "published results");
                    Ok(SubmitOutcome::Published { generation, count })
                } else {
                    Ok(SubmitOutcome::Superseded)
                }
            }
            Err(SubmitError::Search(SearchError::Cancelled)) => {
                debug!(generation, "search superseded");
                Ok(SubmitOutcome::Superseded)
            }
            Err(e) => {
                if !self.view.finish(&ticket).await {
                    return Ok(SubmitOutcome::Superseded);
                }
                self.notifier.notify_error(GENERIC_ERROR_MESSAGE);
                Err(e)
            }
        }
    }
}
