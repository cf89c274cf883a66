//! The shared results view.
//!
//! Every search is tagged with a generation number when it starts. Only the
//! search holding the latest generation may publish, so a slow search that
//! was superseded can never overwrite newer results.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::records::DisplayRecord;
use super::sort::{SortCriterion, resort};

/// Handle for one search, issued by [`ResultsView::begin_search`].
#[derive(Debug, Clone)]
pub struct SearchTicket {
    generation: u64,
    cancel: CancellationToken,
}

impl SearchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Cancelled when a newer search begins.
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }
}

/// The results currently on display.
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot {
    /// Generation of the search these results came from (0 before any).
    pub generation: u64,

    pub results: Vec<DisplayRecord>,
}

#[derive(Default)]
struct ViewState {
    latest: u64,
    shown: u64,
    records: Vec<DisplayRecord>,
    in_flight: Option<CancellationToken>,
}

impl ViewState {
    fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            generation: self.shown,
            results: self.records.clone(),
        }
    }
}

/// Thread-safe results view shared by concurrent searches.
#[derive(Clone, Default)]
pub struct ResultsView {
    inner: Arc<RwLock<ViewState>>,
}

impl ResultsView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new search, cancelling the one in flight.
    pub async fn begin_search(&self) -> SearchTicket {
        let mut state = self.inner.write().await;
        state.latest += 1;

        let cancel = CancellationToken::new();
        if let Some(previous) = state.in_flight.replace(cancel.clone()) {
            debug!(generation = state.latest - 1, "cancelling superseded search");
            previous.cancel();
        }

        SearchTicket {
            generation: state.latest,
            cancel,
        }
    }

    /// Whether no newer search has begun since this ticket was issued.
    pub async fn is_current(&self, ticket: &SearchTicket) -> bool {
        self.inner.read().await.latest == ticket.generation
    }

    /// Replace the displayed results with this search's records.
    ///
    /// Returns `false` and leaves the view untouched if the ticket is stale.
    pub async fn publish(&self, ticket: &SearchTicket, records: Vec<DisplayRecord>) -> bool {
        let mut state = self.inner.write().await;
        if state.latest != ticket.generation {
            debug!(
                generation = ticket.generation,
                latest = state.latest,
                "discarding stale results"
            );
            return false;
        }

        state.shown = ticket.generation;
        state.records = records;
        state.in_flight = None;
        true
    }

    /// Mark this search as finished without results.
    ///
    /// Returns whether the ticket was still current.
    pub async fn finish(&self, ticket: &SearchTicket) -> bool {
        let mut state = self.inner.write().await;
        if state.latest != ticket.generation {
            return false;
        }
        state.in_flight = None;
        true
    }

    /// Re-sort the displayed results in place.
    pub async fn resort(&self, criterion: SortCriterion) -> ViewSnapshot {
        let mut state = self.inner.write().await;
        resort(criterion, &mut state.records);
        state.snapshot()
    }

    /// The results currently on display.
    pub async fn snapshot(&self) -> ViewSnapshot {
        self.inner.read().await.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Carrier, FlightLeg, Itinerary, Price};
    use crate::present::render;
    use chrono::NaiveDate;

    fn records(prices: &[f64]) -> Vec<DisplayRecord> {
        let at = NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let itineraries = prices
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let leg = FlightLeg::new(
                    at,
                    at,
                    60,
                    Carrier {
                        name: "Test Air".to_string(),
                        logo_url: None,
                    },
                )
                .unwrap();
                Itinerary::new(format!("it-{i}"), vec![leg], Price::new(*p).unwrap()).unwrap()
            })
            .collect();
        render(itineraries).unwrap()
    }

    #[tokio::test]
    async fn starts_empty() {
        let view = ResultsView::new();
        let snapshot = view.snapshot().await;

        assert_eq!(snapshot.generation, 0);
        assert!(snapshot.results.is_empty());
    }

    #[tokio::test]
    async fn publish_replaces_results() {
        let view = ResultsView::new();

        let first = view.begin_search().await;
        assert!(view.publish(&first, records(&[1.0, 2.0])).await);
        let second = view.begin_search().await;
        assert!(view.publish(&second, records(&[3.0])).await);

        let snapshot = view.snapshot().await;
        assert_eq!(snapshot.generation, 2);
        assert_eq!(snapshot.results.len(), 1);
        assert_eq!(snapshot.results[0].price, "$3.00");
    }

    #[tokio::test]
    async fn begin_search_cancels_previous() {
        let view = ResultsView::new();

        let first = view.begin_search().await;
        assert!(!first.cancel_token().is_cancelled());

        let second = view.begin_search().await;
        assert!(first.cancel_token().is_cancelled());
        assert!(!second.cancel_token().is_cancelled());
        assert!(!view.is_current(&first).await);
        assert!(view.is_current(&second).await);
    }

    #[tokio::test]
    async fn stale_publish_is_refused() {
        let view = ResultsView::new();

        let older = view.begin_search().await;
        let newer = view.begin_search().await;

        // Newer finishes first, then the older one tries to publish
        assert!(view.publish(&newer, records(&[20.0])).await);
        assert!(!view.publish(&older, records(&[10.0, 11.0])).await);

        let snapshot = view.snapshot().await;
        assert_eq!(snapshot.generation, newer.generation());
        assert_eq!(snapshot.results[0].price, "$20.00");
    }

    #[tokio::test]
    async fn stale_publish_before_newer_completes_is_refused() {
        let view = ResultsView::new();

        let older = view.begin_search().await;
        let newer = view.begin_search().await;

        assert!(!view.publish(&older, records(&[10.0])).await);
        assert_eq!(view.snapshot().await.generation, 0);

        assert!(view.publish(&newer, records(&[20.0])).await);
        assert_eq!(view.snapshot().await.generation, newer.generation());
    }

    #[tokio::test]
    async fn finished_search_is_not_cancelled_by_next() {
        let view = ResultsView::new();

        let first = view.begin_search().await;
        assert!(view.finish(&first).await);
        let _second = view.begin_search().await;

        assert!(!first.cancel_token().is_cancelled());
        assert!(!view.finish(&first).await);
    }

    #[tokio::test]
    async fn resort_reorders_displayed_results() {
        let view = ResultsView::new();
        let ticket = view.begin_search().await;
        view.publish(&ticket, records(&[50.0, 10.0, 30.0])).await;

        let snapshot = view.resort(SortCriterion::Price).await;

        let prices: Vec<_> = snapshot.results.iter().map(|r| r.price.as_str()).collect();
        assert_eq!(prices, ["$10.00", "$30.00", "$50.00"]);
        assert_eq!(view.snapshot().await.results[0].price, "$10.00");
    }
}
