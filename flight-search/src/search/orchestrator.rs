//! Search orchestration.
//!
//! One search runs through a fixed sequence of phases:
//!
//! ```text
//! ResolvingLocations -> CreatingSession -> Polling -> Completed | TimedOut | Failed
//! ```
//!
//! Polling is the only phase that repeats. Attempts start on a fixed cadence
//! and are bounded both by an attempt counter and by a wall-clock deadline,
//! and every wait in the search races
//! the caller's cancellation token, so a superseded search stops promptly
//! and issues no further requests.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior, interval, timeout_at};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::domain::{Itinerary, SearchRequest, SessionToken};

use super::api::FlightApi;
use super::config::SearchConfig;
use super::error::{Endpoint, SearchError};
use super::query::build_query;
use super::resolver::LocationResolver;

/// Phase of a single search, for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    ResolvingLocations,
    CreatingSession,
    Polling,
    Completed,
    TimedOut,
    Failed,
}

impl fmt::Display for SearchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchPhase::ResolvingLocations => "resolving-locations",
            SearchPhase::CreatingSession => "creating-session",
            SearchPhase::Polling => "polling",
            SearchPhase::Completed => "completed",
            SearchPhase::TimedOut => "timed-out",
            SearchPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Drives flight searches against a [`FlightApi`].
pub struct Orchestrator<A> {
    api: A,
    config: SearchConfig,
}

impl<A: FlightApi> Orchestrator<A> {
    pub fn new(api: A, config: SearchConfig) -> Self {
        Self { api, config }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Run one search to completion.
    ///
    /// Returns the itineraries of the finished session. The list may be
    /// empty when the session completed without finding anything.
    pub async fn search(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<Itinerary>, SearchError> {
        let result = self.run(request, cancel).await;

        let phase = match &result {
            Ok(_) => SearchPhase::Completed,
            Err(SearchError::Timeout { .. }) => SearchPhase::TimedOut,
            Err(_) => SearchPhase::Failed,
        };
        debug!(%phase, "search finished");

        result
    }

    async fn run(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<Itinerary>, SearchError> {
        request.validate()?;

        debug!(
            phase = %SearchPhase::ResolvingLocations,
            origin = %request.origin,
            destination = %request.destination,
            "starting search"
        );
        let resolver = LocationResolver::new(&self.api);
        let (origin, destination) = until_cancelled(
            cancel,
            resolver.resolve_pair(&request.origin, &request.destination),
        )
        .await?;
        let origin = origin.map_err(|source| SearchError::UnresolvedLocation {
            endpoint: Endpoint::Origin,
            source,
        })?;
        let destination = destination.map_err(|source| SearchError::UnresolvedLocation {
            endpoint: Endpoint::Destination,
            source,
        })?;

        let query = build_query(request, origin, destination)?;

        debug!(
            phase = %SearchPhase::CreatingSession,
            legs = query.legs.len(),
            cabin = %query.cabin_class,
            adults = query.adults,
            "creating search session"
        );
        let created = until_cancelled(cancel, self.api.create_session(&query))
            .await?
            .map_err(|e| SearchError::SessionCreateFailed {
                message: e.to_string(),
            })?;
        let token = created
            .session_token
            .ok_or_else(|| SearchError::SessionCreateFailed {
                message: "response carried no session token".to_string(),
            })?;

        debug!(phase = %SearchPhase::Polling, "polling search session");
        self.poll_until_complete(&token, cancel).await
    }

    /// Poll a session until the completion policy is satisfied.
    ///
    /// Attempts start on a fixed cadence, one `poll_interval` apart, so the
    /// last of `max_attempts` starts `max_attempts - 1` intervals in. A poll
    /// that overruns its interval delays the rest of the schedule. Each
    /// request is bounded by `poll_timeout`, and the loop as a whole by
    /// `max_wait`, after which no new poll is issued.
    ///
    /// Transient API errors and slow requests use up an attempt and polling
    /// continues. Other errors end the search immediately.
    async fn poll_until_complete(
        &self,
        token: &SessionToken,
        cancel: &CancellationToken,
    ) -> Result<Vec<Itinerary>, SearchError> {
        let max_attempts = self.config.max_attempts;
        let poll_timeout = self.config.poll_timeout();
        let deadline = Instant::now() + self.config.max_wait();

        // `interval` rejects a zero period
        let period = self.config.poll_interval().max(Duration::from_millis(1));
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut attempts = 0;
        while attempts < max_attempts {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(SearchError::Cancelled),
                _ = ticker.tick() => {}
            }

            let started = Instant::now();
            if started >= deadline {
                return Err(SearchError::Timeout { attempts });
            }
            attempts += 1;

            let poll_deadline = deadline.min(started + poll_timeout);
            let poll = until_cancelled(cancel, self.api.poll_session(token));
            let outcome = match timeout_at(poll_deadline, poll).await {
                Ok(outcome) => outcome?,
                Err(_) if poll_deadline >= deadline => {
                    return Err(SearchError::Timeout { attempts });
                }
                Err(_) => {
                    trace!(attempt = attempts, ?poll_timeout, "poll attempt timed out");
                    continue;
                }
            };

            match outcome {
                Ok(snapshot) if self.config.completion.is_terminal(&snapshot) => {
                    debug!(
                        attempts,
                        itineraries = snapshot.itineraries.len(),
                        "search session complete"
                    );
                    return Ok(snapshot.itineraries);
                }
                Ok(snapshot) if !snapshot.itineraries.is_empty() => {
                    debug!(
                        attempt = attempts,
                        partial = snapshot.itineraries.len(),
                        "ignoring partial results from running session"
                    );
                }
                Ok(_) => {
                    trace!(attempt = attempts, "search session still running");
                }
                Err(e) if e.is_transient() => {
                    trace!(attempt = attempts, "poll attempt failed transiently");
                }
                Err(e) => {
                    return Err(SearchError::Transport {
                        message: e.to_string(),
                    });
                }
            }
        }

        Err(SearchError::Timeout { attempts })
    }
}

/// Run a future unless the token is cancelled first.
async fn until_cancelled<F: Future>(
    cancel: &CancellationToken,
    fut: F,
) -> Result<F::Output, SearchError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(SearchError::Cancelled),
        output = fut => Ok(output),
    }
}
