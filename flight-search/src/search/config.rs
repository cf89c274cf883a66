//! Search configuration for the orchestrator.

use std::str::FromStr;
use std::time::Duration;

use crate::domain::SearchSnapshot;

/// Default per-request poll timeout (10 seconds).
const DEFAULT_POLL_TIMEOUT_MS: u64 = 10_000;

/// When a poll response ends the polling loop.
///
/// The two policies differ when partial results arrive before the session
/// completes, e.g. a round trip where only outbound itineraries have been
/// priced so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompletionPolicy {
    /// Only a completed status ends polling. Partial lists are ignored.
    #[default]
    StatusOnly,

    /// A completed status or any non-empty itinerary list ends polling.
    FirstResults,
}

impl CompletionPolicy {
    /// Whether this snapshot ends the polling loop.
    pub fn is_terminal(&self, snapshot: &SearchSnapshot) -> bool {
        match self {
            CompletionPolicy::StatusOnly => snapshot.status.is_completed(),
            CompletionPolicy::FirstResults => {
                snapshot.status.is_completed() || !snapshot.itineraries.is_empty()
            }
        }
    }
}

/// Error returned when parsing an unknown completion policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown completion policy: {0} (expected \"status\" or \"first-results\")")]
pub struct UnknownCompletionPolicy(String);

impl FromStr for CompletionPolicy {
    type Err = UnknownCompletionPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "status" | "status-only" | "status_only" => Ok(CompletionPolicy::StatusOnly),
            "first-results" | "first_results" => Ok(CompletionPolicy::FirstResults),
            _ => Err(UnknownCompletionPolicy(s.to_string())),
        }
    }
}

/// Configuration parameters for a flight search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of poll requests per search.
    pub max_attempts: u32,

    /// Time between the starts of successive poll requests (milliseconds).
    pub poll_interval_ms: u64,

    /// Longest a single poll request may take (milliseconds).
    ///
    /// A poll that takes longer uses up its attempt and polling continues.
    pub poll_timeout_ms: u64,

    /// When a poll response counts as finished.
    pub completion: CompletionPolicy,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_attempts: u32, poll_interval_ms: u64, completion: CompletionPolicy) -> Self {
        Self {
            max_attempts,
            poll_interval_ms,
            poll_timeout_ms: DEFAULT_POLL_TIMEOUT_MS,
            completion,
        }
    }

    /// Set the per-request poll timeout.
    pub fn with_poll_timeout(mut self, poll_timeout_ms: u64) -> Self {
        self.poll_timeout_ms = poll_timeout_ms;
        self
    }

    /// Set the completion policy.
    pub fn with_completion(mut self, completion: CompletionPolicy) -> Self {
        self.completion = completion;
        self
    }

    /// Returns the poll interval as a Duration.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Returns the per-request poll timeout as a Duration.
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    /// Wall-clock budget for the whole polling loop.
    ///
    /// Room for every attempt to start on schedule, plus one full request
    /// timeout for the last one.
    pub fn max_wait(&self) -> Duration {
        self.poll_interval()
            .saturating_mul(self.max_attempts.saturating_sub(1))
            .saturating_add(self.poll_timeout())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            poll_interval_ms: 1000,
            poll_timeout_ms: DEFAULT_POLL_TIMEOUT_MS,
            completion: CompletionPolicy::StatusOnly,
        }
    }
}
