//! Search error types.

use std::fmt;

use crate::domain::RequestError;
use crate::skyscanner::ApiError;

/// Why a free-text place query could not be turned into a place identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionFailure {
    /// Query text was empty or whitespace
    #[error("location query is empty")]
    EmptyQuery,

    /// Lookup succeeded but returned no candidates
    #[error("no location matches {query:?}")]
    NoMatch { query: String },

    /// Lookup request failed
    #[error("location lookup failed: {message}")]
    Transport { message: String },

    /// Lookup response could not be decoded
    #[error("malformed location lookup response: {message}")]
    Malformed { message: String },
}

impl From<ApiError> for ResolutionFailure {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Json { .. } => ResolutionFailure::Malformed {
                message: err.to_string(),
            },
            _ => ResolutionFailure::Transport {
                message: err.to_string(),
            },
        }
    }
}

/// Which end of the trip a location belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Origin,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Origin => f.write_str("origin"),
            Endpoint::Destination => f.write_str("destination"),
        }
    }
}

/// Category of a search failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchErrorKind {
    InvalidRequest,
    UnresolvedLocation,
    SessionCreateFailed,
    Timeout,
    Transport,
    Cancelled,
}

/// Error from a flight search.
///
/// Every failure ends the search; there is no partial success.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SearchError {
    /// Request breaks a business rule
    #[error("invalid search request: {0}")]
    InvalidRequest(#[from] RequestError),

    /// Origin or destination could not be resolved
    #[error("could not resolve {endpoint}: {source}")]
    UnresolvedLocation {
        endpoint: Endpoint,
        source: ResolutionFailure,
    },

    /// Session creation failed or returned no token
    #[error("failed to create search session: {message}")]
    SessionCreateFailed { message: String },

    /// Polling ran out of attempts or time
    #[error("search timed out after {attempts} poll attempts")]
    Timeout { attempts: u32 },

    /// Polling hit a non-retryable API error
    #[error("search transport error: {message}")]
    Transport { message: String },

    /// A newer search replaced this one
    #[error("search cancelled")]
    Cancelled,
}

impl SearchError {
    pub fn kind(&self) -> SearchErrorKind {
        match self {
            SearchError::InvalidRequest(_) => SearchErrorKind::InvalidRequest,
            SearchError::UnresolvedLocation { .. } => SearchErrorKind::UnresolvedLocation,
            SearchError::SessionCreateFailed { .. } => SearchErrorKind::SessionCreateFailed,
            SearchError::Timeout { .. } => SearchErrorKind::Timeout,
            SearchError::Transport { .. } => SearchErrorKind::Transport,
            SearchError::Cancelled => SearchErrorKind::Cancelled,
        }
    }
}
