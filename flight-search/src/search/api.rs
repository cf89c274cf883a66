//! The seam between the search core and the remote travel-search API.

use std::future::Future;

use crate::domain::{FlightQuery, PlaceCandidate, SearchSnapshot, SessionToken};
use crate::skyscanner::ApiError;

/// The three remote calls a flight search needs.
///
/// Implemented by [`SkyscannerClient`](crate::skyscanner::SkyscannerClient);
/// tests substitute scripted implementations.
pub trait FlightApi: Send + Sync {
    /// Look up places matching free text, best match first.
    fn lookup_places(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<PlaceCandidate>, ApiError>> + Send;

    /// Start an asynchronous search session.
    fn create_session(
        &self,
        query: &FlightQuery,
    ) -> impl Future<Output = Result<SearchSnapshot, ApiError>> + Send;

    /// Fetch the current state of a search session.
    fn poll_session(
        &self,
        token: &SessionToken,
    ) -> impl Future<Output = Result<SearchSnapshot, ApiError>> + Send;
}
