//! Location resolution: free text to place identifier.

use futures::future::join;
use tracing::trace;

use crate::domain::PlaceId;

use super::api::FlightApi;
use super::error::ResolutionFailure;

/// Resolves free-text place queries with one lookup call each.
///
/// Takes the first candidate. No caching: every call goes to the API.
pub struct LocationResolver<'a, A> {
    api: &'a A,
}

impl<'a, A: FlightApi> LocationResolver<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Resolve one query to the best-matching place.
    pub async fn resolve(&self, query: &str) -> Result<PlaceId, ResolutionFailure> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ResolutionFailure::EmptyQuery);
        }

        let candidates = self.api.lookup_places(query).await?;
        let best = candidates
            .into_iter()
            .next()
            .ok_or_else(|| ResolutionFailure::NoMatch {
                query: query.to_string(),
            })?;

        trace!(query, place = %best.id, name = %best.name, "resolved location");
        Ok(best.id)
    }

    /// Resolve origin and destination concurrently.
    pub async fn resolve_pair(
        &self,
        origin: &str,
        destination: &str,
    ) -> (
        Result<PlaceId, ResolutionFailure>,
        Result<PlaceId, ResolutionFailure>,
    ) {
        join(self.resolve(origin), self.resolve(destination)).await
    }
}
