//! Structured query sent when creating a search session.

use chrono::NaiveDate;

use super::place::PlaceId;
use super::request::CabinClass;

/// One directional leg of the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryLeg {
    pub origin: PlaceId,
    pub destination: PlaceId,
    pub date: NaiveDate,
}

/// Everything the remote system needs to start a search.
///
/// Market, locale and currency are properties of the client rather than
/// the query, so they are not carried here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlightQuery {
    pub legs: Vec<QueryLeg>,
    pub cabin_class: CabinClass,
    pub adults: u32,
}
