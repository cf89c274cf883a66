//! Domain types for the flight search.
//!
//! All types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod error;
mod format;
mod itinerary;
mod place;
mod query;
mod request;
mod session;

pub use error::DomainError;
pub use format::{
    FormatError, format_duration, format_price, format_time, minutes_since_midnight,
    parse_duration, parse_price, parse_time,
};
pub use itinerary::{Carrier, FlightLeg, Itinerary, Price};
pub use place::{InvalidPlaceId, PlaceCandidate, PlaceId};
pub use query::{FlightQuery, QueryLeg};
pub use request::{CabinClass, RequestError, SearchRequest, TripType, parse_passengers};
pub use session::{SearchSnapshot, SearchStatus, SessionToken};
