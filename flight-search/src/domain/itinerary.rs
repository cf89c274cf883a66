//! Itinerary types.
//!
//! An itinerary is one priced travel option: an ordered list of legs (one
//! for a one-way search, two for a round trip) and a total price. Itineraries
//! are immutable once received.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use super::error::DomainError;

/// A non-negative, finite total price in the search currency.
#[derive(Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// Create a price, rejecting NaN, infinite and negative amounts.
    pub fn new(amount: f64) -> Result<Self, DomainError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(DomainError::InvalidPrice(amount));
        }
        Ok(Self(amount.abs()))
    }

    /// Returns the amount.
    pub fn amount(&self) -> f64 {
        self.0
    }
}

// Amounts are always finite, so total_cmp agrees with numeric order.
impl Eq for Price {}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Price({:.2})", self.0)
    }
}

/// Marketing carrier for a leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Carrier {
    pub name: String,
    pub logo_url: Option<String>,
}

/// One directional flight segment.
///
/// Departure and arrival are local wall-clock times at the respective
/// airports, so arrival can appear earlier than departure on westbound
/// flights. The duration is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlightLeg {
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
    pub duration_mins: u32,
    pub carrier: Carrier,
}

impl FlightLeg {
    /// Create a leg, rejecting negative or unrepresentable durations.
    pub fn new(
        departure: NaiveDateTime,
        arrival: NaiveDateTime,
        duration_mins: i64,
        carrier: Carrier,
    ) -> Result<Self, DomainError> {
        if duration_mins < 0 {
            return Err(DomainError::NegativeDuration(duration_mins));
        }
        let duration_mins = u32::try_from(duration_mins)
            .map_err(|_| DomainError::DurationOutOfRange(duration_mins))?;
        Ok(Self {
            departure,
            arrival,
            duration_mins,
            carrier,
        })
    }
}

/// One candidate flight option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Itinerary {
    id: String,
    legs: Vec<FlightLeg>,
    price: Price,
}

impl Itinerary {
    /// Create an itinerary. At least one leg is required.
    pub fn new(
        id: impl Into<String>,
        legs: Vec<FlightLeg>,
        price: Price,
    ) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyItinerary);
        }
        Ok(Self {
            id: id.into(),
            legs,
            price,
        })
    }

    /// The API's identifier for this itinerary.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// All legs, outbound first.
    pub fn legs(&self) -> &[FlightLeg] {
        &self.legs
    }

    /// The outbound leg.
    pub fn first_leg(&self) -> &FlightLeg {
        // Non-empty by construction
        &self.legs[0]
    }

    pub fn price(&self) -> Price {
        self.price
    }
}
