//! Flight search request types.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Business-rule violations in a search request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// Passenger count must be a positive integer
    #[error("passenger count must be a positive integer, got {0}")]
    InvalidPassengers(i64),

    /// Round trips need a return date
    #[error("round trip requires a return date")]
    MissingReturnDate,

    /// Return date is before the departure date
    #[error("return date {return_date} is before departure date {depart_date}")]
    ReturnBeforeDeparture {
        depart_date: NaiveDate,
        return_date: NaiveDate,
    },

    /// Cabin class text doesn't name a known fare tier
    #[error("unknown cabin class: {0}")]
    UnknownCabinClass(String),

    /// Trip type text isn't one-way or round-trip
    #[error("unknown trip type: {0}")]
    UnknownTripType(String),

    /// Origin and destination resolved to the same place
    #[error("origin and destination are the same place")]
    SameOriginAndDestination,
}

/// Whether the trip has a return leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TripType {
    OneWay,
    RoundTrip,
}

impl FromStr for TripType {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "one-way" | "oneway" | "one_way" => Ok(TripType::OneWay),
            "round-trip" | "roundtrip" | "round_trip" | "return" => Ok(TripType::RoundTrip),
            _ => Err(RequestError::UnknownTripType(s.to_string())),
        }
    }
}

/// Fare tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CabinClass {
    Economy,
    PremiumEconomy,
    Business,
    First,
}

impl CabinClass {
    /// The enumerated value the search API expects.
    pub fn api_value(&self) -> &'static str {
        match self {
            CabinClass::Economy => "CABIN_CLASS_ECONOMY",
            CabinClass::PremiumEconomy => "CABIN_CLASS_PREMIUM_ECONOMY",
            CabinClass::Business => "CABIN_CLASS_BUSINESS",
            CabinClass::First => "CABIN_CLASS_FIRST",
        }
    }
}

impl FromStr for CabinClass {
    type Err = RequestError;

    /// Parse form text case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use flight_search::domain::CabinClass;
    ///
    /// assert_eq!("Economy".parse::<CabinClass>().unwrap(), CabinClass::Economy);
    /// assert_eq!("premium".parse::<CabinClass>().unwrap(), CabinClass::PremiumEconomy);
    /// assert!("steerage".parse::<CabinClass>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "economy" => Ok(CabinClass::Economy),
            "premium" | "premium_economy" => Ok(CabinClass::PremiumEconomy),
            "business" => Ok(CabinClass::Business),
            "first" => Ok(CabinClass::First),
            _ => Err(RequestError::UnknownCabinClass(s.to_string())),
        }
    }
}

impl fmt::Display for CabinClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CabinClass::Economy => "economy",
            CabinClass::PremiumEconomy => "premium economy",
            CabinClass::Business => "business",
            CabinClass::First => "first",
        };
        f.write_str(name)
    }
}

/// Trip parameters collected from the search form.
///
/// Field-level form validation (required fields and so on) is the form's
/// job. [`SearchRequest::validate`] checks only the business rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Free-text origin (city, airport name or code)
    pub origin: String,

    /// Free-text destination
    pub destination: String,

    pub depart_date: NaiveDate,

    /// Only consulted for round trips
    pub return_date: Option<NaiveDate>,

    pub passengers: u32,

    pub cabin_class: CabinClass,

    pub trip_type: TripType,
}

impl SearchRequest {
    /// Create a one-way request for a single economy passenger.
    pub fn one_way(
        origin: impl Into<String>,
        destination: impl Into<String>,
        depart_date: NaiveDate,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            depart_date,
            return_date: None,
            passengers: 1,
            cabin_class: CabinClass::Economy,
            trip_type: TripType::OneWay,
        }
    }

    /// Turn this into a round trip returning on `return_date`.
    pub fn with_return(mut self, return_date: NaiveDate) -> Self {
        self.return_date = Some(return_date);
        self.trip_type = TripType::RoundTrip;
        self
    }

    /// Set the passenger count.
    pub fn with_passengers(mut self, passengers: u32) -> Self {
        self.passengers = passengers;
        self
    }

    /// Set the cabin class.
    pub fn with_cabin_class(mut self, cabin_class: CabinClass) -> Self {
        self.cabin_class = cabin_class;
        self
    }

    /// Check the business rules.
    pub fn validate(&self) -> Result<(), RequestError> {
        if self.passengers == 0 {
            return Err(RequestError::InvalidPassengers(0));
        }

        if self.trip_type == TripType::RoundTrip {
            let return_date = self.return_date.ok_or(RequestError::MissingReturnDate)?;
            if return_date < self.depart_date {
                return Err(RequestError::ReturnBeforeDeparture {
                    depart_date: self.depart_date,
                    return_date,
                });
            }
        }

        Ok(())
    }
}

/// Convert a raw passenger count from a form into a validated count.
pub fn parse_passengers(raw: i64) -> Result<u32, RequestError> {
    u32::try_from(raw)
        .ok()
        .filter(|&n| n > 0)
        .ok_or(RequestError::InvalidPassengers(raw))
}
