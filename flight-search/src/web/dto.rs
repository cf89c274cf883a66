//! Data transfer objects for web requests and responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{CabinClass, RequestError, SearchRequest, TripType, parse_passengers};

/// Search form as submitted by the browser.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchForm {
    /// Free-text origin (city, airport name or code)
    pub origin: String,

    /// Free-text destination
    pub destination: String,

    /// Outbound date (YYYY-MM-DD)
    pub depart_date: NaiveDate,

    /// Return date, for round trips
    #[serde(default)]
    pub return_date: Option<NaiveDate>,

    pub passengers: i64,

    /// "economy", "premium", "business" or "first"
    pub cabin_class: String,

    /// "one-way" or "round-trip"
    pub trip_type: String,
}

impl SearchForm {
    /// Convert the form into a search request.
    ///
    /// A return date on a one-way form is dropped.
    pub fn into_request(self) -> Result<SearchRequest, RequestError> {
        let trip_type: TripType = self.trip_type.parse()?;
        let cabin_class: CabinClass = self.cabin_class.parse()?;
        let passengers = parse_passengers(self.passengers)?;

        let return_date = match trip_type {
            TripType::OneWay => None,
            TripType::RoundTrip => self.return_date,
        };

        Ok(SearchRequest {
            origin: self.origin,
            destination: self.destination,
            depart_date: self.depart_date,
            return_date,
            passengers,
            cabin_class,
            trip_type,
        })
    }
}

/// Query parameters for the results endpoint.
#[derive(Debug, Deserialize)]
pub struct ResultsQuery {
    /// Criterion to re-sort by before returning
    pub sort: Option<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
