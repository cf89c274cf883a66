//! Conversion between search API DTOs and domain types.

use chrono::{DateTime, NaiveDateTime};
use tracing::debug;

use crate::domain::{
    Carrier, DomainError, FlightLeg, FlightQuery, Itinerary, PlaceCandidate, PlaceId, Price,
    SearchSnapshot, SearchStatus, SessionToken,
};

use super::types::{
    AutosuggestResponse, CreateSearchBody, ItineraryDto, LegDto, QueryDto, QueryLegDto,
    SearchResponse,
};

/// Carrier name used when a leg lists no marketing carrier.
const UNKNOWN_CARRIER: &str = "Unknown carrier";

/// Naive timestamp layouts accepted after RFC 3339 fails.
const NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// Failed to parse a timestamp
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Values violate a domain invariant
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Market, locale and currency for outgoing queries.
#[derive(Debug, Clone, Copy)]
pub struct QueryContext<'a> {
    pub market: &'a str,
    pub locale: &'a str,
    pub currency: &'a str,
}

/// Build the session creation body for a query.
pub fn query_to_dto(query: &FlightQuery, ctx: QueryContext<'_>) -> CreateSearchBody {
    let query_legs = query
        .legs
        .iter()
        .map(|leg| QueryLegDto {
            origin_place_id: leg.origin.as_str().to_string(),
            destination_place_id: leg.destination.as_str().to_string(),
            date: leg.date.format("%Y-%m-%d").to_string(),
        })
        .collect();

    CreateSearchBody {
        query: QueryDto {
            market: ctx.market.to_string(),
            locale: ctx.locale.to_string(),
            currency: ctx.currency.to_string(),
            query_legs,
            cabin_class: query.cabin_class.api_value().to_string(),
            adults: query.adults,
        },
    }
}

/// Convert an autosuggest response into ranked candidates.
///
/// Entries without a usable identifier are dropped; order is preserved.
pub fn convert_places(response: &AutosuggestResponse) -> Vec<PlaceCandidate> {
    response
        .places
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .filter_map(|place| {
            let id = PlaceId::parse(place.entity_id.as_deref()?).ok()?;
            Some(PlaceCandidate {
                name: place.name.clone().unwrap_or_else(|| id.to_string()),
                iata_code: place.iata_code.clone(),
                id,
            })
        })
        .collect()
}

/// Convert a create or poll response into a snapshot.
///
/// Itineraries that fail conversion are skipped rather than failing the
/// whole response.
pub fn convert_search_response(response: &SearchResponse) -> SearchSnapshot {
    let raw = response.itineraries.as_deref().unwrap_or(&[]);
    let mut itineraries = Vec::with_capacity(raw.len());
    let mut skipped = 0usize;

    for (index, dto) in raw.iter().enumerate() {
        match convert_itinerary(dto, index) {
            Ok(itinerary) => itineraries.push(itinerary),
            Err(e) => {
                skipped += 1;
                debug!(index, error = %e, "skipping itinerary");
            }
        }
    }

    if skipped > 0 {
        debug!(skipped, kept = itineraries.len(), "dropped unconvertible itineraries");
    }

    SearchSnapshot {
        session_token: response.session_token.clone().and_then(SessionToken::new),
        status: SearchStatus::from_api(response.status.as_deref()),
        itineraries,
    }
}

/// Convert a single itinerary.
///
/// `index` names the itinerary when the API sends no id.
pub fn convert_itinerary(dto: &ItineraryDto, index: usize) -> Result<Itinerary, ConversionError> {
    let legs = dto
        .legs
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .map(convert_leg)
        .collect::<Result<Vec<_>, _>>()?;

    let total = dto
        .pricing
        .as_ref()
        .and_then(|p| p.total_price)
        .ok_or(ConversionError::MissingField("pricing.totalPrice"))?;
    let price = Price::new(total)?;

    let id = dto
        .id
        .clone()
        .unwrap_or_else(|| format!("itinerary-{index}"));

    Ok(Itinerary::new(id, legs, price)?)
}

fn convert_leg(dto: &LegDto) -> Result<FlightLeg, ConversionError> {
    let departure = dto
        .departure
        .as_deref()
        .ok_or(ConversionError::MissingField("legs.departure"))?;
    let arrival = dto
        .arrival
        .as_deref()
        .ok_or(ConversionError::MissingField("legs.arrival"))?;
    let duration = dto
        .duration
        .ok_or(ConversionError::MissingField("legs.duration"))?;

    let carrier = dto
        .carriers
        .as_ref()
        .and_then(|c| c.marketing.as_deref())
        .and_then(|m| m.first())
        .map(|c| Carrier {
            name: c
                .name
                .clone()
                .unwrap_or_else(|| UNKNOWN_CARRIER.to_string()),
            logo_url: c.logo_url.clone(),
        })
        .unwrap_or_else(|| Carrier {
            name: UNKNOWN_CARRIER.to_string(),
            logo_url: None,
        });

    Ok(FlightLeg::new(
        parse_timestamp(departure)?,
        parse_timestamp(arrival)?,
        duration,
        carrier,
    )?)
}

/// Parse an API timestamp into local wall-clock time.
///
/// RFC 3339 timestamps keep their local part; the offset is dropped.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime, ConversionError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }

    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| ConversionError::InvalidTimestamp(s.to_string()))
}
