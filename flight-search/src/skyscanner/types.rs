//! Search API request and response DTOs.
//!
//! These types map directly to the JSON the API sends and expects. Response
//! types use `Option` liberally because the API omits fields rather than
//! sending null values, and sometimes sends null where a list is expected.

use serde::{Deserialize, Serialize};

/// Response from the autosuggest (location lookup) endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AutosuggestResponse {
    /// Candidate places, best match first.
    pub places: Option<Vec<PlaceDto>>,
}

/// A candidate place from autosuggest.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDto {
    /// Identifier to use in search queries.
    pub entity_id: Option<String>,

    /// Human-readable name (e.g., "London Heathrow").
    pub name: Option<String>,

    /// IATA code, when the place has one.
    pub iata_code: Option<String>,

    /// Place type (e.g., "PLACE_TYPE_AIRPORT", "PLACE_TYPE_CITY").
    #[serde(rename = "type")]
    pub place_type: Option<String>,
}

/// Body of the session creation request.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSearchBody {
    pub query: QueryDto,
}

/// The structured search query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryDto {
    pub market: String,
    pub locale: String,
    pub currency: String,
    pub query_legs: Vec<QueryLegDto>,
    /// One of the `CABIN_CLASS_*` values.
    pub cabin_class: String,
    pub adults: u32,
}

/// One leg of the search query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryLegDto {
    pub origin_place_id: String,
    pub destination_place_id: String,
    /// Travel date as "YYYY-MM-DD".
    pub date: String,
}

/// Response from session creation or polling.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Session token. Always sent on creation, usually omitted on polls.
    pub session_token: Option<String>,

    /// Session status (e.g., "COMPLETED").
    pub status: Option<String>,

    /// Itineraries found so far.
    pub itineraries: Option<Vec<ItineraryDto>>,
}

/// A priced travel option.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDto {
    pub id: Option<String>,
    pub legs: Option<Vec<LegDto>>,
    pub pricing: Option<PricingDto>,
}

/// A directional flight segment.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegDto {
    /// Local departure timestamp.
    pub departure: Option<String>,

    /// Local arrival timestamp.
    pub arrival: Option<String>,

    /// Duration in minutes.
    pub duration: Option<i64>,

    pub carriers: Option<CarriersDto>,
}

/// Carriers operating a leg.
#[derive(Debug, Clone, Deserialize)]
pub struct CarriersDto {
    pub marketing: Option<Vec<CarrierDto>>,
}

/// A marketing carrier.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarrierDto {
    pub name: Option<String>,
    pub logo_url: Option<String>,
}

/// Pricing for an itinerary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingDto {
    pub total_price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_autosuggest() {
        let json = r#"{
            "places": [
                {"entityId": "27544008", "name": "London", "iataCode": "LON", "type": "PLACE_TYPE_CITY"},
                {"entityId": "95565050", "name": "London Heathrow", "iataCode": "LHR", "type": "PLACE_TYPE_AIRPORT"}
            ]
        }"#;
        let resp: AutosuggestResponse = serde_json::from_str(json).unwrap();
        let places = resp.places.unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(places[0].entity_id.as_deref(), Some("27544008"));
        assert_eq!(places[1].iata_code.as_deref(), Some("LHR"));
        assert_eq!(places[1].place_type.as_deref(), Some("PLACE_TYPE_AIRPORT"));
    }

    #[test]
    fn deserialize_autosuggest_without_places() {
        let resp: AutosuggestResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.places.is_none());
    }

    #[test]
    fn serialize_create_body() {
        let body = CreateSearchBody {
            query: QueryDto {
                market: "UK".into(),
                locale: "en-GB".into(),
                currency: "USD".into(),
                query_legs: vec![QueryLegDto {
                    origin_place_id: "27544008".into(),
                    destination_place_id: "27537542".into(),
                    date: "2024-06-01".into(),
                }],
                cabin_class: "CABIN_CLASS_ECONOMY".into(),
                adults: 2,
            },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["query"]["market"], "UK");
        assert_eq!(value["query"]["queryLegs"][0]["originPlaceId"], "27544008");
        assert_eq!(value["query"]["queryLegs"][0]["date"], "2024-06-01");
        assert_eq!(value["query"]["cabinClass"], "CABIN_CLASS_ECONOMY");
        assert_eq!(value["query"]["adults"], 2);
    }

    #[test]
    fn deserialize_search_response() {
        let json = r#"{
            "sessionToken": "tok-1",
            "status": "COMPLETED",
            "itineraries": [{
                "id": "it-1",
                "legs": [{
                    "departure": "2024-06-01T09:05:00",
                    "arrival": "2024-06-01T12:10:00",
                    "duration": 485,
                    "carriers": {"marketing": [{"name": "Virgin Atlantic", "logoUrl": "https://logos.example/vs.png"}]}
                }],
                "pricing": {"totalPrice": 412.5}
            }]
        }"#;
        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.session_token.as_deref(), Some("tok-1"));
        let itineraries = resp.itineraries.unwrap();
        let leg = &itineraries[0].legs.as_ref().unwrap()[0];
        assert_eq!(leg.duration, Some(485));
        let carrier = &leg.carriers.as_ref().unwrap().marketing.as_ref().unwrap()[0];
        assert_eq!(carrier.logo_url.as_deref(), Some("https://logos.example/vs.png"));
        assert_eq!(
            itineraries[0].pricing.as_ref().unwrap().total_price,
            Some(412.5)
        );
    }

    #[test]
    fn deserialize_null_itineraries() {
        let resp: SearchResponse =
            serde_json::from_str(r#"{"status": "RUNNING", "itineraries": null}"#).unwrap();
        assert!(resp.itineraries.is_none());
        assert!(resp.session_token.is_none());
    }
}
