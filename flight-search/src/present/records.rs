//! Display records for search results.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::{FlightLeg, FormatError, Itinerary, format_duration, format_price, format_time};

/// One leg of a result, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegRecord {
    /// e.g. "9:05 AM"
    pub departure: String,

    pub arrival: String,

    /// e.g. "2h 30m"
    pub duration: String,

    pub carrier: String,

    pub carrier_logo: Option<String>,
}

impl LegRecord {
    fn from_leg(leg: &FlightLeg) -> Result<Self, FormatError> {
        Ok(Self {
            departure: format_time(leg.departure),
            arrival: format_time(leg.arrival),
            duration: format_duration(i64::from(leg.duration_mins))?,
            carrier: leg.carrier.name.clone(),
            carrier_logo: leg.carrier.logo_url.clone(),
        })
    }
}

/// A search result formatted for display.
///
/// Keeps a reference to the itinerary it was rendered from so sort keys can
/// be taken from the raw values rather than re-parsed from text.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRecord {
    pub id: String,

    /// Outbound first, never empty
    legs: Vec<LegRecord>,

    /// e.g. "$123.45"
    pub price: String,

    #[serde(skip)]
    itinerary: Arc<Itinerary>,
}

impl DisplayRecord {
    /// Render a single itinerary.
    pub fn from_itinerary(itinerary: Arc<Itinerary>) -> Result<Self, FormatError> {
        let legs = itinerary
            .legs()
            .iter()
            .map(LegRecord::from_leg)
            .collect::<Result<Vec<_>, _>>()?;
        let price = format_price(itinerary.price().amount())?;

        Ok(Self {
            id: itinerary.id().to_string(),
            legs,
            price,
            itinerary,
        })
    }

    /// The itinerary this record was rendered from.
    pub fn itinerary(&self) -> &Itinerary {
        &self.itinerary
    }

    /// Every leg as displayed, outbound first.
    pub fn legs(&self) -> &[LegRecord] {
        &self.legs
    }

    /// The outbound leg as displayed.
    pub fn first_leg(&self) -> &LegRecord {
        // Only built from an itinerary, which always has a leg
        &self.legs[0]
    }
}

/// Render itineraries into display records, keeping their order.
pub fn render(itineraries: Vec<Itinerary>) -> Result<Vec<DisplayRecord>, FormatError> {
    itineraries
        .into_iter()
        .map(|itinerary| DisplayRecord::from_itinerary(Arc::new(itinerary)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Carrier, Price};
    use chrono::NaiveDate;

    fn leg(dep: (u32, u32), arr: (u32, u32), mins: i64) -> FlightLeg {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        FlightLeg::new(
            date.and_hms_opt(dep.0, dep.1, 0).unwrap(),
            date.and_hms_opt(arr.0, arr.1, 0).unwrap(),
            mins,
            Carrier {
                name: "British Airways".to_string(),
                logo_url: Some("https://logos.example/ba.png".to_string()),
            },
        )
        .unwrap()
    }

    #[test]
    fn renders_one_way_itinerary() {
        let itinerary = Itinerary::new(
            "ba-117",
            vec![leg((8, 5), (10, 55), 470)],
            Price::new(412.5).unwrap(),
        )
        .unwrap();

        let records = render(vec![itinerary]).unwrap();

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id, "ba-117");
        assert_eq!(record.price, "$412.50");
        assert_eq!(
            record.first_leg(),
            &LegRecord {
                departure: "8:05 AM".to_string(),
                arrival: "10:55 AM".to_string(),
                duration: "7h 50m".to_string(),
                carrier: "British Airways".to_string(),
                carrier_logo: Some("https://logos.example/ba.png".to_string()),
            }
        );
        assert_eq!(record.itinerary().id(), "ba-117");
    }

    #[test]
    fn renders_every_leg_of_round_trip() {
        let itinerary = Itinerary::new(
            "rt",
            vec![leg((8, 0), (11, 0), 480), leg((18, 30), (6, 45), 435)],
            Price::new(900.0).unwrap(),
        )
        .unwrap();

        let records = render(vec![itinerary]).unwrap();

        let legs = records[0].legs();
        assert_eq!(legs.len(), 2);
        assert_eq!(records[0].first_leg(), &legs[0]);
        assert_eq!(legs[0].departure, "8:00 AM");
        assert_eq!(legs[1].departure, "6:30 PM");
        assert_eq!(legs[1].duration, "7h 15m");
    }

    #[test]
    fn render_preserves_input_order() {
        let itineraries: Vec<_> = [300.0, 100.0, 200.0]
            .into_iter()
            .enumerate()
            .map(|(i, p)| {
                Itinerary::new(format!("it-{i}"), vec![leg((9, 0), (10, 0), 60)], Price::new(p).unwrap())
                    .unwrap()
            })
            .collect();

        let ids: Vec<_> = render(itineraries)
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();

        assert_eq!(ids, ["it-0", "it-1", "it-2"]);
    }

    #[test]
    fn every_record_has_a_first_leg() {
        let itineraries: Vec<_> = (0..3)
            .map(|i| {
                let legs = (0..=i).map(|_| leg((9, 0), (10, 0), 60)).collect();
                Itinerary::new(format!("it-{i}"), legs, Price::new(10.0).unwrap()).unwrap()
            })
            .collect();

        for (i, record) in render(itineraries).unwrap().iter().enumerate() {
            assert_eq!(record.legs().len(), i + 1);
            assert_eq!(record.first_leg().departure, "9:00 AM");
        }
    }

    #[test]
    fn render_empty() {
        assert!(render(vec![]).unwrap().is_empty());
    }

    #[test]
    fn serializes_without_back_reference() {
        let itinerary =
            Itinerary::new("x", vec![leg((9, 0), (10, 0), 60)], Price::new(1.0).unwrap()).unwrap();
        let records = render(vec![itinerary]).unwrap();

        let json = serde_json::to_value(&records[0]).unwrap();

        assert_eq!(json["price"], "$1.00");
        assert_eq!(json["legs"][0]["carrierLogo"], "https://logos.example/ba.png");
        assert!(json.get("itinerary").is_none());
    }
}
