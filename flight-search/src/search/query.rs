//! Building the structured query for session creation.

use crate::domain::{FlightQuery, PlaceId, QueryLeg, RequestError, SearchRequest, TripType};

/// Build the query for a validated request and its resolved places.
///
/// One-way trips get a single outbound leg. Round trips add a return leg
/// with origin and destination swapped.
pub fn build_query(
    request: &SearchRequest,
    origin: PlaceId,
    destination: PlaceId,
) -> Result<FlightQuery, RequestError> {
    request.validate()?;

    if origin == destination {
        return Err(RequestError::SameOriginAndDestination);
    }

    let mut legs = vec![QueryLeg {
        origin: origin.clone(),
        destination: destination.clone(),
        date: request.depart_date,
    }];

    if request.trip_type == TripType::RoundTrip {
        let return_date = request.return_date.ok_or(RequestError::MissingReturnDate)?;
        legs.push(QueryLeg {
            origin: destination,
            destination: origin,
            date: return_date,
        });
    }

    Ok(FlightQuery {
        legs,
        cabin_class: request.cabin_class,
        adults: request.passengers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CabinClass;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn place(s: &str) -> PlaceId {
        PlaceId::parse(s).unwrap()
    }

    #[test]
    fn one_way_has_single_leg() {
        let request = SearchRequest::one_way("London", "New York", date(2024, 6, 1))
            .with_passengers(2)
            .with_cabin_class(CabinClass::Business);

        let query = build_query(&request, place("LOND"), place("NYCA")).unwrap();

        assert_eq!(
            query.legs,
            vec![QueryLeg {
                origin: place("LOND"),
                destination: place("NYCA"),
                date: date(2024, 6, 1),
            }]
        );
        assert_eq!(query.cabin_class, CabinClass::Business);
        assert_eq!(query.adults, 2);
    }

    #[test]
    fn one_way_ignores_return_date() {
        let mut request = SearchRequest::one_way("London", "New York", date(2024, 6, 1));
        request.return_date = Some(date(2024, 6, 8));

        let query = build_query(&request, place("LOND"), place("NYCA")).unwrap();
        assert_eq!(query.legs.len(), 1);
    }

    #[test]
    fn round_trip_reverses_second_leg() {
        let request = SearchRequest::one_way("London", "New York", date(2024, 6, 1))
            .with_return(date(2024, 6, 8));

        let query = build_query(&request, place("LOND"), place("NYCA")).unwrap();

        assert_eq!(query.legs.len(), 2);
        assert_eq!(query.legs[1].origin, place("NYCA"));
        assert_eq!(query.legs[1].destination, place("LOND"));
        assert_eq!(query.legs[1].date, date(2024, 6, 8));
    }

    #[test]
    fn invalid_requests_rejected() {
        let request = SearchRequest::one_way("London", "New York", date(2024, 6, 1))
            .with_passengers(0);
        assert_eq!(
            build_query(&request, place("LOND"), place("NYCA")),
            Err(RequestError::InvalidPassengers(0))
        );

        let request = SearchRequest::one_way("London", "London", date(2024, 6, 1));
        assert_eq!(
            build_query(&request, place("LOND"), place("LOND")),
            Err(RequestError::SameOriginAndDestination)
        );
    }
}
