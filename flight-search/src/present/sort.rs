//! Re-sorting of displayed results.
//!
//! All sorts are stable and ascending: records that tie keep their relative
//! order from the previous arrangement.

use std::fmt;
use std::str::FromStr;

use crate::domain::{FormatError, Price, minutes_since_midnight, parse_duration, parse_price, parse_time};

use super::records::DisplayRecord;

/// What to sort results by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortCriterion {
    /// Total price
    Price,
    /// Outbound leg duration
    Duration,
    /// Outbound departure time of day
    DepartureTime,
}

/// Error returned when parsing an unknown sort criterion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort criterion: {0} (expected price, duration or departure)")]
pub struct UnknownSortCriterion(pub String);

impl FromStr for SortCriterion {
    type Err = UnknownSortCriterion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "price" => Ok(SortCriterion::Price),
            "duration" => Ok(SortCriterion::Duration),
            "departure" | "departuretime" | "departure_time" | "departure-time" => {
                Ok(SortCriterion::DepartureTime)
            }
            _ => Err(UnknownSortCriterion(s.to_string())),
        }
    }
}

impl fmt::Display for SortCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortCriterion::Price => "price",
            SortCriterion::Duration => "duration",
            SortCriterion::DepartureTime => "departure",
        };
        f.write_str(name)
    }
}

/// Comparable key for one record under one criterion.
///
/// Keys are only compared with keys for the same criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey {
    Price(Price),
    Minutes(i64),
}

impl SortKey {
    /// Key from the record's underlying itinerary.
    pub fn from_record(criterion: SortCriterion, record: &DisplayRecord) -> Self {
        let itinerary = record.itinerary();
        let leg = itinerary.first_leg();
        match criterion {
            SortCriterion::Price => SortKey::Price(itinerary.price()),
            SortCriterion::Duration => SortKey::Minutes(i64::from(leg.duration_mins)),
            SortCriterion::DepartureTime => {
                SortKey::Minutes(i64::from(minutes_since_midnight(leg.departure)))
            }
        }
    }

    /// Key re-derived from the record's rendered text.
    ///
    /// Agrees with [`SortKey::from_record`] for any record produced by
    /// [`render`](super::render). Intended for callers that only hold text.
    pub fn from_rendered(
        criterion: SortCriterion,
        record: &DisplayRecord,
    ) -> Result<Self, FormatError> {
        let leg = record.first_leg();
        match criterion {
            SortCriterion::Price => {
                let amount = parse_price(&record.price)?;
                Price::new(amount)
                    .map(SortKey::Price)
                    .map_err(|_| FormatError::InvalidAmount(amount))
            }
            SortCriterion::Duration => parse_duration(&leg.duration).map(SortKey::Minutes),
            SortCriterion::DepartureTime => {
                parse_time(&leg.departure).map(|m| SortKey::Minutes(i64::from(m)))
            }
        }
    }
}

/// Stable ascending re-sort of records by the given criterion.
pub fn resort(criterion: SortCriterion, records: &mut [DisplayRecord]) {
    records.sort_by_key(|record| SortKey::from_record(criterion, record));
}

/// Like [`resort`], but with keys parsed from the rendered text.
///
/// On error the records are left untouched.
pub fn resort_rendered(
    criterion: SortCriterion,
    records: &mut Vec<DisplayRecord>,
) -> Result<(), FormatError> {
    let keys = records
        .iter()
        .map(|record| SortKey::from_rendered(criterion, record))
        .collect::<Result<Vec<_>, _>>()?;

    let mut keyed: Vec<_> = keys.into_iter().zip(records.drain(..)).collect();
    keyed.sort_by_key(|(key, _)| *key);
    records.extend(keyed.into_iter().map(|(_, record)| record));

    Ok(())
}
