//! Place identifiers returned by the location lookup.

use std::fmt;

use serde::Serialize;

/// Error returned when constructing a place identifier from empty text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("place identifier must not be empty")]
pub struct InvalidPlaceId;

/// An opaque location identifier understood by the search API.
///
/// Always non-empty. A failed lookup never produces a `PlaceId`; the
/// resolver reports a failure instead.
///
/// # Examples
///
/// ```
/// use flight_search::domain::PlaceId;
///
/// let lhr = PlaceId::parse("95565050").unwrap();
/// assert_eq!(lhr.as_str(), "95565050");
///
/// assert!(PlaceId::parse("").is_err());
/// assert!(PlaceId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PlaceId(String);

impl PlaceId {
    /// Parse an identifier, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidPlaceId> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(InvalidPlaceId);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlaceId({})", self.0)
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One candidate from a location lookup, in the order the API ranked it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceCandidate {
    pub id: PlaceId,
    pub name: String,
    /// IATA code for airports and cities that have one
    pub iata_code: Option<String>,
}
