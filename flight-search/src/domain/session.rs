//! Asynchronous search session types.

use std::fmt;

use super::itinerary::Itinerary;

/// Opaque handle for one in-flight search on the remote system.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a token, returning `None` for empty text.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken({})", self.0)
    }
}

/// Progress of a search session as reported by the remote system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    Completed,
    /// Anything else, with the raw status text if one was sent
    InProgress(Option<String>),
}

impl SearchStatus {
    /// Interpret the API's status text.
    ///
    /// ```
    /// use flight_search::domain::SearchStatus;
    ///
    /// assert_eq!(SearchStatus::from_api(Some("COMPLETED")), SearchStatus::Completed);
    /// assert_eq!(
    ///     SearchStatus::from_api(Some("RESULT_STATUS_COMPLETE")),
    ///     SearchStatus::Completed
    /// );
    /// assert!(!SearchStatus::from_api(None).is_completed());
    /// ```
    pub fn from_api(status: Option<&str>) -> Self {
        match status {
            Some(s)
                if s.eq_ignore_ascii_case("completed")
                    || s.eq_ignore_ascii_case("result_status_complete") =>
            {
                SearchStatus::Completed
            }
            other => SearchStatus::InProgress(other.map(str::to_string)),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, SearchStatus::Completed)
    }
}

/// One response from creating or polling a search session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSnapshot {
    /// Present on session creation; polls may omit it
    pub session_token: Option<SessionToken>,
    pub status: SearchStatus,
    pub itineraries: Vec<Itinerary>,
}
