//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. They are
//! distinct from API/IO errors.

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Itinerary has no legs
    #[error("itinerary must have at least one leg")]
    EmptyItinerary,

    /// Leg duration is negative
    #[error("leg duration must not be negative: {0} minutes")]
    NegativeDuration(i64),

    /// Leg duration does not fit in the minutes field
    #[error("leg duration is out of range: {0} minutes")]
    DurationOutOfRange(i64),

    /// Price is NaN, infinite or negative
    #[error("price must be finite and non-negative: {0}")]
    InvalidPrice(f64),
}
