//! Presentation of search results.
//!
//! Itineraries are rendered into [`DisplayRecord`]s, published to a shared
//! [`ResultsView`] and re-sorted on demand. Failures reach the user through
//! a [`Notifier`].

mod notify;
mod records;
mod sort;
mod view;

#[cfg(test)]
pub use notify::RecordingNotifier;
pub use notify::{LogNotifier, Notifier};
pub use records::{DisplayRecord, LegRecord, render};
pub use sort::{SortCriterion, SortKey, UnknownSortCriterion, resort, resort_rendered};
pub use view::{ResultsView, SearchTicket, ViewSnapshot};
