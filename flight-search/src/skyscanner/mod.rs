//! Flight search API client.
//!
//! This module provides an HTTP client for the Skyscanner live flight search
//! API (served through RapidAPI).
//!
//! Key characteristics of the API:
//! - Searches are **asynchronous**: creating a search returns a session
//!   token, and results accumulate while the session is polled
//! - Places are referred to by opaque entity IDs obtained from autosuggest
//! - Timestamps are local to the airport they describe

mod client;
mod convert;
mod error;
mod types;

pub use client::{SkyscannerClient, SkyscannerConfig};
pub use convert::{ConversionError, parse_timestamp};
pub use error::ApiError;
pub use types::{
    AutosuggestResponse, CarrierDto, CarriersDto, CreateSearchBody, ItineraryDto, LegDto,
    PlaceDto, PricingDto, QueryDto, QueryLegDto, SearchResponse,
};
