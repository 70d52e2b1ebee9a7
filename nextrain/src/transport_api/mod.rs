//! Transport API live departures client.
//!
//! This module provides an HTTP client for the Transport API's UK train
//! endpoints. Requests are signed with an app ID and key passed as query
//! parameters.
//!
//! Key characteristics of the service:
//! - Times are "HH:MM" strings with no date, or empty when unknown
//! - Departures arrive nearest first and are kept in that order
//! - Error bodies are JSON too, so status is checked before decoding

mod client;
mod convert;
mod error;
mod types;

pub use client::{TransportApiClient, TransportApiConfig};
pub use convert::{ConversionError, convert_station_update};
pub use error::ApiError;
pub use types::{LiveDeparture, LiveDepartures, LiveStationUpdate};
