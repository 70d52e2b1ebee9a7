//! Live departures response DTOs.
//!
//! These types map directly onto the JSON returned by
//! `/v3/uk/train/station/{code}/live.json`. Apart from the station
//! identity, fields are optional because the service sends `null` or
//! omits them for services it knows little about.

use serde::Deserialize;

/// Response body of the live departures endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LiveStationUpdate {
    /// Human-readable name of the station.
    pub station_name: String,

    /// Station code the board was requested for.
    pub station_code: String,

    /// Departures, grouped by the service.
    #[serde(default)]
    pub departures: Option<LiveDepartures>,
}

/// Wrapper around the departure list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LiveDepartures {
    /// Every departure, nearest first.
    #[serde(default)]
    pub all: Option<Vec<LiveDeparture>>,
}

/// A single departure as sent on the wire.
///
/// Time fields are "HH:MM" strings, or empty when unknown.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LiveDeparture {
    pub mode: Option<String>,
    pub platform: Option<String>,
    /// Operator code, e.g. "GR".
    pub operator: Option<String>,
    pub operator_name: Option<String>,
    pub aimed_departure_time: Option<String>,
    pub aimed_arrival_time: Option<String>,
    pub expected_departure_time: Option<String>,
    pub expected_arrival_time: Option<String>,
    pub destination_name: Option<String>,
    pub status: Option<String>,
    pub best_arrival_estimate_mins: Option<i32>,
    pub best_departure_estimate_mins: Option<i32>,
}
