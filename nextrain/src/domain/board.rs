//! Live departure board types.

use super::{RailTime, StationCode};

/// A single service leaving the board's station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    /// Transport mode as reported by the service, e.g. "train" or "bus".
    pub mode: String,
    /// Platform, if the service has announced one.
    pub platform: Option<String>,
    /// Operator code, e.g. "GR".
    pub operator_code: String,
    /// Human-readable operator name.
    pub operator_name: String,
    pub aimed_departure: Option<RailTime>,
    pub aimed_arrival: Option<RailTime>,
    pub expected_departure: Option<RailTime>,
    pub expected_arrival: Option<RailTime>,
    pub destination_name: String,
    /// Free-text running status, e.g. "ON TIME" or "LATE".
    pub status: String,
    /// Minutes until arrival, as computed by the service.
    pub best_arrival_estimate_mins: i32,
    /// Minutes until departure, as computed by the service.
    pub best_departure_estimate_mins: i32,
}

/// Departures from one station, in the order the service returned them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureBoard {
    pub station_name: String,
    pub station_code: StationCode,
    pub departures: Vec<Departure>,
}

impl DepartureBoard {
    pub fn is_empty(&self) -> bool {
        self.departures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.departures.len()
    }
}
