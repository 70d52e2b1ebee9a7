//! Conversion from live departures DTOs to domain types.
//!
//! Every time field is parsed onto the board date. Expected times are then
//! reconciled against their aimed counterpart so that a late train crossing
//! midnight lands on the next day.

use chrono::NaiveDate;

use crate::domain::{Departure, DepartureBoard, RailTime, StationCode, parse_time_of_day};

use super::types::{LiveDeparture, LiveStationUpdate};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// A time field held something other than "HH:MM" or ""
    #[error("departure {index}: field {field}: {source}")]
    InvalidTime {
        index: usize,
        field: &'static str,
        #[source]
        source: crate::domain::TimeError,
    },
}

/// Convert a live departures response into a departure board.
///
/// Departures keep the order the service sent them in. A single bad time
/// field fails the whole board.
pub fn convert_station_update(
    update: &LiveStationUpdate,
    board_date: NaiveDate,
) -> Result<DepartureBoard, ConversionError> {
    let items = update
        .departures
        .as_ref()
        .and_then(|d| d.all.as_deref())
        .unwrap_or(&[]);

    let departures = items
        .iter()
        .enumerate()
        .map(|(index, item)| convert_departure(index, item, board_date))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(DepartureBoard {
        station_name: update.station_name.clone(),
        station_code: StationCode::normalize(&update.station_code),
        departures,
    })
}

/// Convert one departure. `index` is only used to label errors.
pub fn convert_departure(
    index: usize,
    item: &LiveDeparture,
    board_date: NaiveDate,
) -> Result<Departure, ConversionError> {
    let time = |field: &'static str, value: &Option<String>| {
        parse_time_of_day(value.as_deref().unwrap_or(""), board_date).map_err(|source| {
            ConversionError::InvalidTime {
                index,
                field,
                source,
            }
        })
    };

    let aimed_departure = time("aimed_departure_time", &item.aimed_departure_time)?;
    let aimed_arrival = time("aimed_arrival_time", &item.aimed_arrival_time)?;
    let expected_departure = time("expected_departure_time", &item.expected_departure_time)?;
    let expected_arrival = time("expected_arrival_time", &item.expected_arrival_time)?;

    Ok(Departure {
        mode: text(&item.mode),
        platform: item.platform.clone().filter(|p| !p.is_empty()),
        operator_code: text(&item.operator),
        operator_name: text(&item.operator_name),
        aimed_departure,
        aimed_arrival,
        expected_departure: reconcile(expected_departure, aimed_departure),
        expected_arrival: reconcile(expected_arrival, aimed_arrival),
        destination_name: text(&item.destination_name),
        status: text(&item.status),
        best_arrival_estimate_mins: item.best_arrival_estimate_mins.unwrap_or(0),
        best_departure_estimate_mins: item.best_departure_estimate_mins.unwrap_or(0),
    })
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn reconcile(expected: Option<RailTime>, aimed: Option<RailTime>) -> Option<RailTime> {
    match (expected, aimed) {
        (Some(expected), Some(aimed)) => Some(expected.reconcile_with(aimed)),
        (expected, _) => expected,
    }
}
