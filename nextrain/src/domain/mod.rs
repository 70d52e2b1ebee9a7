//! Domain types for live departure boards.
//!
//! These are the validated forms of what the service sends: times are
//! absolute, empty strings have become `None`, and station codes are
//! normalised.

mod board;
mod station;
mod time;

pub use board::{Departure, DepartureBoard};
pub use station::StationCode;
pub use time::{RailTime, TimeError, parse_time_of_day};
