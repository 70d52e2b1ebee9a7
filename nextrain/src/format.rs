//! Plain-text rendering of a departure board.

use crate::domain::{Departure, DepartureBoard, RailTime};

/// Shown in place of a time the service did not report.
const MISSING_TIME: &str = "--:--";

/// Render one line per departure, in board order.
pub fn format_board(board: &DepartureBoard) -> Vec<String> {
    board
        .departures
        .iter()
        .map(|departure| format_departure(&board.station_name, departure))
        .collect()
}

/// Render a single departure from `station_name` as a sentence.
///
/// ```
/// # use nextrain::domain::{Departure, RailTime};
/// # use chrono::NaiveDate;
/// # let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let departure = Departure {
///     mode: "train".into(),
///     platform: Some("4".into()),
///     operator_code: "GR".into(),
///     operator_name: "LNER".into(),
///     aimed_departure: Some(RailTime::parse_hhmm("09:15", date).unwrap()),
///     aimed_arrival: None,
///     expected_departure: Some(RailTime::parse_hhmm("09:17", date).unwrap()),
///     expected_arrival: None,
///     destination_name: "Edinburgh".into(),
///     status: "LATE".into(),
///     best_arrival_estimate_mins: 0,
///     best_departure_estimate_mins: 12,
/// };
///
/// assert_eq!(
///     nextrain::format::format_departure("London Kings Cross", &departure),
///     "Train from London Kings Cross to Edinburgh on platform 4 at 09:15 \
///      (expected at 09:17). Leaving in 12 minutes."
/// );
/// ```
pub fn format_departure(station_name: &str, departure: &Departure) -> String {
    let mut line = format!(
        "{} from {} to {} ",
        title_case(&departure.mode),
        station_name,
        departure.destination_name
    );

    if let Some(platform) = &departure.platform {
        line.push_str(&format!("on platform {platform} "));
    }

    line.push_str(&format!(
        "at {} (expected at {}). Leaving in {} minutes.",
        hhmm(departure.aimed_departure),
        hhmm(departure.expected_departure),
        departure.best_departure_estimate_mins
    ));

    line
}

fn hhmm(time: Option<RailTime>) -> String {
    time.map_or_else(|| MISSING_TIME.to_string(), |t| t.to_string())
}

/// Uppercase the first letter of every word, leaving the rest as-is.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = !c.is_alphanumeric();
    }
    out
}
