//! Clock times reported by the live departures service.
//!
//! The service sends every time of day as an "HH:MM" string, or as an empty
//! string when it has no value. Times carry no date, so each one is anchored
//! to the date the board was requested on.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;

/// If an expected time is further than this from its aimed time, it is
/// assumed to sit on the other side of midnight. Half a day picks the
/// nearest calendar day.
const ROLLOVER_THRESHOLD_HOURS: i64 = 12;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time {input:?}: {reason}")]
pub struct TimeError {
    input: String,
    reason: &'static str,
}

impl TimeError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }

    /// The string that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// An absolute timestamp built from an "HH:MM" clock time and a date.
///
/// # Examples
///
/// ```
/// use nextrain::domain::RailTime;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let time = RailTime::parse_hhmm("09:15", date).unwrap();
/// assert_eq!(time.to_string(), "09:15");
/// assert_eq!(time.date(), date);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RailTime(NaiveDateTime);

impl RailTime {
    /// Create a new RailTime from date and time components.
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self(date.and_time(time))
    }

    /// Parse a 24-hour, zero-padded "HH:MM" string on the given date.
    ///
    /// ```
    /// use nextrain::domain::RailTime;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    ///
    /// assert!(RailTime::parse_hhmm("00:00", date).is_ok());
    /// assert!(RailTime::parse_hhmm("23:59", date).is_ok());
    ///
    /// assert!(RailTime::parse_hhmm("9:15", date).is_err());
    /// assert!(RailTime::parse_hhmm("24:00", date).is_err());
    /// assert!(RailTime::parse_hhmm("12:60", date).is_err());
    /// ```
    pub fn parse_hhmm(s: &str, date: NaiveDate) -> Result<Self, TimeError> {
        let bytes = s.as_bytes();
        if bytes.len() != 5 {
            return Err(TimeError::new(s, "expected HH:MM format"));
        }

        if bytes[2] != b':' {
            return Err(TimeError::new(s, "expected colon at position 2"));
        }

        let hour = parse_two_digits(&bytes[0..2])
            .ok_or_else(|| TimeError::new(s, "invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new(s, "hour must be 00-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new(s, "invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new(s, "minute must be 00-59"));
        }

        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| TimeError::new(s, "invalid time"))?;

        Ok(Self::new(date, time))
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    pub fn time(&self) -> NaiveTime {
        self.0.time()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn to_datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// Move this time across midnight if it is implausibly far from `reference`.
    ///
    /// The service only reports clock times, so an expected departure of
    /// "00:03" for a train aimed at "23:58" parses onto the start of the
    /// same day. Times more than twelve hours before the reference are moved
    /// to the next day; more than twelve hours after, to the previous day.
    /// A delay of up to twelve hours therefore stays on the reference day.
    ///
    /// ```
    /// use nextrain::domain::RailTime;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    /// let aimed = RailTime::parse_hhmm("23:58", date).unwrap();
    /// let expected = RailTime::parse_hhmm("00:03", date).unwrap().reconcile_with(aimed);
    /// assert_eq!(expected.date(), NaiveDate::from_ymd_opt(2024, 3, 16).unwrap());
    /// ```
    pub fn reconcile_with(self, reference: RailTime) -> Self {
        let threshold = Duration::hours(ROLLOVER_THRESHOLD_HOURS);
        let delta = self.0.signed_duration_since(reference.0);

        let shift = if delta < -threshold {
            Duration::days(1)
        } else if delta > threshold {
            Duration::days(-1)
        } else {
            return self;
        };

        self.0.checked_add_signed(shift).map(Self).unwrap_or(self)
    }
}

impl fmt::Debug for RailTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RailTime({} {:02}:{:02})",
            self.date(),
            self.hour(),
            self.minute()
        )
    }
}

impl fmt::Display for RailTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Parse a time field as sent by the service.
///
/// An empty string means the service has no value for the field and maps
/// to `None`. Anything else must be a valid "HH:MM" time.
pub fn parse_time_of_day(s: &str, date: NaiveDate) -> Result<Option<RailTime>, TimeError> {
    if s.is_empty() {
        return Ok(None);
    }
    RailTime::parse_hhmm(s, date).map(Some)
}

fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}
