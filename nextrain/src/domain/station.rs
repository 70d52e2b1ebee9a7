//! Station code types.

use std::fmt;

/// A station identifier in the service's own code space (e.g. "KGX").
///
/// Codes are case-normalised to uppercase on construction. No other
/// validation happens here: the service decides which codes exist.
///
/// # Examples
///
/// ```
/// use nextrain::domain::StationCode;
///
/// let kgx = StationCode::normalize("kgx");
/// assert_eq!(kgx.as_str(), "KGX");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StationCode(String);

impl StationCode {
    /// Build a station code from user input, uppercasing it.
    pub fn normalize(s: &str) -> Self {
        Self(s.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.0)
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uppercases_input() {
        assert_eq!(StationCode::normalize("kgx").as_str(), "KGX");
        assert_eq!(StationCode::normalize("Edb").as_str(), "EDB");
        assert_eq!(StationCode::normalize("PAD").as_str(), "PAD");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(StationCode::normalize(" kgx\n").as_str(), "KGX");
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", StationCode::normalize("pad")), "PAD");
    }

    #[test]
    fn debug() {
        assert_eq!(
            format!("{:?}", StationCode::normalize("eus")),
            "StationCode(EUS)"
        );
    }
}
