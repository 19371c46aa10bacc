//! Pickup and drop-off locations
//!
//! The service runs between a closed set of five named stops. Names are
//! matched exactly, the same way the pickers on the registration screen
//! submit them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A pickup/drop-off point served by Miichu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Location {
    /// Hayat
    Hayat,
    /// Megenaga, the hub most routes pass through
    Megenaga,
    /// Bole
    Bole,
    /// Bulbula
    Bulbula,
    /// Aratkilo
    Aratkilo,
}

impl Location {
    /// Every location, in picker order
    pub const ALL: [Location; 5] = [
        Location::Hayat,
        Location::Megenaga,
        Location::Bole,
        Location::Bulbula,
        Location::Aratkilo,
    ];

    /// The name shown in pickers and sent on the wire
    pub fn name(&self) -> &'static str {
        match self {
            Location::Hayat => "Hayat",
            Location::Megenaga => "Megenaga",
            Location::Bole => "Bole",
            Location::Bulbula => "Bulbula",
            Location::Aratkilo => "Aratkilo",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string does not name one of the five locations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown location: {0}")]
pub struct UnknownLocation(pub String);

impl FromStr for Location {
    type Err = UnknownLocation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::ALL
            .into_iter()
            .find(|location| location.name() == s)
            .ok_or_else(|| UnknownLocation(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_names() {
        for location in Location::ALL {
            assert_eq!(location.name().parse::<Location>(), Ok(location));
        }
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert!("bole".parse::<Location>().is_err());
        assert!("BOLE".parse::<Location>().is_err());
        assert!(" Bole".parse::<Location>().is_err());
    }

    #[test]
    fn test_parse_unknown() {
        let err = "Piassa".parse::<Location>().unwrap_err();
        assert_eq!(err, UnknownLocation("Piassa".to_string()));
        assert_eq!(err.to_string(), "Unknown location: Piassa");
    }

    #[test]
    fn test_display_matches_name() {
        assert_eq!(Location::Aratkilo.to_string(), "Aratkilo");
        assert_eq!(format!("{}", Location::Megenaga), "Megenaga");
    }

    #[test]
    fn test_serde_uses_name() {
        let json = serde_json::to_string(&Location::Bulbula).unwrap();
        assert_eq!(json, "\"Bulbula\"");
        let back: Location = serde_json::from_str("\"Hayat\"").unwrap();
        assert_eq!(back, Location::Hayat);
    }
}
