//! Route descriptions shown while registering
//!
//! Riders pick a start and end stop; the registration screen shows how that
//! trip is served. The answer comes from a fixed table of known pairs.
//! Lookup is directional: a pair that is listed one way only is not
//! supported the other way.
//!
//! The Bole/Bulbula entries use different wording for the same path
//! (Bole → Bulbula reads as plain travel instructions, Bulbula → Bole leads
//! with "No direct route available"). Both texts are kept as the service
//! publishes them.

use crate::locations::Location;
use std::fmt;

/// Shown when either stop has not been picked yet
pub const SELECT_BOTH_PROMPT: &str = "Please select both start and end locations.";

/// Shown for any pair without a table entry
pub const ROUTE_NOT_SUPPORTED: &str = "Route not supported.";

const DIRECT_ROUTE: &str = "Direct route available.";

/// One row of the route table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    /// Pickup stop
    pub origin: Location,
    /// Drop-off stop
    pub destination: Location,
    /// Intermediate stops; empty for a direct route
    pub via: &'static [Location],
    /// Text shown to the rider
    pub text: &'static str,
}

impl RouteEntry {
    /// Whether the pair is served without an intermediate stop
    pub fn is_direct(&self) -> bool {
        self.via.is_empty()
    }
}

/// Every supported (origin, destination) pair
pub const ROUTE_TABLE: &[RouteEntry] = &[
    RouteEntry {
        origin: Location::Hayat,
        destination: Location::Megenaga,
        via: &[],
        text: "Travel: Hayat → Megenag. You can also travel from Megenag → Hayat.",
    },
    RouteEntry {
        origin: Location::Megenaga,
        destination: Location::Hayat,
        via: &[],
        text: "Travel: Megenag → Hayat. You can also travel from Hayat → Megenag.",
    },
    RouteEntry {
        origin: Location::Hayat,
        destination: Location::Bole,
        via: &[Location::Megenaga],
        text: "No direct route available. Travel: Hayat → Megenaga and Megenaga → Bole. \
               You can also travel from Bole → Megenaga and Megenaga → Hayat.",
    },
    RouteEntry {
        origin: Location::Bole,
        destination: Location::Megenaga,
        via: &[],
        text: DIRECT_ROUTE,
    },
    RouteEntry {
        origin: Location::Megenaga,
        destination: Location::Bole,
        via: &[],
        text: DIRECT_ROUTE,
    },
    RouteEntry {
        origin: Location::Bole,
        destination: Location::Bulbula,
        via: &[Location::Megenaga],
        text: "Travel: Bole → Megenaga → Bulbula. You can also travel from Bulbula → Megenaga → Bole.",
    },
    RouteEntry {
        origin: Location::Bulbula,
        destination: Location::Bole,
        via: &[Location::Megenaga],
        text: "No direct route available. Travel via Megenaga: Bulbula → Megenaga → Bole.",
    },
    RouteEntry {
        origin: Location::Megenaga,
        destination: Location::Aratkilo,
        via: &[],
        text: DIRECT_ROUTE,
    },
    RouteEntry {
        origin: Location::Aratkilo,
        destination: Location::Megenaga,
        via: &[],
        text: DIRECT_ROUTE,
    },
];

/// Outcome of resolving a pair of stops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDescription {
    /// One or both stops missing
    Incomplete,
    /// A table entry matched
    Known(&'static RouteEntry),
    /// No table entry for the pair
    NotSupported,
}

impl RouteDescription {
    /// Text to display
    pub fn text(&self) -> &'static str {
        match self {
            RouteDescription::Incomplete => SELECT_BOTH_PROMPT,
            RouteDescription::Known(entry) => entry.text,
            RouteDescription::NotSupported => ROUTE_NOT_SUPPORTED,
        }
    }

    /// The matched entry, if any
    pub fn entry(&self) -> Option<&'static RouteEntry> {
        match self {
            RouteDescription::Known(entry) => Some(entry),
            _ => None,
        }
    }

    /// Whether the pair is served
    pub fn is_supported(&self) -> bool {
        matches!(self, RouteDescription::Known(_))
    }
}

impl fmt::Display for RouteDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Resolve a pair of picked stops
///
/// `None` stands for a picker that has not been set.
pub fn resolve(origin: Option<Location>, destination: Option<Location>) -> RouteDescription {
    let (Some(origin), Some(destination)) = (origin, destination) else {
        return RouteDescription::Incomplete;
    };

    ROUTE_TABLE
        .iter()
        .find(|entry| entry.origin == origin && entry.destination == destination)
        .map_or(RouteDescription::NotSupported, RouteDescription::Known)
}

/// Resolve raw picker values
///
/// Empty strings mean "not picked". A non-empty value that is not a known
/// location can never match the table and resolves to
/// [`RouteDescription::NotSupported`].
pub fn describe_route(start: &str, end: &str) -> RouteDescription {
    if start.is_empty() || end.is_empty() {
        return RouteDescription::Incomplete;
    }

    match (start.parse::<Location>(), end.parse::<Location>()) {
        (Ok(origin), Ok(destination)) => resolve(Some(origin), Some(destination)),
        _ => RouteDescription::NotSupported,
    }
}
