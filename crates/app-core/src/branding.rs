//! Miichu Branding
//!
//! Names and copy shown on the landing screen and in the command-line
//! front end.

/// Application name
pub const APP_NAME: &str = "Miichu";

/// Landing screen headline
pub const APP_HEADLINE: &str = "Get the Bike";

/// Application tagline
pub const APP_TAGLINE: &str = "Affordable Rides, Endless Adventures.";

/// Call to action on the landing screen
pub const GET_STARTED_LABEL: &str = "GET Started";

/// Application version (from Cargo.toml)
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// One-line banner for the command-line front end
pub fn banner() -> String {
    format!("{} v{}: {}", APP_NAME, APP_VERSION, APP_TAGLINE)
}
