//! Miichu rider client
//!
//! Command-line front end over the Miichu crates: it parses arguments,
//! opens the saved session and drives the landing, login and registration
//! screens.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod cli;

pub use app::{App, AppConfig};
pub use cli::{Cli, Commands};
