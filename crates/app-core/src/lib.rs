//! Core application logic for Miichu
//!
//! This crate contains the rider-facing domain: the fixed location set,
//! the route description table, profile and session types, and the
//! login/registration form validators.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod branding;
pub mod locations;
pub mod profile;
pub mod routes;
pub mod validation;

pub use locations::{Location, UnknownLocation};
pub use profile::{Credentials, Registration, RegistrationReceipt, SessionUser, Sex};
pub use routes::{describe_route, resolve, RouteDescription};
pub use validation::{FormErrors, LoginForm, RegistrationForm};
