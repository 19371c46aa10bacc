//! Miichu API Client Library
//!
//! This crate talks to the Miichu mobile backend: the HTTP transport and the
//! login and registration endpoints.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod http;

pub use auth::{AuthApi, LOGIN_PATH, REGISTER_PATH};
pub use http::{ApiClient, ApiClientConfig, ApiError};

#[cfg(any(test, feature = "test-utils"))]
pub use auth::MockAuthApi;

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
