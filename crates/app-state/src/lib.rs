//! Application state management for Miichu
//!
//! This crate holds the logged-in rider state and the submission tracker
//! that keeps each screen to one request in flight.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod mutation;
pub mod session;

pub use mutation::{MutationState, Submission, SubmissionError, SubmissionTicket};
pub use session::{AuthError, AuthSession, AuthState};
