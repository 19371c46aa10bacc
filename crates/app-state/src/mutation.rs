//! Submission tracking
//!
//! Every screen that talks to the backend owns a [`Submission`]. It moves
//! through Idle → Pending → Success/Error and refuses a second request while
//! one is pending, which is what drives the busy spinner on the submit
//! button.

use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;

/// Submission errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// A request is already in flight
    #[error("A submission is already in progress")]
    Busy,
}

/// Result type for submission operations
pub type Result<T> = std::result::Result<T, SubmissionError>;

/// Submission state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationState {
    /// Nothing submitted yet, or the last ticket was dropped unsettled
    #[default]
    Idle,

    /// A request is in flight
    Pending,

    /// The last request succeeded
    Success,

    /// The last request failed
    Error,
}

/// Busy flag for one screen's submissions
#[derive(Debug, Clone, Default)]
pub struct Submission {
    state: Arc<Mutex<MutationState>>,
}

impl Submission {
    /// Create an idle tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> MutationState {
        *self.state.lock()
    }

    /// Whether a request is in flight
    pub fn is_pending(&self) -> bool {
        self.state() == MutationState::Pending
    }

    /// Start a submission
    ///
    /// Fails with [`SubmissionError::Busy`] while another one is pending.
    pub fn begin(&self) -> Result<SubmissionTicket> {
        let mut state = self.state.lock();
        if *state == MutationState::Pending {
            return Err(SubmissionError::Busy);
        }
        *state = MutationState::Pending;

        Ok(SubmissionTicket { state: Arc::clone(&self.state), settled: false })
    }

    /// Return to idle
    pub fn reset(&self) {
        *self.state.lock() = MutationState::Idle;
    }
}

/// Proof that a submission is in flight
///
/// Settle it with [`succeed`](Self::succeed), [`fail`](Self::fail) or
/// [`settle`](Self::settle). Dropping it unsettled returns the tracker to
/// idle.
#[derive(Debug)]
#[must_use = "an unsettled ticket resets the submission to idle"]
pub struct SubmissionTicket {
    state: Arc<Mutex<MutationState>>,
    settled: bool,
}

impl SubmissionTicket {
    /// Mark the submission successful
    pub fn succeed(mut self) {
        self.finish(MutationState::Success);
    }

    /// Mark the submission failed
    pub fn fail(mut self) {
        self.finish(MutationState::Error);
    }

    /// Settle from an operation result
    pub fn settle<T, E>(self, result: &std::result::Result<T, E>) {
        match result {
            Ok(_) => self.succeed(),
            Err(_) => self.fail(),
        }
    }

    fn finish(&mut self, outcome: MutationState) {
        *self.state.lock() = outcome;
        self.settled = true;
    }
}

impl Drop for SubmissionTicket {
    fn drop(&mut self) {
        if !self.settled {
            *self.state.lock() = MutationState::Idle;
        }
    }
}
