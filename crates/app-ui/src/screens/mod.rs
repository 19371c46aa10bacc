//! Screen controllers
//!
//! Each screen keeps what its view shows (form values, per-field errors and
//! a status message) and reports what happened to a submit as a
//! [`SubmitOutcome`].

mod landing;
mod login;
mod register;

pub use landing::LandingScreen;
pub use login::LoginScreen;
pub use register::{RegisterScreen, REDIRECT_DELAY};

/// Message shown after a successful login
pub const LOGIN_SUCCESS: &str = "Login successful!";

/// Message shown after a failed login
pub const LOGIN_FAILURE: &str = "Invalid phone number or password. Please try again.";

/// Message shown after a successful registration
pub const REGISTER_SUCCESS: &str = "Registration successful!";

/// Message shown after a failed registration
pub const REGISTER_FAILURE: &str = "Something went wrong.";

/// Tone of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Green banner
    Success,
    /// Red banner
    Error,
}

/// Banner shown under a form after a submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Text to show
    pub text: String,
    /// Tone
    pub kind: MessageKind,
}

impl StatusMessage {
    /// Success banner
    pub fn success(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: MessageKind::Success }
    }

    /// Error banner
    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), kind: MessageKind::Error }
    }

    /// Whether this is an error banner
    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::Error
    }
}

/// What a submit did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent
    Invalid,
    /// A request was already in flight; nothing was sent
    Busy,
    /// The backend accepted the request
    Succeeded,
    /// The backend rejected the request or could not be reached
    Failed,
}
