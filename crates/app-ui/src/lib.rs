//! User interface layer for Miichu
//!
//! Screens are headless controllers: they own form values, validation
//! errors, the status message and the busy flag, and they request
//! navigation. Rendering is left to whatever front end drives them.
//!
//! # Modules
//!
//! - [`navigation`] - Routes and the navigation stack
//! - [`screens`] - Landing, login and registration screens
//!
//! # Example
//!
//! ```rust
//! use app_ui::navigation::{NavigationStack, Route};
//! use app_ui::screens::LandingScreen;
//!
//! let mut nav = NavigationStack::new(Route::Landing);
//! LandingScreen::new().get_started(&mut nav);
//! assert_eq!(nav.current(), &Route::Login);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod navigation;
pub mod screens;

pub use navigation::{NavigationStack, PendingNavigation, Route, StackEntry};
pub use screens::{
    LandingScreen, LoginScreen, MessageKind, RegisterScreen, StatusMessage, SubmitOutcome,
};
