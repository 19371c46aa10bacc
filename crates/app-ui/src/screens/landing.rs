use crate::navigation::{NavigationStack, Route};
use app_core::branding;

/// Landing screen
#[derive(Debug, Clone, Copy, Default)]
pub struct LandingScreen;

impl LandingScreen {
    /// Create the landing screen
    pub fn new() -> Self {
        Self
    }

    /// App name shown at the top
    pub fn title(&self) -> &'static str {
        branding::APP_NAME
    }

    /// Headline
    pub fn headline(&self) -> &'static str {
        branding::APP_HEADLINE
    }

    /// Tagline under the headline
    pub fn tagline(&self) -> &'static str {
        branding::APP_TAGLINE
    }

    /// Label of the call-to-action button
    pub fn button_label(&self) -> &'static str {
        branding::GET_STARTED_LABEL
    }

    /// "GET Started" pressed
    pub fn get_started(&self, nav: &mut NavigationStack) {
        nav.push(Route::Login);
    }
}
