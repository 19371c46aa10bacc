//! Navigation for Miichu
//!
//! The app is a single stack: Landing → Login ↔ Register, and Login → Home
//! (the tab root) once a rider is authenticated.

use serde::{Deserialize, Serialize};
use std::time::Duration;

// =============================================================================
// Route Definitions
// =============================================================================

/// All screens in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "route")]
pub enum Route {
    /// Landing page with the "GET Started" button
    #[default]
    Landing,
    /// Login form
    Login,
    /// Registration form
    Register,
    /// Home tabs, shown after login
    Home,
}

impl Route {
    /// Get the URL path for this route
    pub fn to_path(&self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/auth/login",
            Route::Register => "/auth/register",
            Route::Home => "/(tabs)",
        }
    }

    /// Match a URL path to a route
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Route::Landing),
            "/auth/login" => Some(Route::Login),
            "/auth/register" => Some(Route::Register),
            "/(tabs)" | "/home" => Some(Route::Home),
            _ => None,
        }
    }

    /// Where the app opens
    pub fn initial(logged_in: bool) -> Route {
        if logged_in {
            Route::Home
        } else {
            Route::Landing
        }
    }
}

// =============================================================================
// Navigation Stack
// =============================================================================

/// A navigation stack entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackEntry {
    /// The route
    pub route: Route,
    /// Unique key for this entry
    pub key: String,
}

impl StackEntry {
    /// Create a new stack entry
    pub fn new(route: Route) -> Self {
        Self { route, key: uuid::Uuid::new_v4().to_string() }
    }
}

/// The app's navigation stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationStack {
    /// Entries above the root (bottom to top)
    entries: Vec<StackEntry>,
    /// Root entry, never popped
    root: StackEntry,
}

impl Default for NavigationStack {
    fn default() -> Self {
        Self::new(Route::Landing)
    }
}

impl NavigationStack {
    /// Create a new navigation stack with a root route
    pub fn new(root: Route) -> Self {
        Self { entries: Vec::new(), root: StackEntry::new(root) }
    }

    /// Push a route onto the stack
    pub fn push(&mut self, route: Route) {
        tracing::debug!(path = route.to_path(), "navigate");
        self.entries.push(StackEntry::new(route));
    }

    /// Pop the top route (returns true if popped, false if at root)
    pub fn pop(&mut self) -> bool {
        self.entries.pop().is_some()
    }

    /// Pop to root
    pub fn pop_to_root(&mut self) {
        self.entries.clear();
    }

    /// Replace the top route
    pub fn replace(&mut self, route: Route) {
        match self.entries.last_mut() {
            Some(last) => *last = StackEntry::new(route),
            None => self.root = StackEntry::new(route),
        }
    }

    /// Get the current (top) route
    pub fn current(&self) -> &Route {
        &self.current_entry().route
    }

    /// Get the current stack entry
    pub fn current_entry(&self) -> &StackEntry {
        self.entries.last().unwrap_or(&self.root)
    }

    /// Check if we can go back
    pub fn can_go_back(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Get stack depth
    pub fn depth(&self) -> usize {
        self.entries.len() + 1
    }

    /// Routes from bottom to top
    pub fn routes(&self) -> Vec<Route> {
        std::iter::once(&self.root)
            .chain(self.entries.iter())
            .map(|entry| entry.route)
            .collect()
    }

    /// Reset to a new root
    pub fn reset(&mut self, route: Route) {
        self.root = StackEntry::new(route);
        self.entries.clear();
    }
}

// =============================================================================
// Deferred Navigation
// =============================================================================

/// Navigation a screen asked for after a delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingNavigation {
    /// Target route
    pub route: Route,
    /// How long to wait before navigating
    pub delay: Duration,
}

impl PendingNavigation {
    /// Create a pending navigation
    pub fn new(route: Route, delay: Duration) -> Self {
        Self { route, delay }
    }

    /// Wait out the delay, then push the route
    pub async fn perform(self, nav: &mut NavigationStack) {
        tokio::time::sleep(self.delay).await;
        nav.push(self.route);
    }
}
