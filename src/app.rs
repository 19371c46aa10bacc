//! Wiring of the rider client
//!
//! [`App`] opens the session database, builds the HTTP client and the auth
//! session, and drives the screens for each command.

use crate::cli::{Commands, LoginArgs, RegisterArgs};
use anyhow::{bail, Context, Result};
use api_client::{ApiClient, ApiClientConfig, AuthApi};
use app_core::{describe_route, Location, LoginForm};
use app_state::AuthSession;
use app_ui::{LandingScreen, LoginScreen, NavigationStack, RegisterScreen, Route, SubmitOutcome};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use storage::KvSessionStore;

/// File name of the session database inside the data directory
pub const SESSION_DB: &str = "session.db";

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the API
    pub api_url: String,
    /// Directory holding the session database
    pub data_dir: PathBuf,
    /// Request timeout
    pub timeout: Duration,
}

impl AppConfig {
    /// Configuration for a backend and data directory
    pub fn new(api_url: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        Self { api_url: api_url.into(), data_dir: data_dir.into(), timeout: Duration::from_secs(30) }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// The running client
pub struct App {
    api: Arc<dyn AuthApi>,
    session: AuthSession,
    nav: NavigationStack,
}

impl App {
    /// Open the session database and connect the client
    pub fn open(config: &AppConfig) -> Result<Self> {
        std::fs::create_dir_all(&config.data_dir).with_context(|| {
            format!("failed to create data directory {}", config.data_dir.display())
        })?;

        let store = KvSessionStore::open(config.data_dir.join(SESSION_DB))
            .context("failed to open session database")?;

        let client = ApiClient::new(
            ApiClientConfig::new(config.api_url.clone()).with_timeout(config.timeout),
        )?;
        let api: Arc<dyn AuthApi> = Arc::new(client);
        let session = AuthSession::new(Arc::clone(&api), Arc::new(store));

        tracing::debug!(api_url = %config.api_url, data_dir = %config.data_dir.display(), "app opened");
        Ok(Self { api, session, nav: NavigationStack::default() })
    }

    /// Restore the saved rider and open on the matching screen
    pub async fn start(&mut self) -> Route {
        let logged_in = self.session.load_user().await.is_some();
        self.nav.reset(Route::initial(logged_in));
        *self.nav.current()
    }

    /// The auth session
    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// The navigation stack
    pub fn navigation(&self) -> &NavigationStack {
        &self.nav
    }

    /// Run a command and return what to print
    pub async fn run(&mut self, command: Commands) -> Result<String> {
        match command {
            Commands::Route { start, end } => Ok(describe_route(&start, &end).text().to_string()),
            Commands::Locations => Ok(locations()),
            Commands::Login(args) => self.login(args).await,
            Commands::Register(args) => self.register(args).await,
            Commands::Whoami => Ok(self.whoami().await),
            Commands::Logout => {
                self.session.logout().await?;
                self.nav.reset(Route::Landing);
                Ok("Logged out.".to_string())
            }
        }
    }

    async fn login(&mut self, args: LoginArgs) -> Result<String> {
        if self.nav.current() == &Route::Landing {
            LandingScreen::new().get_started(&mut self.nav);
        }

        let mut screen = LoginScreen::new(self.session.clone());
        screen.form = LoginForm::new(args.phone, args.password);

        match screen.submit(&mut self.nav).await {
            SubmitOutcome::Succeeded => {
                let name = self
                    .session
                    .current_user()
                    .await
                    .map(|user| user.full_name)
                    .unwrap_or_default();
                Ok(format!("{}\nWelcome, {}.", status_text(screen.message()), name))
            }
            SubmitOutcome::Invalid => bail!("{}", screen.errors()),
            SubmitOutcome::Busy => bail!("a login is already in progress"),
            SubmitOutcome::Failed => bail!("{}", status_text(screen.message())),
        }
    }

    async fn register(&mut self, args: RegisterArgs) -> Result<String> {
        self.nav.push(Route::Register);

        let mut screen = RegisterScreen::new(Arc::clone(&self.api));
        screen.form = args.to_form();
        let preview = screen.route_preview();

        match screen.submit().await {
            SubmitOutcome::Succeeded => {
                let message = status_text(screen.message());
                screen.complete_redirect(&mut self.nav).await;
                Ok(format!("{}\n{}", preview, message))
            }
            SubmitOutcome::Invalid => bail!("{}", screen.errors()),
            SubmitOutcome::Busy => bail!("a registration is already in progress"),
            SubmitOutcome::Failed => bail!("{}", status_text(screen.message())),
        }
    }

    async fn whoami(&self) -> String {
        match self.session.current_user().await {
            Some(user) => {
                let mut lines = vec![format!("{} ({})", user.full_name, user.phone_number)];
                if let (Some(start), Some(end)) = (user.location_start, user.location_end) {
                    lines.push(format!("{} → {}", start, end));
                }
                lines.join("\n")
            }
            None => "Not logged in.".to_string(),
        }
    }
}

fn locations() -> String {
    Location::ALL.iter().map(Location::name).collect::<Vec<_>>().join("\n")
}

fn status_text(message: Option<&app_ui::StatusMessage>) -> String {
    message.map(|m| m.text.clone()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locations_lists_every_stop() {
        assert_eq!(locations(), "Hayat\nMegenaga\nBole\nBulbula\nAratkilo");
    }

    #[tokio::test]
    async fn test_route_command_needs_no_backend() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::open(&AppConfig::new("http://127.0.0.1:9", dir.path())).unwrap();

        let out = app
            .run(Commands::Route { start: "Piassa".to_string(), end: "Bole".to_string() })
            .await
            .unwrap();
        assert_eq!(out, "Route not supported.");
    }

    #[tokio::test]
    async fn test_start_without_session_opens_landing() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::open(&AppConfig::new("http://127.0.0.1:9", dir.path())).unwrap();

        assert_eq!(app.start().await, Route::Landing);
        assert_eq!(app.run(Commands::Whoami).await.unwrap(), "Not logged in.");
    }

    #[tokio::test]
    async fn test_invalid_login_reports_fields() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::open(&AppConfig::new("http://127.0.0.1:9", dir.path())).unwrap();
        app.start().await;

        let err = app
            .run(Commands::Login(LoginArgs {
                phone: "12345".to_string(),
                password: "secret1".to_string(),
            }))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "phone_number: Invalid phone number");
        assert_eq!(app.navigation().current(), &Route::Login);
    }
}
