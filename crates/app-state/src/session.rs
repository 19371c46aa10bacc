//! Logged-in rider state
//!
//! [`AuthSession`] owns the current rider and a loading flag. The backend
//! and the session store are injected, so the same state machine runs
//! against the real API and sled on device, and against mocks in tests.

use api_client::{ApiError, AuthApi};
use app_core::{Credentials, SessionUser};
use std::sync::Arc;
use storage::{SessionStore, StorageError};
use thiserror::Error;
use tokio::sync::RwLock;

/// Session-related errors
#[derive(Debug, Error)]
pub enum AuthError {
    /// Backend rejected or failed the request
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Session could not be persisted or removed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, AuthError>;

/// Snapshot of the auth state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthState {
    /// The logged-in rider
    pub user: Option<SessionUser>,
    /// Whether a load or login is in progress
    pub loading: bool,
}

impl Default for AuthState {
    // Loading until the persisted session has been read.
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

/// Logged-in rider state with injected backend and storage
#[derive(Clone)]
pub struct AuthSession {
    api: Arc<dyn AuthApi>,
    store: Arc<dyn SessionStore>,
    state: Arc<RwLock<AuthState>>,
}

impl AuthSession {
    /// Create a session in the initial loading state
    pub fn new(api: Arc<dyn AuthApi>, store: Arc<dyn SessionStore>) -> Self {
        Self { api, store, state: Arc::new(RwLock::new(AuthState::default())) }
    }

    /// Current state
    pub async fn state(&self) -> AuthState {
        self.state.read().await.clone()
    }

    /// Current rider, if logged in
    pub async fn current_user(&self) -> Option<SessionUser> {
        self.state.read().await.user.clone()
    }

    /// Whether a rider is logged in
    pub async fn is_logged_in(&self) -> bool {
        self.state.read().await.user.is_some()
    }

    /// Restore the persisted rider on app start
    ///
    /// A storage failure is logged and treated as "nobody logged in".
    pub async fn load_user(&self) -> Option<SessionUser> {
        self.set_loading(true).await;

        let user = match self.store.get().await {
            Ok(user) => user,
            Err(e) => {
                tracing::error!("Failed to load user info: {}", e);
                None
            }
        };

        let mut state = self.state.write().await;
        state.user = user.clone();
        state.loading = false;

        if let Some(user) = &user {
            tracing::info!(user_id = %user.id, "restored session");
        }
        user
    }

    /// Log in and persist the returned rider
    ///
    /// On failure the current rider is left untouched.
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionUser> {
        self.set_loading(true).await;

        let result = self.login_inner(credentials).await;

        let mut state = self.state.write().await;
        state.loading = false;
        match &result {
            Ok(user) => state.user = Some(user.clone()),
            Err(e) => tracing::error!("Login Error: {}", e),
        }

        result
    }

    async fn login_inner(&self, credentials: &Credentials) -> Result<SessionUser> {
        let user = self.api.login(credentials).await?;
        self.store.set(&user).await?;
        Ok(user)
    }

    /// Persist a rider obtained elsewhere, then make it current
    ///
    /// If the record cannot be written the current rider is left untouched.
    pub async fn login_action(&self, user: SessionUser) -> Result<()> {
        self.store.set(&user).await?;

        let mut state = self.state.write().await;
        state.user = Some(user);
        state.loading = false;
        Ok(())
    }

    /// Clear the rider and the persisted record
    pub async fn logout(&self) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.user = None;
            state.loading = false;
        }
        self.store.remove().await?;
        tracing::info!("logged out");
        Ok(())
    }

    /// Replace the in-memory rider without persisting
    pub async fn set_user(&self, user: Option<SessionUser>) {
        let mut state = self.state.write().await;
        state.user = user;
        state.loading = false;
    }

    /// Set the loading flag
    pub async fn set_loading(&self, loading: bool) {
        self.state.write().await.loading = loading;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_client::MockAuthApi;
    use storage::{MemorySessionStore, MockSessionStore};

    fn rider() -> SessionUser {
        SessionUser {
            id: "66f0c1".to_string(),
            full_name: "Abebe Kebede".to_string(),
            phone_number: "0912345678".to_string(),
            sex: None,
            location_start: None,
            location_end: None,
            workplace_id: None,
            organization: None,
            token: Some("jwt".to_string()),
        }
    }

    fn credentials() -> Credentials {
        Credentials::new("0912345678", "secret1")
    }

    fn store_failure() -> StorageError {
        StorageError::Serialization(serde_json::from_str::<SessionUser>("{}").unwrap_err())
    }

    fn session_with(api: MockAuthApi, store: MemorySessionStore) -> AuthSession {
        AuthSession::new(Arc::new(api), Arc::new(store))
    }

    #[tokio::test]
    async fn test_initial_state_is_loading() {
        let session = session_with(MockAuthApi::new(), MemorySessionStore::new());
        let state = session.state().await;
        assert!(state.loading);
        assert_eq!(state.user, None);
    }

    #[tokio::test]
    async fn test_load_user_restores_persisted_rider() {
        let session = session_with(MockAuthApi::new(), MemorySessionStore::with_user(rider()));

        assert_eq!(session.load_user().await, Some(rider()));
        let state = session.state().await;
        assert!(!state.loading);
        assert_eq!(state.user, Some(rider()));
    }

    #[tokio::test]
    async fn test_load_user_empty_store() {
        let session = session_with(MockAuthApi::new(), MemorySessionStore::new());
        assert_eq!(session.load_user().await, None);
        assert!(!session.state().await.loading);
    }

    #[tokio::test]
    async fn test_load_user_storage_failure_means_logged_out() {
        let mut store = MockSessionStore::new();
        store
            .expect_get()
            .returning(|| Err(store_failure()));

        let session = AuthSession::new(Arc::new(MockAuthApi::new()), Arc::new(store));
        assert_eq!(session.load_user().await, None);

        let state = session.state().await;
        assert!(!state.loading);
        assert!(state.user.is_none());
    }

    #[tokio::test]
    async fn test_login_persists_user() {
        let mut api = MockAuthApi::new();
        api.expect_login()
            .withf(|c| c.phone_number == "0912345678" && c.password == "secret1")
            .times(1)
            .returning(|_| Ok(rider()));

        let store = MemorySessionStore::new();
        let session = session_with(api, store.clone());

        let user = session.login(&credentials()).await.unwrap();
        assert_eq!(user, rider());
        assert!(session.is_logged_in().await);
        assert!(!session.state().await.loading);
        assert_eq!(store.get().await.unwrap(), Some(rider()));
    }

    #[tokio::test]
    async fn test_login_failure_keeps_state() {
        let mut api = MockAuthApi::new();
        api.expect_login()
            .returning(|_| Err(ApiError::new(401, "Unauthorized", "Invalid credentials")));

        let store = MemorySessionStore::new();
        let session = session_with(api, store.clone());
        session.set_user(None).await;

        let err = session.login(&credentials()).await.unwrap_err();
        assert!(matches!(err, AuthError::Api(ref e) if e.status() == 401));

        let state = session.state().await;
        assert!(!state.loading);
        assert_eq!(state.user, None);
        assert_eq!(store.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_login_persist_failure_is_reported() {
        let mut api = MockAuthApi::new();
        api.expect_login().returning(|_| Ok(rider()));

        let mut store = MockSessionStore::new();
        store
            .expect_set()
            .times(1)
            .returning(|_| Err(store_failure()));

        let session = AuthSession::new(Arc::new(api), Arc::new(store));
        let err = session.login(&credentials()).await.unwrap_err();

        assert!(matches!(err, AuthError::Storage(_)));
        assert!(!session.is_logged_in().await);
    }

    #[tokio::test]
    async fn test_login_action_and_logout() {
        let store = MemorySessionStore::new();
        let session = session_with(MockAuthApi::new(), store.clone());

        session.login_action(rider()).await.unwrap();
        assert_eq!(session.current_user().await, Some(rider()));
        assert_eq!(store.get().await.unwrap(), Some(rider()));

        session.logout().await.unwrap();
        assert_eq!(session.current_user().await, None);
        assert_eq!(store.get().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_login_action_unpersisted_rider_is_not_current() {
        let mut store = MockSessionStore::new();
        store.expect_set().times(1).returning(|_| Err(store_failure()));

        let session = AuthSession::new(Arc::new(MockAuthApi::new()), Arc::new(store));
        session.set_user(None).await;

        let err = session.login_action(rider()).await.unwrap_err();
        assert!(matches!(err, AuthError::Storage(StorageError::Serialization(_))));
        assert!(!session.is_logged_in().await);
        assert_eq!(session.current_user().await, None);
    }

    #[tokio::test]
    async fn test_set_user_does_not_persist() {
        let store = MemorySessionStore::new();
        let session = session_with(MockAuthApi::new(), store.clone());

        session.set_user(Some(rider())).await;
        assert!(session.is_logged_in().await);
        assert_eq!(store.get().await.unwrap(), None);

        session.set_loading(true).await;
        assert!(session.state().await.loading);
    }
}
