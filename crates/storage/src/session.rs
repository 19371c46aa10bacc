//! Session persistence
//!
//! The logged-in rider is kept as a single JSON record so the app can
//! restore it on start. Callers receive the store as an injected
//! [`SessionStore`] rather than reaching for global storage.

use app_core::SessionUser;
use async_trait::async_trait;
use sled::Db;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Key under which the session record is stored
pub const SESSION_KEY: &str = "userInfo";

/// Session store errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Sled database error
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    /// Stored record is not a valid rider
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for session store operations
pub type Result<T> = std::result::Result<T, StorageError>;

/// Capability to persist the logged-in rider
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the persisted rider, if any
    async fn get(&self) -> Result<Option<SessionUser>>;

    /// Persist the rider, replacing any previous record
    async fn set(&self, user: &SessionUser) -> Result<()>;

    /// Forget the persisted rider
    async fn remove(&self) -> Result<()>;
}

/// Session store backed by an on-device sled database
///
/// Every write is flushed before it returns, so no background flusher runs
/// and the database lock is released as soon as the last clone is dropped.
#[derive(Clone)]
pub struct KvSessionStore {
    db: Db,
}

impl KvSessionStore {
    /// Open (or create) the session database at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let db = sled::Config::new().path(path).flush_every_ms(None).open()?;
        tracing::debug!(path = %path.display(), "opened session database");
        Ok(Self { db })
    }

    /// Session database that is deleted when dropped
    pub fn temporary() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { db })
    }
}

#[async_trait]
impl SessionStore for KvSessionStore {
    async fn get(&self) -> Result<Option<SessionUser>> {
        match self.db.get(SESSION_KEY)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, user: &SessionUser) -> Result<()> {
        self.db.insert(SESSION_KEY, serde_json::to_vec(user)?)?;
        self.db.flush_async().await?;
        tracing::debug!(user_id = %user.id, "persisted session user");
        Ok(())
    }

    async fn remove(&self) -> Result<()> {
        if self.db.remove(SESSION_KEY)?.is_some() {
            self.db.flush_async().await?;
            tracing::debug!("removed session user");
        }
        Ok(())
    }
}

/// In-process session store, lost on exit
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    user: Arc<RwLock<Option<SessionUser>>>,
}

impl MemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store already holding a rider
    pub fn with_user(user: SessionUser) -> Self {
        Self { user: Arc::new(RwLock::new(Some(user))) }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self) -> Result<Option<SessionUser>> {
        Ok(self.user.read().await.clone())
    }

    async fn set(&self, user: &SessionUser) -> Result<()> {
        *self.user.write().await = Some(user.clone());
        Ok(())
    }

    async fn remove(&self) -> Result<()> {
        *self.user.write().await = None;
        Ok(())
    }
}
