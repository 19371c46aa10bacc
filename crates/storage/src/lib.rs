//! Storage layer for Miichu
//!
//! This crate provides the session store that keeps the logged-in rider
//! across restarts, backed by an embedded sled database.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod session;

pub use session::{KvSessionStore, MemorySessionStore, SessionStore, StorageError, SESSION_KEY};

#[cfg(any(test, feature = "test-utils"))]
pub use session::MockSessionStore;
