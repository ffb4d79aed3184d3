//! Session credential storage.
//!
//! The bearer token and the user record are persisted together and cleared
//! together. The HTTP client only depends on the [`SessionStore`] trait, so
//! the backing store can be swapped (memory for tests, local file, OS keychain).

pub mod keychain;
pub mod local;
pub mod memory;

pub use keychain::KeychainSessionStore;
pub use local::LocalSessionStore;
pub use memory::MemorySessionStore;

use thiserror::Error;

use crate::api::types::UserData;
use crate::local_store::LocalStoreError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage failed: {0}")]
    Storage(String),
    #[error("Session record encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl From<keyring::Error> for SessionError {
    fn from(err: keyring::Error) -> Self {
        SessionError::Storage(err.to_string())
    }
}

impl From<LocalStoreError> for SessionError {
    fn from(err: LocalStoreError) -> Self {
        SessionError::Storage(err.to_string())
    }
}

/// The persisted credential pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    /// `None` when the stored record is missing or unreadable.
    pub user: Option<UserData>,
}

/// Persistent storage for the session credential and user record.
pub trait SessionStore: Send + Sync {
    /// Current session, or `None` when no token is stored.
    fn get(&self) -> Result<Option<Session>, SessionError>;

    /// Replace the stored token and user record as a whole.
    fn set(&self, token: &str, user: &UserData) -> Result<(), SessionError>;

    /// Delete both token and user record. Idempotent.
    fn clear(&self) -> Result<(), SessionError>;

    /// Stored bearer token only.
    fn token(&self) -> Result<Option<String>, SessionError> {
        Ok(self.get()?.map(|s| s.token))
    }
}

/// Whether the stored session belongs to an admin.
///
/// Storage errors count as "not authenticated".
pub fn is_admin_authenticated(store: &dyn SessionStore) -> bool {
    match store.get() {
        Ok(Some(session)) => session.user.is_some_and(|u| u.is_admin()),
        Ok(None) => false,
        Err(e) => {
            log::warn!("Failed to read session for admin check: {}", e);
            false
        }
    }
}

/// Decode a stored user record, tolerating corruption.
pub(crate) fn decode_user(raw: Option<String>) -> Option<UserData> {
    let raw = raw?;
    match serde_json::from_str(&raw) {
        Ok(user) => Some(user),
        Err(e) => {
            log::warn!("Stored user record is unreadable, ignoring it: {}", e);
            None
        }
    }
}
