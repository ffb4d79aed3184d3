//! In-memory session store.
//!
//! Nothing is persisted; the token is zeroed when the session is cleared.

use std::sync::RwLock;

use zeroize::Zeroize;

use super::{Session, SessionError, SessionStore};
use crate::api::types::UserData;

#[derive(Default)]
pub struct MemorySessionStore {
    inner: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with a token and user record.
    pub fn with_session(token: &str, user: UserData) -> Self {
        Self {
            inner: RwLock::new(Some(Session {
                token: token.to_string(),
                user: Some(user),
            })),
        }
    }

    fn poisoned() -> SessionError {
        SessionError::Storage("session lock poisoned".to_string())
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Result<Option<Session>, SessionError> {
        let guard = self.inner.read().map_err(|_| Self::poisoned())?;
        Ok(guard.clone())
    }

    fn set(&self, token: &str, user: &UserData) -> Result<(), SessionError> {
        let mut guard = self.inner.write().map_err(|_| Self::poisoned())?;
        if let Some(ref mut old) = *guard {
            old.token.zeroize();
        }
        *guard = Some(Session {
            token: token.to_string(),
            user: Some(user.clone()),
        });
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let mut guard = self.inner.write().map_err(|_| Self::poisoned())?;
        if let Some(ref mut old) = *guard {
            old.token.zeroize();
        }
        *guard = None;
        Ok(())
    }
}
