//! OS keychain session store.
//!
//! Uses the `keyring` crate so the bearer token never lands on disk in
//! plain text. The user record is stored as a second entry.

use keyring::Entry;

use super::{decode_user, Session, SessionError, SessionStore};
use crate::api::types::UserData;
use crate::local_store::{TOKEN_KEY, USER_KEY};

/// Keychain service name.
const SERVICE_NAME: &str = "com.vedavayu.client";

pub struct KeychainSessionStore {
    service: String,
}

impl KeychainSessionStore {
    pub fn new() -> Self {
        Self {
            service: SERVICE_NAME.to_string(),
        }
    }

    fn entry(&self, key: &str) -> Result<Entry, SessionError> {
        Ok(Entry::new(&self.service, key)?)
    }

    fn read(&self, key: &str) -> Result<Option<String>, SessionError> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Idempotent: a missing entry counts as deleted.
    fn delete(&self, key: &str) -> Result<(), SessionError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for KeychainSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for KeychainSessionStore {
    fn get(&self) -> Result<Option<Session>, SessionError> {
        let Some(token) = self.read(TOKEN_KEY)? else {
            return Ok(None);
        };
        Ok(Some(Session {
            token,
            user: decode_user(self.read(USER_KEY)?),
        }))
    }

    fn set(&self, token: &str, user: &UserData) -> Result<(), SessionError> {
        let user_json = serde_json::to_string(user)?;
        self.entry(TOKEN_KEY)?.set_password(token)?;
        self.entry(USER_KEY)?.set_password(&user_json)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.delete(TOKEN_KEY)?;
        self.delete(USER_KEY)
    }
}
