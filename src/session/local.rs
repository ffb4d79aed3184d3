//! Session store backed by the browser-local key/value file.

use std::sync::Arc;

use super::{decode_user, Session, SessionError, SessionStore};
use crate::api::types::UserData;
use crate::local_store::{LocalStore, TOKEN_KEY, USER_KEY};

pub struct LocalSessionStore {
    store: Arc<LocalStore>,
}

impl LocalSessionStore {
    pub fn new(store: Arc<LocalStore>) -> Self {
        Self { store }
    }
}

impl SessionStore for LocalSessionStore {
    fn get(&self) -> Result<Option<Session>, SessionError> {
        let Some(token) = self.store.get(TOKEN_KEY) else {
            return Ok(None);
        };
        Ok(Some(Session {
            token,
            user: decode_user(self.store.get(USER_KEY)),
        }))
    }

    fn set(&self, token: &str, user: &UserData) -> Result<(), SessionError> {
        let user_json = serde_json::to_string(user)?;
        // One flush, so the token never sits next to a stale user record.
        self.store
            .set_all(&[(TOKEN_KEY, token), (USER_KEY, &user_json)])?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        self.store.remove_all(&[TOKEN_KEY, USER_KEY])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::api::types::Role;
    use crate::local_store::test_support::scratch_path;

    #[test]
    fn test_roundtrip_through_file() {
        let path = scratch_path("local_session");
        let user = UserData {
            id: "u7".into(),
            email: "admin@clinic.example".into(),
            role: Role::Admin,
            ..Default::default()
        };

        {
            let store = LocalSessionStore::new(Arc::new(LocalStore::open(&path).unwrap()));
            store.set("abc123", &user).unwrap();
        }

        let store = LocalSessionStore::new(Arc::new(LocalStore::open(&path).unwrap()));
        let session = store.get().unwrap().unwrap();
        assert_eq!(session.token, "abc123");
        assert_eq!(session.user, Some(user));
    }

    #[test]
    fn test_corrupt_user_record_keeps_token() {
        let local = Arc::new(LocalStore::open(scratch_path("corrupt_user")).unwrap());
        local.set(TOKEN_KEY, "abc123").unwrap();
        local.set(USER_KEY, "{oops").unwrap();

        let session = LocalSessionStore::new(local).get().unwrap().unwrap();
        assert_eq!(session.token, "abc123");
        assert_eq!(session.user, None);
    }

    #[test]
    fn test_failed_set_keeps_previous_session() {
        let path = scratch_path("failed_set");
        let local = Arc::new(LocalStore::open(&path).unwrap());
        let store = LocalSessionStore::new(local);
        let admin = UserData {
            id: "u1".into(),
            role: Role::Admin,
            ..Default::default()
        };
        store.set("old-token", &admin).unwrap();

        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        let user = UserData {
            id: "u2".into(),
            ..Default::default()
        };
        assert!(store.set("new-token", &user).is_err());
        let session = store.get().unwrap().unwrap();
        assert_eq!(session.token, "old-token");
        assert_eq!(session.user, Some(admin));
    }

    #[test]
    fn test_failed_set_on_empty_store_stays_logged_out() {
        let path = scratch_path("failed_first_set");
        let store = LocalSessionStore::new(Arc::new(LocalStore::open(&path).unwrap()));
        let parent = path.parent().unwrap();
        fs::create_dir_all(parent.parent().unwrap()).unwrap();
        fs::write(parent, b"").unwrap();

        assert!(store.set("abc123", &UserData::default()).is_err());
        assert_eq!(store.get().unwrap(), None);
    }

    #[test]
    fn test_failed_clear_keeps_session_in_memory_and_on_disk() {
        let path = scratch_path("failed_clear");
        let store = LocalSessionStore::new(Arc::new(LocalStore::open(&path).unwrap()));
        store.set("abc123", &UserData::default()).unwrap();
        let saved = fs::read(&path).unwrap();

        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();
        assert!(store.clear().is_err());
        assert_eq!(store.token().unwrap().as_deref(), Some("abc123"));

        // Memory and disk agree: the persisted copy still holds the token.
        fs::remove_dir(&path).unwrap();
        fs::write(&path, saved).unwrap();
        let reopened = LocalSessionStore::new(Arc::new(LocalStore::open(&path).unwrap()));
        assert_eq!(reopened.token().unwrap().as_deref(), Some("abc123"));
    }

    #[test]
    fn test_clear_removes_both_keys() {
        let local = Arc::new(LocalStore::open(scratch_path("clear_session")).unwrap());
        let store = LocalSessionStore::new(local.clone());
        store.set("abc123", &UserData::default()).unwrap();

        store.clear().unwrap();
        store.clear().unwrap();
        assert_eq!(local.get(TOKEN_KEY), None);
        assert_eq!(local.get(USER_KEY), None);
    }
}
