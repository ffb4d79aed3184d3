//! Login, signup and logout.
//!
//! A successful login or signup replaces the stored session as a whole;
//! logout clears it. The remembered login email lives in the local store.

use super::client::ApiClient;
use super::envelope::unwrap_one;
use super::error::ApiError;
use super::transport::Transport;
use super::types::{AuthResponse, LoginRequest, SignupRequest};
use crate::local_store::{LocalStore, LocalStoreError, REMEMBERED_EMAIL_KEY};

/// POST /auth/login and persist the returned session.
pub async fn login<T: Transport>(
    client: &ApiClient<T>,
    request: &LoginRequest,
) -> Result<AuthResponse, ApiError> {
    log::info!("Logging in as {}", request.email);
    let body = client.post_json("/auth/login", request).await?;
    establish_session(client, body)
}

/// POST /auth/signup and persist the returned session.
pub async fn signup<T: Transport>(
    client: &ApiClient<T>,
    request: &SignupRequest,
) -> Result<AuthResponse, ApiError> {
    log::info!("Signing up {}", request.email);
    let body = client.post_json("/auth/signup", request).await?;
    establish_session(client, body)
}

/// Clear the stored session. Safe to call when already logged out.
pub fn logout<T: Transport>(client: &ApiClient<T>) -> Result<(), ApiError> {
    client.session().clear()?;
    log::info!("Logout complete");
    Ok(())
}

/// Decode `{ token, user }` (possibly enveloped) and persist it.
fn establish_session<T: Transport>(
    client: &ApiClient<T>,
    body: serde_json::Value,
) -> Result<AuthResponse, ApiError> {
    let mut auth: AuthResponse = unwrap_one(body, "auth")?;
    auth.user = auth.user.with_derived_name();
    client.session().set(&auth.token, &auth.user)?;
    log::info!("Session established for {}", auth.user.display_name());
    Ok(auth)
}

/// Remember (or forget) the login email for the next login form.
pub fn remember_email(
    store: &LocalStore,
    email: &str,
    remember: bool,
) -> Result<(), LocalStoreError> {
    if remember {
        store.set(REMEMBERED_EMAIL_KEY, email)
    } else {
        store.remove(REMEMBERED_EMAIL_KEY)
    }
}

pub fn remembered_email(store: &LocalStore) -> Option<String> {
    store.get(REMEMBERED_EMAIL_KEY)
}
