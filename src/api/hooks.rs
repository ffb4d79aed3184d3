//! Session side effects triggered by the HTTP client.
//!
//! The client never navigates or notifies by itself; it calls the injected
//! [`SessionHooks`]. [`RedirectHooks`] maps those callbacks onto a
//! [`Navigator`] the way the web front end does: login redirect on expiry,
//! blocking alert plus home redirect on forbidden access.

/// Home view, target of the forbidden redirect.
pub const HOME_ROUTE: &str = "/";

/// Login view, target of the session-expired redirect.
pub const LOGIN_ROUTE: &str = "/login";

/// Callbacks fired by the client after a failed response.
pub trait SessionHooks: Send + Sync {
    /// A non-public call returned 401; the session has already been cleared.
    fn on_session_expired(&self, message: &str);

    /// A call returned 403; the session is left intact.
    fn on_forbidden(&self, message: &str);
}

/// UI surface that can show a blocking notice and switch views.
pub trait Navigator: Send + Sync {
    fn alert(&self, text: &str);
    fn navigate(&self, target: &str);
}

/// Login URL carrying the reason the session ended.
pub fn login_redirect(message: &str) -> String {
    format!("{}?error={}", LOGIN_ROUTE, urlencoding::encode(message))
}

/// Text of the blocking forbidden notification.
pub fn forbidden_notice(message: &str) -> String {
    format!("Forbidden: {}", message)
}

/// [`SessionHooks`] that drive a [`Navigator`].
pub struct RedirectHooks<N: Navigator> {
    navigator: N,
}

impl<N: Navigator> RedirectHooks<N> {
    pub fn new(navigator: N) -> Self {
        Self { navigator }
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }
}

impl<N: Navigator> SessionHooks for RedirectHooks<N> {
    fn on_session_expired(&self, message: &str) {
        log::info!("Session expired: {}", message);
        self.navigator.navigate(&login_redirect(message));
    }

    fn on_forbidden(&self, message: &str) {
        self.navigator.alert(&forbidden_notice(message));
        self.navigator.navigate(HOME_ROUTE);
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{NavEvent, RecordingNavigator};
    use super::*;

    #[test]
    fn test_login_redirect_encodes_message() {
        assert_eq!(login_redirect("Token expired"), "/login?error=Token%20expired");
        assert_eq!(
            login_redirect("a&b=c"),
            "/login?error=a%26b%3Dc"
        );
    }

    #[test]
    fn test_session_expired_navigates_to_login() {
        let hooks = RedirectHooks::new(RecordingNavigator::default());
        hooks.on_session_expired("Token expired");
        assert_eq!(
            hooks.navigator().events(),
            vec![NavEvent::Navigate("/login?error=Token%20expired".into())]
        );
    }

    #[test]
    fn test_forbidden_alerts_then_goes_home() {
        let hooks = RedirectHooks::new(RecordingNavigator::default());
        hooks.on_forbidden("Insufficient role");
        assert_eq!(
            hooks.navigator().events(),
            vec![
                NavEvent::Alert("Forbidden: Insufficient role".into()),
                NavEvent::Navigate("/".into()),
            ]
        );
    }
}
