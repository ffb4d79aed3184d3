//! Backend health status shown by the passive status indicator.

/// Result of the most recent health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiHealth {
    pub is_server_healthy: bool,
    /// The fallback origin answered while the primary did not.
    pub using_fallback: bool,
}

impl Default for ApiHealth {
    /// Healthy until a check says otherwise.
    fn default() -> Self {
        Self {
            is_server_healthy: true,
            using_fallback: false,
        }
    }
}

impl ApiHealth {
    /// Human-readable status line.
    pub fn label(&self) -> &'static str {
        match (self.is_server_healthy, self.using_fallback) {
            (false, _) => "Server unreachable",
            (true, true) => "Connected (fallback server)",
            (true, false) => "Connected",
        }
    }
}
