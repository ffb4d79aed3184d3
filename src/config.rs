//! API origin resolution.
//!
//! Origins are resolved once at startup and fixed for the lifetime of the
//! client: `VITE_API_BASE_URL` > `REACT_APP_API_BASE_URL` > localhost default.

/// Primary API origin (build/deploy-time variable).
pub const PRIMARY_ORIGIN_VAR: &str = "VITE_API_BASE_URL";

/// Alternate API origin read from the runtime environment.
pub const SECONDARY_ORIGIN_VAR: &str = "REACT_APP_API_BASE_URL";

/// Fallback origin probed by the health monitor only.
pub const FALLBACK_ORIGIN_VAR: &str = "VITE_API_FALLBACK_URL";

/// Local development origin used when neither variable is set.
pub const DEFAULT_ORIGIN: &str = "http://localhost:5000";

/// Path suffix appended to every origin to form the API base URL.
pub const API_SUFFIX: &str = "/api";

/// Resolved origins for the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API origin without the `/api` suffix (e.g. `https://clinic.example`).
    pub api_origin: String,
    /// Health-check fallback origin, if configured.
    pub fallback_origin: Option<String>,
}

impl ClientConfig {
    /// Resolve origins from the process environment.
    pub fn from_env() -> Self {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Resolve origins through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn resolve<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_origin = read(PRIMARY_ORIGIN_VAR)
            .or_else(|| read(SECONDARY_ORIGIN_VAR))
            .unwrap_or_else(|| DEFAULT_ORIGIN.to_string());

        Self {
            api_origin: normalize_origin(&api_origin),
            fallback_origin: read(FALLBACK_ORIGIN_VAR).map(|o| normalize_origin(&o)),
        }
    }

    /// Replace the API origin (CLI `--api-url` override).
    pub fn with_api_origin(mut self, origin: &str) -> Self {
        self.api_origin = normalize_origin(origin);
        self
    }

    /// Full API base URL: origin + `/api`.
    pub fn api_base_url(&self) -> String {
        format!("{}{}", self.api_origin, API_SUFFIX)
    }
}

fn normalize_origin(origin: &str) -> String {
    origin.trim_end_matches('/').to_string()
}
