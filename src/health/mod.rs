//! Periodic backend health monitor.
//!
//! Probes `{origin}/api/health` on the primary origin and, if that fails,
//! on the fallback origin. The outcome is published as an [`ApiHealth`]
//! for passive display only: API traffic is never re-routed, the session
//! is never touched, and nothing navigates.

pub mod status;

pub use status::ApiHealth;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tokio::sync::{mpsc, RwLock};

use crate::config::{ClientConfig, API_SUFFIX};

/// Default interval between health checks (5 minutes).
pub const HEALTH_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Health endpoint path relative to an origin.
pub fn health_url(origin: &str) -> String {
    format!("{}{}/health", origin.trim_end_matches('/'), API_SUFFIX)
}

/// Probes a single health URL.
///
/// Returns `Ok(())` on a 2xx answer and `Err(reason)` otherwise.
#[allow(async_fn_in_trait)]
pub trait HealthProbe {
    async fn probe(&self, url: &str) -> Result<(), String>;
}

/// `reqwest`-backed probe.
pub struct HttpHealthProbe {
    client: Client,
}

impl HttpHealthProbe {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpHealthProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthProbe for HttpHealthProbe {
    async fn probe(&self, url: &str) -> Result<(), String> {
        let resp = self
            .client
            .get(url)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(format!("health check returned {}", resp.status()))
        }
    }
}

/// Polls the health endpoints and publishes the result.
pub struct HealthMonitor<P: HealthProbe> {
    probe: P,
    primary_origin: String,
    fallback_origin: Option<String>,
    status: Arc<RwLock<ApiHealth>>,
    interval: Duration,
    check_now_rx: mpsc::Receiver<()>,
}

impl<P: HealthProbe> HealthMonitor<P> {
    /// Create a monitor for the configured origins.
    ///
    /// Returns the monitor and a sender that triggers an immediate check.
    pub fn new(probe: P, config: &ClientConfig) -> (Self, mpsc::Sender<()>) {
        let (tx, rx) = mpsc::channel(4);
        let monitor = Self {
            probe,
            primary_origin: config.api_origin.clone(),
            fallback_origin: config.fallback_origin.clone(),
            status: Arc::new(RwLock::new(ApiHealth::default())),
            interval: HEALTH_INTERVAL,
            check_now_rx: rx,
        };
        (monitor, tx)
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Shared handle to the published status.
    pub fn status(&self) -> Arc<RwLock<ApiHealth>> {
        self.status.clone()
    }

    /// Run one check and publish the result. Returns whether any origin is healthy.
    pub async fn check(&self) -> bool {
        let primary = health_url(&self.primary_origin);
        match self.probe.probe(&primary).await {
            Ok(()) => {
                self.publish(true, Some(false)).await;
                return true;
            }
            Err(e) => {
                log::warn!("Main API health check failed, trying fallback: {}", e);
            }
        }

        let Some(fallback_origin) = self.fallback_origin.as_deref() else {
            // No fallback: only the health flag changes.
            self.publish(false, None).await;
            return false;
        };

        match self.probe.probe(&health_url(fallback_origin)).await {
            Ok(()) => {
                self.publish(true, Some(true)).await;
                true
            }
            Err(e) => {
                log::error!("Fallback API health check also failed: {}", e);
                self.publish(false, None).await;
                false
            }
        }
    }

    async fn publish(&self, healthy: bool, using_fallback: Option<bool>) {
        let mut status = self.status.write().await;
        status.is_server_healthy = healthy;
        if let Some(using_fallback) = using_fallback {
            status.using_fallback = using_fallback;
        }
    }

    /// Main loop: check immediately, then on every tick or manual trigger.
    pub async fn run(&mut self) {
        let mut ticker = tokio::time::interval(self.interval);

        log::info!(
            "Health monitor started (interval: {}s)",
            self.interval.as_secs()
        );

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.check().await;
                }
                Some(()) = self.check_now_rx.recv() => {
                    log::info!("Manual health check triggered");
                    self.check().await;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Probe that succeeds only for the listed URLs and records every call.
    struct ScriptedProbe {
        healthy: HashSet<String>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedProbe {
        fn new(healthy: &[&str]) -> Self {
            Self {
                healthy: healthy.iter().map(|s| s.to_string()).collect(),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl HealthProbe for ScriptedProbe {
        async fn probe(&self, url: &str) -> Result<(), String> {
            self.calls.lock().unwrap().push(url.to_string());
            if self.healthy.contains(url) {
                Ok(())
            } else {
                Err("connection refused".to_string())
            }
        }
    }

    const PRIMARY: &str = "https://api.clinic.example";
    const FALLBACK: &str = "https://backup.clinic.example";

    fn config(fallback: Option<&str>) -> ClientConfig {
        ClientConfig {
            api_origin: PRIMARY.to_string(),
            fallback_origin: fallback.map(str::to_string),
        }
    }

    #[test]
    fn test_health_url() {
        assert_eq!(health_url(PRIMARY), "https://api.clinic.example/api/health");
        assert_eq!(
            health_url("http://localhost:5000/"),
            "http://localhost:5000/api/health"
        );
    }

    #[tokio::test]
    async fn test_primary_healthy() {
        let probe = ScriptedProbe::new(&["https://api.clinic.example/api/health"]);
        let (monitor, _tx) = HealthMonitor::new(probe, &config(Some(FALLBACK)));

        assert!(monitor.check().await);
        assert_eq!(*monitor.status().read().await, ApiHealth::default());
        assert_eq!(monitor.probe.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_fallback_healthy() {
        let probe = ScriptedProbe::new(&["https://backup.clinic.example/api/health"]);
        let (monitor, _tx) = HealthMonitor::new(probe, &config(Some(FALLBACK)));

        assert!(monitor.check().await);
        let status = *monitor.status().read().await;
        assert!(status.is_server_healthy);
        assert!(status.using_fallback);
    }

    #[tokio::test]
    async fn test_both_down() {
        let probe = ScriptedProbe::new(&[]);
        let (monitor, _tx) = HealthMonitor::new(probe, &config(Some(FALLBACK)));

        assert!(!monitor.check().await);
        assert!(!monitor.status().read().await.is_server_healthy);
        assert_eq!(monitor.probe.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_no_fallback_configured() {
        let probe = ScriptedProbe::new(&[]);
        let (monitor, _tx) = HealthMonitor::new(probe, &config(None));

        assert!(!monitor.check().await);
        assert!(!monitor.status().read().await.is_server_healthy);
        assert_eq!(monitor.probe.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_recovery_clears_fallback_flag() {
        let probe = ScriptedProbe::new(&["https://backup.clinic.example/api/health"]);
        let (mut monitor, _tx) = HealthMonitor::new(probe, &config(Some(FALLBACK)));
        monitor.check().await;
        assert!(monitor.status().read().await.using_fallback);

        monitor.probe = ScriptedProbe::new(&["https://api.clinic.example/api/health"]);
        monitor.check().await;
        assert_eq!(*monitor.status().read().await, ApiHealth::default());
    }

    #[tokio::test]
    async fn test_run_checks_immediately() {
        let probe = ScriptedProbe::new(&[]);
        let (mut monitor, _tx) = HealthMonitor::new(probe, &config(None));
        let status = monitor.status();

        let _ = tokio::time::timeout(Duration::from_millis(50), monitor.run()).await;
        assert!(!status.read().await.is_server_healthy);
    }
}
