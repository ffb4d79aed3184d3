//! Client-local admin audit log.
//!
//! Entries are kept newest first under the `reports` key of the local store.
//! The log is never synced to the backend; clearing local storage loses it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::statistics::increment_statistic;
use crate::api::types::{StatField, StatisticsData};
use crate::api::{ApiClient, ApiError, Transport};
use crate::local_store::{LocalStore, LocalStoreError, REPORTS_KEY};

/// Actor recorded on every entry.
const REPORT_USER: &str = "Admin";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to persist report: {0}")]
    Store(#[from] LocalStoreError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Statistics update for {0} was not accepted")]
    Rejected(&'static str),
}

/// A single audit entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Creation time in Unix milliseconds.
    pub id: u64,
    pub action: String,
    pub user: String,
    /// Local wall-clock time, for display.
    pub timestamp: String,
    pub section: String,
}

pub struct ReportLog {
    store: Arc<LocalStore>,
    entries: Vec<Report>,
}

impl ReportLog {
    /// Load the log. A missing or unreadable value starts an empty log.
    pub fn open(store: Arc<LocalStore>) -> Self {
        let entries = match store.get(REPORTS_KEY) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("Stored reports are unreadable, starting fresh: {}", e);
                Vec::new()
            }),
            None => Vec::new(),
        };
        Self { store, entries }
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[Report] {
        &self.entries
    }

    /// Prepend an entry and persist the whole log.
    ///
    /// The in-memory log only changes once the write succeeded.
    pub fn record(&mut self, action: &str, section: &str) -> Result<&Report, LocalStoreError> {
        let now = chrono::Local::now();
        let report = Report {
            id: u64::try_from(now.timestamp_millis()).unwrap_or(0),
            action: action.to_string(),
            user: REPORT_USER.to_string(),
            timestamp: now.format("%Y-%m-%d %H:%M:%S").to_string(),
            section: section.to_string(),
        };
        let mut next = Vec::with_capacity(self.entries.len() + 1);
        next.push(report);
        next.extend(self.entries.iter().cloned());
        self.persist(&next)?;
        self.entries = next;
        Ok(&self.entries[0])
    }

    /// Record an entry, then bump the matching site statistic on the backend.
    ///
    /// Returns the updated statistics. A rejected update is an error.
    pub async fn record_with_stat<T: Transport>(
        &mut self,
        client: &ApiClient<T>,
        action: &str,
        section: &str,
        field: StatField,
    ) -> Result<StatisticsData, ReportError> {
        self.record(action, section)?;
        increment_statistic(client, field)
            .await?
            .ok_or(ReportError::Rejected(field.as_str()))
    }

    fn persist(&self, entries: &[Report]) -> Result<(), LocalStoreError> {
        let json = serde_json::to_string(entries)?;
        self.store.set(REPORTS_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use reqwest::Method;
    use serde_json::{json, Value};

    use crate::api::hooks::test_support::RecordingNavigator;
    use crate::api::{ApiRequest, ApiResponse, RedirectHooks, RequestBody};
    use crate::local_store::test_support::scratch_path;
    use crate::session::MemorySessionStore;

    /// Replays canned JSON responses in order and records every request.
    struct QueuedTransport {
        responses: Mutex<VecDeque<Value>>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl QueuedTransport {
        fn new(responses: Vec<Value>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl Transport for QueuedTransport {
        async fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
            self.requests.lock().unwrap().push(request.clone());
            let body = self.responses.lock().unwrap().pop_front().unwrap_or(Value::Null);
            Ok(ApiResponse::new(200, body.to_string().into_bytes()))
        }
    }

    fn client(responses: Vec<Value>) -> ApiClient<QueuedTransport> {
        ApiClient::with_transport(
            QueuedTransport::new(responses),
            Arc::new(MemorySessionStore::new()),
            Arc::new(RedirectHooks::new(RecordingNavigator::default())),
        )
    }

    fn local(name: &str) -> Arc<LocalStore> {
        Arc::new(LocalStore::open(scratch_path(name)).unwrap())
    }

    #[test]
    fn test_record_prepends_and_persists() {
        let store = local("reports");
        let mut log = ReportLog::open(store.clone());
        log.record("Added doctor Dr. Rao", "Doctors").unwrap();
        log.record("Deleted banner", "Banners").unwrap();

        assert_eq!(log.entries().len(), 2);
        assert_eq!(log.entries()[0].section, "Banners");
        assert_eq!(log.entries()[0].user, "Admin");
        assert!(log.entries()[0].id >= log.entries()[1].id);

        let reopened = ReportLog::open(store);
        assert_eq!(reopened.entries(), log.entries());
    }

    #[tokio::test]
    async fn test_record_with_stat_records_then_increments() {
        let store = local("stat_reports");
        let mut log = ReportLog::open(store.clone());
        log.record("Added new doctor", "Doctors").unwrap();
        let client = client(vec![
            json!({ "patientsTreated": 41 }),
            json!({ "success": true, "statistics": { "patientsTreated": 42 } }),
        ]);

        let stats = log
            .record_with_stat(&client, "Treated patient", "Statistics", StatField::PatientsTreated)
            .await
            .unwrap();
        assert_eq!(stats.patients_treated, 42);

        assert_eq!(log.entries()[0].action, "Treated patient");
        assert_eq!(ReportLog::open(store).entries().len(), 2);

        let requests = client.transport().requests.lock().unwrap().clone();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[0].path, "/statistics");
        assert_eq!(requests[1].method, Method::PUT);
        assert_eq!(requests[1].body, RequestBody::Json(json!({ "patientsTreated": 42 })));
    }

    #[tokio::test]
    async fn test_record_with_stat_rejected_update_is_an_error() {
        let mut log = ReportLog::open(local("stat_rejected"));
        let client = client(vec![
            json!({ "testReports": 3 }),
            json!({ "success": false }),
        ]);

        let result = log
            .record_with_stat(&client, "Added report", "Statistics", StatField::TestReports)
            .await;
        assert!(matches!(result, Err(ReportError::Rejected("testReports"))));
        assert_eq!(log.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_record_with_stat_persist_failure_skips_backend() {
        let path = scratch_path("stat_unwritable");
        let store = Arc::new(LocalStore::open(&path).unwrap());
        let parent = path.parent().unwrap();
        std::fs::create_dir_all(parent.parent().unwrap()).unwrap();
        std::fs::write(parent, b"").unwrap();

        let mut log = ReportLog::open(store);
        let client = client(Vec::new());
        let result = log
            .record_with_stat(&client, "Added report", "Statistics", StatField::TestReports)
            .await;
        assert!(matches!(result, Err(ReportError::Store(_))));
        assert!(log.entries().is_empty());
        assert!(client.transport().requests.lock().unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_reports_start_empty() {
        let store = local("bad_reports");
        store.set(REPORTS_KEY, "not json").unwrap();
        assert!(ReportLog::open(store).entries().is_empty());
    }

    #[test]
    fn test_reports_wire_format() {
        let report = Report {
            id: 1_700_000_000_000,
            action: "Updated about page".into(),
            user: "Admin".into(),
            timestamp: "2026-10-16 10:00:00".into(),
            section: "About".into(),
        };
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            r#"{"id":1700000000000,"action":"Updated about page","user":"Admin","timestamp":"2026-10-16 10:00:00","section":"About"}"#
        );
    }
}
