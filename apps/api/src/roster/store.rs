use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::ingest::{IngestReport, RejectedRow};
use crate::models::candidate::Candidate;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum RosterOrigin {
    /// Configured file or URL, described.
    Source(String),
    BundledSample,
    /// Posted to the ingest endpoint.
    Upload,
}

/// One ingestion pass. Never mutated; replaced wholesale.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterSnapshot {
    pub id: Uuid,
    pub origin: RosterOrigin,
    pub loaded_at: DateTime<Utc>,
    pub rows_scanned: usize,
    pub rejected_rows: Vec<RejectedRow>,
    #[serde(skip)]
    pub candidates: Vec<Candidate>,
}

impl RosterSnapshot {
    pub fn new(origin: RosterOrigin, report: IngestReport) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            loaded_at: Utc::now(),
            rows_scanned: report.rows_scanned,
            rejected_rows: report.rejected,
            candidates: report.candidates,
        }
    }

    pub fn find(&self, id: &str) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == id)
    }
}

/// Shared handle to the current snapshot. Readers clone the `Arc` and drop the lock.
#[derive(Clone)]
pub struct RosterStore {
    inner: Arc<RwLock<Arc<RosterSnapshot>>>,
}

impl RosterStore {
    pub fn new(snapshot: RosterSnapshot) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(snapshot))),
        }
    }

    pub async fn current(&self) -> Arc<RosterSnapshot> {
        self.inner.read().await.clone()
    }

    /// Swaps in a new snapshot, returning the previous one.
    pub async fn replace(&self, snapshot: RosterSnapshot) -> Arc<RosterSnapshot> {
        let mut guard = self.inner.write().await;
        std::mem::replace(&mut *guard, Arc::new(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::candidate::fixtures::candidate;

    fn report(ids: &[&str]) -> IngestReport {
        IngestReport {
            candidates: ids.iter().map(|id| candidate(id, 0.5, 0.5, 0.5, 5)).collect(),
            rows_scanned: ids.len(),
            rejected: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_replace_swaps_snapshot() {
        let initial = RosterSnapshot::new(RosterOrigin::BundledSample, report(&["a"]));
        let store = RosterStore::new(initial);
        let before = store.current().await;

        let previous = store
            .replace(RosterSnapshot::new(RosterOrigin::Upload, report(&["b", "c"])))
            .await;
        let after = store.current().await;

        assert_eq!(previous.id, before.id);
        assert_ne!(after.id, before.id);
        assert_eq!(after.candidates.len(), 2);
        // Readers holding the old Arc keep an independent list.
        assert_eq!(before.candidates.len(), 1);
    }

    #[test]
    fn test_find_by_id() {
        let snapshot = RosterSnapshot::new(RosterOrigin::Upload, report(&["a", "b"]));
        assert_eq!(snapshot.find("b").map(|c| c.id.as_str()), Some("b"));
        assert!(snapshot.find("z").is_none());
    }

    #[test]
    fn test_origin_serializes_tagged() {
        let json = serde_json::to_value(RosterOrigin::Source("file x.csv".into())).unwrap();
        assert_eq!(json["kind"], "source");
        assert_eq!(json["detail"], "file x.csv");
    }
}
