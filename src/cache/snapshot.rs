use super::client::{QueryClient, QueryOptions, QueryStatus};
use super::key::QueryKey;
use crate::models::NotesPage;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Snapshot format version.
const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub(crate) enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unsupported snapshot version {0}")]
    Version(u32),
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct DehydratedQuery {
    pub key: QueryKey,
    pub status: QueryStatus,
    #[serde(default)]
    pub data: Option<NotesPage>,
    #[serde(default)]
    pub error: Option<String>,
    pub updated_ms: i64,
}

/// Transferable copy of a cache's settled entries.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub(crate) struct DehydratedState {
    pub version: u32,
    pub queries: Vec<DehydratedQuery>,
}

impl DehydratedState {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let state: Self = serde_json::from_str(json)?;
        if state.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::Version(state.version));
        }
        Ok(state)
    }
}

impl QueryClient {
    /// Captures every settled entry. Pending entries carry nothing to reuse.
    pub fn dehydrate(&self) -> DehydratedState {
        let mut queries: Vec<DehydratedQuery> = self
            .entries()
            .filter(|(_, e)| e.status != QueryStatus::Pending && !e.is_fetching())
            .map(|(key, e)| DehydratedQuery {
                key: key.clone(),
                status: e.status,
                data: e.data.clone(),
                error: e.error.clone(),
                updated_ms: e.updated_ms,
            })
            .collect();
        queries.sort_by(|a, b| a.key.cmp(&b.key));

        DehydratedState {
            version: SNAPSHOT_VERSION,
            queries,
        }
    }

    pub fn hydrate(&mut self, state: DehydratedState) {
        for q in state.queries {
            let key = q.key.clone();
            let entry = QueryClient::settled_entry(q.status, q.data, q.error, q.updated_ms);
            if self.seed(q.key, entry) {
                debug!("event=cache_hydrate key={}", key);
            }
        }
    }

    /// Builds a client seeded from a serialized snapshot.
    ///
    /// A missing or unreadable snapshot yields an empty cache.
    pub fn from_snapshot(options: QueryOptions, snapshot: Option<&str>) -> Self {
        let mut client = Self::new(options);
        let Some(json) = snapshot.filter(|s| !s.trim().is_empty()) else {
            return client;
        };

        match DehydratedState::from_json(json) {
            Ok(state) => client.hydrate(state),
            Err(e) => warn!("event=cache_hydrate status=ignored error={}", e),
        }
        client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ApiErrorKind};
    use crate::cache::client::{FetchPlan, Resolution};
    use crate::models::{Note, NoteTag};

    fn one_note_page() -> NotesPage {
        NotesPage {
            notes: vec![Note {
                id: "n1".to_string(),
                title: "Plan".to_string(),
                content: "write it down".to_string(),
                created_at: String::new(),
                updated_at: String::new(),
                tag: NoteTag::Work,
            }],
            total_pages: 3,
        }
    }

    fn prefetched(result: Result<NotesPage, ApiError>, now: i64) -> QueryClient {
        let mut client = QueryClient::new(QueryOptions::prefetch());
        let key = QueryKey::notes(2, "plan");
        let FetchPlan::Start(id) = client.plan_fetch(&key, now) else {
            panic!("fresh cache must start a fetch");
        };
        assert_eq!(client.resolve(&key, id, result, now), Resolution::Settled);
        client
    }

    #[test]
    fn test_hydrated_entry_is_fresh_for_client() {
        let server = prefetched(Ok(one_note_page()), 1_000);
        let json = server.dehydrate().to_json().expect("serialize");

        let mut client = QueryClient::from_snapshot(QueryOptions::default(), Some(&json));
        assert_eq!(client.len(), 1);

        let key = QueryKey::notes(2, "plan");
        assert_eq!(client.plan_fetch(&key, 5_000), FetchPlan::UseCached);
        assert_eq!(
            client.get(&key).and_then(|e| e.data.clone()),
            Some(one_note_page())
        );
    }

    #[test]
    fn test_error_entry_survives_snapshot_and_refetches() {
        let err = ApiError {
            kind: ApiErrorKind::Http,
            message: "Request failed (500 Internal Server Error): ".to_string(),
        };
        let server = prefetched(Err(err), 1_000);
        let state = server.dehydrate();
        assert_eq!(state.queries.len(), 1);
        assert_eq!(state.queries[0].status, QueryStatus::Error);

        let json = state.to_json().expect("serialize");
        let mut client = QueryClient::from_snapshot(QueryOptions::default(), Some(&json));
        let key = QueryKey::notes(2, "plan");
        assert_eq!(client.get(&key).map(|e| e.status), Some(QueryStatus::Error));
        assert!(matches!(client.plan_fetch(&key, 1_001), FetchPlan::Start(_)));
    }

    #[test]
    fn test_pending_entries_are_not_dehydrated() {
        let mut client = QueryClient::new(QueryOptions::default());
        client.plan_fetch(&QueryKey::notes(1, ""), 0);
        assert!(client.dehydrate().queries.is_empty());
    }

    #[test]
    fn test_missing_or_corrupt_snapshot_gives_empty_cache() {
        assert_eq!(QueryClient::from_snapshot(QueryOptions::default(), None).len(), 0);
        assert_eq!(
            QueryClient::from_snapshot(QueryOptions::default(), Some("  ")).len(),
            0
        );
        assert_eq!(
            QueryClient::from_snapshot(QueryOptions::default(), Some("{not json")).len(),
            0
        );
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let json = r#"{"version": 99, "queries": []}"#;
        assert!(matches!(
            DehydratedState::from_json(json),
            Err(SnapshotError::Version(99))
        ));
    }

    #[test]
    fn test_snapshot_wire_shape() {
        let state = prefetched(Ok(one_note_page()), 42).dehydrate();
        let v: serde_json::Value =
            serde_json::from_str(&state.to_json().expect("serialize")).expect("json");
        assert_eq!(v["version"], 1);
        assert_eq!(v["queries"][0]["key"]["resource"], "notes");
        assert_eq!(v["queries"][0]["key"]["page"], 2);
        assert_eq!(v["queries"][0]["status"], "success");
        assert_eq!(v["queries"][0]["data"]["totalPages"], 3);
        assert_eq!(v["queries"][0]["updated_ms"], 42);
    }
}
