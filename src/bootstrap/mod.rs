//! First-render prefetch.
//!
//! Phase one of hydration: fetch the page the URL asks for into a throwaway
//! cache and hand its serialized snapshot to the interactive page, which seeds
//! its own cache with it instead of fetching the same key again.

use crate::api::{ApiClient, ApiError};
use crate::cache::{DehydratedState, FetchPlan, QueryClient, QueryKey, QueryOptions};
use crate::models::NotesPage;
use crate::util::{now_ms, parse_page_param};
use log::{info, warn};

/// Page and search text taken from the URL (`?page=2&query=cat`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct NavParams {
    pub page: u32,
    pub query: String,
}

impl NavParams {
    pub fn from_query(page: Option<&str>, query: Option<&str>) -> Self {
        Self {
            page: parse_page_param(page),
            query: query.unwrap_or_default().to_string(),
        }
    }

    pub fn query_key(&self) -> QueryKey {
        QueryKey::notes(self.page, self.query.clone())
    }
}

/// Stores one fetch outcome in a fresh cache and snapshots it. Failures are
/// kept as error entries; this never fails.
pub(crate) fn capture(
    key: &QueryKey,
    result: Result<NotesPage, ApiError>,
    now_ms: i64,
) -> DehydratedState {
    let mut client = QueryClient::new(QueryOptions::prefetch());
    if let FetchPlan::Start(request_id) = client.plan_fetch(key, now_ms) {
        client.resolve(key, request_id, result, now_ms);
    }
    client.dehydrate()
}

/// Runs the single prefetch for `nav` and returns the serialized snapshot.
///
/// `None` only when serialization fails, in which case the page starts with
/// an empty cache.
pub(crate) async fn prefetch_notes(api: &ApiClient, nav: &NavParams) -> Option<String> {
    let key = nav.query_key();
    let result = api.fetch_notes(&key.fetch_params()).await;
    let status = if result.is_ok() { "ok" } else { "error" };
    info!("event=prefetch key={} status={}", key, status);

    match capture(&key, result, now_ms()).to_json() {
        Ok(json) => Some(json),
        Err(e) => {
            warn!("event=prefetch_serialize status=failed error={}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiErrorKind;
    use crate::cache::QueryStatus;

    #[test]
    fn test_nav_params_defaults() {
        let nav = NavParams::from_query(None, None);
        assert_eq!(nav.page, 1);
        assert_eq!(nav.query, "");
        assert_eq!(nav.query_key(), QueryKey::notes(1, ""));
    }

    #[test]
    fn test_nav_params_non_numeric_page() {
        let nav = NavParams::from_query(Some("two"), Some("cat"));
        assert_eq!(nav.query_key(), QueryKey::notes(1, "cat"));
    }

    #[test]
    fn test_capture_holds_exactly_the_prefetched_entry() {
        let key = QueryKey::notes(3, "cat");
        let page = NotesPage {
            notes: vec![],
            total_pages: 2,
        };
        let state = capture(&key, Ok(page.clone()), 10);

        assert_eq!(state.queries.len(), 1);
        assert_eq!(state.queries[0].key, key);
        assert_eq!(state.queries[0].status, QueryStatus::Success);
        assert_eq!(state.queries[0].data, Some(page));
        assert_eq!(state.queries[0].updated_ms, 10);
    }

    #[test]
    fn test_capture_keeps_failure_as_error_entry() {
        let key = QueryKey::notes(1, "");
        let err = ApiError {
            kind: ApiErrorKind::Unauthorized,
            message: "Unauthorized".to_string(),
        };
        let state = capture(&key, Err(err), 10);

        assert_eq!(state.queries.len(), 1);
        assert_eq!(state.queries[0].status, QueryStatus::Error);
        assert_eq!(state.queries[0].error.as_deref(), Some("Unauthorized"));
        assert!(state.queries[0].data.is_none());
    }
}
