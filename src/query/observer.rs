use crate::cache::{QueryEntry, QueryStatus};
use crate::models::NotesPage;

/// What a component sees for its current key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct QueryView {
    pub data: Option<NotesPage>,
    pub error: Option<String>,
    /// Pending with nothing to show.
    pub is_loading: bool,
    pub is_error: bool,
    /// `data` belongs to the previously observed key.
    pub is_placeholder: bool,
    pub is_fetching: bool,
}

/// Derives the view for `entry`, carrying `previous` data forward while the
/// new key has nothing yet.
pub(crate) fn observe(entry: Option<&QueryEntry>, previous: Option<&QueryView>) -> QueryView {
    let is_fetching = entry.map(|e| e.is_fetching()).unwrap_or(false);
    let status = entry.map(|e| e.status).unwrap_or(QueryStatus::Pending);

    if let Some(data) = entry.and_then(|e| e.data.clone()) {
        return QueryView {
            data: Some(data),
            error: entry.and_then(|e| e.error.clone()),
            is_loading: false,
            is_error: status == QueryStatus::Error,
            is_placeholder: false,
            is_fetching,
        };
    }

    if status == QueryStatus::Error {
        return QueryView {
            data: None,
            error: entry.and_then(|e| e.error.clone()),
            is_loading: false,
            is_error: true,
            is_placeholder: false,
            is_fetching,
        };
    }

    match previous.and_then(|p| p.data.clone()) {
        Some(data) => QueryView {
            data: Some(data),
            error: None,
            is_loading: false,
            is_error: false,
            is_placeholder: true,
            is_fetching,
        },
        None => QueryView {
            data: None,
            error: None,
            is_loading: true,
            is_error: false,
            is_placeholder: false,
            is_fetching,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ApiErrorKind};
    use crate::cache::{FetchPlan, QueryClient, QueryKey, QueryOptions};

    fn page(total_pages: u32) -> NotesPage {
        NotesPage {
            notes: vec![],
            total_pages,
        }
    }

    #[test]
    fn test_unknown_key_without_previous_is_loading() {
        let view = observe(None, None);
        assert!(view.is_loading);
        assert!(view.data.is_none());
    }

    #[test]
    fn test_pending_key_keeps_previous_data_visible() {
        let mut client = QueryClient::new(QueryOptions::default());
        let key = QueryKey::notes(2, "");
        client.plan_fetch(&key, 0);

        let previous = QueryView {
            data: Some(page(4)),
            ..Default::default()
        };
        let view = observe(client.get(&key), Some(&previous));
        assert!(!view.is_loading);
        assert!(view.is_placeholder);
        assert!(view.is_fetching);
        assert_eq!(view.data, Some(page(4)));
    }

    #[test]
    fn test_error_without_data_is_not_placeholder() {
        let mut client = QueryClient::new(QueryOptions::prefetch());
        let key = QueryKey::notes(1, "x");
        let FetchPlan::Start(id) = client.plan_fetch(&key, 0) else {
            panic!("expected fetch");
        };
        let err = ApiError {
            kind: ApiErrorKind::Network,
            message: "offline".to_string(),
        };
        client.resolve(&key, id, Err(err), 1);

        let previous = QueryView {
            data: Some(page(2)),
            ..Default::default()
        };
        let view = observe(client.get(&key), Some(&previous));
        assert!(view.is_error);
        assert!(!view.is_loading);
        assert!(view.data.is_none());
        assert_eq!(view.error.as_deref(), Some("offline"));
    }

    #[test]
    fn test_late_response_for_abandoned_key_keeps_current_view() {
        let mut client = QueryClient::new(QueryOptions::default());
        let shown = QueryView {
            data: Some(page(3)),
            ..Default::default()
        };

        let abandoned = QueryKey::notes(1, "cat");
        let FetchPlan::Start(abandoned_id) = client.plan_fetch(&abandoned, 0) else {
            panic!("expected fetch");
        };
        let current = QueryKey::notes(1, "catalog");
        client.plan_fetch(&current, 1);
        let view = observe(client.get(&current), Some(&shown));
        assert!(view.is_placeholder);

        client.resolve(&abandoned, abandoned_id, Ok(page(7)), 2);
        let view = observe(client.get(&current), Some(&view));

        assert_eq!(view.data, Some(page(3)));
        assert!(view.is_placeholder);
        assert!(view.is_fetching);
        assert!(!view.is_loading);
    }

    #[test]
    fn test_success_replaces_placeholder() {
        let mut client = QueryClient::new(QueryOptions::default());
        let key = QueryKey::notes(1, "");
        let FetchPlan::Start(id) = client.plan_fetch(&key, 0) else {
            panic!("expected fetch");
        };
        client.resolve(&key, id, Ok(page(1)), 1);

        let previous = QueryView {
            data: Some(page(9)),
            is_placeholder: true,
            ..Default::default()
        };
        let view = observe(client.get(&key), Some(&previous));
        assert_eq!(view.data, Some(page(1)));
        assert!(!view.is_placeholder);
        assert!(!view.is_fetching);
    }
}
