mod observer;

pub(crate) use observer::{observe, QueryView};

use crate::api::{ApiClient, ApiResult};
use crate::cache::{FetchPlan, QueryClient, QueryKey, Resolution};
use crate::models::NotesPage;
use crate::util::now_ms;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::window_event_listener;
use log::debug;
use std::future::Future;

/// Query cache handle shared with every component under the provider.
#[derive(Clone, Copy)]
pub(crate) struct QueryClientContext {
    client: RwSignal<QueryClient>,
    api: StoredValue<ApiClient>,
    /// Bumped to make observers re-plan their current key.
    generation: RwSignal<u64>,
}

impl QueryClientContext {
    pub fn api(&self) -> ApiClient {
        self.api.get_value()
    }

    /// Marks `resource` entries stale and re-plans active observers.
    ///
    /// A no-op once the provider is disposed.
    pub fn invalidate(&self, resource: &str) {
        if self.client.try_update(|c| c.invalidate(resource)).is_some() {
            self.refresh();
        }
    }

    fn refresh(&self) {
        let _ = self.generation.try_update(|g| *g = g.wrapping_add(1));
    }
}

/// Provides a fresh cache context for the current component subtree.
pub(crate) fn provide_query_client(client: QueryClient, api: ApiClient) -> QueryClientContext {
    let refetch_on_focus = client.options().refetch_on_window_focus;
    let ctx = QueryClientContext {
        client: RwSignal::new(client),
        api: StoredValue::new(api),
        generation: RwSignal::new(0),
    };

    if refetch_on_focus {
        let handle = window_event_listener(ev::focus, move |_| ctx.refresh());
        on_cleanup(move || handle.remove());
    }

    provide_context(ctx);
    ctx
}

pub(crate) fn use_query_client() -> QueryClientContext {
    expect_context::<QueryClientContext>()
}

/// Subscribes to the notes page for `key`, fetching whenever the key changes
/// and the cache has nothing fresh for it.
pub(crate) fn use_notes_query(key: Memo<QueryKey>) -> Memo<QueryView> {
    let ctx = use_query_client();

    Effect::new(move |_| {
        let key = key.get();
        ctx.generation.track();

        let plan = ctx.client.try_update(|c| c.plan_fetch(&key, now_ms()));
        match plan {
            Some(FetchPlan::Start(request_id)) => run_fetch(ctx, key, request_id),
            Some(plan) => debug!("event=fetch_skipped key={} plan={:?}", key, plan),
            None => {}
        }
    });

    Memo::new(move |previous: Option<&QueryView>| {
        let key = key.get();
        ctx.client.with(|c| observe(c.get(&key), previous))
    })
}

fn run_fetch(ctx: QueryClientContext, key: QueryKey, request_id: u64) {
    let api = ctx.api();
    spawn_local(async move {
        let params = key.fetch_params();
        let attempts = fetch_until_settled(
            || api.fetch_notes(&params),
            // `None` means the provider was disposed while the request ran.
            |result| {
                ctx.client
                    .try_update(|c| c.resolve(&key, request_id, result, now_ms()))
            },
        )
        .await;
        debug!("event=fetch_done key={} attempts={}", key, attempts);
    });
}

/// Sends `fetch` until `apply` stops asking for a retry. Returns the number of
/// requests sent.
async fn fetch_until_settled<F, Fut, A>(mut fetch: F, mut apply: A) -> u32
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ApiResult<NotesPage>>,
    A: FnMut(ApiResult<NotesPage>) -> Option<Resolution>,
{
    let mut attempts = 0;
    loop {
        attempts += 1;
        let result = fetch().await;
        if apply(result) != Some(Resolution::Retry) {
            return attempts;
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::api::{ApiError, ApiErrorKind};
    use crate::cache::{QueryClient, QueryOptions, QueryStatus};
    use std::cell::{Cell, RefCell};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn offline() -> ApiError {
        ApiError {
            kind: ApiErrorKind::Network,
            message: "offline".to_string(),
        }
    }

    fn start(client: &RefCell<QueryClient>, key: &QueryKey) -> u64 {
        match client.borrow_mut().plan_fetch(key, 0) {
            FetchPlan::Start(id) => id,
            other => panic!("expected a fetch, got {other:?}"),
        }
    }

    #[wasm_bindgen_test]
    async fn test_failed_fetch_is_retried_once_then_settles() {
        let client = RefCell::new(QueryClient::new(QueryOptions::default()));
        let key = QueryKey::notes(1, "");
        let id = start(&client, &key);
        let calls = Cell::new(0);

        let attempts = fetch_until_settled(
            || {
                calls.set(calls.get() + 1);
                let result = if calls.get() == 1 {
                    Err(offline())
                } else {
                    Ok(NotesPage {
                        notes: vec![],
                        total_pages: 2,
                    })
                };
                async move { result }
            },
            |result| Some(client.borrow_mut().resolve(&key, id, result, 5)),
        )
        .await;

        assert_eq!(attempts, 2);
        assert_eq!(calls.get(), 2);
        let status = client.borrow().get(&key).map(|e| e.status);
        assert_eq!(status, Some(QueryStatus::Success));
    }

    #[wasm_bindgen_test]
    async fn test_second_failure_stops_retrying() {
        let client = RefCell::new(QueryClient::new(QueryOptions::default()));
        let key = QueryKey::notes(1, "cat");
        let id = start(&client, &key);

        let attempts = fetch_until_settled(
            || async { Err(offline()) },
            |result| Some(client.borrow_mut().resolve(&key, id, result, 5)),
        )
        .await;

        assert_eq!(attempts, 2);
        let status = client.borrow().get(&key).map(|e| e.status);
        assert_eq!(status, Some(QueryStatus::Error));
    }

    #[wasm_bindgen_test]
    async fn test_disposed_cache_stops_after_one_request() {
        let attempts = fetch_until_settled(|| async { Err(offline()) }, |_| None).await;
        assert_eq!(attempts, 1);
    }
}
