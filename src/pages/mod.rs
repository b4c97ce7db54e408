use crate::bootstrap::{prefetch_notes, NavParams};
use crate::cache::{QueryClient, QueryOptions};
use crate::components::hooks::{use_timeout, TimeoutHandle};
use crate::components::notes::{Modal, NoteForm, NoteList, Pagination, SearchBox};
use crate::components::ui::{Button, ErrorAlert, Spinner};
use crate::notes::{NotesBody, NotesController};
use crate::query::{provide_query_client, use_notes_query};
use crate::state::AppContext;
use crate::util::now_ms;
use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use log::debug;

/// Entry for `/notes?page=&query=`.
///
/// Prefetches the requested page once, then mounts the interactive page with
/// the resulting snapshot. The URL is read once; later page and search changes
/// stay inside the page.
#[component]
pub fn NotesRoute() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let query = use_query_map();

    let nav = query.with_untracked(|q| {
        NavParams::from_query(q.get("page").as_deref(), q.get("query").as_deref())
    });

    let prefetch = {
        let nav = nav.clone();
        let api = app_state.0.api_client.clone();
        LocalResource::new(move || {
            let api = api.clone();
            let nav = nav.clone();
            async move { prefetch_notes(&api, &nav).await }
        })
    };

    view! {
        <Suspense fallback=|| view! { <PageSpinner /> }>
            {move || {
                let nav = nav.clone();
                prefetch.get().map(|snapshot| view! { <NotesClient snapshot=snapshot nav=nav /> })
            }}
        </Suspense>
    }
}

/// Hydrates a page-scoped cache from `snapshot` and renders the page under it.
#[component]
fn NotesClient(snapshot: Option<String>, nav: NavParams) -> impl IntoView {
    let app_state = expect_context::<AppContext>();

    let client = QueryClient::from_snapshot(QueryOptions::default(), snapshot.as_deref());
    debug!("event=cache_ready entries={}", client.len());
    provide_query_client(client, app_state.0.api_client);

    view! { <NotesContent nav=nav /> }
}

#[component]
fn NotesContent(nav: NavParams) -> impl IntoView {
    let controller: RwSignal<NotesController> = RwSignal::new(NotesController::seeded(&nav));

    let search = Memo::new(move |_| controller.with(|c| c.state().search.clone()));
    let page = Memo::new(move |_| controller.with(|c| c.state().page));
    let is_modal_open = Memo::new(move |_| controller.with(|c| c.state().is_modal_open));
    let key = Memo::new(move |_| controller.with(|c| c.query_key()));

    let notes = use_notes_query(key);
    let debounce = use_timeout();

    let on_search = move |value: String| {
        let now = now_ms();
        if let Some(deadline) = controller.try_update(|c| c.on_search_change(value, now)) {
            schedule_settle(controller, debounce, deadline - now);
        }
    };
    let on_page_change = move |p: u32| controller.update(|c| c.on_page_change(p));
    let open_modal = move |_| controller.update(|c| c.open_modal());
    let close_modal = move |_: ()| controller.update(|c| c.close_modal());

    let page_count = Signal::derive(move || notes.with(|v| v.total_pages()));

    view! {
        <main class="mx-auto flex w-full max-w-5xl flex-col gap-4 px-4 py-6">
            <header class="flex flex-wrap items-center justify-between gap-3">
                <SearchBox value=search on_change=on_search />

                <Show when=move || notes.with(|v| v.show_pagination()) fallback=|| ().into_view()>
                    <Pagination
                        page_count=page_count
                        current_page=page
                        on_page_change=on_page_change
                    />
                </Show>

                <div class="flex items-center gap-3">
                    <Show when=move || notes.with(|v| v.is_refreshing()) fallback=|| ().into_view()>
                        <Spinner />
                    </Show>
                    <Button on:click=open_modal>"Create note +"</Button>
                </div>
            </header>

            <div class=move || notes.with(|v| v.content_class())>
                {move || match notes.with(|v| v.body()) {
                    NotesBody::Loading => view! { <PageSpinner /> }.into_any(),
                    NotesBody::Error(message) => view! { <ErrorAlert message=message /> }.into_any(),
                    NotesBody::Empty => {
                        view! {
                            <p class="py-8 text-center text-sm text-muted-foreground">"No notes found"</p>
                        }
                            .into_any()
                    }
                    NotesBody::List(list) => view! { <NoteList notes=list /> }.into_any(),
                }}
            </div>

            <Show when=move || is_modal_open.get() fallback=|| ().into_view()>
                <Modal on_close=close_modal>
                    <NoteForm on_cancel=close_modal on_success=close_modal />
                </Modal>
            </Show>
        </main>
    }
}

/// Settles the debounced search once its window elapses, re-arming if newer
/// text moved the deadline.
fn schedule_settle(controller: RwSignal<NotesController>, timer: TimeoutHandle, delay_ms: i64) {
    let delay = delay_ms.clamp(0, i32::MAX as i64) as i32;
    timer.start(delay, move || {
        let now = now_ms();
        let pending = controller
            .try_update(|c| {
                c.settle_search(now);
                c.search_deadline()
            })
            .flatten();
        if let Some(deadline) = pending {
            schedule_settle(controller, timer, deadline - now);
        }
    });
}

#[component]
fn PageSpinner() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center gap-2 py-8 text-sm text-muted-foreground">
            <Spinner />
            "Loading..."
        </div>
    }
}
