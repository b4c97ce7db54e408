use crate::cache::NOTES_RESOURCE;
use crate::components::ui::{Button, ButtonSize, ButtonVariant, ErrorAlert};
use crate::models::Note;
use crate::query::use_query_client;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};

#[component]
pub fn NoteList(notes: Vec<Note>) -> impl IntoView {
    let ctx = use_query_client();

    // Id of the note whose delete request is running.
    let deleting: RwSignal<Option<String>> = RwSignal::new(None);
    let delete_error: RwSignal<Option<String>> = RwSignal::new(None);

    let on_delete = move |id: String| {
        if deleting.get_untracked().is_some() {
            return;
        }
        deleting.set(Some(id.clone()));
        delete_error.set(None);

        let api = ctx.api();
        spawn_local(async move {
            let result = api.delete_note(&id).await;
            let _ = deleting.try_set(None);
            match result {
                Ok(_) => {
                    info!("event=note_deleted id={}", id);
                    ctx.invalidate(NOTES_RESOURCE);
                }
                Err(e) => {
                    warn!("event=note_delete_failed id={} error={}", id, e);
                    let _ = delete_error.try_set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <div class="space-y-3">
            <Show when=move || delete_error.get().is_some() fallback=|| ().into_view()>
                {move || delete_error.get().map(|e| view! { <ErrorAlert message=e /> })}
            </Show>

            <ul class="grid grid-cols-1 gap-3 sm:grid-cols-2 lg:grid-cols-3">
                {notes
                    .into_iter()
                    .map(|n| {
                        let id = n.id.clone();
                        let id_busy = n.id.clone();
                        view! {
                            <li class="flex flex-col gap-2 rounded-md border border-border bg-background px-4 py-3">
                                <h2 class="truncate text-sm font-medium">{n.title}</h2>
                                <p class="line-clamp-4 whitespace-pre-wrap text-xs text-muted-foreground">
                                    {n.content}
                                </p>
                                <div class="mt-auto flex items-center justify-between pt-2">
                                    <span class="rounded-full bg-accent px-2 py-0.5 text-xs">
                                        {n.tag.to_string()}
                                    </span>
                                    <Button
                                        variant=ButtonVariant::Destructive
                                        size=ButtonSize::Sm
                                        attr:disabled=move || deleting.get().is_some()
                                        on:click=move |_| on_delete(id.clone())
                                    >
                                        {move || {
                                            if deleting.get().as_deref() == Some(id_busy.as_str()) {
                                                "Deleting..."
                                            } else {
                                                "Delete"
                                            }
                                        }}
                                    </Button>
                                </div>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </div>
    }
}
