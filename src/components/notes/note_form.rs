use crate::api::ApiResult;
use crate::cache::NOTES_RESOURCE;
use crate::components::ui::{Button, ErrorAlert, FieldError, Input, Label, Spinner, Textarea};
use crate::models::{NewNote, Note, NoteTag};
use crate::query::use_query_client;
use crate::util::char_len;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, info, warn};
use std::str::FromStr;
use strum::IntoEnumIterator;

const TITLE_MIN: usize = 3;
const TITLE_MAX: usize = 50;
const CONTENT_MAX: usize = 500;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct NoteFormErrors {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NoteFormErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }
}

pub(crate) fn validate_note(note: &NewNote) -> NoteFormErrors {
    let title_len = char_len(note.title.trim());
    let title = if title_len == 0 {
        Some("Title is required".to_string())
    } else if title_len < TITLE_MIN {
        Some(format!("Title must be at least {TITLE_MIN} characters"))
    } else if title_len > TITLE_MAX {
        Some(format!("Title must be at most {TITLE_MAX} characters"))
    } else {
        None
    };

    let content = (char_len(&note.content) > CONTENT_MAX)
        .then(|| format!("Content must be at most {CONTENT_MAX} characters"));

    NoteFormErrors { title, content }
}

/// Applies a finished create request.
///
/// The modal can be dismissed while the request runs, which disposes the form
/// signals and `on_success`; every step here tolerates that.
fn finish_create(
    result: ApiResult<Note>,
    saving: RwSignal<bool>,
    submit_error: RwSignal<Option<String>>,
    on_created: impl FnOnce(),
    on_success: Callback<()>,
) {
    let _ = saving.try_set(false);
    match result {
        Ok(created) => {
            info!("event=note_created id={}", created.id);
            on_created();
            // Unmounts this form.
            if on_success.try_run(()).is_none() {
                debug!("event=note_form_closed_before_create id={}", created.id);
            }
        }
        Err(e) => {
            warn!("event=note_create_failed error={}", e);
            let _ = submit_error.try_set(Some(e.to_string()));
        }
    }
}

/// Create-note form. `on_cancel` leaves everything untouched; a successful
/// submit invalidates the notes listing and then calls `on_success`.
#[component]
pub fn NoteForm(
    #[prop(into)] on_cancel: Callback<()>,
    #[prop(into)] on_success: Callback<()>,
) -> impl IntoView {
    let ctx = use_query_client();

    let title: RwSignal<String> = RwSignal::new(String::new());
    let content: RwSignal<String> = RwSignal::new(String::new());
    let tag: RwSignal<NoteTag> = RwSignal::new(NoteTag::default());

    let errors: RwSignal<NoteFormErrors> = RwSignal::new(NoteFormErrors::default());
    let submit_error: RwSignal<Option<String>> = RwSignal::new(None);
    let saving: RwSignal<bool> = RwSignal::new(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }

        let note = NewNote {
            title: title.get_untracked().trim().to_string(),
            content: content.get_untracked(),
            tag: tag.get_untracked(),
        };
        let found = validate_note(&note);
        let valid = found.is_empty();
        errors.set(found);
        if !valid {
            return;
        }

        saving.set(true);
        submit_error.set(None);

        let api = ctx.api();
        spawn_local(async move {
            let result = api.create_note(&note).await;
            finish_create(
                result,
                saving,
                submit_error,
                || ctx.invalidate(NOTES_RESOURCE),
                on_success,
            );
        });
    };

    view! {
        <form class="flex flex-col gap-4" on:submit=on_submit>
            <h2 class="text-lg font-semibold">"New note"</h2>

            <div class="flex flex-col gap-2">
                <Label html_for="note-title">"Title"</Label>
                <Input
                    id="note-title"
                    name="title"
                    autofocus=true
                    value=title
                    on_value=move |v: String| title.set(v)
                    invalid=Signal::derive(move || errors.get().title.is_some())
                />
                <FieldError message=Signal::derive(move || errors.get().title) />
            </div>

            <div class="flex flex-col gap-2">
                <Label html_for="note-content">"Content"</Label>
                <Textarea
                    id="note-content"
                    name="content"
                    rows=8
                    value=content
                    on_value=move |v: String| content.set(v)
                    invalid=Signal::derive(move || errors.get().content.is_some())
                />
                <FieldError message=Signal::derive(move || errors.get().content) />
            </div>

            <div class="flex flex-col gap-2">
                <Label html_for="note-tag">"Tag"</Label>
                <select
                    id="note-tag"
                    name="tag"
                    class="border-input h-9 rounded-md border bg-transparent px-3 text-sm"
                    on:change=move |ev| {
                        if let Ok(t) = NoteTag::from_str(&event_target_value(&ev)) {
                            tag.set(t);
                        }
                    }
                >
                    {NoteTag::iter()
                        .map(|t| {
                            view! {
                                <option value=t.to_string() selected=move || tag.get() == t>
                                    {t.to_string()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <Show when=move || submit_error.get().is_some() fallback=|| ().into_view()>
                {move || submit_error.get().map(|e| view! { <ErrorAlert message=e /> })}
            </Show>

            <div class="flex items-center justify-end gap-2 pt-2">
                // A plain <button> inside a form submits; this one must not.
                <button
                    type="button"
                    class="inline-flex h-9 items-center rounded-md border bg-border/30 px-4 text-sm font-medium shadow-xs hover:bg-border/50 disabled:opacity-50"
                    disabled=move || saving.get()
                    on:click=move |_| on_cancel.run(())
                >
                    "Cancel"
                </button>
                <Button attr:disabled=move || saving.get()>
                    <span class="inline-flex items-center gap-2">
                        <Show when=move || saving.get() fallback=|| ().into_view()>
                            <Spinner />
                        </Show>
                        {move || if saving.get() { "Creating..." } else { "Create note" }}
                    </span>
                </Button>
            </div>
        </form>
    }
}
