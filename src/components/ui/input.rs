use leptos::prelude::*;
use tw_merge::tw_merge;

const FIELD_CLASS: &str = "placeholder:text-muted-foreground selection:bg-primary selection:text-primary-foreground dark:bg-input/30 border-input w-full min-w-0 rounded-md border bg-transparent px-3 py-1 text-base shadow-xs transition-[color,box-shadow] outline-none disabled:pointer-events-none disabled:cursor-not-allowed disabled:opacity-50 md:text-sm focus-visible:border-ring focus-visible:ring-ring/50 focus-visible:ring-2 aria-invalid:ring-destructive/20 dark:aria-invalid:ring-destructive/40 aria-invalid:border-destructive";

/// Controlled text input: renders `value`, reports every keystroke.
#[component]
pub fn Input(
    #[prop(into, optional)] class: String,
    #[prop(into, default = "text")] r#type: &'static str,
    #[prop(into, optional)] placeholder: String,
    #[prop(into, optional)] name: String,
    #[prop(into, optional)] id: String,
    #[prop(optional)] autofocus: bool,
    #[prop(into, default = Signal::stored(false))] invalid: Signal<bool>,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_value: Callback<String>,
) -> impl IntoView {
    let merged_class = tw_merge!(FIELD_CLASS, "flex h-9", class);

    view! {
        <input
            data-name="Input"
            type=r#type
            class=merged_class
            placeholder=placeholder
            name=name
            id=id
            autofocus=autofocus
            aria-invalid=move || invalid.get().then_some("true")
            prop:value=move || value.get()
            on:input=move |ev| on_value.run(event_target_value(&ev))
        />
    }
}

#[component]
pub fn Textarea(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] name: String,
    #[prop(into, optional)] id: String,
    #[prop(default = 4)] rows: u32,
    #[prop(into, default = Signal::stored(false))] invalid: Signal<bool>,
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_value: Callback<String>,
) -> impl IntoView {
    let merged_class = tw_merge!(FIELD_CLASS, "min-h-16 py-2", class);

    view! {
        <textarea
            data-name="Textarea"
            class=merged_class
            name=name
            id=id
            rows=rows.to_string()
            aria-invalid=move || invalid.get().then_some("true")
            prop:value=move || value.get()
            on:input=move |ev| on_value.run(event_target_value(&ev))
        />
    }
}
