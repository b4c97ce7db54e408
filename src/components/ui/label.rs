use leptos::prelude::*;
use tw_merge::*;

#[component]
pub fn Label(
    #[prop(optional, into)] class: String,
    #[prop(optional, into)] html_for: String,
    children: Children,
) -> impl IntoView {
    let class = tw_merge!(
        "flex items-center gap-2 text-sm leading-none font-medium select-none",
        class
    );

    view! {
        <label class=class r#for=html_for>
            {children()}
        </label>
    }
}

/// Validation message rendered under a form field.
#[component]
pub fn FieldError(#[prop(into)] message: Signal<Option<String>>) -> impl IntoView {
    move || {
        message
            .get()
            .map(|m| view! { <span class="text-xs text-destructive">{m}</span> })
    }
}
