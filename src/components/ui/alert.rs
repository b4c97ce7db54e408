use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Alert, div, "relative w-full rounded-lg border px-4 py-3 text-sm"}
    clx! {AlertDescription, p, "text-sm [&_p]:leading-relaxed"}
}

pub use components::*;

/// Inline, non-blocking error message.
#[component]
pub fn ErrorAlert(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <Alert class="border-destructive/30" attr:role="alert">
            <AlertDescription class="text-destructive">{message}</AlertDescription>
        </Alert>
    }
}
