use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use icons::X;
use leptos::ev;
use leptos::prelude::*;
use leptos_dom::helpers::window_event_listener;

/// Overlay panel. Closes on backdrop click, the close button, or Escape.
#[component]
pub fn Modal(#[prop(into)] on_close: Callback<()>, children: Children) -> impl IntoView {
    let handle = window_event_listener(ev::keydown, move |ev| {
        if ev.key() == "Escape" {
            on_close.run(());
        }
    });
    on_cleanup(move || handle.remove());

    let on_backdrop_click = move |ev: ev::MouseEvent| {
        // Clicks inside the panel bubble up with a different target.
        if ev.target() == ev.current_target() {
            on_close.run(());
        }
    };

    view! {
        <div
            data-name="ModalBackdrop"
            class="fixed inset-0 z-50 flex items-center justify-center bg-black/30 px-4"
            on:click=on_backdrop_click
        >
            <div
                data-name="ModalContent"
                role="dialog"
                aria-modal="true"
                class="relative w-full max-w-md rounded-md border border-border bg-background p-6 shadow-lg"
            >
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    class="absolute top-2 right-2"
                    attr:aria-label="Close"
                    on:click=move |_| on_close.run(())
                >
                    <X />
                </Button>
                {children()}
            </div>
        </div>
    }
}
