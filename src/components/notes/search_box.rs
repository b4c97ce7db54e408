use crate::components::ui::Input;
use icons::Search;
use leptos::prelude::*;

#[component]
pub fn SearchBox(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <div class="relative w-full max-w-xs">
            <Search class="pointer-events-none absolute left-2.5 top-2.5 size-4 text-muted-foreground" />
            <Input
                r#type="search"
                class="pl-8"
                placeholder="Search notes"
                name="search"
                value=value
                on_value=on_change
            />
        </div>
    }
}
