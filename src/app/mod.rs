use crate::api::EnvConfig;
use crate::pages::NotesRoute;
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use log::info;

#[component]
pub fn App(#[prop(optional)] config: Option<EnvConfig>) -> impl IntoView {
    let state = AppState::new(config.unwrap_or_default());
    info!("event=app_mount api_url={}", state.config.api_url);
    provide_context(AppContext(state));

    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("notes") view=NotesRoute />
                <Route path=path!("") view=NotesRoute />
            </Routes>
        </Router>
    }
}
