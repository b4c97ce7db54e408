mod api;
mod app;
mod bootstrap;
mod cache;
mod components;
mod logging;
mod models;
mod notes;
mod pages;
mod query;
mod state;
mod util;

use crate::api::{EnvConfig, DEFAULT_LOG_LEVEL};
use crate::app::App;
use leptos::prelude::*;
use log::warn;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    let config = EnvConfig::new();
    if let Err(e) = logging::init_logging(&config.log_level) {
        // Unsupported level: fall back so the failure itself is visible.
        if logging::init_logging(DEFAULT_LOG_LEVEL).is_ok() {
            warn!("event=logging_init status=fallback error={}", e);
        }
    }
    mount_to_body(move || view! { <App config=config /> });
}
