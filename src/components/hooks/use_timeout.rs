use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Single-slot `setTimeout` handle: starting a new timer clears the previous
/// one, and the pending timer is cleared when the owner is disposed.
#[derive(Clone, Copy)]
pub struct TimeoutHandle {
    timer_id: StoredValue<Option<i32>>,
}

impl TimeoutHandle {
    pub fn start(&self, delay_ms: i32, callback: impl FnOnce() + 'static) {
        self.stop();

        let Some(win) = web_sys::window() else {
            return;
        };

        let timer_id = self.timer_id;
        let cb = wasm_bindgen::closure::Closure::once_into_js(move || {
            timer_id.set_value(None);
            callback();
        });

        let tid = win
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                delay_ms.max(0),
            )
            .ok();
        self.timer_id.set_value(tid);
    }

    pub fn stop(&self) {
        if let Some(tid) = self.timer_id.try_get_value().flatten() {
            if let Some(win) = web_sys::window() {
                win.clear_timeout_with_handle(tid);
            }
            self.timer_id.set_value(None);
        }
    }
}

pub fn use_timeout() -> TimeoutHandle {
    let handle = TimeoutHandle {
        timer_id: StoredValue::new(None),
    };
    on_cleanup(move || handle.stop());
    handle
}
