use super::debounce::Debouncer;
use crate::bootstrap::NavParams;
use crate::cache::QueryKey;

/// Inactivity window before typed search text becomes part of the query key.
pub(crate) const SEARCH_DEBOUNCE_MS: i64 = 500;

/// Mutable state of the notes page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ViewState {
    pub page: u32,
    /// What the search box shows; updated on every keystroke.
    pub search: String,
    /// What the query key uses; trails `search` by the debounce window.
    pub debounced_search: String,
    pub is_modal_open: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            page: 1,
            search: String::new(),
            debounced_search: String::new(),
            is_modal_open: false,
        }
    }
}

/// Owns [`ViewState`] and applies every transition the page can make.
#[derive(Clone, Debug)]
pub(crate) struct NotesController {
    state: ViewState,
    search_debounce: Debouncer<String>,
}

impl Default for NotesController {
    fn default() -> Self {
        Self::new()
    }
}

impl NotesController {
    pub fn new() -> Self {
        Self {
            state: ViewState::default(),
            search_debounce: Debouncer::new(SEARCH_DEBOUNCE_MS),
        }
    }

    /// Starts from the navigation page/query so the first key matches the
    /// prefetched one.
    pub fn seeded(nav: &NavParams) -> Self {
        let mut c = Self::new();
        c.state.page = nav.page.max(1);
        c.state.search = nav.query.clone();
        c.state.debounced_search = nav.query.clone();
        c
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Returns the time at which the new text becomes eligible for the key.
    pub fn on_search_change(&mut self, value: String, now_ms: i64) -> i64 {
        self.state.search = value.clone();
        self.state.page = 1;
        self.search_debounce.push(value, now_ms)
    }

    pub fn on_page_change(&mut self, page: u32) {
        self.state.page = page.max(1);
    }

    pub fn open_modal(&mut self) {
        self.state.is_modal_open = true;
    }

    pub fn close_modal(&mut self) {
        self.state.is_modal_open = false;
    }

    /// Promotes the pending search text once the window has elapsed.
    /// Returns `true` when the debounced value changed.
    pub fn settle_search(&mut self, now_ms: i64) -> bool {
        match self.search_debounce.take_due(now_ms) {
            Some(value) if value != self.state.debounced_search => {
                self.state.debounced_search = value;
                true
            }
            _ => false,
        }
    }

    pub fn search_deadline(&self) -> Option<i64> {
        self.search_debounce.deadline()
    }

    pub fn query_key(&self) -> QueryKey {
        QueryKey::notes(self.state.page, self.state.debounced_search.clone())
    }
}
