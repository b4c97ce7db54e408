mod controller;
mod debounce;
mod view;

pub(crate) use controller::{NotesController, SEARCH_DEBOUNCE_MS};
pub(crate) use view::NotesBody;
