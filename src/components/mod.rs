pub mod hooks;
pub mod notes;
pub mod ui;
