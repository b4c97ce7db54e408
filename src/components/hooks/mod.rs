pub mod use_timeout;

pub use use_timeout::{use_timeout, TimeoutHandle};
