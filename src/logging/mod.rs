//! Browser console logging bootstrap.
//!
//! # Responsibility
//! - Route the `log` facade to the devtools console.
//! - Install the panic hook so Rust panics surface with a stack trace.
//!
//! # Invariants
//! - Initialization is idempotent for the same level.
//! - Re-initialization with a different level is rejected.
//! - Initialization never panics.

use log::{info, Level, LevelFilter};
use std::sync::OnceLock;

static ACTIVE_LEVEL: OnceLock<LevelFilter> = OnceLock::new();

pub(crate) fn normalize_level(level: &str) -> Result<LevelFilter, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "off" => Ok(LevelFilter::Off),
        "error" => Ok(LevelFilter::Error),
        "warn" | "warning" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        other => Err(format!("unsupported log level `{other}`")),
    }
}

/// Installs the console logger and panic hook.
///
/// # Errors
/// - Returns an error when `level` is unsupported.
/// - Returns an error when logging was already started with another level.
pub(crate) fn init_logging(level: &str) -> Result<(), String> {
    let filter = normalize_level(level)?;

    console_error_panic_hook::set_once();

    let active = *ACTIVE_LEVEL.get_or_init(|| {
        // Another logger may already own the facade (e.g. a test harness).
        let level = filter.to_level().unwrap_or(Level::Error);
        if console_log::init_with_level(level).is_ok() {
            log::set_max_level(filter);
        }
        filter
    });

    if active != filter {
        return Err(format!(
            "logging already initialized with level `{active}`; refusing to switch to `{filter}`"
        ));
    }

    info!(
        "event=app_start module=logging status=ok level={} version={}",
        filter,
        env!("CARGO_PKG_VERSION")
    );
    Ok(())
}
