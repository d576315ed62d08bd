#![forbid(unsafe_code)]

//! Opt-in file logging.
//!
//! The TUI owns stdout and stderr while running, so log output goes to a
//! file instead. Disabled unless `TOKENFORGE_LOG` is set to a tracing
//! filter (e.g. `debug` or `tokenforge=trace`).

use std::fs::File;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "tokenforge.log";

/// Install the global tracing subscriber if `TOKENFORGE_LOG` is set.
///
/// Best-effort: a bad filter or unwritable log file silently disables
/// logging rather than aborting the UI.
pub fn init() {
    let Ok(filter) = std::env::var("TOKENFORGE_LOG") else {
        return;
    };
    if filter.is_empty() {
        return;
    }
    let Ok(file) = File::create(LOG_FILE) else {
        return;
    };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
