//! File-Backed Logging
//!
//! The alternate screen belongs to the UI, so log output can never go to
//! stdout/stderr while the client runs. When `CELL_LOG` is set it is used as
//! a tracing filter (e.g. `debug` or `cell_core=trace`) and events are
//! appended to `~/.cell/cell.log`; when unset, logging stays off entirely.

use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter.
pub const LOG_ENV: &str = "CELL_LOG";

/// Install the file subscriber if `CELL_LOG` asks for one. Failures to set
/// up the log file silently disable logging; they must not stop the client.
pub fn init() {
    let Ok(filter) = std::env::var(LOG_ENV) else {
        return;
    };
    if filter.is_empty() {
        return;
    }
    let Some(dir) = cell_core::config::config_dir() else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("cell.log"))
    else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
}
