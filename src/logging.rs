//! File logging. The terminal belongs to the UI, so everything goes to a
//! daily rolling log file instead of stderr.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{LoggingSettings, default_state_dir};

/// Where log files are written, if anywhere.
pub fn log_dir(settings: &LoggingSettings) -> Option<PathBuf> {
    settings
        .directory
        .as_ref()
        .map(PathBuf::from)
        .or_else(default_state_dir)
}

/// Filter from `RUST_LOG`, falling back to the configured level.
fn filter(settings: &LoggingSettings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Keep the returned guard alive until exit so
/// buffered lines are flushed.
pub fn init(settings: &LoggingSettings) -> Option<WorkerGuard> {
    let Some(dir) = log_dir(settings) else {
        eprintln!("rondo: no log directory available, logging disabled");
        return None;
    };
    if let Err(e) = std::fs::create_dir_all(&dir) {
        eprintln!(
            "rondo: cannot create log directory {}: {e}",
            dir.display()
        );
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&dir, "rondo.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let subscriber = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_env_filter(filter(settings))
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("rondo: logging already initialised: {e}");
        return None;
    }

    Some(guard)
}
