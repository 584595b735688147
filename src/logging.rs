use std::env;
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_FILE_NAME: &str = "closet.log";

/// Route tracing output to `<log_dir>/closet.log`.
///
/// The terminal belongs to the TUI, so nothing is written to stdout. The level
/// comes from `CLOSET_LOG` (default `info`). Keep the returned guard alive
/// until exit so buffered lines are flushed.
pub fn init_logging(log_dir: &Path) -> WorkerGuard {
    let filter = env::var("CLOSET_LOG").unwrap_or_else(|_| "info".to_string());
    let filter_layer = EnvFilter::new(filter);

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(false),
        )
        .with(filter_layer)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "closet starting");

    guard
}
