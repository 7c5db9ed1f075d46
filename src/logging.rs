//! File-only tracing for the binary. The terminal belongs to the UI, so nothing goes to stdout/stderr.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Checked before `RUST_LOG`.
const LOG_ENV: &str = "MDTYPER_LOG";
const DEFAULT_DIRECTIVE: &str = "mdtyper=info";
const LOG_FILE_PREFIX: &str = "mdtyper.log";

/// Keeps the non-blocking writer flushing until the end of `main`.
pub struct LoggingGuard {
    _worker: WorkerGuard,
}

fn resolve_log_dir() -> Option<PathBuf> {
    match mdtyper::kernel::services::adapters::ensure_log_dir() {
        Ok(dir) => Some(dir),
        Err(_) => {
            let dir = std::env::temp_dir().join("mdtyper").join("logs");
            std::fs::create_dir_all(&dir).ok().map(|()| dir)
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// `None` when no log directory is usable or a subscriber is already set; the editor runs either way.
pub fn init() -> Option<LoggingGuard> {
    let log_dir = resolve_log_dir()?;
    let appender = tracing_appender::rolling::daily(&log_dir, LOG_FILE_PREFIX);
    let (writer, worker) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .try_init()
        .ok()?;

    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(panic = %info, "panic");
        previous(info);
    }));

    tracing::info!(
        log_dir = %log_dir.display(),
        version = env!("CARGO_PKG_VERSION"),
        "tracing initialized"
    );

    Some(LoggingGuard { _worker: worker })
}
