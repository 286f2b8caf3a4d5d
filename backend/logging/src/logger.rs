//! Structured Logger
//!
//! Wraps `tracing` with a console layer and an optional daily-rolling NDJSON
//! file layer. `RUST_LOG` takes precedence over the configured level.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// File name prefix of the rolling log (`mowa.log.YYYY-MM-DD`).
const LOG_FILE_PREFIX: &str = "mowa.log";

/// Initialize the global structured logger.
///
/// Console output goes to stderr so that stdout stays reserved for the
/// spoken-feedback echo.
pub fn init_logger(log_dir: Option<&Path>, level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(true);

    let file_layer = log_dir.map(|dir| {
        let appender = RollingFileAppender::new(Rotation::DAILY, dir, LOG_FILE_PREFIX);
        fmt::layer()
            .json()
            .with_writer(appender)
            .with_ansi(false)
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
}
