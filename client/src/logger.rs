//! Logging initialization for applications embedding the clients.
//!
//! The library itself only emits `tracing` events; nothing is written unless
//! the application installs a subscriber, e.g. through [`init`].

use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{ClientConfig, DEFAULT_LOG_LEVEL};

/// File name prefix of the rolling log.
pub const LOG_FILE_NAME: &str = "chat-client.log";

/// Install the global subscriber.
///
/// With `log_dir` set, events go to a daily-rotated file through a
/// non-blocking writer; otherwise they go to stderr. The returned guard must
/// be kept alive for the file writer to flush.
pub fn init(config: &ClientConfig) -> Option<WorkerGuard> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let Some(log_dir) = &config.log_dir else {
        let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(true);
        if let Err(e) = tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .try_init()
        {
            eprintln!("Warning: Failed to install log subscriber: {}", e);
        }
        return None;
    };

    if let Err(e) = fs::create_dir_all(log_dir) {
        eprintln!("Warning: Failed to create log directory: {}", e);
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false);

    if let Err(e) = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
    {
        eprintln!("Warning: Failed to install log subscriber: {}", e);
        return None;
    }

    tracing::info!(
        log_dir = %log_dir.display(),
        log_level = %config.log_level,
        "File logging initialized"
    );

    Some(guard)
}
