//! Logging Infrastructure
//!
//! Structured logging setup. The level comes from `RUST_LOG` when set,
//! otherwise from the configured default.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the logger with an optional daily-rolling file output
pub fn init_logger(log_level: Option<&str>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    // Add file output if log_dir is provided
    if let Some(dir) = log_dir {
        let log_path = Path::new(dir);
        if log_path.exists() {
            let file_appender = tracing_appender::rolling::daily(dir, "retail-cli");
            subscriber.with_writer(file_appender).with_ansi(false).init();
            return;
        }
    }

    // Console logs go to stderr; stdout is reserved for command output
    subscriber.with_writer(std::io::stderr).init();
}
