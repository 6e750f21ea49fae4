//! Logging Infrastructure
//!
//! Console logging always; when `<work_dir>/logs` exists, output also
//! goes to a daily-rolling file there.

use std::path::Path;

use crate::core::Config;

/// Initialize tracing from the server configuration.
pub fn init_logger(config: &Config) {
    let level = config.log_level.parse().unwrap_or(tracing::Level::INFO);

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let log_dir = Path::new(&config.work_dir).join("logs");
    if log_dir.is_dir() {
        let file_appender = tracing_appender::rolling::daily(&log_dir, "sponsorhub-server");
        subscriber.with_writer(file_appender).init();
    } else {
        subscriber.init();
    }
}
