//! Console and file logging.
//!
//! Both outputs share the `%H:%M:%S%.3f` local timestamp. The file is
//! `<data dir>/logs/bodygraph_ocr.log`, opened in append mode.

use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::paths;

const TIME_FORMAT: &str = "%H:%M:%S%.3f";

/// Initializes the global subscriber.
///
/// `RUST_LOG` takes precedence over `level`. If the log file cannot be
/// opened, logging continues on the console only.
pub fn init_logging(level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()));

    let log_path = paths::get_logs_dir().join("bodygraph_ocr.log");
    let file = std::fs::create_dir_all(paths::get_logs_dir())
        .and_then(|_| OpenOptions::new().create(true).append(true).open(&log_path));
    let file_error = file.as_ref().err().map(|e| e.to_string());

    let file_layer = file.ok().map(|file| {
        fmt::layer()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_target(false)
            .with_timer(ChronoLocal::new(TIME_FORMAT.to_string()))
    });

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();

    if let Some(e) = file_error {
        tracing::warn!("Could not open log file {}: {}", log_path.display(), e);
    }
}
