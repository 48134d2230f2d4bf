use std::fs::{create_dir_all, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Local;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{JiraError, JiraResult};

lazy_static::lazy_static! {
    static ref LOG_FILE: Mutex<Option<PathBuf>> = Mutex::new(None);
}

pub const LOG_ENV_VAR: &str = "JIRA_LOG";

/// Installs the global subscriber: everything goes to a per-run log file,
/// and with `verbose` it is mirrored to stderr at debug level.
pub fn init_logging(verbose: bool) -> JiraResult<PathBuf> {
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("jira-cli")
        .join("logs");

    create_dir_all(&log_dir)?;

    let log_file = log_dir.join(format!("jira-{}.log", Local::now().format("%Y%m%d-%H%M%S")));
    let file = OpenOptions::new().create(true).append(true).open(&log_file)?;

    let filter = if verbose {
        EnvFilter::new("info,jira_cli=debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let file_layer = fmt::layer().with_ansi(false).with_writer(Mutex::new(file));
    let stderr_layer = verbose.then(|| fmt::layer().with_target(false).with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| JiraError::ConfigError(format!("Failed to initialize logging: {}", e)))?;

    if let Ok(mut guard) = LOG_FILE.lock() {
        *guard = Some(log_file.clone());
    }
    tracing::info!(path = %log_file.display(), "Logging initialized");

    Ok(log_file)
}

#[allow(deprecated)]
pub fn log_panic_info(info: &std::panic::PanicInfo) {
    let location = info
        .location()
        .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
        .unwrap_or_else(|| "unknown location".to_string());

    let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic payload".to_string()
    };

    let backtrace = std::backtrace::Backtrace::capture();
    tracing::error!(%location, %payload, "PANIC");
    tracing::debug!("Backtrace:\n{}", backtrace);
}

pub fn get_log_file_path() -> Option<PathBuf> {
    LOG_FILE.lock().ok().and_then(|guard| guard.clone())
}
