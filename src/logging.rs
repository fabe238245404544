//! Diagnostic logging.
//!
//! The terminal belongs to the UI, so tracing output goes to a plain-text
//! file under the user's cache directory instead of stderr.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or blank.
pub const DEFAULT_FILTER: &str = "warn";

/// Dependencies that are chatty below `warn`.
const NOISY_TARGETS: &[&str] = &["hyper", "rustls", "tungstenite", "tokio_tungstenite", "reqwest"];

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    Filter(String),
    #[error("cannot open log file: {0}")]
    Io(#[from] io::Error),
    #[error("no log file location available")]
    NoLocation,
    #[error("failed to install subscriber: {0}")]
    Subscriber(String),
}

/// Where and how much to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive string
    pub filter: String,
    /// Log file; `None` disables logging
    pub file: Option<PathBuf>,
}

impl LogConfig {
    /// Resolve from `RUST_LOG` and the platform cache directory.
    pub fn from_env() -> Self {
        Self {
            filter: resolve_filter(std::env::var("RUST_LOG").ok()),
            file: default_log_path(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            file: default_log_path(),
        }
    }
}

/// `<cache dir>/apibench/apibench.log`
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("apibench").join("apibench.log"))
}

fn resolve_filter(env_value: Option<String>) -> String {
    match env_value {
        Some(value) if !value.trim().is_empty() => value,
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Build the filter, keeping noisy dependencies at `warn` unless the
/// directive string names them explicitly.
pub fn build_filter(directives: &str) -> Result<EnvFilter, LoggingError> {
    let mut filter =
        EnvFilter::try_new(directives).map_err(|e| LoggingError::Filter(e.to_string()))?;
    for target in NOISY_TARGETS {
        if directives.contains(target) {
            continue;
        }
        let directive = format!("{}=warn", target)
            .parse()
            .map_err(|e: tracing_subscriber::filter::ParseError| {
                LoggingError::Filter(e.to_string())
            })?;
        filter = filter.add_directive(directive);
    }
    Ok(filter)
}

/// Install the global subscriber.
///
/// Returns the path being written. Any failure leaves logging disabled; the
/// caller decides whether that matters.
pub fn init(config: &LogConfig) -> Result<PathBuf, LoggingError> {
    let path = config.file.clone().ok_or(LoggingError::NoLocation)?;
    let filter = build_filter(&config.filter)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_timer(ChronoLocal::rfc_3339())
        .try_init()
        .map_err(|e| LoggingError::Subscriber(e.to_string()))?;

    tracing::info!("apibench {} logging to {}", env!("CARGO_PKG_VERSION"), path.display());
    Ok(path)
}
