use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::model::config::LogConfig;

const DEFAULT_LEVEL: &str = "info";
/// Overrides `[log] file`
pub const LOG_FILE_ENV: &str = "CK_LOG_FILE";
/// Overrides `[log] level`
pub const LOG_LEVEL_ENV: &str = "CK_LOG";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("could not open log file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid log filter '{filter}': {message}")]
    Filter { filter: String, message: String },
    #[error("logging already initialized")]
    AlreadyInitialized,
}

/// Resolved logging settings: env vars win over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub file: Option<PathBuf>,
    pub level: String,
}

impl LogSettings {
    pub fn resolve(config: &LogConfig) -> Self {
        Self::resolve_with(
            config,
            std::env::var(LOG_FILE_ENV).ok(),
            std::env::var(LOG_LEVEL_ENV).ok(),
        )
    }

    fn resolve_with(config: &LogConfig, env_file: Option<String>, env_level: Option<String>) -> Self {
        let file = env_file
            .filter(|s| !s.is_empty())
            .or_else(|| config.file.clone())
            .map(PathBuf::from);
        let level = env_level
            .filter(|s| !s.is_empty())
            .or_else(|| config.level.clone())
            .unwrap_or_else(|| DEFAULT_LEVEL.to_string());
        LogSettings { file, level }
    }
}

/// Install a file-backed tracing subscriber. Without a log file nothing is
/// installed: stdout belongs to the terminal panel and the CLI output.
pub fn init_logging(settings: &LogSettings) -> Result<bool, LoggingError> {
    let Some(path) = &settings.file else {
        return Ok(false);
    };
    let filter = EnvFilter::try_new(&settings.level).map_err(|e| LoggingError::Filter {
        filter: settings.level.clone(),
        message: e.to_string(),
    })?;
    let file = open_append(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        level = %settings.level,
        "logging started"
    );
    Ok(true)
}

fn open_append(path: &Path) -> Result<std::fs::File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LoggingError::Open {
            path: path.to_path_buf(),
            source: e,
        })
}
