//! Structured logging configuration.

use crate::config::LoggingSettings;
use crate::{Error, Result};
use std::path::PathBuf;
use std::str::FromStr;

/// Filter directive used when none is configured.
pub const DEFAULT_LEVEL: &str = "warn";

/// Filter directive used with `--verbose`.
pub const VERBOSE_LEVEL: &str = "debug";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(Error::InvalidInput(format!("unknown log format: {other}"))),
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
    /// Log file; `None` logs to stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL.to_string(),
            format: LogFormat::default(),
            file: None,
        }
    }
}

impl LoggingConfig {
    /// Builds the logging configuration from config file settings.
    ///
    /// `verbose` raises the level to [`VERBOSE_LEVEL`] regardless of the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured format is unknown.
    pub fn from_settings(settings: &LoggingSettings, verbose: bool) -> Result<Self> {
        let level = if verbose {
            VERBOSE_LEVEL.to_string()
        } else {
            settings
                .level
                .clone()
                .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
        };

        let format = settings
            .format
            .as_deref()
            .map(LogFormat::from_str)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            level,
            format,
            file: settings.file.clone(),
        })
    }
}
