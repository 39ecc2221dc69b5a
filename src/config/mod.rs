//! Configuration management.
//!
//! Settings come from a TOML file; command-line flags override them.
//!
//! ```toml
//! data_file = "contacts"
//! default_format = "csv"
//! html_output = "html_display.html"
//!
//! [logging]
//! level = "warn"
//! format = "pretty"
//! file = "/tmp/rolodex.log"
//! ```

use crate::rendering::DEFAULT_HTML_OUTPUT;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default dataset base name.
pub const DEFAULT_DATA_FILE: &str = "contacts";

/// Default storage format.
pub const DEFAULT_FORMAT: &str = "csv";

/// Main configuration for rolodex.
#[derive(Debug, Clone)]
pub struct RolodexConfig {
    /// Dataset base name; the format name is appended as the extension.
    pub data_file: PathBuf,
    /// Format used when opening the dataset.
    pub default_format: String,
    /// Destination of the HTML export.
    pub html_output: PathBuf,
    /// Logging settings.
    pub logging: LoggingSettings,
    /// Config files that were loaded, in order.
    pub config_sources: Vec<PathBuf>,
}

/// Logging section of the config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingSettings {
    /// Filter directive, e.g. `warn` or `rolodex=debug`.
    pub level: Option<String>,
    /// Output format: `pretty` or `json`.
    pub format: Option<String>,
    /// Append logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Dataset base name.
    pub data_file: Option<String>,
    /// Default format.
    pub default_format: Option<String>,
    /// HTML export path.
    pub html_output: Option<String>,
    /// Logging configuration.
    pub logging: Option<LoggingSettings>,
}

impl Default for RolodexConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            default_format: DEFAULT_FORMAT.to_string(),
            html_output: PathBuf::from(DEFAULT_HTML_OUTPUT),
            logging: LoggingSettings::default(),
            config_sources: Vec::new(),
        }
    }
}

impl RolodexConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?;

        let file: ConfigFile =
            toml::from_str(&contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?;

        let mut config = Self::from_config_file(file);
        config.config_sources.push(path.to_path_buf());
        Ok(config)
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/rolodex/` on macOS)
    /// 2. XDG config dir (`~/.config/rolodex/`)
    ///
    /// Returns default configuration if no readable config file is found.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let candidates = [
            base_dirs.config_dir().join("rolodex").join("config.toml"),
            base_dirs
                .home_dir()
                .join(".config")
                .join("rolodex")
                .join("config.toml"),
        ];

        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("Ignoring config file: {e}"),
            }
        }

        Self::default()
    }

    /// Converts a `ConfigFile` to `RolodexConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(data_file) = file.data_file {
            config.data_file = PathBuf::from(data_file);
        }
        if let Some(format) = file.default_format {
            config.default_format = format.trim().to_lowercase();
        }
        if let Some(html_output) = file.html_output {
            config.html_output = PathBuf::from(html_output);
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        config
    }

    /// Sets the dataset base name.
    #[must_use]
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    /// Sets the default format.
    #[must_use]
    pub fn with_default_format(mut self, format: impl Into<String>) -> Self {
        self.default_format = format.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = RolodexConfig::new();
        assert_eq!(config.data_file, PathBuf::from("contacts"));
        assert_eq!(config.default_format, "csv");
        assert_eq!(config.html_output, PathBuf::from("html_display.html"));
        assert!(config.config_sources.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
data_file = "people"
default_format = "JSON"

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();

        let config = RolodexConfig::load_from_file(&path).unwrap();
        assert_eq!(config.data_file, PathBuf::from("people"));
        assert_eq!(config.default_format, "json");
        assert_eq!(config.html_output, PathBuf::from("html_display.html"));
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(config.logging.format.as_deref(), Some("json"));
        assert_eq!(config.config_sources, vec![path]);
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "data_fiel = \"typo\"\n").unwrap();

        assert!(RolodexConfig::load_from_file(&path).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(RolodexConfig::load_from_file(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn test_builders() {
        let config = RolodexConfig::new()
            .with_data_file("friends")
            .with_default_format("json");
        assert_eq!(config.data_file, PathBuf::from("friends"));
        assert_eq!(config.default_format, "json");
    }
}
