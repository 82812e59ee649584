//! Configuration for racfadm.
//!
//! Supports loading configuration from:
//! - `~/.config/racfadm/config.toml` for user defaults
//! - `racfadm.toml` in current directory
//! - Environment variables (RACFADM_*)
//! - Command-line arguments (highest priority)

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use racf_admin::{AdminOptions, TextEncoding};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Complete configuration for racfadm.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Library options: document encoding and debug logging.
    pub admin: AdminOptions,
    /// How results are printed.
    pub output: OutputConfig,
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl Config {
    /// Load configuration from default locations.
    pub fn load() -> Self {
        let mut config = Config::default();

        // Try user config first
        if let Some(user_config) = Self::user_config_path() {
            if let Ok(c) = Self::load_from_file(&user_config) {
                config = config.merge(c);
            }
        }

        // Then project config (higher priority)
        if let Ok(c) = Self::load_from_file(Path::new("racfadm.toml")) {
            config = config.merge(c);
        }

        // Then environment variables (highest priority)
        config.apply_env(|name| std::env::var(name).ok());

        config
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Get the user configuration file path.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("racfadm").join("config.toml"))
    }

    /// Merge another config into this one (other takes priority).
    pub fn merge(mut self, other: Config) -> Self {
        if other.admin.encoding != TextEncoding::default() {
            self.admin.encoding = other.admin.encoding;
        }
        self.admin.debug = other.admin.debug;
        self.output.pretty = other.output.pretty;
        self
    }

    /// Apply `RACFADM_*` variables. Unparseable values are ignored.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("RACFADM_ENCODING") {
            match val.parse::<TextEncoding>() {
                Ok(encoding) => self.admin.encoding = encoding,
                Err(e) => tracing::warn!("ignoring RACFADM_ENCODING: {}", e),
            }
        }
        if let Some(val) = var("RACFADM_DEBUG") {
            self.admin.debug = matches!(val.trim(), "1" | "true" | "yes" | "on");
        }
        if let Some(val) = var("RACFADM_OUTPUT") {
            match val.trim() {
                "pretty" => self.output.pretty = true,
                "compact" => self.output.pretty = false,
                other => tracing::warn!("ignoring RACFADM_OUTPUT: unknown format '{}'", other),
            }
        }
    }

    /// Generate a default configuration file.
    pub fn generate_default() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }

    /// Write configuration to a file.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize {
            message: e.to_string(),
        })?;

        std::fs::write(path, content).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Configuration error.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// I/O error reading/writing config.
    #[error("I/O error for {}: {message}", path.display())]
    #[diagnostic(code(racfadm::config::io))]
    Io { path: PathBuf, message: String },
    /// Parse error in config file.
    #[error("parse error in {}: {message}", path.display())]
    #[diagnostic(code(racfadm::config::parse))]
    Parse { path: PathBuf, message: String },
    /// Serialization error.
    #[error("serialization error: {message}")]
    #[diagnostic(code(racfadm::config::serialize))]
    Serialize { message: String },
}
