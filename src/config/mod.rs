//! Configuration for the shorturl client
//!
//! Configuration is loaded in order of precedence:
//! 1. Command-line flags (applied by the caller)
//! 2. Environment variables
//! 3. Config file (~/.config/shorturl/config.toml)
//! 4. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod observability;
mod serialization;

#[cfg(test)]
mod tests;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (maintain public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use observability::{LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Where the shortening backend listens unless told otherwise
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the shortening backend
    pub api_url: String,

    /// Whether to run the TUI (prompt mode otherwise)
    pub enable_tui: bool,

    /// Theme name: "dark" or "light"
    pub theme: String,

    /// Show the logs panel when the TUI starts
    pub show_logs: bool,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            enable_tui: true,
            theme: "dark".to_string(),
            show_logs: false,
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure (subset of Config that makes sense to persist)
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub api_url: Option<String>,
    pub theme: Option<String>,
    pub show_logs: Option<bool>,

    /// Optional [logging] section
    pub logging: Option<LoggingConfig>,
}

/// Why the config file could not be loaded
#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigFileError {
    #[error("cannot read config file: {0}")]
    Read(std::io::Error),

    #[error("cannot parse config file: {0}")]
    Parse(toml::de::Error),
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/shorturl/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("shorturl").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        // Config is optional
        let _ = Self::write_defaults(&path);
    }

    /// Read and parse the config file at `path`
    ///
    /// A missing file is an empty config; anything else that goes wrong is
    /// reported so config management can still run over a broken file.
    pub(crate) fn read_file_config(path: &Path) -> Result<FileConfig, ConfigFileError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).map_err(ConfigFileError::Parse),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(ConfigFileError::Read(e)),
        }
    }

    /// Load file config if it exists
    ///
    /// # Panics
    /// Exits the process if the config file exists but cannot be read or
    /// parsed. A broken config should fail fast with a clear error.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match Self::read_file_config(&path) {
            Ok(config) => config,
            Err(ConfigFileError::Parse(e)) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                eprintln!("  Tip: Check for:\n");
                eprintln!("    - Missing quotes around string values");
                eprintln!("    - Invalid boolean values (use true/false)");
                eprintln!("    - Typos in section names\n");
                eprintln!("  To reset, run `shorturl config --reset`.\n");
                std::process::exit(1);
            }
            Err(ConfigFileError::Read(e)) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Only the values stored in the file, without env overrides
    ///
    /// Used when rewriting the file so shell settings don't leak into it.
    pub(crate) fn from_file(file: FileConfig) -> Self {
        Self::resolve(file, |_| None)
    }

    /// Write the default template to `path`, replacing whatever is there
    pub fn write_defaults(path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, Self::default().to_toml())
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        Self::resolve(Self::load_file_config(), |key| std::env::var(key).ok())
    }

    /// Merge a parsed config file with environment lookups
    pub(crate) fn resolve(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // API URL: env > file > default
        let api_url = env("SHORTURL_API_URL")
            .or(file.api_url)
            .unwrap_or(defaults.api_url);

        // TUI toggle: env only (runtime flag)
        let enable_tui = env("SHORTURL_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(defaults.enable_tui);

        // Theme: env > file > default
        let theme = env("SHORTURL_THEME")
            .or(file.theme)
            .unwrap_or(defaults.theme);

        let show_logs = file.show_logs.unwrap_or(defaults.show_logs);
        let logging = file.logging.unwrap_or_default();

        Self {
            api_url,
            enable_tui,
            theme,
            show_logs,
            logging,
        }
    }
}
