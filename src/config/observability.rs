//! `[logging]` section of the config file

use serde::{Deserialize, Deserializer};
use std::path::PathBuf;

/// How often the JSON log file rolls over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    Never,
}

impl LogRotation {
    const ALL: [Self; 3] = [Self::Hourly, Self::Daily, Self::Never];

    /// Case-insensitive; anything unrecognised rotates daily
    pub fn parse(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|rotation| rotation.as_str().eq_ignore_ascii_case(name.trim()))
            .unwrap_or_default()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

fn lenient_rotation<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LogRotation, D::Error> {
    let name = String::deserialize(deserializer)?;
    Ok(LogRotation::parse(&name))
}

/// Where and how much to log
///
/// Keys missing from the file keep their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for this crate's targets; RUST_LOG replaces the whole filter
    pub level: String,
    /// Also write JSON lines under `file_dir`
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    #[serde(deserialize_with = "lenient_rotation")]
    pub file_rotation: LogRotation,
    /// File name prefix; the appender adds the date suffix
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::Daily,
            file_prefix: "shorturl".to_string(),
        }
    }
}
