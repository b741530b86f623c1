//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

mod schema_browser;
mod schema_wall;

pub use schema_browser::*;
pub use schema_wall::*;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub screen: ScreenConfig,

    #[serde(default)]
    pub geometry: GeometryConfig,

    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub search_app: SearchAppConfig,

    /// Extra presets, appended after the built-in catalog.
    #[serde(default)]
    pub presets: BTreeMap<String, PresetConfig>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Screen size override. Unset fields fall back to display detection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScreenConfig {
    #[serde(default)]
    pub width: Option<u32>,

    #[serde(default)]
    pub height: Option<u32>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub dir: Option<String>,

    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: None,
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    /// Resolved log directory (`~/.mediawall/logs` unless configured).
    pub fn log_dir(&self) -> PathBuf {
        match &self.dir {
            Some(dir) => PathBuf::from(shellexpand::tilde(dir).as_ref()),
            None => mediawall_home().join("logs"),
        }
    }
}

/// Base directory for MediaWall state.
pub fn mediawall_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".mediawall")
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
