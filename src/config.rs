use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Settings section read from initialization options and configuration changes
pub const SETTINGS_SECTION: &str = "sampleLsp";

/// Default upper bound on diagnostics published per document
pub const DEFAULT_MAX_NUMBER_OF_PROBLEMS: usize = 1000;

/// User-facing server settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub max_number_of_problems: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_number_of_problems: DEFAULT_MAX_NUMBER_OF_PROBLEMS,
        }
    }
}

impl Settings {
    /// Reads settings from either `{ "sampleLsp": { ... } }` or the bare object.
    /// Malformed values fall back to the defaults.
    pub fn from_value(value: &Value) -> Self {
        let section = value.get(SETTINGS_SECTION).unwrap_or(value);
        if section.is_null() {
            return Self::default();
        }

        serde_json::from_value(section.clone())
            .inspect_err(|e| warn!("Ignoring malformed settings {}: {}", section, e))
            .unwrap_or_default()
    }
}

/// Returns the path to the data directory for sample-lsp.
/// Uses $XDG_DATA_HOME/sample-lsp if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/sample-lsp,
/// or ./sample-lsp if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join(LOG_FILE_NAME)
}

pub(crate) const LOG_FILE_NAME: &str = "sample-lsp.log";

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("sample-lsp")
}
