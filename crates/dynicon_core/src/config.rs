//! Demo configuration.
//!
//! Stored as `config.json` in the data directory. A missing file means
//! defaults; a malformed one is an error.

use crate::error::IconError;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

/// Configuration for the demo shell and its icon state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Directory scanned for additional `*.svg` icons.
    pub icon_dir: Option<PathBuf>,
    /// The two names the toggle button alternates between.
    pub toggle_names: [String; 2],
    /// Name shown by the toggled presenter at startup.
    pub initial_name: String,
    /// Log filter overriding environment variables.
    pub log_filter: Option<String>,
    /// Worker threads for the icon resolution runtime.
    pub worker_threads: usize,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            icon_dir: None,
            toggle_names: ["svg1".to_string(), "svg2".to_string()],
            initial_name: "svg1".to_string(),
            log_filter: None,
            worker_threads: 2,
        }
    }
}

impl DemoConfig {
    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, IconError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Load from the default location.
    pub fn load_default() -> Result<Self, IconError> {
        Self::load(&config_path())
    }

    /// Write to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), IconError> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> Result<(), IconError> {
        let [first, second] = &self.toggle_names;
        if first.trim().is_empty() || second.trim().is_empty() {
            return Err(IconError::config("Toggle names must not be empty", None));
        }
        if first == second {
            return Err(IconError::config(
                format!("Toggle names must differ, both are '{first}'"),
                Some("Pick two different icon names"),
            ));
        }
        if self.initial_name.trim().is_empty() {
            return Err(IconError::config("Initial name must not be empty", None));
        }
        if self.worker_threads == 0 {
            return Err(IconError::config(
                "worker_threads must be at least 1",
                Some("Remove the setting to use the default"),
            ));
        }
        Ok(())
    }

    /// The toggle name that follows `current`.
    ///
    /// Anything other than the first toggle name switches to the first.
    pub fn next_name(&self, current: &str) -> &str {
        let [first, second] = &self.toggle_names;
        if current == first {
            second
        } else {
            first
        }
    }
}

/// Get the default data directory.
pub fn default_data_dir() -> PathBuf {
    #[cfg(debug_assertions)]
    {
        PathBuf::from("./dynicon_data")
    }

    #[cfg(not(debug_assertions))]
    {
        dirs::data_dir()
            .map(|d| d.join("dynicon"))
            .unwrap_or_else(|| PathBuf::from("./dynicon_data"))
    }
}

/// Get the default configuration file path.
pub fn config_path() -> PathBuf {
    default_data_dir().join(CONFIG_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = DemoConfig::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, DemoConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let config = DemoConfig {
            icon_dir: Some(PathBuf::from("/opt/icons")),
            initial_name: "svg2".to_string(),
            ..DemoConfig::default()
        };

        config.save(&path).unwrap();
        assert_eq!(DemoConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{"log_filter":"debug"}"#).unwrap();

        let config = DemoConfig::load(&path).unwrap();
        assert_eq!(config.log_filter.as_deref(), Some("debug"));
        assert_eq!(config.toggle_names, ["svg1".to_string(), "svg2".to_string()]);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{not json").unwrap();

        let err = DemoConfig::load(&path).unwrap_err();
        assert_eq!(err.category(), "Config");
    }

    #[test]
    fn test_validation() {
        let same = DemoConfig {
            toggle_names: ["a".to_string(), "a".to_string()],
            ..DemoConfig::default()
        };
        assert!(same.validate().is_err());

        let no_threads = DemoConfig { worker_threads: 0, ..DemoConfig::default() };
        assert!(no_threads.validate().is_err());

        assert!(DemoConfig::default().validate().is_ok());
    }

    #[test]
    fn test_next_name() {
        let config = DemoConfig::default();
        assert_eq!(config.next_name("svg1"), "svg2");
        assert_eq!(config.next_name("svg2"), "svg1");
        assert_eq!(config.next_name("other"), "svg1");
    }
}
