//! Configuration management for spidey.
//!
//! Everything here configures the collaborators around the state cells. The
//! cells themselves take no configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for spidey.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search input behaviour.
    pub input: InputConfig,

    /// History panel behaviour.
    pub history: HistoryConfig,
}

/// When the search box pushes its text into the query cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateOn {
    /// Every edit is mirrored into the query cell.
    #[default]
    Keystroke,
    /// The query cell only changes when a search is submitted.
    Submit,
}

/// Search input configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub update_on: UpdateOn,

    /// Strip leading/trailing whitespace before submitting.
    pub trim: bool,

    /// Refuse to submit an empty query.
    pub reject_empty: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            update_on: UpdateOn::Keystroke,
            trim: true,
            reject_empty: true,
        }
    }
}

/// History-related configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Don't record a submission identical to the previous one.
    pub skip_consecutive_duplicates: bool,

    /// Number of recent entries the history panel renders.
    pub panel_size: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            skip_consecutive_duplicates: false,
            panel_size: 10,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Load configuration, falling back to defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> crate::Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Save configuration to a TOML file, creating the parent directory.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.input.update_on, UpdateOn::Keystroke);
        assert!(config.input.trim);
        assert!(config.input.reject_empty);
        assert!(!config.history.skip_consecutive_duplicates);
        assert_eq!(config.history.panel_size, 10);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let config: Config = toml::from_str(
            r#"
            [input]
            update_on = "submit"

            [history]
            panel_size = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.input.update_on, UpdateOn::Submit);
        assert!(config.input.trim);
        assert_eq!(config.history.panel_size, 3);
        assert!(!config.history.skip_consecutive_duplicates);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.input.reject_empty = false;
        config.history.skip_consecutive_duplicates = true;
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn load_or_default_without_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("missing.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[input]\nupdate_on = \"sometimes\"\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }
}
