//! Persisted configuration defaults.
//!
//! Scan options the operator sets every time can be stored once in a
//! platform-specific config file (XDG config dir on Linux, AppData on
//! Windows). CLI flags always win over stored values; a missing or
//! unreadable file silently falls back to built-in defaults.

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

fn default_io_threads() -> usize {
    4
}

/// Stored scan defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Skip hidden files and directories.
    #[serde(default)]
    pub skip_hidden: bool,

    /// Hashing worker threads (1 = sequential).
    #[serde(default = "default_io_threads")]
    pub io_threads: usize,

    /// Byte-verify files against the retained copy before deletion.
    #[serde(default)]
    pub paranoid: bool,

    /// Minimum file size to consider, in bytes.
    #[serde(default)]
    pub min_size: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skip_hidden: false,
            io_threads: default_io_threads(),
            paranoid: false,
            min_size: None,
        }
    }
}

impl Config {
    /// Load the configuration from the default platform-specific path.
    ///
    /// Falls back to defaults on any failure.
    #[must_use]
    pub fn load() -> Self {
        match Self::config_path().map(|p| Self::load_from(&p)) {
            Ok(Ok(config)) => config,
            Ok(Err(e)) => {
                log::debug!("Failed to load config, using defaults: {e}");
                Self::default()
            }
            Err(e) => {
                log::debug!("No config directory available: {e}");
                Self::default()
            }
        }
    }

    /// Load from an explicit path. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Fails on unreadable files or malformed JSON.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save to the default platform-specific path.
    ///
    /// # Errors
    ///
    /// Fails if the config directory cannot be created or written.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save to an explicit path, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Default platform-specific configuration path.
    fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "dupesweep", "dupesweep")
            .ok_or_else(|| anyhow::anyhow!("failed to determine project directories"))?;
        Ok(dirs.config_dir().join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(!config.skip_hidden);
        assert_eq!(config.io_threads, 4);
        assert!(!config.paranoid);
        assert!(config.min_size.is_none());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            skip_hidden: true,
            io_threads: 8,
            paranoid: true,
            min_size: Some(1024),
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"skip_hidden": true}"#).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(loaded.skip_hidden);
        assert_eq!(loaded.io_threads, 4);
    }

    #[test]
    fn test_malformed_file_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json at all").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
