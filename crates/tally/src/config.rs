//! Data-file location settings for the tally binary.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

const APP_DIR: &str = "tally";
const CONFIG_FILE: &str = "config.toml";
const DATA_FILE: &str = "tasks.txt";

/// Settings loaded from `config.toml`; every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    storage: StorageSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct StorageSettings {
    path: Option<PathBuf>,
}

impl Settings {
    /// Load settings from `path`, or from the default location when `None`.
    ///
    /// An absent file yields defaults; a present-but-unreadable file is an
    /// error so a typo in the config does not silently fall back.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map_or_else(|| app_dir().join(CONFIG_FILE), Path::to_path_buf);
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read {}", config_path.display()))?;
        toml::from_str(&contents).with_context(|| format!("failed to parse {}", config_path.display()))
    }

    /// Resolve the task-file path: flag override, then config, then default.
    #[must_use]
    pub fn data_file(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.storage.path.clone())
            .unwrap_or_else(|| app_dir().join(DATA_FILE))
    }
}

fn app_dir() -> PathBuf {
    dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn absent_config_file_means_defaults() -> Result<()> {
        let dir = tempdir()?;
        let settings = Settings::load(Some(&dir.path().join("missing.toml")))?;
        assert!(settings.storage.path.is_none());
        Ok(())
    }

    #[test]
    fn storage_path_is_read_from_the_config() -> Result<()> {
        let dir = tempdir()?;
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[storage]\npath = \"/tmp/elsewhere/tasks.txt\"\n")?;

        let settings = Settings::load(Some(&config_path))?;
        assert_eq!(
            settings.data_file(None),
            PathBuf::from("/tmp/elsewhere/tasks.txt")
        );
        Ok(())
    }

    #[test]
    fn the_flag_outranks_the_config() -> Result<()> {
        let dir = tempdir()?;
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "[storage]\npath = \"/tmp/elsewhere/tasks.txt\"\n")?;

        let settings = Settings::load(Some(&config_path))?;
        let flagged = settings.data_file(Some(PathBuf::from("/tmp/flagged.txt")));
        assert_eq!(flagged, PathBuf::from("/tmp/flagged.txt"));
        Ok(())
    }

    #[test]
    fn broken_config_is_reported_not_ignored() -> Result<()> {
        let dir = tempdir()?;
        let config_path = dir.path().join("config.toml");
        fs::write(&config_path, "storage = not toml")?;

        assert!(Settings::load(Some(&config_path)).is_err());
        Ok(())
    }
}
