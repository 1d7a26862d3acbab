//! Configuration management for zonebuilder CLI

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Root of the asset directory (`<root>/<type>/<name>`)
    pub asset_dir: Option<PathBuf>,
    /// Where built fastfiles are written
    pub output_dir: Option<PathBuf>,
    /// Where fastfiles are loaded from
    pub zone_dir: Option<PathBuf>,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("zonebuilder");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;

        Ok(())
    }

    /// Asset directory from argument, config, or the current directory
    pub fn asset_dir_or(&self, provided: Option<PathBuf>) -> PathBuf {
        provided
            .or_else(|| self.asset_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Output directory from argument, config, or the current directory
    pub fn output_dir_or(&self, provided: Option<PathBuf>) -> PathBuf {
        provided
            .or_else(|| self.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Zone directory from argument, config, output directory, or the current directory
    pub fn zone_dir_or(&self, provided: Option<PathBuf>) -> PathBuf {
        provided
            .or_else(|| self.zone_dir.clone())
            .or_else(|| self.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_config_is_default() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config {
            asset_dir: Some(PathBuf::from("/data/assets")),
            output_dir: None,
            zone_dir: Some(PathBuf::from("/data/zone")),
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_config_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "asset_dir = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_argument_overrides_config() {
        let config = Config {
            asset_dir: Some(PathBuf::from("configured")),
            output_dir: Some(PathBuf::from("out")),
            zone_dir: None,
        };
        assert_eq!(
            config.asset_dir_or(Some(PathBuf::from("flag"))),
            PathBuf::from("flag")
        );
        assert_eq!(config.asset_dir_or(None), PathBuf::from("configured"));
        assert_eq!(config.zone_dir_or(None), PathBuf::from("out"));
        assert_eq!(Config::default().output_dir_or(None), PathBuf::from("."));
    }

    #[test]
    fn test_config_path() {
        let result = Config::config_path();
        assert!(result.is_ok());
    }
}
