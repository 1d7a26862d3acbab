//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up zonebuilder defaults.

use crate::config::Config;
use anyhow::Result;
use std::path::PathBuf;

/// Handle the configure command
pub fn handle(
    asset_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    zone_dir: Option<PathBuf>,
    show: bool,
) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config);
        return Ok(());
    }

    if !apply(&mut config, asset_dir, output_dir, zone_dir) {
        show_usage();
        return Ok(());
    }

    config.save()?;
    show_config(&config);
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

/// Apply provided settings; returns false if nothing was provided
fn apply(
    config: &mut Config,
    asset_dir: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    zone_dir: Option<PathBuf>,
) -> bool {
    let changed = asset_dir.is_some() || output_dir.is_some() || zone_dir.is_some();
    if asset_dir.is_some() {
        config.asset_dir = asset_dir;
    }
    if output_dir.is_some() {
        config.output_dir = output_dir;
    }
    if zone_dir.is_some() {
        config.zone_dir = zone_dir;
    }
    changed
}

/// Display current configuration
fn show_config(config: &Config) {
    let show = |label: &str, value: &Option<PathBuf>| match value {
        Some(path) => println!("{}: {}", label, path.display()),
        None => println!("{}: (not set)", label),
    };
    show("Asset directory", &config.asset_dir);
    show("Output directory", &config.output_dir);
    show("Zone directory", &config.zone_dir);

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: zonebuilder configure --asset-dir DIR [--output-dir DIR] [--zone-dir DIR]");
    println!("   or: zonebuilder configure --show");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_only_overwrites_provided() {
        let mut config = Config {
            asset_dir: Some(PathBuf::from("old_assets")),
            output_dir: Some(PathBuf::from("old_out")),
            zone_dir: None,
        };
        let changed = apply(&mut config, None, Some(PathBuf::from("new_out")), None);
        assert!(changed);
        assert_eq!(config.asset_dir, Some(PathBuf::from("old_assets")));
        assert_eq!(config.output_dir, Some(PathBuf::from("new_out")));
    }

    #[test]
    fn test_apply_nothing() {
        let mut config = Config::default();
        assert!(!apply(&mut config, None, None, None));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_show_usage_does_not_panic() {
        show_usage();
    }
}
