//! Zone load command

use anyhow::{Context, Result};
use std::path::PathBuf;

use zonebuilder::{LoadCoordinator, ZoneDescriptor};

use crate::commands::info::format_zone;
use crate::config::Config;
use crate::zone_loader::DirectoryLoader;

/// Handle the load command
pub fn handle(zones: &[String], group: u32, zone_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    let dir = config.zone_dir_or(zone_dir);
    let coordinator = LoadCoordinator::new(DirectoryLoader::new(&dir));

    let report = load_and_report(&coordinator, zones, group)
        .with_context(|| format!("Failed to load zones from {}", dir.display()))?;
    print!("{}", report);
    Ok(())
}

/// Load a batch, describe what came in, then release the group
pub fn load_and_report(
    coordinator: &LoadCoordinator<DirectoryLoader>,
    zones: &[String],
    group: u32,
) -> Result<String> {
    let batch: Vec<ZoneDescriptor> = zones
        .iter()
        .map(|name| ZoneDescriptor::new(name.as_str(), group))
        .collect();
    coordinator.load_zones(&batch)?;

    let mut report = String::new();
    for loaded in coordinator.loader().zones().iter() {
        report.push_str(&format!("Zone: {} (group {:#x})\n", loaded.name, loaded.group));
        report.push_str(&format_zone(&loaded.zone));
    }

    coordinator.unload_zones(group);
    Ok(report)
}
