//! Asset type table and record size check commands

use anyhow::{Context, Result};

use zonebuilder::assets::SUPPORTED_KINDS;
use zonebuilder::ASSET_TYPES;

/// Handle the types command
pub fn list() {
    print!("{}", format_table());
}

/// Handle the check command
pub fn check() -> Result<()> {
    zonebuilder::debug_checks().context("Record layout check failed")?;
    println!(
        "All {} encoder record layouts match the engine sizes",
        SUPPORTED_KINDS.len()
    );
    Ok(())
}

fn format_table() -> String {
    let mut out = String::from("Index  Type                 Size    Export\n");
    for (index, info) in ASSET_TYPES.iter().enumerate() {
        let export = if !SUPPORTED_KINDS.contains(&info.kind) {
            "-"
        } else if info.kind.requires_resident() {
            "built-in only"
        } else {
            "yes"
        };
        let size = if info.size == 0 {
            "-".to_string()
        } else {
            format!("{:#x}", info.size)
        };
        out.push_str(&format!(
            "{:>5}  {:<20} {:<7} {}\n",
            index, info.name, size, export
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lists_every_type() {
        let table = format_table();
        // Header plus one line per type
        assert_eq!(table.lines().count(), 1 + ASSET_TYPES.len());
        assert!(table.contains("physpreset"));
        assert!(table.contains("addon_map_ents"));
    }

    #[test]
    fn test_table_marks_export_support() {
        let table = format_table();
        let tracer = table.lines().find(|l| l.contains("tracer")).unwrap();
        assert!(tracer.contains("built-in only"));
        let material = table.lines().find(|l| l.contains(" material ")).unwrap();
        assert!(material.contains("0x60"));
        assert!(material.ends_with("yes"));
    }

    #[test]
    fn test_check_passes() {
        check().unwrap();
    }
}
