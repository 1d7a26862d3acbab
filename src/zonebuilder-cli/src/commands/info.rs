//! Fastfile inspection command

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use zonebuilder::{fastfile, Zone};

/// Handle the info command
pub fn handle(input: &Path) -> Result<()> {
    let file = File::open(input).with_context(|| format!("Failed to open {}", input.display()))?;
    let zone = fastfile::read(BufReader::new(file))
        .with_context(|| format!("Failed to read fastfile {}", input.display()))?;

    println!("Fastfile: {}", input.display());
    println!("Version: {}", fastfile::FASTFILE_VERSION);
    print!("{}", format_zone(&zone));
    Ok(())
}

/// Render a zone's asset list, one asset per line
pub fn format_zone(zone: &Zone) -> String {
    let mut out = format!(
        "Assets: {} ({} bytes of records)\n",
        zone.len(),
        zone.records.len()
    );
    for (i, entry) in zone.entries.iter().enumerate() {
        out.push_str(&format!(
            "  {:>4}  {:<16} {:#010x}  {}\n",
            i,
            entry.key.kind.to_string(),
            entry.reference.offset(),
            entry.key.name
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use zonebuilder::{AssetKey, AssetKind, AssetRef, ZoneEntry};

    #[test]
    fn test_format_zone() {
        let zone = Zone {
            entries: vec![ZoneEntry {
                key: AssetKey::new(AssetKind::RawFile, "maps/mp/mp_test.gsc"),
                reference: AssetRef::new(0x20).unwrap(),
            }],
            records: vec![0; 64],
        };
        let text = format_zone(&zone);
        assert!(text.starts_with("Assets: 1 (64 bytes of records)"));
        assert!(text.contains("rawfile"));
        assert!(text.contains("0x00000020"));
        assert!(text.contains("maps/mp/mp_test.gsc"));
    }

    #[test]
    fn test_missing_file() {
        assert!(handle(Path::new("/nonexistent/zone.ff")).is_err());
    }
}
