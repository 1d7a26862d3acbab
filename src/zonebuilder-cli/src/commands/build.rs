//! Zone build command

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

use zonebuilder::{fastfile, AssetDatabase, AssetKey, DirectoryDatabase, Zone, ZoneBuildSession};

use crate::config::Config;

/// Handle the build command
pub fn handle(
    zone: &str,
    source: Option<PathBuf>,
    assets: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<()> {
    let config = Config::load()?;
    let asset_dir = config.asset_dir_or(assets);
    let output_dir = config.output_dir_or(output);
    let source = source.unwrap_or_else(|| default_source_path(&asset_dir, zone));

    let path = build_to(zone, &source, &asset_dir, &output_dir)?;
    println!("Wrote {}", path.display());
    Ok(())
}

/// Default zone source location for a zone
pub fn default_source_path(asset_dir: &Path, zone: &str) -> PathBuf {
    asset_dir.join("zone_source").join(format!("{}.csv", zone))
}

/// Build a zone from a source file and write `<output_dir>/<zone>.ff`
pub fn build_to(zone: &str, source: &Path, asset_dir: &Path, output_dir: &Path) -> Result<PathBuf> {
    let text = fs::read_to_string(source)
        .with_context(|| format!("Failed to read zone source {}", source.display()))?;
    let roots = zonebuilder::source::parse(&text)
        .with_context(|| format!("Failed to parse zone source {}", source.display()))?;
    info!(zone, roots = roots.len(), assets = %asset_dir.display(), "building zone");

    let database = DirectoryDatabase::new(asset_dir);
    let built = build_zone(&database, &roots)?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;
    let path = output_dir.join(format!("{}.ff", zone));
    let file =
        File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    fastfile::write(&built, BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", path.display()))?;

    info!(zone, assets = built.len(), bytes = built.records.len(), "zone written");
    Ok(path)
}

/// Export every root asset into one zone; any failure aborts the build
pub fn build_zone(database: &dyn AssetDatabase, roots: &[AssetKey]) -> Result<Zone> {
    let mut session = ZoneBuildSession::new(database);
    for key in roots {
        session
            .export(key.kind, &key.name)
            .with_context(|| format!("Failed to export {}", key))?;
    }
    Ok(session.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use zonebuilder::AssetKind;

    fn write_asset(root: &Path, kind: &str, name: &str, contents: &[u8]) {
        let path = root.join(kind).join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn iwi() -> Vec<u8> {
        let mut bytes = b"IWi\x08\x01\x00\x04\x00\x04\x00\x01\x00".to_vec();
        bytes.extend_from_slice(&[0; 16]);
        bytes
    }

    #[test]
    fn test_build_writes_fastfile() {
        let dir = tempdir().unwrap();
        let assets = dir.path().join("assets");
        write_asset(&assets, "image", "metal_col", &iwi());
        write_asset(
            &assets,
            "material",
            "mc/mtl_metal",
            br#"{"textures": [{"image": "metal_col"}]}"#,
        );
        write_asset(&assets, "rawfile", "maps/mp/mp_test.gsc", b"main() {}");
        write_asset(&assets, "localize", "MENU_OK", b"OK\n");
        write_asset(
            &assets,
            "zone_source",
            "mp_test.csv",
            b"material,mc/mtl_metal\nrawfile,maps/mp/mp_test.gsc\nlocalize,MENU_OK\nimage,metal_col\n",
        );

        let out = dir.path().join("out");
        let path = build_to(
            "mp_test",
            &default_source_path(&assets, "mp_test"),
            &assets,
            &out,
        )
        .unwrap();
        assert_eq!(path, out.join("mp_test.ff"));

        let zone = fastfile::read(File::open(&path).unwrap()).unwrap();
        let names: Vec<_> = zone.entries.iter().map(|e| e.key.to_string()).collect();
        assert_eq!(
            names,
            [
                "image,metal_col",
                "material,mc/mtl_metal",
                "rawfile,maps/mp/mp_test.gsc",
                "localize,MENU_OK",
            ]
        );
    }

    #[test]
    fn test_missing_asset_aborts_build() {
        let dir = tempdir().unwrap();
        let assets = dir.path().join("assets");
        write_asset(&assets, "zone_source", "broken.csv", b"rawfile,missing.cfg\n");

        let out = dir.path().join("out");
        let err = build_to(
            "broken",
            &default_source_path(&assets, "broken"),
            &assets,
            &out,
        )
        .unwrap_err();

        assert!(format!("{:#}", err).contains("Asset not found: rawfile 'missing.cfg'"));
        assert!(!out.join("broken.ff").exists());
    }

    #[test]
    fn test_file_tracer_aborts_build() {
        let dir = tempdir().unwrap();
        write_asset(dir.path(), "tracer", "tracer_default", &[0; 112]);

        let database = DirectoryDatabase::new(dir.path());
        let roots = [AssetKey::new(AssetKind::Tracer, "tracer_default")];
        let err = build_zone(&database, &roots).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<zonebuilder::Error>(),
            Some(zonebuilder::Error::UnsupportedExportSource { .. })
        ));
    }

    #[test]
    fn test_missing_source_file() {
        let dir = tempdir().unwrap();
        let err = build_to("nope", &dir.path().join("nope.csv"), dir.path(), dir.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to read zone source"));
    }
}
