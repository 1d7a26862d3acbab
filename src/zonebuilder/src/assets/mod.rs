//! Asset encoders
//!
//! Record layouts for the asset kinds this tool can write. Each kind
//! implements [`ZoneAsset`]; `decode` turns externally sourced bytes into
//! the matching asset.

pub mod image;
pub mod localize;
pub mod material;
pub mod rawfile;
pub mod stringtable;
pub mod tracer;

use std::sync::Arc;

use tracing::debug;

pub use image::Image;
pub use localize::Localize;
pub use material::{r_hash_string, Material, TextureSlot};
pub use rawfile::RawFile;
pub use stringtable::StringTable;
pub use tracer::Tracer;

use crate::asset_type::AssetKind;
use crate::database::MemoryDatabase;
use crate::session::{ZoneAsset, ZoneBuildSession};
use crate::{Error, Result};

/// Decode externally sourced bytes into an asset of the given kind
pub fn decode(kind: AssetKind, name: &str, bytes: &[u8]) -> Result<Box<dyn ZoneAsset>> {
    let asset: Box<dyn ZoneAsset> = match kind {
        AssetKind::RawFile => Box::new(RawFile::new(name, bytes.to_vec())),
        AssetKind::StringTable => Box::new(StringTable::parse(name, bytes)?),
        AssetKind::Localize => Box::new(Localize::parse(name, bytes)?),
        AssetKind::Image => Box::new(Image::parse(name, bytes)?),
        AssetKind::Material => Box::new(Material::parse(name, bytes)?),
        AssetKind::Tracer => {
            return Err(Error::UnsupportedExportSource {
                kind,
                name: name.to_string(),
            })
        }
        other => return Err(Error::UnsupportedKind(other)),
    };
    Ok(asset)
}

/// Kinds with an encoder
pub const SUPPORTED_KINDS: &[AssetKind] = &[
    AssetKind::Image,
    AssetKind::Localize,
    AssetKind::Material,
    AssetKind::RawFile,
    AssetKind::StringTable,
    AssetKind::Tracer,
];

/// Self-check that every encoder produces headers of the engine's size.
///
/// Writes one sample asset of each supported kind; any drift between an
/// encoder and the engine layout fails with [`Error::TypeMismatch`].
pub fn debug_checks() -> Result<()> {
    let database = sample_database();
    let mut session = ZoneBuildSession::new(&database);
    for &kind in SUPPORTED_KINDS {
        session.export(kind, "debug_check")?;
        debug!(%kind, "record size check passed");
    }
    Ok(())
}

fn sample_database() -> MemoryDatabase {
    let mut database = MemoryDatabase::new();
    database.insert_resident(Image::new("debug_check", 1, 1, Vec::new()));
    database.insert_resident(Localize::new("debug_check", "ok"));
    database.insert_resident(RawFile::new("debug_check", b"// check".to_vec()));
    database.insert_resident(StringTable::new("debug_check", vec![vec!["a".into()]]));

    let material = Material {
        name: "debug_check".to_string(),
        textures: vec![TextureSlot::color_map("debug_check")],
        ..Default::default()
    };
    database.insert_resident(Tracer::new("debug_check", Arc::new(material.clone())));
    database.insert_resident(material);
    database
}
