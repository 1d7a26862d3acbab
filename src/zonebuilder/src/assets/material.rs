//! Materials
//!
//! Materials are described in JSON:
//!
//! ```json
//! {
//!   "sort_key": 4,
//!   "textures": [
//!     { "sampler": "colorMap", "semantic": 2, "image": "metal_col" },
//!     { "sampler": "normalMap", "semantic": 5, "image": "metal_nml" }
//!   ]
//! }
//! ```
//!
//! Every image a texture slot names is required from the database and
//! referenced from the material's texture table.

use serde::{Deserialize, Serialize};

use crate::asset_type::AssetKind;
use crate::session::{Origin, Record, ZoneAsset, ZoneBuildSession};
use crate::stream::ZoneStream;
use crate::{Error, Result};

/// Engine hash of sampler names
pub fn r_hash_string(value: &str) -> u32 {
    value.bytes().fold(0u32, |hash, b| {
        (b.to_ascii_lowercase() as u32) ^ hash.wrapping_mul(33)
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureSlot {
    #[serde(default = "default_sampler")]
    pub sampler: String,
    #[serde(default = "default_semantic")]
    pub semantic: u8,
    pub image: String,
}

fn default_sampler() -> String {
    "colorMap".to_string()
}

fn default_semantic() -> u8 {
    2
}

impl TextureSlot {
    /// Diffuse color map slot
    pub fn color_map(image: &str) -> Self {
        Self {
            sampler: default_sampler(),
            semantic: default_semantic(),
            image: image.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    /// Taken from the asset name when parsed
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub game_flags: u8,
    #[serde(default)]
    pub sort_key: u8,
    #[serde(default)]
    pub surface_type_bits: u32,
    #[serde(default)]
    pub textures: Vec<TextureSlot>,
}

impl Material {
    pub fn parse(name: &str, bytes: &[u8]) -> Result<Self> {
        let mut material: Material = serde_json::from_slice(bytes)?;
        material.name = name.to_string();
        Ok(material)
    }
}

impl ZoneAsset for Material {
    fn kind(&self) -> AssetKind {
        AssetKind::Material
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn write(&self, session: &mut ZoneBuildSession<'_>) -> Result<Record> {
        let texture_count = u8::try_from(self.textures.len()).map_err(|_| Error::InvalidAsset {
            kind: AssetKind::Material,
            name: self.name.clone(),
            reason: format!("{} texture slots (max 255)", self.textures.len()),
        })?;

        let mut table = ZoneStream::new();
        for slot in &self.textures {
            let image = session.require_asset(AssetKind::Image, &slot.image, Origin::Database)?;
            let sampler = slot.sampler.as_bytes();
            table.write_u32(r_hash_string(&slot.sampler));
            table.write_u8(sampler.first().copied().unwrap_or(0));
            table.write_u8(sampler.last().copied().unwrap_or(0));
            table.write_u8(0); // sampler state
            table.write_u8(slot.semantic);
            table.write_ref(image);
        }

        let mut header = ZoneStream::new();
        header.write_inline(); // name
        header.write_u8(self.game_flags);
        header.write_u8(self.sort_key);
        header.write_u8(1); // atlas rows
        header.write_u8(1); // atlas columns
        header.write_u32(0); // draw surface
        header.write_u32(0);
        header.write_u32(self.surface_type_bits);
        header.pad_to(0x40);
        header.write_u8(texture_count);
        header.write_u8(0); // constants
        header.write_u8(0); // state bits
        header.write_u8(0); // state flags
        header.pad_to(0x48);
        header.write_u32(0); // technique set
        if texture_count > 0 {
            header.write_inline();
        } else {
            header.write_u32(0);
        }
        header.pad_to(0x60);

        Ok(Record::new(header).with_data(table.into_inner()))
    }
}
