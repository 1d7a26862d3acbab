//! Images (IWi texture files)
//!
//! IWi header:
//! - Bytes 0-2: "IWi" magic
//! - Byte 3: Version
//! - Byte 4: Format
//! - Byte 5: Flags
//! - Bytes 6-11: Width, height, depth (u16 each)
//! - Bytes 12+: Mip offsets and pixel data

use byteorder::{ByteOrder, LE};

use crate::asset_type::AssetKind;
use crate::session::{Record, ZoneAsset, ZoneBuildSession};
use crate::stream::ZoneStream;
use crate::{Error, Result};

/// Magic bytes for IWi images
pub const IWI_MAGIC: [u8; 3] = *b"IWi";

/// Minimum IWi header size
pub const IWI_HEADER_SIZE: usize = 12;

const MAP_TYPE_2D: u8 = 3;
const MAP_TYPE_3D: u8 = 4;
const SEMANTIC_DIFFUSE: u8 = 2;
const CATEGORY_LOAD_FROM_FILE: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub name: String,
    pub width: u16,
    pub height: u16,
    pub depth: u16,
    pub data: Vec<u8>,
}

impl Image {
    pub fn new(name: &str, width: u16, height: u16, data: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            width,
            height,
            depth: 1,
            data,
        }
    }

    /// Parse an IWi file, keeping the whole file as the image data
    pub fn parse(name: &str, bytes: &[u8]) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidAsset {
            kind: AssetKind::Image,
            name: name.to_string(),
            reason,
        };

        if bytes.len() < IWI_HEADER_SIZE {
            return Err(invalid(format!(
                "need {} header bytes, got {}",
                IWI_HEADER_SIZE,
                bytes.len()
            )));
        }
        if bytes[0..3] != IWI_MAGIC {
            return Err(invalid(format!(
                "bad magic {:02x} {:02x} {:02x}",
                bytes[0], bytes[1], bytes[2]
            )));
        }

        Ok(Self {
            name: name.to_string(),
            width: LE::read_u16(&bytes[6..8]),
            height: LE::read_u16(&bytes[8..10]),
            depth: LE::read_u16(&bytes[10..12]).max(1),
            data: bytes.to_vec(),
        })
    }
}

impl ZoneAsset for Image {
    fn kind(&self) -> AssetKind {
        AssetKind::Image
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn write(&self, _session: &mut ZoneBuildSession<'_>) -> Result<Record> {
        let map_type = if self.depth > 1 {
            MAP_TYPE_3D
        } else {
            MAP_TYPE_2D
        };

        let mut header = ZoneStream::new();
        header.write_inline(); // loaded data
        header.write_u8(map_type);
        header.write_u8(SEMANTIC_DIFFUSE);
        header.write_u8(CATEGORY_LOAD_FROM_FILE);
        header.write_u8(0); // flags
        header.write_u32(self.data.len() as u32);
        header.write_u16(self.width);
        header.write_u16(self.height);
        header.write_u16(self.depth);
        header.pad_to(28);
        header.write_inline(); // name

        Ok(Record::new(header).with_data(self.data.clone()))
    }
}
