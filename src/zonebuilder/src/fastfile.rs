//! Fastfile container
//!
//! # Format
//!
//! - Bytes 0-7: "IWffu100" magic
//! - Bytes 8-11: Version (u32, little-endian)
//! - Bytes 12+: zlib-compressed zone body
//!
//! Zone body:
//! - Record stream size (u32)
//! - Asset count (u32)
//! - Asset list: (type index u32, record pointer u32) per asset, in emission order
//! - Record stream
//!
//! Asset names are not stored in the list; each record carries its name
//! right after its fixed-size header.

use std::io::{Cursor, Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt, LE};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::asset_type::{expected_size_from_kind, AssetKind};
use crate::session::{AssetKey, Zone, ZoneEntry};
use crate::stream::AssetRef;
use crate::{Error, Result};

/// Magic bytes for fastfiles: "IWffu100"
pub const FASTFILE_MAGIC: [u8; 8] = *b"IWffu100";

/// Fastfile format version
pub const FASTFILE_VERSION: u32 = 276;

/// Uncompressed header size
pub const FASTFILE_HEADER_SIZE: usize = 12;

/// Write a zone as a fastfile
pub fn write<W: Write>(zone: &Zone, mut out: W) -> Result<()> {
    out.write_all(&FASTFILE_MAGIC)?;
    out.write_u32::<LE>(FASTFILE_VERSION)?;

    let mut encoder = ZlibEncoder::new(out, Compression::default());
    encoder.write_u32::<LE>(zone.records.len() as u32)?;
    encoder.write_u32::<LE>(zone.entries.len() as u32)?;
    for entry in &zone.entries {
        encoder.write_u32::<LE>(entry.key.kind as u32)?;
        encoder.write_u32::<LE>(entry.reference.encode())?;
    }
    encoder.write_all(&zone.records)?;
    encoder.finish()?.flush()?;
    Ok(())
}

/// Read a fastfile back into a zone
pub fn read<R: Read>(mut input: R) -> Result<Zone> {
    let mut magic = [0u8; 8];
    input.read_exact(&mut magic)?;
    if magic != FASTFILE_MAGIC {
        return Err(Error::InvalidZone(format!(
            "bad magic {:?}",
            String::from_utf8_lossy(&magic)
        )));
    }
    let version = input.read_u32::<LE>()?;
    if version != FASTFILE_VERSION {
        return Err(Error::InvalidZone(format!(
            "unsupported version {} (expected {})",
            version, FASTFILE_VERSION
        )));
    }

    let mut body = Vec::new();
    ZlibDecoder::new(input).read_to_end(&mut body)?;
    parse_body(&body)
}

fn parse_body(body: &[u8]) -> Result<Zone> {
    let truncated = |_| Error::InvalidZone("truncated zone body".to_string());
    let mut cursor = Cursor::new(body);

    let records_len = cursor.read_u32::<LE>().map_err(truncated)? as usize;
    let count = cursor.read_u32::<LE>().map_err(truncated)? as usize;

    let mut pointers = Vec::with_capacity(count.min(body.len() / 8));
    for _ in 0..count {
        let index = cursor.read_u32::<LE>().map_err(truncated)?;
        let pointer = cursor.read_u32::<LE>().map_err(truncated)?;
        let kind = AssetKind::from_index(index as usize)
            .ok_or_else(|| Error::InvalidZone(format!("unknown asset type index {}", index)))?;
        let reference = AssetRef::decode(pointer)
            .ok_or_else(|| Error::InvalidZone(format!("bad record pointer {:#010x}", pointer)))?;
        pointers.push((kind, reference));
    }

    let start = cursor.position() as usize;
    let records = body
        .get(start..start + records_len)
        .ok_or_else(|| Error::InvalidZone("record stream shorter than declared".to_string()))?
        .to_vec();

    let entries = pointers
        .into_iter()
        .map(|(kind, reference)| {
            let name = record_name(&records, kind, reference)?;
            Ok(ZoneEntry {
                key: AssetKey::new(kind, name),
                reference,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Zone { entries, records })
}

/// Name stored after a record's fixed header
fn record_name(records: &[u8], kind: AssetKind, reference: AssetRef) -> Result<String> {
    let header = expected_size_from_kind(kind);
    if header == 0 {
        return Err(Error::InvalidZone(format!(
            "{} records have no fixed header",
            kind
        )));
    }

    let start = reference.offset() as usize + header;
    let tail = records
        .get(start..)
        .ok_or_else(|| Error::InvalidZone(format!("{} record out of bounds", kind)))?;
    let end = tail
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| Error::InvalidZone(format!("unterminated {} name", kind)))?;
    Ok(String::from_utf8_lossy(&tail[..end]).into_owned())
}
