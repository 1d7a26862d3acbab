//! Zone output stream and record references
//!
//! Records are appended to a single little-endian stream. A record that has
//! been emitted is addressed by an [`AssetRef`], encoded the way the engine
//! encodes zone pointers: the block index in the top four bits and the
//! one-based offset in the remaining 28.

use byteorder::{WriteBytesExt, LE};

use crate::{Error, Result};

/// Block index that emitted records are addressed in
pub const RECORD_BLOCK: u32 = 3;

const OFFSET_MASK: u32 = 0x0FFF_FFFF;

/// Stable reference to an emitted record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetRef(u32);

impl AssetRef {
    /// Pointer value meaning "the data follows inline"
    pub const INLINE: u32 = 0xFFFF_FFFF;

    /// Reference to the record starting at `offset` in the record stream
    ///
    /// Fails with [`Error::ZoneTooLarge`] for offsets a zone pointer cannot hold.
    pub fn new(offset: usize) -> Result<Self> {
        match u32::try_from(offset) {
            Ok(offset) if offset < OFFSET_MASK => Ok(AssetRef(offset)),
            _ => Err(Error::ZoneTooLarge { offset }),
        }
    }

    /// Offset of the record in the record stream
    pub fn offset(self) -> u32 {
        self.0
    }

    /// Encoded zone pointer for embedding into other records
    pub fn encode(self) -> u32 {
        (RECORD_BLOCK << 28) | ((self.0 + 1) & OFFSET_MASK)
    }

    /// Decode a zone pointer written by [`AssetRef::encode`]
    pub fn decode(raw: u32) -> Option<Self> {
        if raw == Self::INLINE || raw >> 28 != RECORD_BLOCK || raw & OFFSET_MASK == 0 {
            return None;
        }
        Some(AssetRef((raw & OFFSET_MASK) - 1))
    }
}

/// Append-only little-endian byte stream
#[derive(Debug, Default, Clone)]
pub struct ZoneStream {
    buf: Vec<u8>,
}

impl ZoneStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        // Writes into a Vec cannot fail
        let _ = self.buf.write_u16::<LE>(value);
    }

    pub fn write_u32(&mut self, value: u32) {
        let _ = self.buf.write_u32::<LE>(value);
    }

    pub fn write_i32(&mut self, value: i32) {
        let _ = self.buf.write_i32::<LE>(value);
    }

    pub fn write_f32(&mut self, value: f32) {
        let _ = self.buf.write_f32::<LE>(value);
    }

    /// Write a pointer field that refers to an emitted record
    pub fn write_ref(&mut self, reference: AssetRef) {
        self.write_u32(reference.encode());
    }

    /// Write a pointer field whose data follows inline
    pub fn write_inline(&mut self) {
        self.write_u32(AssetRef::INLINE);
    }

    /// Write a NUL-terminated string
    pub fn write_cstr(&mut self, value: &str) {
        self.buf.extend_from_slice(value.as_bytes());
        self.buf.push(0);
    }

    /// Pad with zeros up to `len` total bytes
    pub fn pad_to(&mut self, len: usize) {
        if self.buf.len() < len {
            self.buf.resize(len, 0);
        }
    }

    /// Position `align` would move to
    pub fn aligned_position(&self, alignment: usize) -> usize {
        debug_assert!(alignment.is_power_of_two());
        (self.buf.len() + alignment - 1) & !(alignment - 1)
    }

    /// Pad with zeros to the next multiple of `alignment` (a power of two)
    pub fn align(&mut self, alignment: usize) {
        self.pad_to(self.aligned_position(alignment));
    }
}

impl From<Vec<u8>> for ZoneStream {
    fn from(buf: Vec<u8>) -> Self {
        Self { buf }
    }
}
