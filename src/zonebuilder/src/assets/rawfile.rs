//! Raw files (scripts, configs) stored zlib-compressed

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::asset_type::AssetKind;
use crate::session::{Record, ZoneAsset, ZoneBuildSession};
use crate::stream::ZoneStream;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    pub name: String,
    pub data: Vec<u8>,
}

impl RawFile {
    pub fn new(name: &str, data: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            data,
        }
    }

    fn compress(&self) -> Result<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
        encoder.write_all(&self.data)?;
        Ok(encoder.finish()?)
    }
}

impl ZoneAsset for RawFile {
    fn kind(&self) -> AssetKind {
        AssetKind::RawFile
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn write(&self, _session: &mut ZoneBuildSession<'_>) -> Result<Record> {
        let compressed = self.compress()?;

        let mut header = ZoneStream::new();
        header.write_inline(); // name
        header.write_u32(compressed.len() as u32);
        header.write_u32(self.data.len() as u32);
        header.write_inline(); // buffer

        Ok(Record::new(header).with_data(compressed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryDatabase;
    use byteorder::{ByteOrder, LE};
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    #[test]
    fn test_rawfile_record() {
        let db = MemoryDatabase::new();
        let mut session = ZoneBuildSession::new(&db);
        let raw = RawFile::new("maps/mp/mp_test.gsc", b"main()\n{\n}\n".repeat(20));

        let record = raw.write(&mut session).unwrap();
        assert_eq!(record.header.len(), 16);

        let compressed_len = LE::read_u32(&record.header[4..8]) as usize;
        let len = LE::read_u32(&record.header[8..12]) as usize;
        assert_eq!(len, raw.data.len());
        assert_eq!(compressed_len, record.data.len());
        assert!(compressed_len < len);

        let mut decoder = ZlibDecoder::new(&record.data[..]);
        let mut out = Vec::new();
        decoder.read_to_end(&mut out).unwrap();
        assert_eq!(out, raw.data);
    }

    #[test]
    fn test_empty_rawfile() {
        let db = MemoryDatabase::new();
        let mut session = ZoneBuildSession::new(&db);
        let record = RawFile::new("empty.cfg", Vec::new())
            .write(&mut session)
            .unwrap();
        assert_eq!(LE::read_u32(&record.header[8..12]), 0);
        assert!(!record.data.is_empty());
    }
}
