//! Localized strings

use crate::asset_type::AssetKind;
use crate::session::{Record, ZoneAsset, ZoneBuildSession};
use crate::stream::ZoneStream;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Localize {
    pub name: String,
    pub value: String,
}

impl Localize {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }

    /// Parse a UTF-8 value; a single trailing line break is dropped
    pub fn parse(name: &str, bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes).map_err(|e| Error::InvalidAsset {
            kind: AssetKind::Localize,
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        let value = text
            .strip_suffix("\r\n")
            .or_else(|| text.strip_suffix('\n'))
            .unwrap_or(text);
        Ok(Self::new(name, value))
    }
}

impl ZoneAsset for Localize {
    fn kind(&self) -> AssetKind {
        AssetKind::Localize
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn write(&self, _session: &mut ZoneBuildSession<'_>) -> Result<Record> {
        let mut header = ZoneStream::new();
        header.write_inline(); // value
        header.write_inline(); // name

        let mut data = ZoneStream::new();
        data.write_cstr(&self.value);
        Ok(Record::new(header).with_data(data.into_inner()))
    }
}
