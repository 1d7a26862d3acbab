//! String tables (CSV)

use crate::asset_type::AssetKind;
use crate::session::{Record, ZoneAsset, ZoneBuildSession};
use crate::stream::ZoneStream;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringTable {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

/// Cell hash the engine uses for string table lookups
pub fn string_table_hash(value: &str) -> i32 {
    value.bytes().fold(0i32, |hash, b| {
        hash.wrapping_mul(31)
            .wrapping_add(b.to_ascii_lowercase() as i32)
    })
}

impl StringTable {
    pub fn new(name: &str, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.to_string(),
            rows,
        }
    }

    /// Parse comma-separated text. Short rows are padded to the width of
    /// the widest row.
    pub fn parse(name: &str, bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes).map_err(|e| Error::InvalidAsset {
            kind: AssetKind::StringTable,
            name: name.to_string(),
            reason: e.to_string(),
        })?;

        let rows = text
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| line.split(',').map(str::to_string).collect())
            .collect();
        Ok(Self::new(name, rows))
    }

    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn cell(&self, row: usize, column: usize) -> &str {
        self.rows[row].get(column).map(String::as_str).unwrap_or("")
    }
}

impl ZoneAsset for StringTable {
    fn kind(&self) -> AssetKind {
        AssetKind::StringTable
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn write(&self, _session: &mut ZoneBuildSession<'_>) -> Result<Record> {
        let columns = self.column_count();
        let rows = self.row_count();

        let mut header = ZoneStream::new();
        header.write_inline(); // name
        header.write_i32(columns as i32);
        header.write_i32(rows as i32);
        header.write_inline(); // cells

        // Cell table first, then the strings in the same order
        let mut data = ZoneStream::new();
        for row in 0..rows {
            for column in 0..columns {
                data.write_inline();
                data.write_i32(string_table_hash(self.cell(row, column)));
            }
        }
        for row in 0..rows {
            for column in 0..columns {
                data.write_cstr(self.cell(row, column));
            }
        }

        Ok(Record::new(header).with_data(data.into_inner()))
    }
}
