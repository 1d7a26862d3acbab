//! Zone build session
//!
//! A session owns everything one export operation touches: the record
//! stream, the registry of resolved assets, and the order in which assets
//! were emitted. Resolution (`require_asset`) and import (`add_asset`) are
//! implemented on the session in their own modules.
//!
//! A session is re-entrant (asset writers call back into it while being
//! written) but not thread-safe; it is never shared between exports.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, info};

use crate::asset_type::{check_record_size, expected_size_from_kind, AssetKind};
use crate::database::AssetDatabase;
use crate::stream::{AssetRef, ZoneStream};
use crate::{Error, Result};

/// Unique identity of an asset within one session
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AssetKey {
    pub kind: AssetKind,
    pub name: String,
}

impl AssetKey {
    pub fn new(kind: AssetKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}

impl fmt::Display for AssetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.kind, self.name)
    }
}

/// Resolution state of an asset in a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Never looked up, or rolled back after a failure
    Absent,
    /// Being written; its dependencies are still resolving
    Pending,
    /// Emitted; the reference is stable for the rest of the session
    Resolved(AssetRef),
}

/// Where the resolver should take an asset's content from
#[derive(Clone, Copy)]
pub enum Origin<'a> {
    /// Look the asset up in the session's asset database
    Database,
    /// Use an object already resident in memory, typically a sub-object of
    /// the asset doing the referencing
    Resident(&'a dyn ZoneAsset),
}

impl fmt::Debug for Origin<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Database => f.write_str("Database"),
            Origin::Resident(asset) => write!(f, "Resident({} '{}')", asset.kind(), asset.name()),
        }
    }
}

/// Encoded record for one asset
///
/// The header has the kind's fixed engine size. The session writes the
/// asset name right after it, followed by the variable-length data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub header: Vec<u8>,
    pub data: Vec<u8>,
}

impl Record {
    pub fn new(header: ZoneStream) -> Self {
        Self {
            header: header.into_inner(),
            data: Vec::new(),
        }
    }

    pub fn with_data(mut self, data: Vec<u8>) -> Self {
        self.data = data;
        self
    }
}

/// An asset that can be written into a zone
pub trait ZoneAsset {
    fn kind(&self) -> AssetKind;

    fn name(&self) -> &str;

    /// Build this asset's record.
    ///
    /// Every asset the record points at must be resolved through `session`
    /// (`require_asset` / `add_asset`) before the record is returned; the
    /// returned references are what get embedded in the header or data.
    fn write(&self, session: &mut ZoneBuildSession<'_>) -> Result<Record>;
}

/// An emitted asset and the reference to its record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneEntry {
    pub key: AssetKey,
    pub reference: AssetRef,
}

/// A finished zone: emitted assets in order, and the record stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Zone {
    pub entries: Vec<ZoneEntry>,
    pub records: Vec<u8>,
}

impl Zone {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, kind: AssetKind, name: &str) -> Option<&ZoneEntry> {
        self.entries
            .iter()
            .find(|e| e.key.kind == kind && e.key.name == name)
    }
}

/// State for a single zone export
pub struct ZoneBuildSession<'db> {
    pub(crate) database: &'db dyn AssetDatabase,
    pub(crate) registry: HashMap<AssetKey, Resolution>,
    entries: Vec<ZoneEntry>,
    stream: ZoneStream,
}

impl<'db> ZoneBuildSession<'db> {
    pub fn new(database: &'db dyn AssetDatabase) -> Self {
        Self {
            database,
            registry: HashMap::new(),
            entries: Vec::new(),
            stream: ZoneStream::new(),
        }
    }

    /// Export a root asset from the database, along with everything it references
    pub fn export(&mut self, kind: AssetKind, name: &str) -> Result<AssetRef> {
        self.require_asset(kind, name, Origin::Database)
    }

    /// Current resolution state of an asset
    pub fn resolution(&self, kind: AssetKind, name: &str) -> Resolution {
        self.registry
            .get(&AssetKey::new(kind, name))
            .copied()
            .unwrap_or(Resolution::Absent)
    }

    /// Assets emitted so far, in emission order
    pub fn entries(&self) -> &[ZoneEntry] {
        &self.entries
    }

    /// Records written so far
    pub fn stream(&self) -> &ZoneStream {
        &self.stream
    }

    /// Append a record to the stream and mark the asset resolved
    pub(crate) fn emit(&mut self, key: AssetKey, record: Record) -> Result<AssetRef> {
        debug_assert!(
            !matches!(self.registry.get(&key), Some(Resolution::Resolved(_))),
            "{key} emitted twice"
        );
        // The name is found after the fixed header when a zone is read back
        if expected_size_from_kind(key.kind) == 0 {
            return Err(Error::UnsupportedKind(key.kind));
        }
        check_record_size(key.kind, record.header.len())?;

        let reference = AssetRef::new(self.stream.aligned_position(4))?;
        self.stream.align(4);
        self.stream.write_bytes(&record.header);
        self.stream.write_cstr(&key.name);
        self.stream.write_bytes(&record.data);

        debug!(
            kind = %key.kind,
            name = %key.name,
            offset = reference.offset(),
            size = self.stream.position() - reference.offset() as usize,
            "emitted asset"
        );

        self.registry
            .insert(key.clone(), Resolution::Resolved(reference));
        self.entries.push(ZoneEntry { key, reference });
        Ok(reference)
    }

    /// Close the session and hand over the finished zone
    pub fn finish(self) -> Zone {
        info!(
            assets = self.entries.len(),
            bytes = self.stream.position(),
            "zone build finished"
        );
        Zone {
            entries: self.entries,
            records: self.stream.into_inner(),
        }
    }
}
