//! # zonebuilder
//!
//! Packages engine assets into zone archives ("fastfiles") and coordinates
//! loading packaged zones back into a running engine.
//!
//! This library provides:
//! - The asset type table (kind <-> name, expected record sizes)
//! - A build session that resolves every asset an export transitively
//!   references, emitting each exactly once
//! - Import of built-in (resident) assets and rejection of unsafe sources
//! - The fastfile container (header + zlib-compressed zone body)
//! - A load coordinator that blocks on an asynchronous engine loader
//!
//! ## Example
//!
//! ```no_run
//! use zonebuilder::{AssetKind, DirectoryDatabase, ZoneBuildSession};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let database = DirectoryDatabase::new("assets");
//! let mut session = ZoneBuildSession::new(&database);
//!
//! session.export(AssetKind::Material, "mc/mtl_weapon_metal")?;
//! session.export(AssetKind::RawFile, "maps/mp/mp_test.gsc")?;
//!
//! let zone = session.finish();
//! let file = std::fs::File::create("mp_test.ff")?;
//! zonebuilder::fastfile::write(&zone, file)?;
//! # Ok(())
//! # }
//! ```

pub mod asset_type;
pub mod assets;
pub mod database;
pub mod fastfile;
mod importer;
pub mod loader;
mod resolver;
pub mod session;
pub mod source;
pub mod stream;

#[doc(inline)]
pub use asset_type::{
    check_record_size, expected_size_from_kind, kind_from_name, kind_from_name_legacy,
    name_from_kind, AssetKind, ASSET_TYPES, ASSET_TYPE_COUNT,
};
#[doc(inline)]
pub use assets::debug_checks;
#[doc(inline)]
pub use database::{AssetDatabase, DirectoryDatabase, MemoryDatabase, Payload};
#[doc(inline)]
pub use loader::{CompletionSignal, LoadCoordinator, ZoneDescriptor, ZoneLoader};
#[doc(inline)]
pub use session::{
    AssetKey, Origin, Record, Resolution, Zone, ZoneAsset, ZoneBuildSession, ZoneEntry,
};
#[doc(inline)]
pub use stream::{AssetRef, ZoneStream};

/// Errors from zone building and loading
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Asset not found: {kind} '{name}'")]
    AssetNotFound { kind: AssetKind, name: String },

    #[error("Can only export built-in {kind} assets: '{name}' was loaded from an external source")]
    UnsupportedExportSource { kind: AssetKind, name: String },

    #[error("Record size mismatch for {kind}: expected {expected} bytes, got {actual}")]
    TypeMismatch {
        kind: AssetKind,
        expected: usize,
        actual: usize,
    },

    #[error("Reference cycle detected while resolving {kind} '{name}'")]
    CycleDetected { kind: AssetKind, name: String },

    #[error("Unknown asset type: {0}")]
    UnknownAssetType(String),

    #[error("No encoder for asset type {0}")]
    UnsupportedKind(AssetKind),

    #[error("Invalid {kind} '{name}': {reason}")]
    InvalidAsset {
        kind: AssetKind,
        name: String,
        reason: String,
    },

    #[error("Zone source line {line}: {reason}")]
    InvalidSource { line: usize, reason: String },

    #[error("Zone too large: record offset {offset:#x} is past the last addressable offset")]
    ZoneTooLarge { offset: usize },

    #[error("Invalid zone: {0}")]
    InvalidZone(String),

    #[error("Load batch is empty")]
    EmptyLoadBatch,

    #[error("A zone load is already in progress")]
    LoadInProgress,

    #[error("Loader dropped the completion signal for zone '{0}'")]
    LoadAborted(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
