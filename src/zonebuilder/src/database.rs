//! Asset databases
//!
//! Where a build session looks up assets it has to materialize:
//! - `MemoryDatabase` for resident (built-in) objects and in-memory bytes
//! - `DirectoryDatabase` for files laid out as `<root>/<type>/<name>`

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::asset_type::AssetKind;
use crate::session::{AssetKey, ZoneAsset};
use crate::Result;

/// Content of an asset as found by a database or offered for import
pub enum Payload<'a> {
    /// Object already resident in memory; its references are live objects
    Resident(&'a dyn ZoneAsset),
    /// Serialized bytes from outside the process (e.g. a file on disk)
    External(Cow<'a, [u8]>),
}

impl Payload<'_> {
    pub fn is_resident(&self) -> bool {
        matches!(self, Payload::Resident(_))
    }
}

/// Lookup of asset content by kind and name
pub trait AssetDatabase {
    /// Find an asset's content, `None` if the database has no such asset
    fn find(&self, kind: AssetKind, name: &str) -> Result<Option<Payload<'_>>>;
}

enum Entry {
    Resident(Box<dyn ZoneAsset>),
    Bytes(Vec<u8>),
}

/// In-memory asset database
#[derive(Default)]
pub struct MemoryDatabase {
    entries: HashMap<AssetKey, Entry>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resident object, keyed by its own kind and name
    pub fn insert_resident(&mut self, asset: impl ZoneAsset + 'static) {
        let key = AssetKey::new(asset.kind(), asset.name());
        self.entries.insert(key, Entry::Resident(Box::new(asset)));
    }

    /// Add externally sourced bytes
    pub fn insert_bytes(&mut self, kind: AssetKind, name: &str, bytes: Vec<u8>) {
        self.entries
            .insert(AssetKey::new(kind, name), Entry::Bytes(bytes));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl AssetDatabase for MemoryDatabase {
    fn find(&self, kind: AssetKind, name: &str) -> Result<Option<Payload<'_>>> {
        Ok(self
            .entries
            .get(&AssetKey::new(kind, name))
            .map(|entry| match entry {
                Entry::Resident(asset) => Payload::Resident(asset.as_ref()),
                Entry::Bytes(bytes) => Payload::External(Cow::Borrowed(bytes)),
            }))
    }
}

/// Asset files on disk, one directory per asset type
#[derive(Debug, Clone)]
pub struct DirectoryDatabase {
    root: PathBuf,
}

impl DirectoryDatabase {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File path for an asset, `None` if the name would escape the type directory
    pub fn asset_path(&self, kind: AssetKind, name: &str) -> Option<PathBuf> {
        let relative = contained_path(name)?;
        Some(self.root.join(kind.to_string()).join(relative))
    }
}

/// `name` as a relative path that stays below the directory it is joined to
///
/// `None` for empty names, absolute paths and any `..` or `.` component.
pub fn contained_path(name: &str) -> Option<&Path> {
    let relative = Path::new(name);
    let contained = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)));
    if name.is_empty() || !contained {
        return None;
    }
    Some(relative)
}

impl AssetDatabase for DirectoryDatabase {
    fn find(&self, kind: AssetKind, name: &str) -> Result<Option<Payload<'_>>> {
        let Some(path) = self.asset_path(kind, name) else {
            return Ok(None);
        };
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(Payload::External(Cow::Owned(bytes)))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Localize;
    use tempfile::tempdir;

    #[test]
    fn test_memory_database_lookup() {
        let mut db = MemoryDatabase::new();
        db.insert_bytes(AssetKind::RawFile, "a.cfg", b"set x 1".to_vec());
        db.insert_resident(Localize::new("MENU_OK", "OK"));
        assert_eq!(db.len(), 2);

        match db.find(AssetKind::RawFile, "a.cfg").unwrap() {
            Some(Payload::External(bytes)) => assert_eq!(&bytes[..], b"set x 1"),
            _ => panic!("expected external bytes"),
        }
        assert!(db
            .find(AssetKind::Localize, "MENU_OK")
            .unwrap()
            .unwrap()
            .is_resident());
        assert!(db.find(AssetKind::RawFile, "missing").unwrap().is_none());
        // Kind is part of the key
        assert!(db.find(AssetKind::StringTable, "a.cfg").unwrap().is_none());
    }

    #[test]
    fn test_directory_database_reads_files() {
        let dir = tempdir().unwrap();
        let type_dir = dir.path().join("rawfile").join("maps");
        fs::create_dir_all(&type_dir).unwrap();
        fs::write(type_dir.join("test.gsc"), b"main() {}").unwrap();

        let db = DirectoryDatabase::new(dir.path());
        match db.find(AssetKind::RawFile, "maps/test.gsc").unwrap() {
            Some(Payload::External(bytes)) => assert_eq!(&bytes[..], b"main() {}"),
            _ => panic!("expected file contents"),
        }
        assert!(db.find(AssetKind::RawFile, "maps/other.gsc").unwrap().is_none());
    }

    #[test]
    fn test_directory_database_rejects_escaping_names() {
        let db = DirectoryDatabase::new("/assets");
        assert!(db.asset_path(AssetKind::RawFile, "../secret").is_none());
        assert!(db.asset_path(AssetKind::RawFile, "/etc/passwd").is_none());
        assert!(db.asset_path(AssetKind::RawFile, "").is_none());
        assert_eq!(
            db.asset_path(AssetKind::Image, "metal_col").unwrap(),
            PathBuf::from("/assets/image/metal_col")
        );
    }

    #[test]
    fn test_contained_path() {
        assert_eq!(contained_path("mp/ui_mp"), Some(Path::new("mp/ui_mp")));
        assert!(contained_path("./ui_mp").is_none());
        assert!(contained_path("mp/../../ui_mp").is_none());
    }
}
