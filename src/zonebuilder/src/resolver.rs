//! Dependency resolution
//!
//! `require_asset` makes sure an asset is present in the zone exactly once
//! and returns the reference other records use to point at it. Materializing
//! an asset writes its dependencies first (the asset's writer requires them),
//! so a record is only emitted after everything it points at is resolved.
//!
//! Reference cycles are rejected: an asset that is still `Pending` when it
//! is required again fails with [`Error::CycleDetected`].

use tracing::{debug, warn};

use crate::asset_type::AssetKind;
use crate::session::{AssetKey, Origin, Resolution, ZoneAsset, ZoneBuildSession};
use crate::stream::AssetRef;
use crate::{Error, Result};

impl ZoneBuildSession<'_> {
    /// Resolve an asset, materializing and emitting it on first use
    pub fn require_asset(
        &mut self,
        kind: AssetKind,
        name: &str,
        origin: Origin<'_>,
    ) -> Result<AssetRef> {
        let key = AssetKey::new(kind, name);
        if let Some(reference) = self.lookup(&key)? {
            return Ok(reference);
        }

        match origin {
            Origin::Resident(asset) => self.materialize(key, asset),
            Origin::Database => {
                let database = self.database;
                match database.find(kind, name)? {
                    Some(payload) => self.import(key, payload),
                    None => Err(Error::AssetNotFound {
                        kind,
                        name: name.to_string(),
                    }),
                }
            }
        }
    }

    /// Registry lookup: `Some` if already resolved, `None` if absent
    pub(crate) fn lookup(&self, key: &AssetKey) -> Result<Option<AssetRef>> {
        match self.registry.get(key) {
            Some(Resolution::Resolved(reference)) => {
                debug!(kind = %key.kind, name = %key.name, "already resolved");
                Ok(Some(*reference))
            }
            Some(Resolution::Pending) => Err(Error::CycleDetected {
                kind: key.kind,
                name: key.name.clone(),
            }),
            Some(Resolution::Absent) | None => Ok(None),
        }
    }

    /// Write an asset's dependencies and emit its record exactly once.
    ///
    /// The object must carry the key's kind and name. On failure the registry
    /// entry is removed again, so the same key can be retried later.
    pub(crate) fn materialize(&mut self, key: AssetKey, asset: &dyn ZoneAsset) -> Result<AssetRef> {
        if asset.kind() != key.kind || asset.name() != key.name {
            return Err(Error::InvalidAsset {
                kind: key.kind,
                name: key.name,
                reason: format!("object is {} '{}'", asset.kind(), asset.name()),
            });
        }
        debug!(kind = %key.kind, name = %key.name, "materializing");

        self.registry.insert(key.clone(), Resolution::Pending);

        let result = asset
            .write(self)
            .and_then(|record| self.emit(key.clone(), record));

        if let Err(ref e) = result {
            warn!(kind = %key.kind, name = %key.name, error = %e, "resolution failed, rolling back");
            self.registry.remove(&key);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::database::MemoryDatabase;
    use crate::session::Record;
    use crate::stream::ZoneStream;

    /// Localize-sized test asset that requires other assets from the database
    struct Node {
        name: String,
        deps: Vec<String>,
        writes: Cell<usize>,
    }

    impl Node {
        fn new(name: &str, deps: &[&str]) -> Self {
            Self {
                name: name.to_string(),
                deps: deps.iter().map(|d| d.to_string()).collect(),
                writes: Cell::new(0),
            }
        }
    }

    impl ZoneAsset for Node {
        fn kind(&self) -> AssetKind {
            AssetKind::Localize
        }

        fn name(&self) -> &str {
            &self.name
        }

        fn write(&self, session: &mut ZoneBuildSession<'_>) -> Result<Record> {
            self.writes.set(self.writes.get() + 1);
            let mut header = ZoneStream::new();
            header.write_inline();
            let mut data = ZoneStream::new();
            for dep in &self.deps {
                let r = session.require_asset(AssetKind::Localize, dep, Origin::Database)?;
                data.write_ref(r);
            }
            header.write_inline();
            Ok(Record::new(header).with_data(data.into_inner()))
        }
    }

    fn chain_db() -> MemoryDatabase {
        let mut db = MemoryDatabase::new();
        db.insert_resident(Node::new("A", &["B"]));
        db.insert_resident(Node::new("B", &["C"]));
        db.insert_resident(Node::new("C", &[]));
        db
    }

    #[test]
    fn test_require_twice_returns_same_reference() {
        let db = chain_db();
        let mut session = ZoneBuildSession::new(&db);

        let r1 = session.export(AssetKind::Localize, "C").unwrap();
        let len = session.stream().position();
        let r2 = session.export(AssetKind::Localize, "C").unwrap();

        assert_eq!(r1, r2);
        assert_eq!(session.stream().position(), len);
        assert_eq!(session.entries().len(), 1);
    }

    #[test]
    fn test_forward_chain_emits_dependencies_first() {
        let db = chain_db();
        let mut session = ZoneBuildSession::new(&db);

        let a = session.export(AssetKind::Localize, "A").unwrap();

        let names: Vec<_> = session
            .entries()
            .iter()
            .map(|e| e.key.name.as_str())
            .collect();
        assert_eq!(names, ["C", "B", "A"]);

        // A's data holds the reference to B
        let b = session.entries()[1].reference;
        let offset = a.offset() as usize + 8 + "A\0".len();
        let bytes = &session.stream().as_bytes()[offset..offset + 4];
        assert_eq!(u32::from_le_bytes(bytes.try_into().unwrap()), b.encode());
    }

    #[test]
    fn test_shared_dependency_emitted_once() {
        let mut db = MemoryDatabase::new();
        db.insert_resident(Node::new("root", &["left", "right"]));
        db.insert_resident(Node::new("left", &["shared"]));
        db.insert_resident(Node::new("right", &["shared"]));
        db.insert_resident(Node::new("shared", &[]));

        let mut session = ZoneBuildSession::new(&db);
        session.export(AssetKind::Localize, "root").unwrap();

        let shared = session
            .entries()
            .iter()
            .filter(|e| e.key.name == "shared")
            .count();
        assert_eq!(shared, 1);
        assert_eq!(session.entries().len(), 4);
    }

    #[test]
    fn test_cycle_is_rejected_and_rolled_back() {
        let mut db = MemoryDatabase::new();
        db.insert_resident(Node::new("ping", &["pong"]));
        db.insert_resident(Node::new("pong", &["ping"]));

        let mut session = ZoneBuildSession::new(&db);
        let err = session.export(AssetKind::Localize, "ping").unwrap_err();

        assert!(matches!(err, Error::CycleDetected { ref name, .. } if name == "ping"));
        assert_eq!(session.resolution(AssetKind::Localize, "ping"), Resolution::Absent);
        assert_eq!(session.resolution(AssetKind::Localize, "pong"), Resolution::Absent);
        assert!(session.stream().is_empty());
    }

    #[test]
    fn test_missing_asset_fails() {
        let db = MemoryDatabase::new();
        let mut session = ZoneBuildSession::new(&db);

        let err = session.export(AssetKind::Localize, "nope").unwrap_err();
        assert!(matches!(
            err,
            Error::AssetNotFound { kind: AssetKind::Localize, ref name } if name == "nope"
        ));
    }

    #[test]
    fn test_failed_dependency_rolls_back_and_retry_succeeds() {
        let mut db = MemoryDatabase::new();
        db.insert_resident(Node::new("parent", &["child"]));

        {
            let mut session = ZoneBuildSession::new(&db);
            let err = session.export(AssetKind::Localize, "parent").unwrap_err();
            assert!(matches!(err, Error::AssetNotFound { .. }));
            assert_eq!(
                session.resolution(AssetKind::Localize, "parent"),
                Resolution::Absent
            );
        }

        db.insert_resident(Node::new("child", &[]));
        let mut session = ZoneBuildSession::new(&db);
        session.export(AssetKind::Localize, "parent").unwrap();
        assert_eq!(session.entries().len(), 2);
    }

    #[test]
    fn test_resident_origin_skips_database() {
        let db = MemoryDatabase::new();
        let mut session = ZoneBuildSession::new(&db);
        let node = Node::new("builtin", &[]);

        let r1 = session
            .require_asset(AssetKind::Localize, "builtin", Origin::Resident(&node))
            .unwrap();
        let r2 = session
            .require_asset(AssetKind::Localize, "builtin", Origin::Resident(&node))
            .unwrap();

        assert_eq!(r1, r2);
        assert_eq!(node.writes.get(), 1);
    }

    #[test]
    fn test_resident_object_must_match_key() {
        let db = MemoryDatabase::new();
        let mut session = ZoneBuildSession::new(&db);
        let node = Node::new("builtin", &[]);

        let err = session
            .require_asset(AssetKind::Localize, "other", Origin::Resident(&node))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidAsset { ref name, .. } if name == "other"));

        let err = session
            .require_asset(AssetKind::RawFile, "builtin", Origin::Resident(&node))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidAsset { kind: AssetKind::RawFile, .. }));

        assert_eq!(node.writes.get(), 0);
        assert!(session.entries().is_empty());
        assert_eq!(
            session.resolution(AssetKind::Localize, "other"),
            Resolution::Absent
        );
    }

    #[test]
    fn test_resolved_asset_does_not_hit_database_again() {
        let db = chain_db();
        let mut session = ZoneBuildSession::new(&db);
        let r = session.export(AssetKind::Localize, "C").unwrap();

        // A resident object under the same key is ignored once resolved
        let other = Node::new("C", &["missing"]);
        let again = session
            .require_asset(AssetKind::Localize, "C", Origin::Resident(&other))
            .unwrap();
        assert_eq!(r, again);
        assert_eq!(other.writes.get(), 0);
    }
}
