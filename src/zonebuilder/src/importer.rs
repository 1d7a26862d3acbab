//! Asset import
//!
//! `add_asset` offers an asset's content to the session directly instead of
//! having the resolver fetch it. Resident (built-in) objects are written
//! as-is, resolving their nested references first. Externally sourced bytes
//! are decoded by the kind's encoder, except for kinds whose records hold
//! live pointers into the loading process, which are refused.

use tracing::debug;

use crate::asset_type::AssetKind;
use crate::assets;
use crate::database::Payload;
use crate::session::{AssetKey, ZoneBuildSession};
use crate::stream::AssetRef;
use crate::{Error, Result};

impl ZoneBuildSession<'_> {
    /// Register an asset from explicit content
    ///
    /// Fails with [`Error::UnsupportedExportSource`] for external bytes of a
    /// kind that must come from a resident object; in that case the session
    /// is left untouched.
    pub fn add_asset(
        &mut self,
        kind: AssetKind,
        name: &str,
        payload: Payload<'_>,
    ) -> Result<AssetRef> {
        ensure_exportable(kind, name, &payload)?;

        let key = AssetKey::new(kind, name);
        if let Some(reference) = self.lookup(&key)? {
            return Ok(reference);
        }
        self.import(key, payload)
    }

    /// Materialize an absent asset from its payload
    pub(crate) fn import(&mut self, key: AssetKey, payload: Payload<'_>) -> Result<AssetRef> {
        ensure_exportable(key.kind, &key.name, &payload)?;

        match payload {
            Payload::Resident(asset) => self.materialize(key, asset),
            Payload::External(bytes) => {
                debug!(kind = %key.kind, name = %key.name, len = bytes.len(), "decoding external asset");
                let asset = assets::decode(key.kind, &key.name, &bytes)?;
                self.materialize(key, asset.as_ref())
            }
        }
    }
}

fn ensure_exportable(kind: AssetKind, name: &str, payload: &Payload<'_>) -> Result<()> {
    if matches!(payload, Payload::External(_)) && kind.requires_resident() {
        return Err(Error::UnsupportedExportSource {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}
