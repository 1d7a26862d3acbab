//! Zone load coordination
//!
//! The engine loads zones asynchronously on its own threads. `load_zones`
//! hands a batch to the loader and blocks until the loader reports that the
//! last zone of the batch is in. There is no timeout and no cancellation.
//!
//! Only one batch may be waited on at a time; a second `load_zones` while
//! one is outstanding fails with [`Error::LoadInProgress`].

use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam_channel::{bounded, Sender};
use tracing::debug;

use crate::{Error, Result};

/// One zone to load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneDescriptor {
    pub name: String,
    /// Group bits the zone's assets are loaded under
    pub group: u32,
}

impl ZoneDescriptor {
    pub fn new(name: impl Into<String>, group: u32) -> Self {
        Self {
            name: name.into(),
            group,
        }
    }
}

/// One-shot completion signal handed to the loader with each batch
///
/// The loader reports every zone it finishes; the waiter wakes when the
/// batch's last zone is reported. Dropping every clone without reporting it
/// wakes the waiter with [`Error::LoadAborted`].
#[derive(Debug, Clone)]
pub struct CompletionSignal {
    zone: String,
    tx: Sender<()>,
}

impl CompletionSignal {
    /// Name of the zone whose completion ends the wait
    pub fn zone(&self) -> &str {
        &self.zone
    }

    /// Report a finished zone; returns true if it completed the batch
    pub fn zone_loaded(&self, name: &str) -> bool {
        if name != self.zone {
            return false;
        }
        // A second report finds the slot full and is dropped
        let _ = self.tx.try_send(());
        true
    }
}

/// The engine's asynchronous zone loader
pub trait ZoneLoader: Send + Sync {
    /// Start loading a batch. Must return without waiting for the load.
    fn load(&self, zones: &[ZoneDescriptor], signal: CompletionSignal);

    /// Release every asset loaded under `group`
    fn unload(&self, group: u32);
}

/// Blocking front end to a [`ZoneLoader`]
pub struct LoadCoordinator<L> {
    loader: L,
    waiting: AtomicBool,
}

impl<L: ZoneLoader> LoadCoordinator<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            waiting: AtomicBool::new(false),
        }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Whether a batch is currently being waited on
    pub fn is_waiting(&self) -> bool {
        self.waiting.load(Ordering::Acquire)
    }

    /// Load a batch of zones and block until the last one has loaded
    pub fn load_zones(&self, zones: &[ZoneDescriptor]) -> Result<()> {
        let last = zones.last().ok_or(Error::EmptyLoadBatch)?;

        if self
            .waiting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(Error::LoadInProgress);
        }
        let _waiting = WaitingGuard(&self.waiting);

        let (tx, rx) = bounded(1);
        let signal = CompletionSignal {
            zone: last.name.clone(),
            tx,
        };

        debug!(zones = zones.len(), last = %last.name, "requesting zone load");
        self.loader.load(zones, signal);

        rx.recv()
            .map_err(|_| Error::LoadAborted(last.name.clone()))?;
        debug!(last = %last.name, "zone load complete");
        Ok(())
    }

    /// Ask the loader to release a group. Does not wait.
    pub fn unload_zones(&self, group: u32) {
        debug!(group, "requesting zone unload");
        self.loader.unload(group);
    }
}

struct WaitingGuard<'a>(&'a AtomicBool);

impl Drop for WaitingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
