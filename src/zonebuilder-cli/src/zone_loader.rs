//! Fastfile-backed zone loader
//!
//! Reads `<dir>/<zone>.ff` on a worker thread and keeps the parsed zones
//! until their group is unloaded.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;

use tracing::{debug, error, info};
use zonebuilder::database::contained_path;
use zonebuilder::{fastfile, CompletionSignal, Zone, ZoneDescriptor, ZoneLoader};

/// A zone held by the loader
#[derive(Debug)]
pub struct LoadedZone {
    pub name: String,
    pub group: u32,
    pub zone: Zone,
}

pub struct DirectoryLoader {
    dir: PathBuf,
    store: Arc<Mutex<Vec<LoadedZone>>>,
}

impl DirectoryLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            store: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Zones currently loaded
    pub fn zones(&self) -> MutexGuard<'_, Vec<LoadedZone>> {
        // A worker that panicked mid-push leaves the list itself intact
        self.store.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn read_zone(dir: &Path, name: &str) -> anyhow::Result<Zone> {
    let Some(relative) = contained_path(name) else {
        anyhow::bail!("zone name '{}' is outside the zone directory", name);
    };
    let path = dir.join(format!("{}.ff", relative.display()));
    let file = File::open(&path)?;
    Ok(fastfile::read(BufReader::new(file))?)
}

impl ZoneLoader for DirectoryLoader {
    fn load(&self, zones: &[ZoneDescriptor], signal: CompletionSignal) {
        let dir = self.dir.clone();
        let store = Arc::clone(&self.store);
        let zones = zones.to_vec();

        thread::spawn(move || {
            for descriptor in zones {
                let zone = match read_zone(&dir, &descriptor.name) {
                    Ok(zone) => zone,
                    Err(e) => {
                        // Dropping the signal here wakes the waiter with an abort
                        error!(zone = %descriptor.name, "failed to load zone: {:#}", e);
                        return;
                    }
                };
                info!(zone = %descriptor.name, assets = zone.len(), "zone loaded");
                store
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .push(LoadedZone {
                        name: descriptor.name.clone(),
                        group: descriptor.group,
                        zone,
                    });
                signal.zone_loaded(&descriptor.name);
            }
        });
    }

    fn unload(&self, group: u32) {
        let mut zones = self.zones();
        let before = zones.len();
        zones.retain(|z| z.group & group == 0);
        debug!(group, released = before - zones.len(), "zones unloaded");
    }
}
