//! JSON file store implementation

use gemstock_api::{InventorySnapshot, NextIdCheck};
use gemstock_util::inventory_path;
use std::fs::{self, File};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::{Mutation, Store, StoreError, StoreResult};

/// Store keeping the whole inventory in a single JSON document
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open the store in a data directory, creating the directory if needed.
    ///
    /// The document lives at `<data_dir>/inventory.json`.
    pub fn open(data_dir: impl AsRef<Path>) -> StoreResult<Self> {
        let data_dir = data_dir.as_ref();
        fs::create_dir_all(data_dir)?;
        Ok(Self::at_path(inventory_path(data_dir)))
    }

    /// Use an explicit document path. The parent directory must exist
    /// by the time the first save happens.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        debug!(path = %path.display(), "JSON store opened");
        Self {
            path,
            lock: Mutex::new(()),
        }
    }

    /// Location of the persisted document
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn acquire(&self) -> StoreResult<MutexGuard<'_, ()>> {
        self.lock.lock().map_err(|_| StoreError::LockPoisoned)
    }

    fn read_locked(&self) -> InventorySnapshot {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No inventory file yet, starting empty");
                return InventorySnapshot::default();
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to read inventory file, starting empty"
                );
                return InventorySnapshot::default();
            }
        };

        match serde_json::from_slice::<InventorySnapshot>(&bytes) {
            Ok(mut snapshot) => match snapshot.ensure_next_id() {
                NextIdCheck::Consistent => snapshot,
                NextIdCheck::Raised => {
                    warn!(
                        path = %self.path.display(),
                        next_id = %snapshot.next_id,
                        "Inventory next_id was not above existing ids, raised it"
                    );
                    snapshot
                }
                NextIdCheck::Exhausted => {
                    warn!(
                        path = %self.path.display(),
                        "Inventory uses the largest possible id, treating it as malformed"
                    );
                    InventorySnapshot::default()
                }
            },
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Inventory file is malformed, starting empty"
                );
                InventorySnapshot::default()
            }
        }
    }

    fn write_locked(&self, snapshot: &InventorySnapshot) -> StoreResult<()> {
        let mut json = serde_json::to_vec_pretty(snapshot)?;
        json.push(b'\n');

        // Write a sibling file and rename it over the target so the document
        // is replaced whole or not at all.
        let tmp_path = self.path.with_extension("json.tmp");
        if let Err(e) = write_synced(&tmp_path, &json)
            .and_then(|()| fs::rename(&tmp_path, &self.path))
        {
            if let Err(cleanup) = fs::remove_file(&tmp_path)
                && cleanup.kind() != ErrorKind::NotFound
            {
                warn!(
                    path = %tmp_path.display(),
                    error = %cleanup,
                    "Failed to remove temporary inventory file"
                );
            }
            return Err(e.into());
        }

        debug!(
            path = %self.path.display(),
            items = snapshot.inventory.len(),
            next_id = %snapshot.next_id,
            "Inventory saved"
        );
        Ok(())
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

impl Store for JsonFileStore {
    fn load(&self) -> StoreResult<InventorySnapshot> {
        let _guard = self.acquire()?;
        Ok(self.read_locked())
    }

    fn save(&self, snapshot: &InventorySnapshot) -> StoreResult<()> {
        let _guard = self.acquire()?;
        self.write_locked(snapshot)
    }

    fn update(
        &self,
        apply: &mut dyn FnMut(&mut InventorySnapshot) -> Mutation,
    ) -> StoreResult<Mutation> {
        let _guard = self.acquire()?;
        let mut snapshot = self.read_locked();

        let outcome = apply(&mut snapshot);
        if outcome == Mutation::Commit {
            self.write_locked(&snapshot)?;
        }

        Ok(outcome)
    }

    fn is_healthy(&self) -> bool {
        if self.lock.is_poisoned() {
            warn!("Store lock poisoned");
            return false;
        }
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.is_dir(),
            _ => true,
        }
    }
}
