//! In-memory store (for testing and dry runs)

use gemstock_api::InventorySnapshot;
use std::sync::Mutex;
use tracing::{debug, warn};

use crate::{Mutation, Store, StoreError, StoreResult};

/// Store holding the snapshot in process memory
#[derive(Default)]
pub struct MemoryStore {
    snapshot: Mutex<InventorySnapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing snapshot
    pub fn with_snapshot(snapshot: InventorySnapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
        }
    }
}

impl Store for MemoryStore {
    fn load(&self) -> StoreResult<InventorySnapshot> {
        let snapshot = self.snapshot.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(snapshot.clone())
    }

    fn save(&self, snapshot: &InventorySnapshot) -> StoreResult<()> {
        let mut current = self.snapshot.lock().map_err(|_| StoreError::LockPoisoned)?;
        *current = snapshot.clone();
        debug!(items = snapshot.inventory.len(), "Snapshot saved in memory");
        Ok(())
    }

    fn update(
        &self,
        apply: &mut dyn FnMut(&mut InventorySnapshot) -> Mutation,
    ) -> StoreResult<Mutation> {
        let mut current = self.snapshot.lock().map_err(|_| StoreError::LockPoisoned)?;

        // Work on a copy so a discarded mutation never leaks into the store
        let mut working = current.clone();
        let outcome = apply(&mut working);
        if outcome == Mutation::Commit {
            *current = working;
        }

        Ok(outcome)
    }

    fn is_healthy(&self) -> bool {
        if self.snapshot.is_poisoned() {
            warn!("Store lock poisoned");
            return false;
        }
        true
    }
}
