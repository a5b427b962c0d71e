//! Store trait definitions

use gemstock_api::InventorySnapshot;

use crate::StoreResult;

/// Outcome of an `update` closure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// Persist the modified snapshot
    Commit,
    /// Leave the persisted snapshot untouched
    Discard,
}

/// Main store trait
///
/// The whole inventory is read and written as one document. Every method
/// holds the store's lock for its full duration.
pub trait Store: Send + Sync {
    /// Load the persisted snapshot.
    ///
    /// Missing or malformed data yields `InventorySnapshot::default()`
    /// rather than an error.
    fn load(&self) -> StoreResult<InventorySnapshot>;

    /// Overwrite the persisted snapshot
    fn save(&self, snapshot: &InventorySnapshot) -> StoreResult<()>;

    /// Load, modify and save as a single critical section.
    ///
    /// The snapshot is only written back when `apply` returns
    /// `Mutation::Commit`.
    fn update(
        &self,
        apply: &mut dyn FnMut(&mut InventorySnapshot) -> Mutation,
    ) -> StoreResult<Mutation>;

    /// Check if store is healthy
    fn is_healthy(&self) -> bool;
}
