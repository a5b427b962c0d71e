//! Catalog operations
//!
//! Each mutating operation runs inside a single `Store::update` call, so the
//! load, the change and the save happen under one lock acquisition.

use gemstock_api::{
    InventorySnapshot, InventorySummary, Item, ItemStatus, ItemUpdate, ProfitSummary,
};
use gemstock_store::{Mutation, Store, StoreError};
use gemstock_util::{round_cents, ItemId};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::{demo_inventory, inventory_summary, profit_summary};

/// Catalog errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Item {id}: cannot change status from {from} to {to}")]
    InvalidTransition {
        id: ItemId,
        from: ItemStatus,
        to: ItemStatus,
    },

    #[error("Item {0}: a sold item needs a selling price")]
    MissingSellingPrice(ItemId),

    #[error("Item {0}: an available item cannot have a selling price")]
    UnexpectedSellingPrice(ItemId),

    #[error("Price must be a finite number, got {0}")]
    InvalidPrice(f64),

    #[error("No item ids left to assign")]
    IdsExhausted,
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Inventory operations over a shared store
pub struct Catalog {
    store: Arc<dyn Store>,
}

impl Catalog {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// Run `op` against the stored snapshot in one transaction.
    ///
    /// The snapshot is written back only when `op` returns `Ok(Some(_))`.
    fn transact<T>(
        &self,
        mut op: impl FnMut(&mut InventorySnapshot) -> CatalogResult<Option<T>>,
    ) -> CatalogResult<Option<T>> {
        let mut result = Ok(None);

        self.store.update(&mut |snapshot| {
            result = op(snapshot);
            match &result {
                Ok(Some(_)) => Mutation::Commit,
                _ => Mutation::Discard,
            }
        })?;

        result
    }

    /// Add a new available item and return it
    pub fn add_item(
        &self,
        item_type: impl Into<String>,
        category: impl Into<String>,
        cost_price: f64,
    ) -> CatalogResult<Item> {
        let cost_price = checked_price(cost_price)?;
        let item_type = item_type.into();
        let category = category.into();

        let item = self
            .transact(|snapshot| {
                let Some(id) = snapshot.allocate_id() else {
                    return Ok(None);
                };
                let item = Item {
                    id,
                    item_type: item_type.clone(),
                    category: category.clone(),
                    cost_price,
                    selling_price: None,
                    status: ItemStatus::Available,
                };
                snapshot.inventory.push(item.clone());
                Ok(Some(item))
            })?
            .ok_or(CatalogError::IdsExhausted)?;

        info!(
            item_id = %item.id,
            item_type = %item.item_type,
            category = %item.category,
            cost_price = item.cost_price,
            "Item added"
        );
        Ok(item)
    }

    /// Mark an available item as sold.
    ///
    /// Returns `None` when no available item has this id, which covers both
    /// unknown ids and items that were already sold.
    pub fn mark_sold(&self, item_id: ItemId, selling_price: f64) -> CatalogResult<Option<Item>> {
        let selling_price = checked_price(selling_price)?;
        let sold = self.transact(|snapshot| {
            let Some(item) = snapshot
                .inventory
                .iter_mut()
                .find(|item| item.id == item_id && item.is_available())
            else {
                return Ok(None);
            };

            item.status = ItemStatus::Sold;
            item.selling_price = Some(selling_price);
            Ok(Some(item.clone()))
        })?;

        match &sold {
            Some(item) => info!(
                item_id = %item.id,
                selling_price = ?item.selling_price,
                "Item marked sold"
            ),
            None => debug!(item_id = %item_id, "No available item to mark sold"),
        }
        Ok(sold)
    }

    /// Apply a partial update to an item, whatever its status.
    ///
    /// Returns `None` when no item has this id. Status changes are checked:
    /// sold items cannot go back to available, sold items keep a selling
    /// price, and available items have none.
    pub fn update_item(&self, item_id: ItemId, update: &ItemUpdate) -> CatalogResult<Option<Item>> {
        let update = ItemUpdate {
            cost_price: update.cost_price.map(checked_price).transpose()?,
            selling_price: update
                .selling_price
                .map(|price| price.map(checked_price).transpose())
                .transpose()?,
            ..update.clone()
        };

        let updated = self.transact(|snapshot| {
            let Some(item) = snapshot.find_mut(item_id) else {
                return Ok(None);
            };

            let next = apply_update(item, &update)?;
            *item = next.clone();
            Ok(Some(next))
        })?;

        match &updated {
            Some(item) => info!(item_id = %item.id, status = %item.status, "Item updated"),
            None => debug!(item_id = %item_id, "No item to update"),
        }
        Ok(updated)
    }

    /// All items in insertion order
    pub fn list_inventory(&self) -> CatalogResult<Vec<Item>> {
        Ok(self.store.load()?.inventory)
    }

    /// Look up one item by id
    pub fn get_item(&self, item_id: ItemId) -> CatalogResult<Option<Item>> {
        Ok(self.store.load()?.find(item_id).cloned())
    }

    /// Profit totals over the stored inventory
    pub fn profit_summary(&self) -> CatalogResult<ProfitSummary> {
        Ok(profit_summary(&self.store.load()?))
    }

    /// Stock counts over the stored inventory
    pub fn inventory_summary(&self) -> CatalogResult<InventorySummary> {
        Ok(inventory_summary(&self.store.load()?))
    }

    /// Fill an empty inventory with the demo items.
    ///
    /// Returns true if the demo items were written. A non-empty inventory is
    /// left alone.
    pub fn seed_demo_inventory(&self) -> CatalogResult<bool> {
        let seeded = self.transact(|snapshot| {
            if !snapshot.is_empty() {
                return Ok(None);
            }
            *snapshot = demo_inventory();
            Ok(Some(snapshot.inventory.len()))
        })?;

        match seeded {
            Some(count) => {
                info!(items = count, "Seeded demo inventory");
                Ok(true)
            }
            None => {
                debug!("Inventory not empty, skipping demo seed");
                Ok(false)
            }
        }
    }
}

/// Round a price to cents, rejecting NaN and values that do not stay finite
fn checked_price(price: f64) -> CatalogResult<f64> {
    let rounded = round_cents(price);
    if rounded.is_finite() {
        Ok(rounded)
    } else {
        Err(CatalogError::InvalidPrice(price))
    }
}

/// Build the updated item, rejecting results that break status rules.
/// Prices in `update` are already rounded.
fn apply_update(item: &Item, update: &ItemUpdate) -> CatalogResult<Item> {
    let mut next = item.clone();

    if let Some(item_type) = &update.item_type {
        next.item_type = item_type.clone();
    }
    if let Some(category) = &update.category {
        next.category = category.clone();
    }
    if let Some(cost_price) = update.cost_price {
        next.cost_price = cost_price;
    }
    if let Some(selling_price) = update.selling_price {
        next.selling_price = selling_price;
    }
    if let Some(status) = update.status {
        next.status = status;
    }

    if item.is_sold() && next.is_available() {
        return Err(CatalogError::InvalidTransition {
            id: item.id,
            from: item.status,
            to: next.status,
        });
    }

    match next.status {
        ItemStatus::Sold if next.selling_price.is_none() => {
            Err(CatalogError::MissingSellingPrice(item.id))
        }
        ItemStatus::Available if next.selling_price.is_some() => {
            Err(CatalogError::UnexpectedSellingPrice(item.id))
        }
        _ => Ok(next),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemstock_store::{JsonFileStore, MemoryStore};
    use std::thread;
    use tempfile::TempDir;

    fn memory_catalog() -> Catalog {
        Catalog::new(Arc::new(MemoryStore::new()))
    }

    fn demo_catalog() -> Catalog {
        Catalog::new(Arc::new(MemoryStore::with_snapshot(demo_inventory())))
    }

    #[test]
    fn test_add_first_item() {
        let catalog = memory_catalog();

        let item = catalog.add_item("ring", "gold", 250.00).unwrap();
        assert_eq!(item.id, ItemId::new(1));
        assert_eq!(item.item_type, "ring");
        assert_eq!(item.category, "gold");
        assert_eq!(item.cost_price, 250.00);
        assert_eq!(item.selling_price, None);
        assert_eq!(item.status, ItemStatus::Available);

        let snapshot = catalog.store().load().unwrap();
        assert_eq!(snapshot.inventory, vec![item]);
        assert_eq!(snapshot.next_id, ItemId::new(2));
    }

    #[test]
    fn test_add_rounds_cost_and_accepts_anything() {
        let catalog = memory_catalog();

        let item = catalog.add_item("", "", -12.346).unwrap();
        assert_eq!(item.cost_price, -12.35);
        assert_eq!(item.item_type, "");
    }

    #[test]
    fn test_non_finite_prices_are_rejected() {
        let temp = TempDir::new().unwrap();
        let catalog = Catalog::new(Arc::new(JsonFileStore::open(temp.path()).unwrap()));
        let ring = catalog.add_item("ring", "gold", 250.0).unwrap();
        catalog.add_item("necklace", "silver", 150.0).unwrap();

        let path = temp.path().join("inventory.json");
        let before = std::fs::read(&path).unwrap();

        for price in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, f64::MAX] {
            assert!(matches!(
                catalog.add_item("bracelet", "gold", price),
                Err(CatalogError::InvalidPrice(_))
            ));
            assert!(matches!(
                catalog.mark_sold(ring.id, price),
                Err(CatalogError::InvalidPrice(_))
            ));
            assert!(matches!(
                catalog.update_item(ring.id, &ItemUpdate::new().cost_price(price)),
                Err(CatalogError::InvalidPrice(_))
            ));
            let sell = ItemUpdate::new()
                .status(ItemStatus::Sold)
                .selling_price(Some(price));
            assert!(matches!(
                catalog.update_item(ring.id, &sell),
                Err(CatalogError::InvalidPrice(_))
            ));
        }

        assert_eq!(std::fs::read(&path).unwrap(), before);
        assert_eq!(catalog.list_inventory().unwrap().len(), 2);
        let next = catalog.add_item("bracelet", "gold", 95.0).unwrap();
        assert_eq!(next.id, ItemId::new(3));
    }

    #[test]
    fn test_add_item_when_ids_are_exhausted() {
        let snapshot = InventorySnapshot {
            inventory: Vec::new(),
            next_id: ItemId::new(u64::MAX),
        };
        let catalog = Catalog::new(Arc::new(MemoryStore::with_snapshot(snapshot.clone())));

        assert!(matches!(
            catalog.add_item("ring", "gold", 10.0),
            Err(CatalogError::IdsExhausted)
        ));
        assert_eq!(catalog.store().load().unwrap(), snapshot);
    }

    #[test]
    fn test_mark_sold() {
        let catalog = memory_catalog();
        let item = catalog.add_item("ring", "gold", 250.00).unwrap();

        let sold = catalog.mark_sold(item.id, 299.999).unwrap().unwrap();
        assert_eq!(sold.status, ItemStatus::Sold);
        assert_eq!(sold.selling_price, Some(300.0));
        assert_eq!(catalog.get_item(item.id).unwrap(), Some(sold));
    }

    #[test]
    fn test_mark_sold_twice_is_not_found() {
        let catalog = memory_catalog();
        let item = catalog.add_item("ring", "gold", 250.00).unwrap();

        assert!(catalog.mark_sold(item.id, 300.0).unwrap().is_some());
        let before = catalog.store().load().unwrap();

        assert!(catalog.mark_sold(item.id, 999.0).unwrap().is_none());
        assert_eq!(catalog.store().load().unwrap(), before);
    }

    #[test]
    fn test_mark_sold_unknown_id() {
        let catalog = demo_catalog();
        let before = catalog.store().load().unwrap();

        assert!(catalog.mark_sold(ItemId::new(42), 10.0).unwrap().is_none());
        assert_eq!(catalog.store().load().unwrap(), before);
    }

    #[test]
    fn test_update_unknown_id() {
        let catalog = demo_catalog();
        let before = catalog.store().load().unwrap();

        let update = ItemUpdate::new().category("platinum");
        assert!(catalog.update_item(ItemId::new(42), &update).unwrap().is_none());
        assert_eq!(catalog.store().load().unwrap(), before);
    }

    #[test]
    fn test_update_fields() {
        let catalog = demo_catalog();

        let update = ItemUpdate::new()
            .item_type("pendant")
            .category("platinum")
            .cost_price(199.999);
        let item = catalog.update_item(ItemId::new(1), &update).unwrap().unwrap();

        assert_eq!(item.id, ItemId::new(1));
        assert_eq!(item.item_type, "pendant");
        assert_eq!(item.category, "platinum");
        assert_eq!(item.cost_price, 200.0);
        assert_eq!(item.status, ItemStatus::Available);
        assert_eq!(catalog.get_item(ItemId::new(1)).unwrap(), Some(item));
    }

    #[test]
    fn test_update_corrects_sold_price() {
        let catalog = demo_catalog();

        let update = ItemUpdate::new().selling_price(Some(225.0));
        let item = catalog.update_item(ItemId::new(3), &update).unwrap().unwrap();
        assert_eq!(item.selling_price, Some(225.0));
        assert_eq!(catalog.profit_summary().unwrap().profit_per_item[0].profit, 45.0);
    }

    #[test]
    fn test_update_can_sell_with_price() {
        let catalog = demo_catalog();

        let update = ItemUpdate::new()
            .status(ItemStatus::Sold)
            .selling_price(Some(180.0));
        let item = catalog.update_item(ItemId::new(2), &update).unwrap().unwrap();
        assert!(item.is_sold());
        assert_eq!(item.selling_price, Some(180.0));
    }

    #[test]
    fn test_update_rejects_bad_status_changes() {
        let catalog = demo_catalog();
        let before = catalog.store().load().unwrap();

        // sold -> available
        let update = ItemUpdate::new()
            .status(ItemStatus::Available)
            .selling_price(None);
        let result = catalog.update_item(ItemId::new(3), &update);
        assert!(matches!(result, Err(CatalogError::InvalidTransition { .. })));

        // sold without price
        let update = ItemUpdate::new().status(ItemStatus::Sold);
        let result = catalog.update_item(ItemId::new(1), &update);
        assert!(matches!(result, Err(CatalogError::MissingSellingPrice(_))));

        // clearing the price of a sold item
        let update = ItemUpdate::new().selling_price(None);
        let result = catalog.update_item(ItemId::new(5), &update);
        assert!(matches!(result, Err(CatalogError::MissingSellingPrice(_))));

        // price on an available item
        let update = ItemUpdate::new().selling_price(Some(10.0));
        let result = catalog.update_item(ItemId::new(1), &update);
        assert!(matches!(result, Err(CatalogError::UnexpectedSellingPrice(_))));

        assert_eq!(catalog.store().load().unwrap(), before);
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let catalog = memory_catalog();
        catalog.add_item("ring", "gold", 1.0).unwrap();
        catalog.add_item("necklace", "silver", 2.0).unwrap();
        catalog.add_item("bracelet", "gold", 3.0).unwrap();

        let types: Vec<String> = catalog
            .list_inventory()
            .unwrap()
            .into_iter()
            .map(|item| item.item_type)
            .collect();
        assert_eq!(types, vec!["ring", "necklace", "bracelet"]);
    }

    #[test]
    fn test_sold_and_available_summary() {
        let catalog = memory_catalog();
        let bracelet = catalog.add_item("bracelet", "gold", 180.0).unwrap();
        catalog.add_item("ring", "silver", 80.0).unwrap();
        catalog.mark_sold(bracelet.id, 220.0).unwrap();

        let summary = catalog.profit_summary().unwrap();
        assert_eq!(summary.total_cost_all, 260.0);
        assert_eq!(summary.total_cost_sold, 180.0);
        assert_eq!(summary.total_revenue, 220.0);
        assert_eq!(summary.total_profit, 40.0);
        assert_eq!(summary.profit_per_item.len(), 1);
        assert_eq!(summary.profit_per_item[0].id, bracelet.id);
        assert_eq!(summary.profit_per_item[0].item_type, "bracelet");
        assert_eq!(summary.profit_per_item[0].profit, 40.0);
    }

    #[test]
    fn test_seed_only_when_empty() {
        let catalog = memory_catalog();
        assert!(catalog.seed_demo_inventory().unwrap());
        assert_eq!(catalog.list_inventory().unwrap().len(), 8);

        let next = catalog.add_item("ring", "gold", 10.0).unwrap();
        assert_eq!(next.id, ItemId::new(9));

        assert!(!catalog.seed_demo_inventory().unwrap());
        assert_eq!(catalog.list_inventory().unwrap().len(), 9);
    }

    #[test]
    fn test_concurrent_adds_on_file_store() {
        let temp = TempDir::new().unwrap();
        let store = Arc::new(JsonFileStore::open(temp.path()).unwrap());
        let catalog = Arc::new(Catalog::new(store));

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let catalog = catalog.clone();
                thread::spawn(move || {
                    for n in 0..5 {
                        catalog
                            .add_item(format!("piece-{}-{}", worker, n), "gold", 10.0)
                            .unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let items = catalog.list_inventory().unwrap();
        assert_eq!(items.len(), 20);

        let mut ids: Vec<u64> = items.iter().map(|item| item.id.get()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 20);
        assert_eq!(catalog.store().load().unwrap().next_id, ItemId::new(21));
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 64,
                ..ProptestConfig::default()
            })]

            /// Property: ids handed out by add_item strictly increase and
            /// next_id stays above all of them.
            #[test]
            fn add_item_ids_strictly_increase(
                costs in proptest::collection::vec(0.0f64..10_000.0, 1..30)
            ) {
                let catalog = memory_catalog();

                let mut previous: Option<ItemId> = None;
                for cost in &costs {
                    let item = catalog.add_item("ring", "gold", *cost).unwrap();
                    if let Some(previous) = previous {
                        prop_assert!(item.id > previous);
                    }
                    previous = Some(item.id);
                }

                let snapshot = catalog.store().load().unwrap();
                let max_id = snapshot.inventory.iter().map(|item| item.id).max().unwrap();
                prop_assert!(snapshot.next_id > max_id);
                prop_assert_eq!(snapshot.inventory.len(), costs.len());
            }

            /// Property: a sold item can never be sold again, and a failed
            /// sale leaves the snapshot unchanged.
            #[test]
            fn mark_sold_is_single_shot(price in 0.0f64..10_000.0, id in 1u64..12) {
                let catalog = demo_catalog();
                let item_id = ItemId::new(id);
                let was_available = catalog
                    .get_item(item_id)
                    .unwrap()
                    .is_some_and(|item| item.is_available());

                let before = catalog.store().load().unwrap();
                let first = catalog.mark_sold(item_id, price).unwrap();
                prop_assert_eq!(first.is_some(), was_available);
                if first.is_none() {
                    prop_assert_eq!(catalog.store().load().unwrap(), before.clone());
                }

                let after_first = catalog.store().load().unwrap();
                prop_assert!(catalog.mark_sold(item_id, price).unwrap().is_none());
                prop_assert_eq!(catalog.store().load().unwrap(), after_first);
            }
        }
    }
}
