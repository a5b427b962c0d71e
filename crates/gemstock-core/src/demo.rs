//! Demo inventory for a fresh shop

use gemstock_api::{InventorySnapshot, Item, ItemStatus};
use gemstock_util::ItemId;

/// (type, category, cost, selling price) for each demo piece, in id order.
/// A selling price marks the piece as sold.
const DEMO_ITEMS: &[(&str, &str, f64, Option<f64>)] = &[
    ("ring", "gold", 250.00, None),
    ("necklace", "silver", 150.00, None),
    ("bracelet", "gold", 180.00, Some(220.00)),
    ("ring", "silver", 80.00, None),
    ("necklace", "gold", 320.00, Some(400.00)),
    ("bracelet", "silver", 95.00, None),
    ("ring", "gold", 280.00, Some(350.00)),
    ("necklace", "silver", 120.00, None),
];

/// Snapshot holding the demo pieces, ids 1 through 8
pub fn demo_inventory() -> InventorySnapshot {
    let inventory: Vec<Item> = DEMO_ITEMS
        .iter()
        .zip(ItemId::FIRST.get()..)
        .map(|(&(item_type, category, cost_price, selling_price), id)| Item {
            id: ItemId::new(id),
            item_type: item_type.to_string(),
            category: category.to_string(),
            cost_price,
            selling_price,
            status: match selling_price {
                Some(_) => ItemStatus::Sold,
                None => ItemStatus::Available,
            },
        })
        .collect();

    let next_id = ItemId::new(ItemId::FIRST.get() + inventory.len() as u64);
    InventorySnapshot { inventory, next_id }
}
