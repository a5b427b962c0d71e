//! Inventory types

use gemstock_util::ItemId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sale status of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Available,
    Sold,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Available => "available",
            ItemStatus::Sold => "sold",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available" => Ok(ItemStatus::Available),
            "sold" => Ok(ItemStatus::Sold),
            other => Err(format!("Unknown item status: {}", other)),
        }
    }
}

/// One jewelry piece
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,

    /// Kind of piece ("ring", "necklace", ...)
    #[serde(rename = "type")]
    pub item_type: String,

    /// Material or line ("gold", "silver", ...)
    pub category: String,

    pub cost_price: f64,

    /// Present once the item has been sold
    #[serde(default)]
    pub selling_price: Option<f64>,

    pub status: ItemStatus,
}

impl Item {
    pub fn is_available(&self) -> bool {
        self.status == ItemStatus::Available
    }

    pub fn is_sold(&self) -> bool {
        self.status == ItemStatus::Sold
    }

    /// Selling price minus cost, for sold items with a recorded price
    pub fn profit(&self) -> Option<f64> {
        if !self.is_sold() {
            return None;
        }
        self.selling_price.map(|price| price - self.cost_price)
    }
}

/// The whole persisted inventory state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    /// Items in insertion order
    pub inventory: Vec<Item>,

    /// Id for the next created item. Always greater than any id ever assigned.
    pub next_id: ItemId,
}

impl Default for InventorySnapshot {
    fn default() -> Self {
        Self {
            inventory: Vec::new(),
            next_id: ItemId::FIRST,
        }
    }
}

impl InventorySnapshot {
    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty()
    }

    /// First item with the given id
    pub fn find(&self, id: ItemId) -> Option<&Item> {
        self.inventory.iter().find(|item| item.id == id)
    }

    /// First item with the given id, mutably
    pub fn find_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.inventory.iter_mut().find(|item| item.id == id)
    }

    /// Take the next id and advance the counter.
    ///
    /// Returns `None` once the counter cannot move past the id it would
    /// hand out. The snapshot is left unchanged in that case.
    pub fn allocate_id(&mut self) -> Option<ItemId> {
        let id = self.next_id;
        self.next_id = id.checked_next()?;
        Some(id)
    }

    /// Raise `next_id` above the largest id present, if a hand-edited
    /// document left it too low.
    pub fn ensure_next_id(&mut self) -> NextIdCheck {
        let Some(max_id) = self.inventory.iter().map(|item| item.id).max() else {
            return NextIdCheck::Consistent;
        };
        if self.next_id > max_id {
            return NextIdCheck::Consistent;
        }
        match max_id.checked_next() {
            Some(next_id) => {
                self.next_id = next_id;
                NextIdCheck::Raised
            }
            None => NextIdCheck::Exhausted,
        }
    }
}

/// Result of `InventorySnapshot::ensure_next_id`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextIdCheck {
    /// `next_id` was already above every id
    Consistent,
    /// `next_id` was moved to one past the largest id
    Raised,
    /// The largest id is `u64::MAX`, so no valid `next_id` exists
    Exhausted,
}

/// Partial update of an item's mutable fields.
///
/// Fields left as `None` are not touched. `selling_price` is doubly optional:
/// `Some(None)` clears the price, `Some(Some(p))` sets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemUpdate {
    pub item_type: Option<String>,
    pub category: Option<String>,
    pub cost_price: Option<f64>,
    pub selling_price: Option<Option<f64>>,
    pub status: Option<ItemStatus>,
}

impl ItemUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item_type(mut self, item_type: impl Into<String>) -> Self {
        self.item_type = Some(item_type.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn cost_price(mut self, cost_price: f64) -> Self {
        self.cost_price = Some(cost_price);
        self
    }

    pub fn selling_price(mut self, selling_price: Option<f64>) -> Self {
        self.selling_price = Some(selling_price);
        self
    }

    pub fn status(mut self, status: ItemStatus) -> Self {
        self.status = Some(status);
        self
    }
}
