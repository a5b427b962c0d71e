//! Summary views computed from a snapshot

use gemstock_util::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Profit on a single sold item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemProfit {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub item_type: String,
    pub profit: f64,
}

/// Cost, revenue and profit totals over the whole inventory.
///
/// All amounts are rounded to two fractional digits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfitSummary {
    pub total_cost_all: f64,
    pub total_cost_available: f64,
    pub total_cost_sold: f64,
    pub total_revenue: f64,
    pub total_profit: f64,
    pub profit_per_item: Vec<ItemProfit>,
}

/// Available/sold counts for one group of items
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub available: usize,
    pub sold: usize,
}

/// Stock overview: how many items there are and how they break down
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventorySummary {
    pub total_items: usize,
    pub counts: StatusCounts,

    /// Cost value of items still on hand
    pub stock_value: f64,

    /// Counts keyed by item type, sorted by key
    pub by_type: BTreeMap<String, StatusCounts>,

    /// Counts keyed by category, sorted by key
    pub by_category: BTreeMap<String, StatusCounts>,
}
