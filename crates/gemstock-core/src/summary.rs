//! Profit and stock aggregation

use gemstock_api::{InventorySnapshot, InventorySummary, ItemProfit, ProfitSummary};
use gemstock_util::{round_cents, sum_cents};

/// Compute cost, revenue and profit totals.
///
/// Sold items without a selling price still count toward `total_cost_sold`
/// but contribute nothing to revenue or `profit_per_item`.
pub fn profit_summary(snapshot: &InventorySnapshot) -> ProfitSummary {
    let items = &snapshot.inventory;

    let total_cost_all = sum_cents(items.iter().map(|item| item.cost_price));
    let total_cost_available = sum_cents(
        items
            .iter()
            .filter(|item| item.is_available())
            .map(|item| item.cost_price),
    );
    let total_cost_sold = sum_cents(
        items
            .iter()
            .filter(|item| item.is_sold())
            .map(|item| item.cost_price),
    );
    let total_revenue = sum_cents(
        items
            .iter()
            .filter(|item| item.is_sold())
            .filter_map(|item| item.selling_price),
    );

    let profit_per_item = items
        .iter()
        .filter_map(|item| {
            item.profit().map(|profit| ItemProfit {
                id: item.id,
                item_type: item.item_type.clone(),
                profit: round_cents(profit),
            })
        })
        .collect();

    ProfitSummary {
        total_cost_all,
        total_cost_available,
        total_cost_sold,
        total_revenue,
        total_profit: round_cents(total_revenue - total_cost_sold),
        profit_per_item,
    }
}

/// Count items by status, type and category
pub fn inventory_summary(snapshot: &InventorySnapshot) -> InventorySummary {
    let mut summary = InventorySummary::default();

    for item in &snapshot.inventory {
        summary.total_items += 1;

        let by_type = summary.by_type.entry(item.item_type.clone()).or_default();
        let by_category = summary.by_category.entry(item.category.clone()).or_default();

        if item.is_sold() {
            summary.counts.sold += 1;
            by_type.sold += 1;
            by_category.sold += 1;
        } else {
            summary.counts.available += 1;
            by_type.available += 1;
            by_category.available += 1;
        }
    }

    summary.stock_value = sum_cents(
        snapshot
            .inventory
            .iter()
            .filter(|item| item.is_available())
            .map(|item| item.cost_price),
    );
    summary
}
