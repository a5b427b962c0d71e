//! Text rendering for command output

use gemstock_api::{InventorySummary, Item, ProfitSummary, StatusCounts};
use gemstock_config::Settings;
use std::collections::BTreeMap;
use std::fmt::Write;

/// One line per item, preceded by a header
pub fn item_table(items: &[Item], settings: &Settings) -> String {
    if items.is_empty() {
        return "Inventory is empty\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4}  {:<12} {:<12} {:>12} {:>12}  {}",
        "ID", "TYPE", "CATEGORY", "COST", "SOLD FOR", "STATUS"
    );
    for item in items {
        out.push_str(&item_line(item, settings));
        out.push('\n');
    }
    out
}

/// A single item as one table row
pub fn item_line(item: &Item, settings: &Settings) -> String {
    let selling = item
        .selling_price
        .map(|price| settings.format_amount(price))
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{:>4}  {:<12} {:<12} {:>12} {:>12}  {}",
        item.id,
        item.item_type,
        item.category,
        settings.format_amount(item.cost_price),
        selling,
        item.status
    )
}

pub fn profit_report(summary: &ProfitSummary, settings: &Settings) -> String {
    let mut out = String::new();
    let amount = |value: f64| settings.format_amount(value);

    let _ = writeln!(out, "Total cost (all items):   {:>12}", amount(summary.total_cost_all));
    let _ = writeln!(out, "Total cost (available):   {:>12}", amount(summary.total_cost_available));
    let _ = writeln!(out, "Total cost (sold):        {:>12}", amount(summary.total_cost_sold));
    let _ = writeln!(out, "Total revenue:            {:>12}", amount(summary.total_revenue));
    let _ = writeln!(out, "Total profit:             {:>12}", amount(summary.total_profit));

    if !summary.profit_per_item.is_empty() {
        out.push('\n');
        let _ = writeln!(out, "Profit per sold item:");
        for entry in &summary.profit_per_item {
            let _ = writeln!(
                out,
                "{:>4}  {:<12} {:>12}",
                entry.id,
                entry.item_type,
                amount(entry.profit)
            );
        }
    }
    out
}

pub fn inventory_report(summary: &InventorySummary, settings: &Settings) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Items: {} ({} available, {} sold)",
        summary.total_items, summary.counts.available, summary.counts.sold
    );
    let _ = writeln!(out, "Stock value: {}", settings.format_amount(summary.stock_value));

    group_section(&mut out, "By type", &summary.by_type);
    group_section(&mut out, "By category", &summary.by_category);
    out
}

fn group_section(out: &mut String, title: &str, groups: &BTreeMap<String, StatusCounts>) {
    if groups.is_empty() {
        return;
    }
    out.push('\n');
    let _ = writeln!(out, "{}:", title);
    for (name, counts) in groups {
        let _ = writeln!(
            out,
            "  {:<12} {:>4} available {:>4} sold",
            name, counts.available, counts.sold
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gemstock_api::ItemStatus;
    use gemstock_util::ItemId;

    #[test]
    fn empty_table() {
        assert_eq!(item_table(&[], &Settings::default()), "Inventory is empty\n");
    }

    #[test]
    fn item_line_shows_dash_for_unsold() {
        let item = Item {
            id: ItemId::new(7),
            item_type: "ring".into(),
            category: "gold".into(),
            cost_price: 280.0,
            selling_price: None,
            status: ItemStatus::Available,
        };

        let line = item_line(&item, &Settings::default());
        assert!(line.contains("$280.00"));
        assert!(line.contains(" - "));
        assert!(line.ends_with("available"));
    }

    #[test]
    fn profit_report_lists_items() {
        let summary = ProfitSummary {
            total_profit: 40.0,
            profit_per_item: vec![gemstock_api::ItemProfit {
                id: ItemId::new(3),
                item_type: "bracelet".into(),
                profit: 40.0,
            }],
            ..ProfitSummary::default()
        };

        let report = profit_report(&summary, &Settings::default());
        assert!(report.contains("Total profit:"));
        assert!(report.contains("bracelet"));
        assert!(report.contains("$40.00"));
    }
}
