//! # Terminal Rendering
//!
//! Plain-text tables and report blocks for stdout. Every renderer takes
//! report structs from `stockledger_core::report` and returns a `String`;
//! nothing here computes totals.

use stockledger_core::report::{Dashboard, RowView, Summary};
use stockledger_core::Product;

use crate::state::AppConfig;

const NO_PRODUCTS: &str = "No products registered.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

struct Column {
    header: &'static str,
    align: Align,
}

const fn col(header: &'static str, align: Align) -> Column {
    Column { header, align }
}

/// Aligned table with a dashed rule under the header.
fn render_table(columns: &[Column], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
                .max(column.header.len())
        })
        .collect();

    let format_row = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(columns.iter().zip(widths.iter()))
            .map(|(cell, (column, width))| {
                let pad = " ".repeat(width.saturating_sub(cell.chars().count()));
                match column.align {
                    Align::Left => format!("{}{}", cell, pad),
                    Align::Right => format!("{}{}", pad, cell),
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let header_line = format_row(columns.iter().map(|c| c.header).collect());
    let rule_width = widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 2;

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(header_line);
    lines.push("-".repeat(rule_width));
    for row in rows {
        lines.push(format_row(row.iter().map(String::as_str).collect()));
    }
    lines.join("\n")
}

// =============================================================================
// Product Table
// =============================================================================

/// The product listing: id, name, category, price, quantity, status.
pub fn product_table(rows: &[RowView], config: &AppConfig) -> String {
    if rows.is_empty() {
        return NO_PRODUCTS.to_string();
    }

    let columns = [
        col("ID", Align::Right),
        col("NAME", Align::Left),
        col("CATEGORY", Align::Left),
        col("PRICE", Align::Right),
        col("QUANTITY", Align::Right),
        col("STATUS", Align::Left),
    ];

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.id.to_string(),
                row.name.clone(),
                row.category.clone(),
                config.with_symbol(&row.formatted_price),
                row.quantity.to_string(),
                row.status.to_string(),
            ]
        })
        .collect();

    render_table(&columns, &cells)
}

/// Headline totals under the product listing.
pub fn summary_block(summary: &Summary, config: &AppConfig) -> String {
    format!(
        "SUMMARY\nTotal products: {}\nLow stock products: {}\nTotal stock value: {}",
        summary.count,
        summary.low_stock_count,
        config.format_money(summary.total_value),
    )
}

/// Full details of one product.
pub fn product_details(product: &Product, config: &AppConfig) -> String {
    let fields = [
        ("ID", product.id.to_string()),
        ("Name", product.name.clone()),
        ("Category", product.category.clone()),
        ("Unit price", config.format_money(product.unit_price)),
        ("Quantity", product.quantity.to_string()),
        ("Status", product.stock_status().to_string()),
        ("Stock value", config.format_money(product.stock_value())),
        (
            "Created",
            product.created_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        ),
    ];

    fields
        .iter()
        .map(|(label, value)| format!("{:<13}{}", format!("{}:", label), value))
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Dashboard
// =============================================================================

/// Text dashboard: category breakdown, top products, low stock, totals.
pub fn dashboard_block(dashboard: &Dashboard, top_n: usize, config: &AppConfig) -> String {
    if dashboard.summary.count == 0 {
        return NO_PRODUCTS.to_string();
    }

    let mut sections = Vec::with_capacity(4);

    let category_rows: Vec<Vec<String>> = dashboard
        .categories
        .iter()
        .map(|totals| {
            vec![
                totals.category.clone(),
                totals.item_count.to_string(),
                share_percent(totals.item_count, dashboard.summary.count),
                totals.quantity_sum.to_string(),
                config.format_money(totals.value_sum),
            ]
        })
        .collect();
    sections.push(format!(
        "BY CATEGORY\n{}",
        render_table(
            &[
                col("CATEGORY", Align::Left),
                col("ITEMS", Align::Right),
                col("SHARE", Align::Right),
                col("QUANTITY", Align::Right),
                col("VALUE", Align::Right),
            ],
            &category_rows,
        )
    ));

    let top_rows: Vec<Vec<String>> = dashboard
        .top
        .iter()
        .map(|p| vec![p.id.to_string(), p.name.clone(), p.quantity.to_string()])
        .collect();
    sections.push(format!(
        "TOP {} BY QUANTITY\n{}",
        top_n,
        render_table(
            &[
                col("ID", Align::Right),
                col("NAME", Align::Left),
                col("QUANTITY", Align::Right),
            ],
            &top_rows,
        )
    ));

    let low_section = if dashboard.low_stock.is_empty() {
        "Stock OK".to_string()
    } else {
        let low_rows: Vec<Vec<String>> = dashboard
            .low_stock
            .iter()
            .map(|p| vec![p.id.to_string(), p.name.clone(), p.quantity.to_string()])
            .collect();
        render_table(
            &[
                col("ID", Align::Right),
                col("NAME", Align::Left),
                col("QUANTITY", Align::Right),
            ],
            &low_rows,
        )
    };
    sections.push(format!(
        "LOW STOCK (< {})\n{}",
        stockledger_core::LOW_STOCK_THRESHOLD,
        low_section
    ));

    sections.push(format!(
        "SUMMARY\nProducts: {} | Categories: {}\nTotal value: {} | Low stock: {}",
        dashboard.summary.count,
        dashboard.category_count,
        config.format_money(dashboard.summary.total_value),
        dashboard.summary.low_stock_count,
    ));

    sections.join("\n\n")
}

/// `part / whole` as a percentage with one decimal, e.g. `"33.3%"`.
fn share_percent(part: usize, whole: usize) -> String {
    if whole == 0 {
        return "0.0%".to_string();
    }
    let permille = (part as u128 * 1000 + whole as u128 / 2) / whole as u128;
    format!("{}.{}%", permille / 10, permille % 10)
}
