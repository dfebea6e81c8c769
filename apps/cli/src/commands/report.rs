//! # Report Commands
//!
//! Read-only views over the catalog: `list`, `summary`, `dashboard` and
//! `export`. All of them hand `state.products()` to
//! `stockledger_core::report` and only format the result.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use stockledger_core::report::{self, Dashboard, RowView, Summary};

use super::product::ProductDto;
use super::{emit, OutputFormat};
use crate::error::CliResult;
use crate::render;
use crate::state::{AppConfig, InventoryState};

/// `list --json` payload.
#[derive(Debug, Serialize)]
pub struct Listing {
    pub rows: Vec<RowView>,
    pub summary: Summary,
}

/// Full snapshot written by `export`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub generated_at: DateTime<Utc>,
    pub currency_symbol: String,
    pub last_assigned_id: i64,
    pub products: Vec<ProductDto>,
    pub dashboard: Dashboard,
}

/// `list`: product table followed by the summary block.
pub fn list<W: Write>(
    state: &InventoryState,
    config: &AppConfig,
    format: OutputFormat,
    out: &mut W,
) -> CliResult<()> {
    let listing = Listing {
        rows: report::row_view(state.products()),
        summary: report::summary(state.products()),
    };

    emit(out, format, &listing, || {
        if listing.rows.is_empty() {
            return render::product_table(&listing.rows, config);
        }
        format!(
            "{}\n\n{}",
            render::product_table(&listing.rows, config),
            render::summary_block(&listing.summary, config)
        )
    })
}

/// `summary`: headline totals only.
pub fn summary<W: Write>(
    state: &InventoryState,
    config: &AppConfig,
    format: OutputFormat,
    out: &mut W,
) -> CliResult<()> {
    let totals = report::summary(state.products());
    emit(out, format, &totals, || render::summary_block(&totals, config))
}

/// `dashboard`: category breakdown, top products, low stock.
///
/// `top` overrides the configured ranking length.
pub fn dashboard<W: Write>(
    state: &InventoryState,
    config: &AppConfig,
    top: Option<usize>,
    format: OutputFormat,
    out: &mut W,
) -> CliResult<()> {
    let top_n = top.unwrap_or(config.top_limit);
    let board = report::dashboard(state.products(), top_n);

    emit(out, format, &board, || {
        render::dashboard_block(&board, top_n, config)
    })
}

/// `export`: the whole catalog plus its dashboard as one JSON document.
pub fn export<W: Write>(state: &InventoryState, config: &AppConfig, out: &mut W) -> CliResult<()> {
    let document = ExportDocument {
        generated_at: Utc::now(),
        currency_symbol: config.currency_symbol.clone(),
        last_assigned_id: state.catalog().last_assigned_id(),
        products: state.products().iter().map(ProductDto::from).collect(),
        dashboard: report::dashboard(state.products(), config.top_limit),
    };

    emit(out, OutputFormat::Json, &document, String::new)
}
