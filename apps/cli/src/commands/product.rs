//! # Product Commands
//!
//! Adding, removing and inspecting single products.
//!
//! ## Remove Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    stockledger remove 7                                 │
//! │                                                                         │
//! │  state.get(7) ──► NotFound? ──► error, exit 3                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  --yes given? ── no ──► "Remove 'Widget' (id 7)? (y/n): "              │
//! │       │                       │                                         │
//! │      yes                 y ◄──┴──► anything else: "Removal cancelled." │
//! │       │                  │                                              │
//! │       ▼                  ▼                                              │
//! │  state.delete(7) ──► "Product 'Widget' removed."                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{BufRead, Write};
use stockledger_core::{Product, ProductId, StockStatus};
use tracing::debug;

use super::{confirm, emit, OutputFormat};
use crate::error::CliResult;
use crate::render;
use crate::state::{AppConfig, InventoryState};

/// Product as printed by `--json` output and `export`.
///
/// Money fields are decimal strings so the JSON matches what the table
/// shows; `unitPriceCents` carries the exact stored amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub unit_price: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
    pub status: StockStatus,
    pub stock_value: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Product> for ProductDto {
    fn from(p: &Product) -> Self {
        ProductDto {
            id: p.id.get(),
            name: p.name.clone(),
            category: p.category.clone(),
            unit_price: p.unit_price.to_string(),
            unit_price_cents: p.unit_price.cents(),
            quantity: p.quantity,
            status: p.stock_status(),
            stock_value: p.stock_value().to_string(),
            created_at: p.created_at,
        }
    }
}

/// `add`: creates one product from raw operator text.
pub async fn add<W: Write>(
    state: &mut InventoryState,
    name: &str,
    category: &str,
    unit_price: &str,
    quantity: &str,
    format: OutputFormat,
    out: &mut W,
) -> CliResult<()> {
    debug!(name, category, unit_price, quantity, "add");

    let product = state.create(name, category, unit_price, quantity).await?;

    emit(out, format, &ProductDto::from(&product), || {
        format!("Product '{}' added with id {}.", product.name, product.id)
    })
}

/// `remove --json` payload. `removed` is false when the operator declined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovalDto {
    pub removed: bool,
    pub product: ProductDto,
}

/// `remove`: deletes one product, asking first unless `yes` is set.
///
/// With JSON output the question goes to stderr, so stdout carries only
/// the JSON document.
pub async fn remove<R: BufRead, W: Write>(
    state: &mut InventoryState,
    id: i64,
    yes: bool,
    format: OutputFormat,
    input: &mut R,
    out: &mut W,
) -> CliResult<()> {
    let id = ProductId::new(id);
    let product = ProductDto::from(state.get(id)?);

    let question = format!("Remove '{}' (id {})?", product.name, id);
    let confirmed = yes
        || match format {
            OutputFormat::Json => confirm(input, &mut std::io::stderr().lock(), &question)?,
            OutputFormat::Table => confirm(input, out, &question)?,
        };

    if !confirmed {
        debug!(%id, "removal declined");
        let outcome = RemovalDto {
            removed: false,
            product,
        };
        return emit(out, format, &outcome, || "Removal cancelled.".to_string());
    }

    let removed = state.delete(id).await?;
    let outcome = RemovalDto {
        removed: true,
        product: ProductDto::from(&removed),
    };

    emit(out, format, &outcome, || {
        format!("Product '{}' removed.", removed.name)
    })
}

/// `show`: prints one product in full.
pub fn show<W: Write>(
    state: &InventoryState,
    config: &AppConfig,
    id: i64,
    format: OutputFormat,
    out: &mut W,
) -> CliResult<()> {
    let product = state.get(ProductId::new(id))?;

    emit(out, format, &ProductDto::from(product), || {
        render::product_details(product, config)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::io::Cursor;
    use std::path::PathBuf;
    use stockledger_db::{Database, DbConfig};

    async fn open_state() -> InventoryState {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        InventoryState::open(&db).await.unwrap()
    }

    fn config() -> AppConfig {
        AppConfig {
            db_path: PathBuf::from(":memory:"),
            currency_symbol: "R$".to_string(),
            top_limit: 10,
        }
    }

    fn text(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_add_table_and_json() {
        let mut state = open_state().await;

        let mut out = Vec::new();
        add(&mut state, "Widget", "Tools", "10.00", "3", OutputFormat::Table, &mut out)
            .await
            .unwrap();
        assert_eq!(text(out), "Product 'Widget' added with id 1.\n");

        let mut out = Vec::new();
        add(&mut state, "Gadget", "Tools", "5.5", "20", OutputFormat::Json, &mut out)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["id"], 2);
        assert_eq!(json["unitPrice"], "5.50");
        assert_eq!(json["unitPriceCents"], 550);
        assert_eq!(json["status"], "OK");
        assert_eq!(json["stockValue"], "110.00");
    }

    #[tokio::test]
    async fn test_add_invalid() {
        let mut state = open_state().await;
        let mut out = Vec::new();

        let err = add(&mut state, "Widget", "Tools", "abc", "3", OutputFormat::Table, &mut out)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert!(out.is_empty());
        assert!(state.products().is_empty());
    }

    #[tokio::test]
    async fn test_remove_confirmed_and_cancelled() {
        let mut state = open_state().await;
        state.create("Widget", "Tools", "1.00", "1").await.unwrap();

        let mut out = Vec::new();
        remove(&mut state, 1, false, OutputFormat::Table, &mut Cursor::new("n\n"), &mut out)
            .await
            .unwrap();
        assert_eq!(
            text(out),
            "Remove 'Widget' (id 1)? (y/n): Removal cancelled.\n"
        );
        assert_eq!(state.products().len(), 1);

        let mut out = Vec::new();
        remove(&mut state, 1, false, OutputFormat::Table, &mut Cursor::new("y\n"), &mut out)
            .await
            .unwrap();
        assert!(text(out).ends_with("Product 'Widget' removed.\n"));
        assert!(state.products().is_empty());
    }

    #[tokio::test]
    async fn test_remove_with_yes_skips_prompt() {
        let mut state = open_state().await;
        state.create("Widget", "Tools", "1.00", "1").await.unwrap();

        let mut out = Vec::new();
        remove(&mut state, 1, true, OutputFormat::Table, &mut Cursor::new(""), &mut out)
            .await
            .unwrap();
        assert_eq!(text(out), "Product 'Widget' removed.\n");
    }

    #[tokio::test]
    async fn test_remove_json_keeps_stdout_json() {
        let mut state = open_state().await;
        state.create("Widget", "Tools", "1.00", "1").await.unwrap();

        let mut out = Vec::new();
        remove(&mut state, 1, false, OutputFormat::Json, &mut Cursor::new("n\n"), &mut out)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["removed"], false);
        assert_eq!(json["product"]["name"], "Widget");
        assert_eq!(state.products().len(), 1);

        let mut out = Vec::new();
        remove(&mut state, 1, false, OutputFormat::Json, &mut Cursor::new("y\n"), &mut out)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["removed"], true);
        assert_eq!(json["product"]["id"], 1);
        assert!(state.products().is_empty());
    }

    #[tokio::test]
    async fn test_remove_unknown() {
        let mut state = open_state().await;
        state.create("Widget", "Tools", "1.00", "1").await.unwrap();

        let mut out = Vec::new();
        let err = remove(&mut state, 999, true, OutputFormat::Table, &mut Cursor::new(""), &mut out)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(state.products().len(), 1);
    }

    #[tokio::test]
    async fn test_show() {
        let mut state = open_state().await;
        state.create("Widget", "Tools", "10.00", "3").await.unwrap();

        let mut out = Vec::new();
        show(&state, &config(), 1, OutputFormat::Table, &mut out).unwrap();
        let shown = text(out);
        assert!(shown.contains("Name:        Widget"));
        assert!(shown.contains("Stock value: R$ 30.00"));
        assert!(shown.contains("Status:      LOW"));
    }
}
