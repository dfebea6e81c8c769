//! # stockledger-core: Pure Inventory Logic for StockLedger
//!
//! This crate is the **heart** of StockLedger. It owns the product
//! catalog and the report engine as plain Rust with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      StockLedger Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Operator CLI (apps/cli)                      │   │
//! │  │    menu ──► add / remove ──► list / summary / dashboard        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ stockledger-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  catalog  │  │  report   │  │ validation│  │   │
//! │  │   │  Product  │  │  create   │  │  summary  │  │  parsing  │  │   │
//! │  │   │   Money   │  │  delete   │  │  groups   │  │  ranges   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO TERMINAL • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                stockledger-db (Database Layer)                  │   │
//! │  │              SQLite queries, migrations, repository             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, ProductId, StockStatus
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Create-input parsing and range checks
//! - [`catalog`] - The owned, creation-ordered product collection
//! - [`report`] - Row views, totals, category breakdown, rankings
//!
//! ## Example Usage
//!
//! ```rust
//! use stockledger_core::catalog::ProductCatalog;
//! use stockledger_core::report;
//!
//! let mut catalog = ProductCatalog::new();
//! catalog.create("Widget", "Tools", "10.00", "3").unwrap();
//! catalog.create("Gadget", "Tools", "5.50", "20").unwrap();
//!
//! let totals = report::summary(catalog.list_all());
//! assert_eq!(totals.count, 2);
//! assert_eq!(totals.low_stock_count, 1);
//! assert_eq!(totals.total_value.to_string(), "140.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::ProductCatalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Quantities strictly below this are "low stock".
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Longest accepted product name, in characters.
pub const MAX_NAME_LEN: usize = 200;

/// Longest accepted category, in characters.
pub const MAX_CATEGORY_LEN: usize = 100;

/// Highest accepted unit price in cents (10,000,000.00).
///
/// Together with [`MAX_QUANTITY`] this keeps a single product's stock value
/// below 10^15 cents, far from i64 overflow even when thousands of products
/// are summed.
pub const MAX_UNIT_PRICE_CENTS: i64 = 1_000_000_000;

/// Highest accepted stock quantity.
pub const MAX_QUANTITY: i64 = 1_000_000;
