//! # Domain Types
//!
//! Core domain types used throughout StockLedger.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │   ProductId     │   │  StockStatus    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  i64, assigned  │   │  Low  (< 5)     │       │
//! │  │  name           │   │  by the catalog │   │  Ok   (>= 5)    │       │
//! │  │  category       │   │  never reused   │   └─────────────────┘       │
//! │  │  unit_price     │   └─────────────────┘                              │
//! │  │  quantity       │                                                    │
//! │  │  created_at     │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are only ever built by the catalog (or restored from storage),
//! so every `Product` in circulation already satisfies the field rules in
//! [`crate::validation`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;
use crate::LOW_STOCK_THRESHOLD;

// =============================================================================
// Product Id
// =============================================================================

/// Integer product identifier.
///
/// Assigned monotonically by [`crate::catalog::ProductCatalog`]; an id is
/// never handed to a second product, even after the first is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(transparent))]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    #[inline]
    pub const fn new(id: i64) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        ProductId(id)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A single inventory record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog-assigned identifier, immutable.
    pub id: ProductId,

    /// Display name (non-empty, trimmed).
    pub name: String,

    /// Free-form category; grouping compares it byte for byte.
    pub category: String,

    /// Price of one unit (non-negative).
    pub unit_price: Money,

    /// Units on hand (non-negative).
    pub quantity: i64,

    /// When the product was created, immutable.
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Value of the stock on hand: `unit_price * quantity`.
    #[inline]
    pub fn stock_value(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Whether quantity is strictly below [`LOW_STOCK_THRESHOLD`].
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.quantity < LOW_STOCK_THRESHOLD
    }

    /// Stock status flag shown next to the product.
    #[inline]
    pub fn stock_status(&self) -> StockStatus {
        StockStatus::for_quantity(self.quantity)
    }
}

// =============================================================================
// Stock Status
// =============================================================================

/// Low-stock flag derived from quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StockStatus {
    /// Quantity is below the threshold.
    Low,
    /// Quantity is at or above the threshold.
    Ok,
}

impl StockStatus {
    /// Classifies a quantity: `4` is `Low`, `5` is `Ok`.
    #[inline]
    pub fn for_quantity(quantity: i64) -> Self {
        if quantity < LOW_STOCK_THRESHOLD {
            StockStatus::Low
        } else {
            StockStatus::Ok
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Low => "LOW",
            StockStatus::Ok => "OK",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(quantity: i64, price_cents: i64) -> Product {
        Product {
            id: ProductId::new(1),
            name: "Widget".to_string(),
            category: "Tools".to_string(),
            unit_price: Money::from_cents(price_cents),
            quantity,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_stock_status_boundary() {
        assert_eq!(StockStatus::for_quantity(0), StockStatus::Low);
        assert_eq!(StockStatus::for_quantity(4), StockStatus::Low);
        assert_eq!(StockStatus::for_quantity(5), StockStatus::Ok);
        assert_eq!(StockStatus::for_quantity(100), StockStatus::Ok);
    }

    #[test]
    fn test_stock_status_text() {
        assert_eq!(StockStatus::Low.to_string(), "LOW");
        assert_eq!(StockStatus::Ok.to_string(), "OK");
        assert_eq!(serde_json::to_string(&StockStatus::Low).unwrap(), "\"LOW\"");
    }

    #[test]
    fn test_stock_value() {
        assert_eq!(product(3, 1000).stock_value().cents(), 3000);
        assert_eq!(product(0, 1000).stock_value().cents(), 0);
    }

    #[test]
    fn test_is_low_stock() {
        assert!(product(4, 100).is_low_stock());
        assert!(!product(5, 100).is_low_stock());
    }

    #[test]
    fn test_product_id_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&ProductId::new(7)).unwrap(), "7");
        assert_eq!(ProductId::from(7).get(), 7);
    }
}
