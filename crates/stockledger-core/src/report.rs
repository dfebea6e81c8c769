//! # Report Engine
//!
//! Pure functions that derive display and summary facts from a product
//! snapshot. Nothing here mutates, allocates ids, or fails.
//!
//! ## Consumers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Computation, Many Renderers                      │
//! │                                                                         │
//! │  catalog.list_all() ──► &[Product] (snapshot)                          │
//! │                              │                                          │
//! │          ┌───────────────────┼───────────────────┐                      │
//! │          ▼                   ▼                   ▼                      │
//! │     row_view()          summary()          dashboard()                  │
//! │          │                   │                   │                      │
//! │          ▼                   ▼                   ▼                      │
//! │    product table       totals footer     dashboard / JSON export       │
//! │                                                                         │
//! │  Renderers format these structs; they never re-add prices or           │
//! │  recount low stock on their own.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use serde::Serialize;

use crate::money::Money;
use crate::types::{Product, ProductId, StockStatus};

// =============================================================================
// Row View
// =============================================================================

/// One display row of the product table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    /// Unit price with exactly two decimals, e.g. `"10.00"`.
    pub formatted_price: String,
    pub quantity: i64,
    pub status: StockStatus,
}

/// Builds table rows in input order. Empty input gives an empty table.
pub fn row_view(products: &[Product]) -> Vec<RowView> {
    products
        .iter()
        .map(|p| RowView {
            id: p.id,
            name: p.name.clone(),
            category: p.category.clone(),
            formatted_price: p.unit_price.to_string(),
            quantity: p.quantity,
            status: p.stock_status(),
        })
        .collect()
}

// =============================================================================
// Summary
// =============================================================================

/// Headline totals for a snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Number of products.
    pub count: usize,
    /// Products with quantity below the low-stock threshold.
    pub low_stock_count: usize,
    /// Σ unit_price × quantity.
    pub total_value: Money,
}

/// Computes count, low-stock count and total valuation.
///
/// Cents are summed as integers, so the total does not depend on the order
/// of `products`.
pub fn summary(products: &[Product]) -> Summary {
    Summary {
        count: products.len(),
        low_stock_count: products.iter().filter(|p| p.is_low_stock()).count(),
        total_value: products.iter().map(Product::stock_value).sum(),
    }
}

// =============================================================================
// Category Breakdown
// =============================================================================

/// Aggregates for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotals {
    pub category: String,
    pub item_count: usize,
    pub quantity_sum: i64,
    pub value_sum: Money,
}

/// Per-category aggregates, ordered by first appearance in the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryBreakdown(Vec<CategoryTotals>);

impl CategoryBreakdown {
    /// Totals for an exact category name.
    pub fn get(&self, category: &str) -> Option<&CategoryTotals> {
        self.0.iter().find(|c| c.category == category)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CategoryTotals> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a CategoryBreakdown {
    type Item = &'a CategoryTotals;
    type IntoIter = std::slice::Iter<'a, CategoryTotals>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Groups products by exact category string.
///
/// `"Tools"` and `"tools"` are different categories; no category is dropped.
pub fn group_by_category(products: &[Product]) -> CategoryBreakdown {
    let mut groups: Vec<CategoryTotals> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for product in products {
        let slot = *index.entry(product.category.as_str()).or_insert_with(|| {
            groups.push(CategoryTotals {
                category: product.category.clone(),
                item_count: 0,
                quantity_sum: 0,
                value_sum: Money::zero(),
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.item_count += 1;
        group.quantity_sum = group.quantity_sum.saturating_add(product.quantity);
        group.value_sum += product.stock_value();
    }

    CategoryBreakdown(groups)
}

// =============================================================================
// Rankings
// =============================================================================

/// The `n` products with the highest quantity.
///
/// Sorted by quantity descending, ties by ascending id. Returns everything
/// when fewer than `n` products exist and nothing when `n` is 0.
pub fn top_by_quantity(products: &[Product], n: usize) -> Vec<Product> {
    if n == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<&Product> = products.iter().collect();
    ranked.sort_by(|a, b| b.quantity.cmp(&a.quantity).then(a.id.cmp(&b.id)));

    ranked.into_iter().take(n).cloned().collect()
}

/// Products below the low-stock threshold, in snapshot order.
pub fn low_stock(products: &[Product]) -> Vec<Product> {
    products.iter().filter(|p| p.is_low_stock()).cloned().collect()
}

// =============================================================================
// Dashboard
// =============================================================================

/// Everything the dashboard and the export draw, computed in one pass over
/// the same snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub summary: Summary,
    /// Number of distinct categories.
    pub category_count: usize,
    /// Item count, quantity and value per category.
    pub categories: CategoryBreakdown,
    /// Highest-quantity products.
    pub top: Vec<Product>,
    /// Products below the low-stock threshold.
    pub low_stock: Vec<Product>,
}

/// Builds the dashboard for a snapshot.
pub fn dashboard(products: &[Product], top_n: usize) -> Dashboard {
    let categories = group_by_category(products);

    Dashboard {
        summary: summary(products),
        category_count: categories.len(),
        categories,
        top: top_by_quantity(products, top_n),
        low_stock: low_stock(products),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
