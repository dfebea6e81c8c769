//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Write-through insert and delete
//! - Snapshot load into a [`ProductCatalog`]
//! - Id high-water mark lookup
//!
//! ## Id High-Water Mark
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Where The Next Id Comes From                            │
//! │                                                                         │
//! │  products table              sqlite_sequence                           │
//! │  ┌────┬─────────┐            ┌──────────┬─────┐                        │
//! │  │ 1  │ Widget  │            │ products │  3  │ ← highest id ever      │
//! │  │ 3  │ Gizmo   │            └──────────┴─────┘                        │
//! │  └────┴─────────┘                                                       │
//! │       (2 deleted)                                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  load_catalog() ──► ProductCatalog::restore(rows, 3)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  next create gets id 4, never 2 and never 3                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use stockledger_core::{Money, Product, ProductCatalog, ProductId};

/// Raw `products` row as stored.
#[derive(Debug, Clone, sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    category: String,
    price_cents: i64,
    quantity: i64,
    created_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            category: row.category,
            unit_price: Money::from_cents(row.price_cents),
            quantity: row.quantity,
            created_at: row.created_at,
        }
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// // Rebuild the in-memory catalog at startup
/// let catalog = repo.load_catalog().await?;
///
/// // Persist a product the catalog just created
/// repo.insert(&product).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a product exactly as the catalog created it.
    ///
    /// The id is written explicitly. SQLite still raises the AUTOINCREMENT
    /// sequence to at least this id.
    ///
    /// ## Returns
    /// * `Ok(())` - Row written
    /// * `Err(DbError::UniqueViolation)` - Id already stored
    /// * `Err(DbError::ConstraintViolation)` - Row failed a CHECK
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, name = %product.name, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (id, name, category, price_cents, quantity, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.unit_price.cents())
        .bind(product.quantity)
        .bind(product.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => {
                DbError::duplicate(field, product.id.to_string())
            }
            other => other,
        })?;

        Ok(())
    }

    /// Hard-deletes a product.
    ///
    /// ## Returns
    /// * `Ok(())` - Row removed
    /// * `Err(DbError::NotFound)` - No row with this id
    pub async fn delete(&self, id: ProductId) -> DbResult<()> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: ProductId) -> DbResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, category, price_cents, quantity, created_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Product::from))
    }

    /// Lists every product in creation (id) order.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, category, price_cents, quantity, created_at
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Loaded products");
        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Highest product id ever assigned, including deleted ones.
    ///
    /// Returns 0 on a fresh database, where `sqlite_sequence` has no
    /// `products` row yet.
    pub async fn last_assigned_id(&self) -> DbResult<i64> {
        let seq: Option<i64> =
            sqlx::query_scalar("SELECT seq FROM sqlite_sequence WHERE name = 'products'")
                .fetch_optional(&self.pool)
                .await?;

        Ok(seq.unwrap_or(0))
    }

    /// Counts stored products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Rebuilds the in-memory catalog from storage.
    pub async fn load_catalog(&self) -> DbResult<ProductCatalog> {
        let products = self.list_all().await?;
        let last_assigned_id = self.last_assigned_id().await?;

        debug!(
            count = products.len(),
            last_assigned_id, "Restoring catalog snapshot"
        );

        Ok(ProductCatalog::restore(products, last_assigned_id))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_empty_database() {
        let repo = test_db().await.products();

        assert_eq!(repo.count().await.unwrap(), 0);
        assert_eq!(repo.last_assigned_id().await.unwrap(), 0);
        assert!(repo.list_all().await.unwrap().is_empty());

        let catalog = repo.load_catalog().await.unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.last_assigned_id(), 0);
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = test_db().await.products();
        let mut catalog = ProductCatalog::new();

        let widget = catalog.create("Widget", "Tools", "10.00", "3").unwrap();
        repo.insert(&widget).await.unwrap();

        let stored = repo.get_by_id(widget.id).await.unwrap().unwrap();
        assert_eq!(stored.name, "Widget");
        assert_eq!(stored.category, "Tools");
        assert_eq!(stored.unit_price, Money::from_cents(1000));
        assert_eq!(stored.quantity, 3);
        assert_eq!(stored.created_at, widget.created_at);

        assert!(repo.get_by_id(ProductId::new(99)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_duplicate_id() {
        let repo = test_db().await.products();
        let mut catalog = ProductCatalog::new();

        let widget = catalog.create("Widget", "Tools", "1.00", "1").unwrap();
        repo.insert(&widget).await.unwrap();

        let err = repo.insert(&widget).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_check_constraint_rejects_negative_quantity() {
        let repo = test_db().await.products();
        let mut catalog = ProductCatalog::new();

        let mut widget = catalog.create("Widget", "Tools", "1.00", "1").unwrap();
        widget.quantity = -1;

        let err = repo.insert(&widget).await.unwrap_err();
        assert!(matches!(err, DbError::ConstraintViolation { .. }));
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = test_db().await.products();
        let mut catalog = ProductCatalog::new();

        let widget = catalog.create("Widget", "Tools", "1.00", "1").unwrap();
        repo.insert(&widget).await.unwrap();

        repo.delete(widget.id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);

        let err = repo.delete(widget.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_all_in_id_order() {
        let repo = test_db().await.products();
        let mut catalog = ProductCatalog::new();

        let a = catalog.create("A", "X", "1.00", "1").unwrap();
        let b = catalog.create("B", "Y", "2.00", "2").unwrap();
        let c = catalog.create("C", "X", "3.00", "3").unwrap();

        // Insertion order differs from id order.
        repo.insert(&c).await.unwrap();
        repo.insert(&a).await.unwrap();
        repo.insert(&b).await.unwrap();

        let ids: Vec<i64> = repo
            .list_all()
            .await
            .unwrap()
            .iter()
            .map(|p| p.id.get())
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_high_water_mark_survives_deleting_newest() {
        let repo = test_db().await.products();
        let mut catalog = ProductCatalog::new();

        let widget = catalog.create("Widget", "Tools", "1.00", "1").unwrap();
        let gadget = catalog.create("Gadget", "Tools", "2.00", "2").unwrap();
        repo.insert(&widget).await.unwrap();
        repo.insert(&gadget).await.unwrap();

        repo.delete(gadget.id).await.unwrap();
        assert_eq!(repo.last_assigned_id().await.unwrap(), 2);

        let mut restored = repo.load_catalog().await.unwrap();
        assert_eq!(restored.len(), 1);
        assert_eq!(restored.last_assigned_id(), 2);

        let gizmo = restored.create("Gizmo", "Toys", "3.00", "3").unwrap();
        assert_eq!(gizmo.id, ProductId::new(3));
    }

    #[tokio::test]
    async fn test_load_catalog_round_trip() {
        let repo = test_db().await.products();
        let mut catalog = ProductCatalog::new();

        for (name, qty) in [("A", "1"), ("B", "7"), ("C", "0")] {
            let p = catalog.create(name, "Bulk", "0.50", qty).unwrap();
            repo.insert(&p).await.unwrap();
        }

        let restored = repo.load_catalog().await.unwrap();
        assert_eq!(restored.list_all(), catalog.list_all());
        assert_eq!(restored.last_assigned_id(), catalog.last_assigned_id());
    }
}
