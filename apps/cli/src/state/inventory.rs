//! # Inventory State
//!
//! The live catalog plus its write-through database repository.
//!
//! ## Write-Through
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Create / Delete Flow                                 │
//! │                                                                         │
//! │  create(name, category, price, qty)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  catalog.create ──► ValidationError? ──► return, nothing stored        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  repo.insert ──► DbError? ──► remove from catalog, return error        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Ok(product)                                                           │
//! │                                                                         │
//! │  delete(id)                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  catalog.get ──► NotFound? ──► return, nothing touched                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  repo.delete ──► DbError? ──► return, catalog unchanged                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  catalog.delete ──► Ok(product)                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog answers every read; the database is only written.

use stockledger_core::{Product, ProductCatalog, ProductId};
use stockledger_db::{Database, ProductRepository};
use tracing::{info, warn};

use crate::error::CliResult;

/// Catalog and repository kept in step.
#[derive(Debug)]
pub struct InventoryState {
    catalog: ProductCatalog,
    repo: ProductRepository,
}

impl InventoryState {
    /// Restores the catalog from the database.
    pub async fn open(db: &Database) -> CliResult<Self> {
        let repo = db.products();
        let catalog = repo.load_catalog().await?;

        info!(
            products = catalog.len(),
            last_assigned_id = catalog.last_assigned_id(),
            "Catalog restored"
        );

        Ok(InventoryState { catalog, repo })
    }

    /// Validates, assigns an id, and persists a new product.
    pub async fn create(
        &mut self,
        name: &str,
        category: &str,
        unit_price: &str,
        quantity: &str,
    ) -> CliResult<Product> {
        let product = self.catalog.create(name, category, unit_price, quantity)?;

        if let Err(err) = self.repo.insert(&product).await {
            warn!(id = %product.id, error = %err, "Insert failed, rolling back catalog");
            // The id stays consumed; the high-water mark never moves back.
            let _ = self.catalog.delete(product.id);
            return Err(err.into());
        }

        info!(id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Removes a product from storage and the catalog.
    pub async fn delete(&mut self, id: ProductId) -> CliResult<Product> {
        self.catalog.get(id)?;
        self.repo.delete(id).await?;
        let removed = self.catalog.delete(id)?;

        info!(id = %removed.id, name = %removed.name, "Product deleted");
        Ok(removed)
    }

    /// All products in creation order.
    pub fn products(&self) -> &[Product] {
        self.catalog.list_all()
    }

    /// Looks up one product.
    pub fn get(&self, id: ProductId) -> CliResult<&Product> {
        Ok(self.catalog.get(id)?)
    }

    pub fn catalog(&self) -> &ProductCatalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CliError, ErrorCode};
    use stockledger_db::DbConfig;

    async fn open_state() -> (Database, InventoryState) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let state = InventoryState::open(&db).await.unwrap();
        (db, state)
    }

    #[tokio::test]
    async fn test_create_is_persisted() {
        let (db, mut state) = open_state().await;

        let widget = state.create("Widget", "Tools", "10.00", "3").await.unwrap();
        assert_eq!(widget.id, ProductId::new(1));

        let stored = db.products().get_by_id(widget.id).await.unwrap();
        assert_eq!(stored.as_ref(), Some(&widget));
    }

    #[tokio::test]
    async fn test_invalid_create_stores_nothing() {
        let (db, mut state) = open_state().await;

        let err = state.create("Widget", "Tools", "-1", "3").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert!(state.products().is_empty());
        assert_eq!(db.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_failed_insert_rolls_back_catalog() {
        let (db, mut state) = open_state().await;
        state.create("Widget", "Tools", "1.00", "1").await.unwrap();

        db.close().await;

        let err = state.create("Gadget", "Tools", "2.00", "2").await.unwrap_err();
        assert!(matches!(err, CliError::Db(_)));
        assert_eq!(state.products().len(), 1);
        // The failed id is not handed out again.
        assert_eq!(state.catalog().last_assigned_id(), 2);
    }

    #[tokio::test]
    async fn test_delete() {
        let (db, mut state) = open_state().await;
        let widget = state.create("Widget", "Tools", "1.00", "1").await.unwrap();
        state.create("Gadget", "Tools", "2.00", "2").await.unwrap();

        let err = state.delete(ProductId::new(999)).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(state.products().len(), 2);

        let removed = state.delete(widget.id).await.unwrap();
        assert_eq!(removed.name, "Widget");
        assert_eq!(state.products().len(), 1);
        assert!(state.get(widget.id).is_err());
        assert_eq!(db.products().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_reopen_keeps_high_water_mark() {
        let (db, mut state) = open_state().await;
        state.create("Widget", "Tools", "1.00", "1").await.unwrap();
        let gadget = state.create("Gadget", "Tools", "2.00", "2").await.unwrap();
        state.delete(gadget.id).await.unwrap();

        let mut reopened = InventoryState::open(&db).await.unwrap();
        let gizmo = reopened.create("Gizmo", "Toys", "3.00", "3").await.unwrap();
        assert_eq!(gizmo.id, ProductId::new(3));
    }
}
