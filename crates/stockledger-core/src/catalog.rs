//! # Product Catalog
//!
//! The authoritative in-memory set of products, in creation order.
//!
//! ## Id Allocation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    High-Water Id Allocation                             │
//! │                                                                         │
//! │  create Widget  ──► last_assigned_id 0 → 1   products [1]              │
//! │  create Gadget  ──► last_assigned_id 1 → 2   products [1, 2]           │
//! │  delete 2       ──► last_assigned_id stays 2 products [1]              │
//! │  create Gizmo   ──► last_assigned_id 2 → 3   products [1, 3]           │
//! │                                                                         │
//! │  The mark only moves forward, so a deleted id is never handed out      │
//! │  again. A failed create does not move it.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ownership
//! The catalog is the only mutator. `create` and `delete` take `&mut self`;
//! `list_all` and `get` hand out shared borrows, so a reader can never
//! observe a catalog that is being changed underneath it.

use chrono::{DateTime, Utc};

use crate::error::{CoreError, CoreResult};
use crate::types::{Product, ProductId};
use crate::validation::{validate_new_product, NewProduct};

/// Owned, creation-ordered product collection.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
    last_assigned_id: i64,
}

impl ProductCatalog {
    /// Creates an empty catalog; the first product gets id 1.
    pub fn new() -> Self {
        ProductCatalog::default()
    }

    /// Rebuilds a catalog from a storage snapshot.
    ///
    /// Ids are assigned in creation order, so sorting by id recovers it.
    /// The id high-water mark becomes the larger of `last_assigned_id` and
    /// every restored id, so storage that lost its sequence still cannot
    /// cause id reuse.
    pub fn restore(mut products: Vec<Product>, last_assigned_id: i64) -> Self {
        products.sort_by_key(|p| p.id);
        let highest_restored = products.iter().map(|p| p.id.get()).max().unwrap_or(0);

        ProductCatalog {
            last_assigned_id: last_assigned_id.max(highest_restored),
            products,
        }
    }

    /// Validates raw input and appends a new product.
    ///
    /// ## Arguments
    /// Text exactly as an operator typed it; see
    /// [`crate::validation::validate_new_product`] for the rules.
    ///
    /// ## Returns
    /// * `Ok(Product)` - the stored product, with its new id and timestamp
    /// * `Err(CoreError::Validation)` - nothing was added
    /// * `Err(CoreError::IdsExhausted)` - no id left to assign, nothing was added
    pub fn create(
        &mut self,
        name: &str,
        category: &str,
        unit_price: &str,
        quantity: &str,
    ) -> CoreResult<Product> {
        let input = validate_new_product(name, category, unit_price, quantity)?;
        self.insert(input, Utc::now())
    }

    // Only reachable through `create`, so every stored product was validated.
    fn insert(&mut self, input: NewProduct, created_at: DateTime<Utc>) -> CoreResult<Product> {
        let id = self
            .last_assigned_id
            .checked_add(1)
            .ok_or(CoreError::IdsExhausted)?;
        let (name, category, unit_price, quantity) = input.into_parts();

        let product = Product {
            id: ProductId::new(id),
            name,
            category,
            unit_price,
            quantity,
            created_at,
        };

        self.last_assigned_id = id;
        self.products.push(product.clone());
        Ok(product)
    }

    /// Removes a product and returns it.
    ///
    /// ## Returns
    /// * `Ok(Product)` - the removed product
    /// * `Err(CoreError::ProductNotFound)` - catalog unchanged
    pub fn delete(&mut self, id: ProductId) -> CoreResult<Product> {
        let index = self.position(id).ok_or(CoreError::ProductNotFound(id))?;

        // `remove` rather than `swap_remove`: creation order must survive.
        Ok(self.products.remove(index))
    }

    /// All products in creation order.
    pub fn list_all(&self) -> &[Product] {
        &self.products
    }

    /// Looks up a product by id.
    pub fn get(&self, id: ProductId) -> CoreResult<&Product> {
        self.position(id)
            .map(|index| &self.products[index])
            .ok_or(CoreError::ProductNotFound(id))
    }

    /// Whether a product with this id is present.
    pub fn contains(&self, id: ProductId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Highest id ever assigned (0 if none).
    pub fn last_assigned_id(&self) -> i64 {
        self.last_assigned_id
    }

    // Ids are ascending in creation order, so binary search applies.
    fn position(&self, id: ProductId) -> Option<usize> {
        self.products.binary_search_by_key(&id, |p| p.id).ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use proptest::prelude::*;

    fn seeded() -> ProductCatalog {
        let mut catalog = ProductCatalog::new();
        catalog.create("Widget", "Tools", "10.00", "3").unwrap();
        catalog.create("Gadget", "Tools", "5.50", "20").unwrap();
        catalog
    }

    #[test]
    fn test_first_id_is_one() {
        let mut catalog = ProductCatalog::new();
        let product = catalog.create("Widget", "Tools", "10.00", "3").unwrap();

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.unit_price, Money::from_cents(1000));
        assert_eq!(product.quantity, 3);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_ids_strictly_increase() {
        let mut catalog = ProductCatalog::new();
        let mut previous = 0;
        for i in 0..10 {
            let product = catalog
                .create(&format!("Item {}", i), "Misc", "1", "1")
                .unwrap();
            assert!(product.id.get() > previous);
            previous = product.id.get();
        }
    }

    #[test]
    fn test_ids_not_reused_after_deleting_newest() {
        let mut catalog = seeded();
        catalog.delete(ProductId::new(2)).unwrap();

        let product = catalog.create("Gizmo", "Toys", "1.00", "1").unwrap();
        assert_eq!(product.id, ProductId::new(3));
        assert_eq!(catalog.last_assigned_id(), 3);
    }

    #[test]
    fn test_failed_create_leaves_catalog_unchanged() {
        let mut catalog = seeded();

        let cases = [
            ("", "Tools", "1.00", "1"),
            ("Widget", "", "1.00", "1"),
            ("Widget", "Tools", "-1.00", "1"),
            ("Widget", "Tools", "1.00", "-1"),
            ("Widget", "Tools", "abc", "1"),
            ("Widget", "Tools", "1.00", "1.5"),
        ];

        for (name, category, price, qty) in cases {
            let err = catalog.create(name, category, price, qty).unwrap_err();
            assert!(
                err.is_validation(),
                "expected validation error for {:?}",
                (name, category, price, qty)
            );
            assert_eq!(catalog.len(), 2);
        }

        // Failed creates did not consume ids either.
        let product = catalog.create("Gizmo", "Toys", "1", "1").unwrap();
        assert_eq!(product.id, ProductId::new(3));
    }

    #[test]
    fn test_delete_existing() {
        let mut catalog = seeded();
        let removed = catalog.delete(ProductId::new(1)).unwrap();

        assert_eq!(removed.name, "Widget");
        assert_eq!(catalog.len(), 1);
        assert!(catalog.list_all().iter().all(|p| p.id != ProductId::new(1)));
        assert!(!catalog.contains(ProductId::new(1)));
    }

    #[test]
    fn test_delete_unknown_id() {
        let mut catalog = seeded();
        let err = catalog.delete(ProductId::new(999)).unwrap_err();

        assert_eq!(err, CoreError::ProductNotFound(ProductId::new(999)));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_delete_twice() {
        let mut catalog = seeded();
        catalog.delete(ProductId::new(1)).unwrap();
        assert!(catalog.delete(ProductId::new(1)).unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_all_keeps_creation_order() {
        let mut catalog = seeded();
        catalog.create("Gizmo", "Toys", "2", "7").unwrap();
        catalog.delete(ProductId::new(2)).unwrap();

        let names: Vec<&str> = catalog.list_all().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Widget", "Gizmo"]);
    }

    #[test]
    fn test_list_all_empty() {
        let catalog = ProductCatalog::new();
        assert!(catalog.list_all().is_empty());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_get() {
        let catalog = seeded();
        assert_eq!(catalog.get(ProductId::new(2)).unwrap().name, "Gadget");
        assert!(catalog.get(ProductId::new(42)).unwrap_err().is_not_found());
    }

    #[test]
    fn test_created_at_is_set_once() {
        let mut catalog = ProductCatalog::new();
        let before = Utc::now();
        let product = catalog.create("Widget", "Tools", "1", "1").unwrap();
        let after = Utc::now();

        assert!(product.created_at >= before && product.created_at <= after);
        assert_eq!(catalog.get(product.id).unwrap().created_at, product.created_at);
    }

    #[test]
    fn test_restore_uses_highest_known_id() {
        let source = seeded();
        let products = source.list_all().to_vec();

        // Sequence lost: restored ids still win.
        let mut restored = ProductCatalog::restore(products.clone(), 0);
        assert_eq!(restored.last_assigned_id(), 2);
        assert_eq!(restored.create("Gizmo", "Toys", "1", "1").unwrap().id, ProductId::new(3));

        // Sequence ahead of the rows (newest row was deleted).
        let mut restored = ProductCatalog::restore(products, 5);
        assert_eq!(restored.create("Gizmo", "Toys", "1", "1").unwrap().id, ProductId::new(6));
    }

    #[test]
    fn test_create_fails_when_ids_are_exhausted() {
        let mut catalog = ProductCatalog::restore(Vec::new(), i64::MAX);

        let err = catalog.create("Widget", "Tools", "1", "1").unwrap_err();
        assert_eq!(err, CoreError::IdsExhausted);
        assert!(catalog.is_empty());
        assert_eq!(catalog.last_assigned_id(), i64::MAX);
    }

    proptest! {
        #[test]
        fn prop_ids_strictly_increase_across_deletes(
            deletes in prop::collection::vec(any::<bool>(), 1..30)
        ) {
            let mut catalog = ProductCatalog::new();
            let mut previous = 0;

            for delete_newest in deletes {
                let product = catalog.create("Item", "Misc", "1", "1").unwrap();
                prop_assert!(product.id.get() > previous);
                previous = product.id.get();

                if delete_newest {
                    catalog.delete(product.id).unwrap();
                }
            }
        }
    }
}
