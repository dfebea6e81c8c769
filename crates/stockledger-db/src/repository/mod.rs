//! # Repository Module
//!
//! Database repository implementations for StockLedger.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  InventoryService (apps/cli)                                           │
//! │       │                                                                 │
//! │       │  db.products().insert(&product)                                │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── insert(&self, product)                                            │
//! │  ├── delete(&self, id)                                                 │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── list_all(&self)                                                   │
//! │  └── load_catalog(&self)                                               │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product persistence

pub mod product;
