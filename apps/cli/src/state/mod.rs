//! # Application State
//!
//! Two focused state types, built once at startup:
//!
//! - [`AppConfig`] - resolved configuration (read-only)
//! - [`InventoryState`] - catalog plus write-through repository

pub mod config;
pub mod inventory;

pub use config::{AppConfig, ConfigError};
pub use inventory::InventoryState;
