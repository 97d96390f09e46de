//! EconoArena inventory ledger
//!
//! Core engine for a small-business inventory: a product catalog, an
//! append-only stock movement log, and the services that apply movements,
//! reconstruct past stock levels and aggregate activity into reports.
//!
//! Stock is never edited directly. Every change goes through
//! [`services::LedgerService::apply`], which validates the movement,
//! updates the product stock and appends a log record in one atomic step.
//! Past stock levels are recovered by [`services::history`] walking the
//! log backwards from the current truth, and [`services::analytics`] and
//! [`services::reporting`] summarize snapshots without touching state.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod validation;

pub use config::{Config, InventoryConfig, OverdrawPolicy};
pub use error::{AppError, AppResult, ErrorResponse};
pub use models::*;
pub use services::{CatalogService, LedgerService, UserDirectoryService};
pub use store::{InventoryStore, MemoryStore, StoreSnapshot};
