//! Business logic services for the EconoArena inventory ledger

pub mod analytics;
pub mod catalog;
pub mod directory;
pub mod history;
pub mod ledger;
pub mod reporting;

pub use catalog::CatalogService;
pub use directory::UserDirectoryService;
pub use ledger::LedgerService;
