//! Kirana Core Library
//!
//! Shared functionality for the Kirana shop management tool:
//! - SQLite repository for shops, products, sales, expenses, and suppliers
//! - Read-only snapshots with a defensive normalization boundary
//! - Rule-based insight engine (stock, sales, and expense rules)
//! - Keyword-matched chat assistant over live shop data
//! - Bulk product CSV import and data export
//! - Input validation for the CRUD boundary

pub mod assistant;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod import;
pub mod insights;
pub mod models;
pub mod snapshot;
pub mod validate;

pub use assistant::{Assistant, ChatReply, Intent, ShopContext};
pub use config::EngineConfig;
pub use db::Database;
pub use error::{Error, Result};
pub use import::{parse_products_csv, ProductImport};
pub use insights::{Insight, InsightEngine, InsightKind, Priority, SuggestedAction};
pub use models::{
    DashboardStats, Expense, ExpenseCategory, NewExpense, NewProduct, NewSale, NewSupplier,
    Product, SaleTransaction, Shop, Supplier,
};
pub use snapshot::{Snapshot, SnapshotStore};
