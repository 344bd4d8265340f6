//! Request handlers
//!
//! Handlers are organized by domain:
//! - `shops` - Shop profiles and the dashboard summary
//! - `products` - Product CRUD, CSV import/export
//! - `sales` - Sale recording and listing
//! - `expenses` - Expense CRUD
//! - `suppliers` - Supplier CRUD and product links
//! - `insights` - Insight generation over a shop snapshot
//! - `assistant` - Chat endpoint

pub mod assistant;
pub mod expenses;
pub mod insights;
pub mod products;
pub mod sales;
pub mod shops;
pub mod suppliers;

pub use assistant::*;
pub use expenses::*;
pub use insights::*;
pub use products::*;
pub use sales::*;
pub use shops::*;
pub use suppliers::*;
