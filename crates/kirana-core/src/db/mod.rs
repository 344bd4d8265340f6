//! Database access layer with connection pooling and migrations
//!
//! This module is organized by domain:
//! - `shops` - Shop profile operations
//! - `products` - Product/inventory CRUD
//! - `sales` - Sale recording (with stock decrement) and listing
//! - `expenses` - Expense CRUD
//! - `suppliers` - Supplier CRUD and product links
//!
//! The `Database` also implements [`SnapshotStore`], assembling the
//! read-only snapshots the insight engine and assistant consume.

use chrono::{DateTime, NaiveDate, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::info;

use crate::error::Result;
use crate::models::DashboardStats;
use crate::snapshot::{Snapshot, SnapshotStore};

mod expenses;
mod products;
mod sales;
mod shops;
mod suppliers;

#[cfg(test)]
mod tests;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Parse a SQLite datetime string into a DateTime<Utc>
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    // SQLite stores as "YYYY-MM-DD HH:MM:SS" format
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.and_utc())
        .unwrap_or_else(|_| Utc::now())
}

/// Parse an optional stored date, treating unparseable values as absent
pub(crate) fn parse_date(s: Option<String>) -> Option<NaiveDate> {
    s.and_then(|raw| NaiveDate::parse_from_str(&raw, "%Y-%m-%d").ok())
}

/// Database wrapper with connection pooling
#[derive(Clone, Debug)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
}

impl Database {
    /// Open (or create) a database at the given path
    pub fn new(path: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(10).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create a throwaway database for testing.
    ///
    /// Uses a temporary file rather than `:memory:` so every pooled
    /// connection sees the same database.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!("kirana_test_{}_{}.db", std::process::id(), id));
        let path = path.to_string_lossy().to_string();

        // Remove any existing file
        let _ = std::fs::remove_file(&path);

        Self::new(&path)
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Clear all transactional data, preserving shop profiles and products
    pub fn soft_reset(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            DELETE FROM sales;
            DELETE FROM expenses;
            "#,
        )?;

        info!("Database soft reset complete");
        Ok(())
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- Enable foreign keys
            PRAGMA foreign_keys = ON;

            -- WAL mode: readers don't block writers.
            -- Note: creates -wal and -shm sidecar files alongside the database
            PRAGMA journal_mode = WAL;

            -- Synchronous NORMAL: good balance of safety and performance
            PRAGMA synchronous = NORMAL;

            -- Shop profiles. Every other table is keyed by shop_id.
            CREATE TABLE IF NOT EXISTS shops (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                business_type TEXT NOT NULL,
                currency TEXT NOT NULL DEFAULT '₹',
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            -- Inventory
            CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY,
                shop_id INTEGER NOT NULL REFERENCES shops(id),
                name TEXT NOT NULL,
                category TEXT,
                quantity_on_hand REAL NOT NULL DEFAULT 0,
                reorder_level REAL NOT NULL DEFAULT 0,
                unit TEXT NOT NULL DEFAULT 'pcs',
                selling_price REAL NOT NULL DEFAULT 0,
                cost_price REAL NOT NULL DEFAULT 0,
                discount_percent REAL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                UNIQUE(shop_id, name)
            );

            CREATE INDEX IF NOT EXISTS idx_products_shop ON products(shop_id);

            -- Sales ledger. product_id is best-effort: the name is the
            -- durable reference, surviving product deletion.
            CREATE TABLE IF NOT EXISTS sales (
                id INTEGER PRIMARY KEY,
                shop_id INTEGER NOT NULL REFERENCES shops(id),
                product_id INTEGER REFERENCES products(id) ON DELETE SET NULL,
                product_name TEXT NOT NULL,
                quantity REAL NOT NULL DEFAULT 0,
                unit_price REAL NOT NULL DEFAULT 0,
                revenue REAL NOT NULL DEFAULT 0,
                date DATE,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_sales_shop ON sales(shop_id);
            CREATE INDEX IF NOT EXISTS idx_sales_date ON sales(date);

            -- Expenses
            CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY,
                shop_id INTEGER NOT NULL REFERENCES shops(id),
                category TEXT NOT NULL,
                amount REAL NOT NULL DEFAULT 0,
                description TEXT,
                date DATE,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_expenses_shop ON expenses(shop_id);

            -- Suppliers
            CREATE TABLE IF NOT EXISTS suppliers (
                id INTEGER PRIMARY KEY,
                shop_id INTEGER NOT NULL REFERENCES shops(id),
                name TEXT NOT NULL,
                phone TEXT,
                email TEXT,
                reliability_score INTEGER NOT NULL DEFAULT 5,
                quality_rating INTEGER NOT NULL DEFAULT 5,
                average_delivery_days INTEGER,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_suppliers_shop ON suppliers(shop_id);

            -- Supplier-product coverage (many-to-many)
            CREATE TABLE IF NOT EXISTS supplier_products (
                supplier_id INTEGER NOT NULL REFERENCES suppliers(id) ON DELETE CASCADE,
                product_id INTEGER NOT NULL REFERENCES products(id) ON DELETE CASCADE,
                PRIMARY KEY (supplier_id, product_id)
            );
            "#,
        )?;

        Ok(())
    }

    /// Canned dashboard stats for a shop
    pub fn dashboard_stats(&self, shop_id: i64) -> Result<DashboardStats> {
        let conn = self.conn()?;
        let today = chrono::Local::now().date_naive().to_string();

        let product_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM products WHERE shop_id = ?",
            [shop_id],
            |row| row.get(0),
        )?;
        let low_stock_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM products WHERE shop_id = ? AND quantity_on_hand <= reorder_level",
            [shop_id],
            |row| row.get(0),
        )?;
        let supplier_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM suppliers WHERE shop_id = ?",
            [shop_id],
            |row| row.get(0),
        )?;
        let sale_count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sales WHERE shop_id = ?",
            [shop_id],
            |row| row.get(0),
        )?;
        let total_revenue: f64 = conn.query_row(
            "SELECT COALESCE(SUM(revenue), 0) FROM sales WHERE shop_id = ?",
            [shop_id],
            |row| row.get(0),
        )?;
        let today_revenue: f64 = conn.query_row(
            "SELECT COALESCE(SUM(revenue), 0) FROM sales WHERE shop_id = ?1 AND date = ?2",
            rusqlite::params![shop_id, today],
            |row| row.get(0),
        )?;
        let total_expenses: f64 = conn.query_row(
            "SELECT COALESCE(SUM(amount), 0) FROM expenses WHERE shop_id = ?",
            [shop_id],
            |row| row.get(0),
        )?;

        Ok(DashboardStats {
            product_count,
            low_stock_count,
            supplier_count,
            sale_count,
            total_revenue,
            today_revenue,
            total_expenses,
        })
    }
}

impl SnapshotStore for Database {
    fn load_snapshot(&self, shop_id: i64) -> Result<Snapshot> {
        Ok(Snapshot {
            products: self.list_products(shop_id)?,
            sales: self.list_sales(shop_id, None)?,
            expenses: self.list_expenses(shop_id)?,
            suppliers: self.list_suppliers(shop_id)?,
        })
    }
}
