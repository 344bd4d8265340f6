//! Shop profile operations

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::Shop;

fn row_to_shop(row: &rusqlite::Row<'_>) -> rusqlite::Result<Shop> {
    let created_at_str: String = row.get(4)?;
    Ok(Shop {
        id: row.get(0)?,
        name: row.get(1)?,
        business_type: row.get(2)?,
        currency: row.get(3)?,
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    /// Create a shop profile
    pub fn create_shop(&self, name: &str, business_type: &str, currency: &str) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO shops (name, business_type, currency) VALUES (?, ?, ?)",
            params![name, business_type, currency],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Get a shop by ID
    pub fn get_shop(&self, id: i64) -> Result<Option<Shop>> {
        let conn = self.conn()?;
        let shop = conn
            .query_row(
                "SELECT id, name, business_type, currency, created_at FROM shops WHERE id = ?",
                params![id],
                row_to_shop,
            )
            .ok();
        Ok(shop)
    }

    /// List all shops
    pub fn list_shops(&self) -> Result<Vec<Shop>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT id, name, business_type, currency, created_at FROM shops ORDER BY id")?;

        let shops = stmt
            .query_map([], row_to_shop)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(shops)
    }

    /// The CLI operates on a single shop: the first one created
    pub fn default_shop(&self) -> Result<Option<Shop>> {
        let conn = self.conn()?;
        let shop = conn
            .query_row(
                "SELECT id, name, business_type, currency, created_at FROM shops ORDER BY id LIMIT 1",
                [],
                row_to_shop,
            )
            .ok();
        Ok(shop)
    }
}
