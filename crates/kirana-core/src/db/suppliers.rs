//! Supplier operations and product coverage links

use rusqlite::params;

use super::{parse_datetime, Database, DbConn};
use crate::error::{Error, Result};
use crate::models::{NewSupplier, Supplier};

const SUPPLIER_COLUMNS: &str = "id, shop_id, name, phone, email, reliability_score, \
                                quality_rating, average_delivery_days, created_at";

fn row_to_supplier(row: &rusqlite::Row<'_>) -> rusqlite::Result<Supplier> {
    let created_at_str: String = row.get(8)?;
    Ok(Supplier {
        id: row.get(0)?,
        shop_id: row.get(1)?,
        name: row.get(2)?,
        phone: row.get(3)?,
        email: row.get(4)?,
        reliability_score: row.get::<_, i64>(5)?.clamp(1, 10) as u8,
        quality_rating: row.get::<_, i64>(6)?.clamp(1, 10) as u8,
        average_delivery_days: row.get::<_, Option<i64>>(7)?.map(|d| d as u32),
        product_ids: Vec::new(), // filled in by the caller
        created_at: parse_datetime(&created_at_str),
    })
}

fn load_product_ids(conn: &DbConn, supplier_id: i64) -> Result<Vec<i64>> {
    let mut stmt = conn.prepare(
        "SELECT product_id FROM supplier_products WHERE supplier_id = ? ORDER BY product_id",
    )?;
    let ids = stmt
        .query_map(params![supplier_id], |row| row.get(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(ids)
}

impl Database {
    /// Create a supplier
    pub fn create_supplier(&self, shop_id: i64, supplier: &NewSupplier) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO suppliers (shop_id, name, phone, email, reliability_score, \
             quality_rating, average_delivery_days) VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                shop_id,
                supplier.name,
                supplier.phone,
                supplier.email,
                supplier.reliability_score,
                supplier.quality_rating,
                supplier.average_delivery_days,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// List a shop's suppliers with their product links, most reliable first
    pub fn list_suppliers(&self, shop_id: i64) -> Result<Vec<Supplier>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM suppliers WHERE shop_id = ? \
             ORDER BY reliability_score DESC, name",
            SUPPLIER_COLUMNS
        ))?;

        let mut suppliers = stmt
            .query_map(params![shop_id], row_to_supplier)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        for supplier in &mut suppliers {
            supplier.product_ids = load_product_ids(&conn, supplier.id)?;
        }

        Ok(suppliers)
    }

    /// Get a supplier by ID, with product links
    pub fn get_supplier(&self, id: i64) -> Result<Option<Supplier>> {
        let conn = self.conn()?;
        let supplier = conn
            .query_row(
                &format!("SELECT {} FROM suppliers WHERE id = ?", SUPPLIER_COLUMNS),
                params![id],
                row_to_supplier,
            )
            .ok();

        match supplier {
            Some(mut supplier) => {
                supplier.product_ids = load_product_ids(&conn, supplier.id)?;
                Ok(Some(supplier))
            }
            None => Ok(None),
        }
    }

    /// Replace a supplier's editable fields
    pub fn update_supplier(&self, id: i64, supplier: &NewSupplier) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE suppliers SET name = ?, phone = ?, email = ?, reliability_score = ?, \
             quality_rating = ?, average_delivery_days = ? WHERE id = ?",
            params![
                supplier.name,
                supplier.phone,
                supplier.email,
                supplier.reliability_score,
                supplier.quality_rating,
                supplier.average_delivery_days,
                id,
            ],
        )?;

        if updated == 0 {
            return Err(Error::NotFound(format!("Supplier {}", id)));
        }
        Ok(())
    }

    /// Delete a supplier and its product links
    pub fn delete_supplier(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM suppliers WHERE id = ?", params![id])?;

        if deleted == 0 {
            return Err(Error::NotFound(format!("Supplier {}", id)));
        }
        Ok(())
    }

    /// Mark a supplier as covering a product. Idempotent.
    pub fn link_supplier_product(&self, supplier_id: i64, product_id: i64) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR IGNORE INTO supplier_products (supplier_id, product_id) VALUES (?, ?)",
            params![supplier_id, product_id],
        )?;
        Ok(())
    }

    /// Remove a supplier-product link
    pub fn unlink_supplier_product(&self, supplier_id: i64, product_id: i64) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "DELETE FROM supplier_products WHERE supplier_id = ? AND product_id = ?",
            params![supplier_id, product_id],
        )?;
        Ok(())
    }

    /// Suppliers covering a product, most reliable first
    pub fn suppliers_for_product(&self, product_id: i64) -> Result<Vec<Supplier>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM suppliers \
             JOIN supplier_products ON supplier_products.supplier_id = suppliers.id \
             WHERE supplier_products.product_id = ? \
             ORDER BY reliability_score DESC, name",
            SUPPLIER_COLUMNS
        ))?;

        let mut suppliers = stmt
            .query_map(params![product_id], row_to_supplier)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        for supplier in &mut suppliers {
            supplier.product_ids = load_product_ids(&conn, supplier.id)?;
        }

        Ok(suppliers)
    }
}
