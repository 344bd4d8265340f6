//! Product/inventory operations

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewProduct, Product};

const PRODUCT_COLUMNS: &str = "id, shop_id, name, category, quantity_on_hand, reorder_level, \
                               unit, selling_price, cost_price, discount_percent, created_at";

fn row_to_product(row: &rusqlite::Row<'_>) -> rusqlite::Result<Product> {
    let created_at_str: String = row.get(10)?;
    Ok(Product {
        id: row.get(0)?,
        shop_id: row.get(1)?,
        name: row.get(2)?,
        category: row.get(3)?,
        quantity_on_hand: row.get(4)?,
        reorder_level: row.get(5)?,
        unit: row.get(6)?,
        selling_price: row.get(7)?,
        cost_price: row.get(8)?,
        discount_percent: row.get(9)?,
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    /// Create a product. Names are unique per shop.
    pub fn create_product(&self, shop_id: i64, product: &NewProduct) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO products (shop_id, name, category, quantity_on_hand, reorder_level, \
             unit, selling_price, cost_price, discount_percent) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                shop_id,
                product.name,
                product.category,
                product.quantity_on_hand.max(0.0),
                product.reorder_level.max(0.0),
                product.unit,
                product.selling_price,
                product.cost_price,
                product.discount_percent,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// List a shop's products, alphabetically
    pub fn list_products(&self, shop_id: i64) -> Result<Vec<Product>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM products WHERE shop_id = ? ORDER BY name",
            PRODUCT_COLUMNS
        ))?;

        let products = stmt
            .query_map(params![shop_id], row_to_product)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(products)
    }

    /// Get a product by ID
    pub fn get_product(&self, id: i64) -> Result<Option<Product>> {
        let conn = self.conn()?;
        let product = conn
            .query_row(
                &format!("SELECT {} FROM products WHERE id = ?", PRODUCT_COLUMNS),
                params![id],
                row_to_product,
            )
            .ok();
        Ok(product)
    }

    /// Look a product up by its (shop-unique) name
    pub fn get_product_by_name(&self, shop_id: i64, name: &str) -> Result<Option<Product>> {
        let conn = self.conn()?;
        let product = conn
            .query_row(
                &format!(
                    "SELECT {} FROM products WHERE shop_id = ?1 AND name = ?2",
                    PRODUCT_COLUMNS
                ),
                params![shop_id, name],
                row_to_product,
            )
            .ok();
        Ok(product)
    }

    /// Replace a product's editable fields
    pub fn update_product(&self, id: i64, product: &NewProduct) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE products SET name = ?, category = ?, quantity_on_hand = ?, \
             reorder_level = ?, unit = ?, selling_price = ?, cost_price = ?, \
             discount_percent = ? WHERE id = ?",
            params![
                product.name,
                product.category,
                product.quantity_on_hand.max(0.0),
                product.reorder_level.max(0.0),
                product.unit,
                product.selling_price,
                product.cost_price,
                product.discount_percent,
                id,
            ],
        )?;

        if updated == 0 {
            return Err(Error::NotFound(format!("Product {}", id)));
        }
        Ok(())
    }

    /// Set a product's stock level directly (e.g. after a delivery)
    pub fn set_product_quantity(&self, id: i64, quantity: f64) -> Result<()> {
        let conn = self.conn()?;
        let updated = conn.execute(
            "UPDATE products SET quantity_on_hand = ? WHERE id = ?",
            params![quantity.max(0.0), id],
        )?;

        if updated == 0 {
            return Err(Error::NotFound(format!("Product {}", id)));
        }
        Ok(())
    }

    /// Delete a product. Past sales keep the product name; supplier links
    /// are removed by the cascade.
    pub fn delete_product(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM products WHERE id = ?", params![id])?;

        if deleted == 0 {
            return Err(Error::NotFound(format!("Product {}", id)));
        }
        Ok(())
    }
}
