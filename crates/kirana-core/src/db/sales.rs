//! Sale recording and listing
//!
//! Sales are append-only. Recording one decrements the matching product's
//! stock (floored at zero) in the same transaction.

use rusqlite::params;

use super::{parse_date, parse_datetime, Database};
use crate::error::Result;
use crate::models::{NewSale, SaleTransaction};

fn row_to_sale(row: &rusqlite::Row<'_>) -> rusqlite::Result<SaleTransaction> {
    let date_str: Option<String> = row.get(7)?;
    let created_at_str: String = row.get(8)?;
    Ok(SaleTransaction {
        id: row.get(0)?,
        shop_id: row.get(1)?,
        product_id: row.get(2)?,
        product_name: row.get(3)?,
        quantity: row.get(4)?,
        unit_price: row.get(5)?,
        revenue: row.get(6)?,
        date: parse_date(date_str),
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    /// Record a sale and decrement the product's stock.
    ///
    /// The product is matched by name; a sale for an unknown product is
    /// still recorded (the ledger is the source of truth), it just can't
    /// decrement anything.
    pub fn record_sale(&self, shop_id: i64, sale: &NewSale) -> Result<i64> {
        let product = self.get_product_by_name(shop_id, &sale.product_name)?;
        let conn = self.conn()?;

        conn.execute("BEGIN TRANSACTION", [])?;

        let result = (|| {
            conn.execute(
                "INSERT INTO sales (shop_id, product_id, product_name, quantity, unit_price, \
                 revenue, date) VALUES (?, ?, ?, ?, ?, ?, ?)",
                params![
                    shop_id,
                    product.as_ref().map(|p| p.id),
                    sale.product_name,
                    sale.quantity,
                    sale.unit_price,
                    sale.revenue(),
                    sale.date.map(|d| d.to_string()),
                ],
            )?;
            let sale_id = conn.last_insert_rowid();

            if let Some(product) = &product {
                // Oversells floor at zero rather than erroring: stock counts
                // are user-entered and often lag reality
                conn.execute(
                    "UPDATE products SET quantity_on_hand = MAX(0, quantity_on_hand - ?) \
                     WHERE id = ?",
                    params![sale.quantity, product.id],
                )?;
            }

            Ok(sale_id)
        })();

        match result {
            Ok(id) => {
                conn.execute("COMMIT", [])?;
                Ok(id)
            }
            Err(e) => {
                let _ = conn.execute("ROLLBACK", []);
                Err(e)
            }
        }
    }

    /// List a shop's sales, most recent first
    pub fn list_sales(&self, shop_id: i64, limit: Option<usize>) -> Result<Vec<SaleTransaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, shop_id, product_id, product_name, quantity, unit_price, revenue, \
             date, created_at FROM sales WHERE shop_id = ? ORDER BY id DESC",
        )?;

        let mut sales = stmt
            .query_map(params![shop_id], row_to_sale)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        if let Some(limit) = limit {
            sales.truncate(limit);
        }

        Ok(sales)
    }
}
