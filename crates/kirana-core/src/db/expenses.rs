//! Expense operations

use rusqlite::params;

use super::{parse_date, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Expense, ExpenseCategory, NewExpense};

fn row_to_expense(row: &rusqlite::Row<'_>) -> rusqlite::Result<Expense> {
    let category_str: String = row.get(2)?;
    let date_str: Option<String> = row.get(5)?;
    let created_at_str: String = row.get(6)?;
    Ok(Expense {
        id: row.get(0)?,
        shop_id: row.get(1)?,
        category: category_str
            .parse()
            .unwrap_or(ExpenseCategory::Miscellaneous),
        amount: row.get(3)?,
        description: row.get(4)?,
        date: parse_date(date_str),
        created_at: parse_datetime(&created_at_str),
    })
}

impl Database {
    /// Record an expense
    pub fn create_expense(&self, shop_id: i64, expense: &NewExpense) -> Result<i64> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO expenses (shop_id, category, amount, description, date) \
             VALUES (?, ?, ?, ?, ?)",
            params![
                shop_id,
                expense.category.as_str(),
                expense.amount,
                expense.description,
                expense.date.map(|d| d.to_string()),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// List a shop's expenses, most recent first
    pub fn list_expenses(&self, shop_id: i64) -> Result<Vec<Expense>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, shop_id, category, amount, description, date, created_at \
             FROM expenses WHERE shop_id = ? ORDER BY id DESC",
        )?;

        let expenses = stmt
            .query_map(params![shop_id], row_to_expense)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(expenses)
    }

    /// Delete an expense
    pub fn delete_expense(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM expenses WHERE id = ?", params![id])?;

        if deleted == 0 {
            return Err(Error::NotFound(format!("Expense {}", id)));
        }
        Ok(())
    }
}
