//! Expense command implementations

use anyhow::Result;
use chrono::Local;

use kirana_core::db::Database;
use kirana_core::models::{ExpenseCategory, NewExpense};
use kirana_core::validate;

use super::require_shop;

pub fn cmd_expenses_list(db: &Database) -> Result<()> {
    let shop = require_shop(db)?;
    let expenses = db.list_expenses(shop.id)?;

    if expenses.is_empty() {
        println!("No expenses recorded yet. Record one with:");
        println!("  kirana expenses add rent -a 5000");
        return Ok(());
    }

    println!();
    println!("💸 Expenses");
    println!("   ─────────────────────────────────────────────────────────────");

    let mut total = 0.0;
    for expense in &expenses {
        let date = expense
            .date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "(no date)".to_string());
        let description = expense
            .description
            .as_deref()
            .map(|d| format!(" - {}", d))
            .unwrap_or_default();
        println!(
            "   [{}] {} {} {}{:.2}{}",
            expense.id,
            date,
            expense.category.label(),
            shop.currency,
            expense.amount,
            description
        );
        total += expense.amount;
    }

    println!();
    println!("   Total: {}{:.2}", shop.currency, total);
    Ok(())
}

pub fn cmd_expenses_add(
    db: &Database,
    category: &str,
    amount: f64,
    description: Option<&str>,
    date: Option<&str>,
) -> Result<()> {
    let shop = require_shop(db)?;

    let category: ExpenseCategory = category.parse().map_err(|e: String| {
        anyhow::anyhow!(
            "{}. Valid categories: rent, electricity, staff_wages, transport, miscellaneous",
            e
        )
    })?;

    if amount <= 0.0 {
        anyhow::bail!("Amount must be positive");
    }

    let date = match date {
        Some(raw) => Some(validate::parse_past_date(raw)?),
        None => Some(Local::now().date_naive()),
    };

    let id = db.create_expense(
        shop.id,
        &NewExpense {
            category,
            amount,
            description: description.map(|d| d.to_string()),
            date,
        },
    )?;

    println!(
        "✅ Recorded expense [{}]: {} {}{:.2}",
        id,
        category.label(),
        shop.currency,
        amount
    );
    Ok(())
}

pub fn cmd_expenses_delete(db: &Database, id: i64) -> Result<()> {
    db.delete_expense(id)?;
    println!("✅ Deleted expense {}", id);
    Ok(())
}
