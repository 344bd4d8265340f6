//! Sale command implementations

use anyhow::Result;
use chrono::Local;

use kirana_core::db::Database;
use kirana_core::models::NewSale;
use kirana_core::validate;

use super::require_shop;

pub fn cmd_sell(
    db: &Database,
    product_name: &str,
    quantity: f64,
    price: Option<f64>,
    date: Option<&str>,
) -> Result<()> {
    let shop = require_shop(db)?;

    if quantity <= 0.0 {
        anyhow::bail!("Quantity must be positive");
    }

    let product = db.get_product_by_name(shop.id, product_name)?;

    // Fall back to the product's listed price when none is given
    let unit_price = match (price, &product) {
        (Some(p), _) => p,
        (None, Some(product)) => product.selling_price,
        (None, None) => anyhow::bail!(
            "Unknown product '{}'. Pass --price to record the sale anyway.",
            product_name
        ),
    };

    let date = match date {
        Some(raw) => Some(validate::parse_past_date(raw)?),
        None => Some(Local::now().date_naive()),
    };

    let sale = NewSale {
        product_name: product_name.to_string(),
        quantity,
        unit_price,
        date,
    };
    let revenue = sale.revenue();
    db.record_sale(shop.id, &sale)?;

    println!(
        "✅ Recorded: {} x {} @ {}{:.2} = {}{:.2}",
        quantity, product_name, shop.currency, unit_price, shop.currency, revenue
    );

    if let Some(product) = db.get_product_by_name(shop.id, product_name)? {
        if product.is_low_stock() {
            println!(
                "   ⚠️  {} is now low on stock ({} {} left, reorder at {})",
                product.name, product.quantity_on_hand, product.unit, product.reorder_level
            );
        }
    }

    Ok(())
}

pub fn cmd_sales_list(db: &Database, limit: usize) -> Result<()> {
    let shop = require_shop(db)?;
    let sales = db.list_sales(shop.id, Some(limit))?;

    if sales.is_empty() {
        println!("No sales recorded yet. Record one with:");
        println!("  kirana sell Rice -q 2");
        return Ok(());
    }

    println!();
    println!("🧾 Sales (latest {})", limit);
    println!("   ─────────────────────────────────────────────────────────────");

    for sale in &sales {
        let date = sale
            .date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "(no date)".to_string());
        println!(
            "   {} {} x {} @ {}{:.2} = {}{:.2}",
            date, sale.quantity, sale.product_name, shop.currency, sale.unit_price,
            shop.currency, sale.revenue
        );
    }

    Ok(())
}
