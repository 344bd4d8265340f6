//! Supplier command implementations

use anyhow::Result;

use kirana_core::db::Database;
use kirana_core::models::NewSupplier;
use kirana_core::validate;

use super::require_shop;

pub fn cmd_suppliers_list(db: &Database) -> Result<()> {
    let shop = require_shop(db)?;
    let suppliers = db.list_suppliers(shop.id)?;

    if suppliers.is_empty() {
        println!("No suppliers yet. Add one with:");
        println!("  kirana suppliers add \"Metro Wholesale\" --reliability 9");
        return Ok(());
    }

    println!();
    println!("🚚 Suppliers");
    println!("   ─────────────────────────────────────────────────────────────");

    for supplier in &suppliers {
        println!(
            "   [{}] {} - reliability {}/10, quality {}/10",
            supplier.id, supplier.name, supplier.reliability_score, supplier.quality_rating
        );
        if let Some(days) = supplier.average_delivery_days {
            println!("        avg delivery: {} days", days);
        }
        if !supplier.product_ids.is_empty() {
            println!("        covers {} products", supplier.product_ids.len());
        }
    }

    Ok(())
}

pub fn cmd_suppliers_add(
    db: &Database,
    name: &str,
    phone: Option<&str>,
    email: Option<&str>,
    reliability: i64,
    quality: i64,
    delivery_days: Option<u32>,
) -> Result<()> {
    let shop = require_shop(db)?;

    let supplier = NewSupplier {
        name: name.trim().to_string(),
        phone: phone.map(|p| p.to_string()),
        email: email.map(|e| e.to_string()),
        reliability_score: validate::validate_rating(reliability, "Reliability")?,
        quality_rating: validate::validate_rating(quality, "Quality")?,
        average_delivery_days: delivery_days,
    };

    if supplier.name.is_empty() {
        anyhow::bail!("Supplier name is required");
    }

    let id = db.create_supplier(shop.id, &supplier)?;
    println!("✅ Added supplier [{}] {}", id, name);
    Ok(())
}

pub fn cmd_suppliers_link(db: &Database, supplier_id: i64, product_id: i64) -> Result<()> {
    let supplier = db
        .get_supplier(supplier_id)?
        .ok_or_else(|| anyhow::anyhow!("Supplier {} not found", supplier_id))?;
    let product = db
        .get_product(product_id)?
        .ok_or_else(|| anyhow::anyhow!("Product {} not found", product_id))?;

    db.link_supplier_product(supplier_id, product_id)?;
    println!("✅ {} now covers {}", supplier.name, product.name);
    Ok(())
}

pub fn cmd_suppliers_delete(db: &Database, id: i64) -> Result<()> {
    let supplier = db
        .get_supplier(id)?
        .ok_or_else(|| anyhow::anyhow!("Supplier {} not found", id))?;

    db.delete_supplier(id)?;
    println!("✅ Deleted supplier {}", supplier.name);
    Ok(())
}
