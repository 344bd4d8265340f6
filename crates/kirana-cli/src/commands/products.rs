//! Product command implementations

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};

use kirana_core::db::Database;
use kirana_core::models::NewProduct;
use kirana_core::{export, import, validate};

use super::require_shop;

pub fn cmd_products_list(db: &Database) -> Result<()> {
    let shop = require_shop(db)?;
    let products = db.list_products(shop.id)?;

    if products.is_empty() {
        println!("No products yet. Add one with:");
        println!("  kirana products add Rice --selling-price 30 --cost-price 20");
        return Ok(());
    }

    println!();
    println!("📦 Products");
    println!("   ─────────────────────────────────────────────────────────────");

    for product in &products {
        let low_mark = if product.is_low_stock() { " ⚠️ LOW" } else { "" };
        println!(
            "   [{}] {} - {} {} on hand (reorder at {}){}",
            product.id,
            product.name,
            product.quantity_on_hand,
            product.unit,
            product.reorder_level,
            low_mark
        );
        println!(
            "        sell {}{:.2} / cost {}{:.2}",
            shop.currency, product.selling_price, shop.currency, product.cost_price
        );
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_products_add(
    db: &Database,
    name: &str,
    category: Option<&str>,
    quantity: f64,
    reorder_level: f64,
    unit: &str,
    selling_price: f64,
    cost_price: f64,
) -> Result<()> {
    let shop = require_shop(db)?;

    let name = validate::validate_product_name(name)?;
    if db.get_product_by_name(shop.id, &name)?.is_some() {
        anyhow::bail!("A product named '{}' already exists", name);
    }

    let product = NewProduct {
        name: name.clone(),
        category: category.map(validate::normalize_category),
        quantity_on_hand: quantity,
        reorder_level,
        unit: validate::normalize_unit(unit),
        selling_price,
        cost_price,
        discount_percent: None,
    };
    let id = db.create_product(shop.id, &product)?;

    println!("✅ Added product [{}] {}", id, name);
    Ok(())
}

pub fn cmd_products_update(
    db: &Database,
    id: i64,
    quantity: Option<f64>,
    reorder_level: Option<f64>,
    selling_price: Option<f64>,
    cost_price: Option<f64>,
) -> Result<()> {
    let existing = db
        .get_product(id)?
        .ok_or_else(|| anyhow::anyhow!("Product {} not found", id))?;

    let updated = NewProduct {
        name: existing.name.clone(),
        category: existing.category.clone(),
        quantity_on_hand: quantity.unwrap_or(existing.quantity_on_hand),
        reorder_level: reorder_level.unwrap_or(existing.reorder_level),
        unit: existing.unit.clone(),
        selling_price: selling_price.unwrap_or(existing.selling_price),
        cost_price: cost_price.unwrap_or(existing.cost_price),
        discount_percent: existing.discount_percent,
    };
    db.update_product(id, &updated)?;

    println!(
        "✅ Updated {}: {} {} on hand, sell {:.2} / cost {:.2}",
        existing.name,
        updated.quantity_on_hand,
        updated.unit,
        updated.selling_price,
        updated.cost_price
    );
    Ok(())
}

pub fn cmd_products_delete(db: &Database, id: i64) -> Result<()> {
    let product = db
        .get_product(id)?
        .ok_or_else(|| anyhow::anyhow!("Product {} not found", id))?;

    db.delete_product(id)?;
    println!("✅ Deleted product {}", product.name);
    Ok(())
}

pub fn cmd_products_import(db: &Database, file: &Path) -> Result<()> {
    let shop = require_shop(db)?;

    let reader =
        File::open(file).with_context(|| format!("Failed to open {}", file.display()))?;
    let parsed = import::parse_products_csv(reader)?;

    let mut imported = 0;
    let mut skipped = Vec::new();
    for product in &parsed.products {
        if db.get_product_by_name(shop.id, &product.name)?.is_some() {
            skipped.push(format!("{}: already exists", product.name));
            continue;
        }
        db.create_product(shop.id, product)?;
        imported += 1;
    }

    println!("✅ Imported {} products from {}", imported, file.display());

    for error in parsed.errors.iter().chain(skipped.iter()) {
        println!("   ⚠️  {}", error);
    }

    Ok(())
}

pub fn cmd_products_export(db: &Database, output: &Path) -> Result<()> {
    let shop = require_shop(db)?;
    let products = db.list_products(shop.id)?;

    let writer =
        File::create(output).with_context(|| format!("Failed to create {}", output.display()))?;
    export::write_products_csv(writer, &products)?;

    println!("✅ Exported {} products to {}", products.len(), output.display());
    Ok(())
}
