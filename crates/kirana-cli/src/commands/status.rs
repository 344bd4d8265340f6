//! Status-related command implementations (status, dashboard, reset)

use std::path::Path;

use anyhow::{Context, Result};

use kirana_core::db::Database;

use super::{open_db, require_shop};

pub fn cmd_status(db_path: &Path) -> Result<()> {
    use std::fs;

    println!();
    println!("📊 Kirana Status");
    println!("   ─────────────────────────────────────────────────────────────");

    // Database path
    println!("   Database: {}", db_path.display());

    // Check if database file exists and get size
    if db_path.exists() {
        if let Ok(metadata) = fs::metadata(db_path) {
            let size_kb = metadata.len() as f64 / 1024.0;
            if size_kb < 1024.0 {
                println!("   Size: {:.1} KB", size_kb);
            } else {
                println!("   Size: {:.1} MB", size_kb / 1024.0);
            }
        }
    } else {
        println!("   Size: (database not initialized)");
    }

    // Try to open the database and show stats
    if db_path.exists() {
        match open_db(db_path) {
            Ok(db) => {
                if let Ok(Some(shop)) = db.default_shop() {
                    if let Ok(stats) = db.dashboard_stats(shop.id) {
                        println!();
                        println!("   Shop: {} ({})", shop.name, shop.business_type);
                        println!("   Products: {}", stats.product_count);
                        println!("   Sales: {}", stats.sale_count);
                        println!("   Suppliers: {}", stats.supplier_count);
                    }
                } else {
                    println!();
                    println!("   No shop created yet. Run 'kirana init --name \"My Shop\"'.");
                }
            }
            Err(e) => {
                println!();
                println!("   ❌ Error opening database: {}", e);
            }
        }
    }

    println!();
    Ok(())
}

pub fn cmd_dashboard(db: &Database) -> Result<()> {
    let shop = require_shop(db)?;
    let stats = db.dashboard_stats(shop.id)?;

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│          🏪 Kirana Dashboard            │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  {} ({})", shop.name, shop.business_type);
    println!();
    println!("  Products:        {}", stats.product_count);
    if stats.low_stock_count > 0 {
        println!("  ⚠️  Low stock:     {}", stats.low_stock_count);
    }
    println!("  Suppliers:       {}", stats.supplier_count);
    println!();
    println!("  💰 Revenue (all time): {}{:.2}", shop.currency, stats.total_revenue);
    println!("  💰 Revenue (today):    {}{:.2}", shop.currency, stats.today_revenue);
    println!("  💸 Expenses:           {}{:.2}", shop.currency, stats.total_expenses);
    println!();

    if stats.low_stock_count > 0 {
        println!("  Run 'kirana insights' to see what needs attention.");
    }

    Ok(())
}

/// Reset the database (soft or hard)
pub fn cmd_reset(db_path: &Path, soft: bool, yes: bool) -> Result<()> {
    use std::fs;
    use std::io::{self, Write};

    if soft {
        // Soft reset: clear the ledgers but keep config
        if !db_path.exists() {
            anyhow::bail!("Database not found: {}", db_path.display());
        }

        if !yes {
            print!("⚠️  This will delete all sales and expenses.\n");
            print!("   Your shop, products, and suppliers will be preserved.\n\n");
            print!("Are you sure? [y/N] ");
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Cancelled.");
                return Ok(());
            }
        }

        let db = open_db(db_path)?;
        db.soft_reset()?;

        println!("✅ Database soft reset complete.");
        println!("   Cleared: sales, expenses");
        println!("   Preserved: shop, products, suppliers");
    } else {
        // Hard reset: delete the database file
        if !yes {
            print!("⚠️  This will DELETE the entire database and start fresh.\n");
            print!("   All data including your shop profile will be lost.\n\n");
            print!("Are you sure? [y/N] ");
            io::stdout().flush()?;

            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Cancelled.");
                return Ok(());
            }
        }

        if db_path.exists() {
            fs::remove_file(db_path)
                .with_context(|| format!("Failed to delete database: {}", db_path.display()))?;
            // Also remove WAL and journal files if present
            let wal_path = db_path.with_extension("db-wal");
            let shm_path = db_path.with_extension("db-shm");
            let _ = fs::remove_file(wal_path);
            let _ = fs::remove_file(shm_path);
        }

        println!("✅ Database deleted.");
        println!("   Run 'kirana init --name \"My Shop\"' to start again.");
    }

    Ok(())
}
