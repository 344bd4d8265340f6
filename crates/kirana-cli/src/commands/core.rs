//! Core commands (init) and shared utilities

use std::path::Path;

use anyhow::{Context, Result};

use kirana_core::db::Database;
use kirana_core::models::Shop;

/// Open the database, with a helpful error if it doesn't exist yet
pub fn open_db(db_path: &Path) -> Result<Database> {
    if !db_path.exists() {
        anyhow::bail!(
            "Database not found: {}. Run 'kirana init --name \"My Shop\"' first.",
            db_path.display()
        );
    }
    Database::new(&db_path.to_string_lossy())
        .with_context(|| format!("Failed to open database: {}", db_path.display()))
}

/// The CLI works against a single shop; fetch it or explain how to create it
pub fn require_shop(db: &Database) -> Result<Shop> {
    db.default_shop()?
        .ok_or_else(|| anyhow::anyhow!("No shop found. Run 'kirana init --name \"My Shop\"'."))
}

/// Initialize the database and create the shop profile
pub fn cmd_init(db_path: &Path, name: &str, business_type: &str, currency: &str) -> Result<()> {
    let db = Database::new(&db_path.to_string_lossy())
        .with_context(|| format!("Failed to create database: {}", db_path.display()))?;

    if let Some(existing) = db.default_shop()? {
        println!("✅ Database already initialized at {}", db_path.display());
        println!("   Shop: {} ({})", existing.name, existing.business_type);
        return Ok(());
    }

    db.create_shop(name, business_type, currency)?;

    println!("✅ Database initialized at {}", db_path.display());
    println!("   Shop: {} ({})", name, business_type);
    println!();
    println!("   Next steps:");
    println!("     kirana products add Rice --selling-price 30 --cost-price 20");
    println!("     kirana sell Rice -q 2");
    println!("     kirana insights");

    Ok(())
}
