//! Insight and chat command implementations

use std::path::Path;

use anyhow::Result;

use kirana_core::db::Database;
use kirana_core::insights::{InsightEngine, InsightKind};
use kirana_core::snapshot::SnapshotStore;
use kirana_core::{Assistant, EngineConfig, ShopContext};

use super::require_shop;

pub fn cmd_insights(db: &Database, config_path: Option<&Path>) -> Result<()> {
    let shop = require_shop(db)?;

    let config = EngineConfig::load_or_default(config_path)?;
    let engine = InsightEngine::with_config(config);

    let snapshot = db.load_snapshot(shop.id)?;
    let insights = engine.generate(&snapshot);

    println!();
    println!("💡 Insights for {}", shop.name);
    println!("   ─────────────────────────────────────────────────────────────");

    for insight in &insights {
        let icon = match insight.kind {
            InsightKind::Alert => "⚠️ ",
            InsightKind::Success => "✅",
            InsightKind::Info => "ℹ️ ",
        };

        println!();
        println!("   {} {} [{}]", icon, insight.title, insight.priority);
        println!("      {}", insight.message);
        if let Some(action) = insight.action {
            println!("      → {}", action);
        }
    }

    println!();
    Ok(())
}

pub fn cmd_chat(db: &Database, message: &str) -> Result<()> {
    let shop = require_shop(db)?;

    let ctx = ShopContext {
        shop_name: shop.name.clone(),
        business_type: shop.business_type.clone(),
        currency: shop.currency.clone(),
    };
    let snapshot = db.load_snapshot(shop.id)?;

    let reply = Assistant::new().respond(message, &ctx, &snapshot.products, &snapshot.sales);

    println!();
    println!("🤖 {}", reply.message);

    if !reply.suggestions.is_empty() {
        println!();
        println!("   Try asking:");
        for suggestion in &reply.suggestions {
            println!("     • {}", suggestion);
        }
    }

    println!();
    Ok(())
}
