//! Stock-level rules
//!
//! - Low stock: anything at or below its reorder level, with a restock
//!   suggestion routed to the best-rated supplier covering the product.
//! - Dead stock: in-stock products with no recorded sales.

use crate::models::Supplier;

use super::engine::{InsightRule, RuleContext};
use super::format_qty;
use super::types::{Insight, InsightKind, Priority, SuggestedAction};

/// Alerts when products fall to or below their reorder level
pub struct LowStockRule;

impl LowStockRule {
    /// Best supplier covering the product: highest reliability score, first
    /// listed on ties.
    fn best_supplier<'a>(suppliers: &'a [Supplier], product_id: i64) -> Option<&'a Supplier> {
        suppliers
            .iter()
            .filter(|s| s.supplies(product_id))
            .fold(None, |best: Option<&Supplier>, s| match best {
                Some(b) if b.reliability_score >= s.reliability_score => Some(b),
                _ => Some(s),
            })
    }
}

impl InsightRule for LowStockRule {
    fn id(&self) -> &'static str {
        "low-stock"
    }

    fn name(&self) -> &'static str {
        "Low Stock"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Insight> {
        let low: Vec<_> = ctx
            .snapshot
            .products
            .iter()
            .filter(|p| p.is_low_stock())
            .collect();

        let example = low.first()?;

        let (message, action) =
            match Self::best_supplier(&ctx.snapshot.suppliers, example.id) {
                Some(supplier) => (
                    format!(
                        "{} products are running low. Restock {} ({} {} left) from {} \
                         (reliability {}/10).",
                        low.len(),
                        example.name,
                        format_qty(example.quantity_on_hand),
                        example.unit,
                        supplier.name,
                        supplier.reliability_score
                    ),
                    SuggestedAction::Restock,
                ),
                None => (
                    format!(
                        "{} products are running low. Restock {} ({} {} left) - add a \
                         supplier to make reordering easier.",
                        low.len(),
                        example.name,
                        format_qty(example.quantity_on_hand),
                        example.unit
                    ),
                    SuggestedAction::AddSupplier,
                ),
            };

        Some(
            Insight::new(
                self.id(),
                InsightKind::Alert,
                Priority::High,
                "Low Stock Alert",
                message,
            )
            .with_action(action),
        )
    }
}

/// Flags in-stock products with zero recorded sales.
///
/// Only evaluated once the snapshot holds at least one sale: with an empty
/// sales log there is no activity window to call anything "dead".
pub struct DeadStockRule;

impl InsightRule for DeadStockRule {
    fn id(&self) -> &'static str {
        "dead-stock"
    }

    fn name(&self) -> &'static str {
        "Dead Stock"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Insight> {
        if ctx.snapshot.sales.is_empty() {
            return None;
        }

        let dead: Vec<_> = ctx
            .snapshot
            .products
            .iter()
            .filter(|p| p.quantity_on_hand > 0.0 && ctx.units_sold(&p.name) == 0.0)
            .collect();

        let example = dead.first()?;

        Some(
            Insight::new(
                self.id(),
                InsightKind::Info,
                Priority::Low,
                "Dead Stock",
                format!(
                    "{} in-stock products have no sales yet. Try a promotion on {} to get \
                     them moving.",
                    dead.len(),
                    example.name
                ),
            )
            .with_action(SuggestedAction::Promote),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::insights::test_fixtures::{product, sale, supplier};
    use crate::snapshot::Snapshot;

    #[test]
    fn test_no_low_stock_when_everything_above_reorder() {
        let snapshot = Snapshot {
            products: vec![
                product("Rice", 50.0, 10.0, 20.0, 30.0),
                product("Dal", 11.0, 10.0, 40.0, 55.0),
            ],
            ..Default::default()
        };
        let config = EngineConfig::default();
        let ctx = RuleContext::new(&snapshot, &config);

        assert!(LowStockRule.evaluate(&ctx).is_none());
    }

    #[test]
    fn test_low_stock_without_supplier_suggests_adding_one() {
        let snapshot = Snapshot {
            products: vec![product("Rice", 5.0, 10.0, 20.0, 30.0)],
            ..Default::default()
        };
        let config = EngineConfig::default();
        let ctx = RuleContext::new(&snapshot, &config);

        let insight = LowStockRule.evaluate(&ctx).unwrap();
        assert_eq!(insight.kind, InsightKind::Alert);
        assert_eq!(insight.priority, Priority::High);
        assert_eq!(insight.action, Some(SuggestedAction::AddSupplier));
        assert!(insight.message.contains("Rice"));
    }

    #[test]
    fn test_low_stock_picks_most_reliable_supplier() {
        let mut products = vec![product("Rice", 5.0, 10.0, 20.0, 30.0)];
        products[0].id = 7;

        let snapshot = Snapshot {
            products,
            suppliers: vec![
                supplier("Agro Traders", 6, vec![7]),
                supplier("Metro Wholesale", 9, vec![7]),
                supplier("City Mills", 10, vec![99]), // covers another product
            ],
            ..Default::default()
        };
        let config = EngineConfig::default();
        let ctx = RuleContext::new(&snapshot, &config);

        let insight = LowStockRule.evaluate(&ctx).unwrap();
        assert_eq!(insight.action, Some(SuggestedAction::Restock));
        assert!(insight.message.contains("Metro Wholesale"));
        assert!(!insight.message.contains("City Mills"));
    }

    #[test]
    fn test_dead_stock_requires_sales_data() {
        // Products in stock but an empty sales log: no dead-stock signal
        let snapshot = Snapshot {
            products: vec![product("Rice", 50.0, 10.0, 20.0, 30.0)],
            ..Default::default()
        };
        let config = EngineConfig::default();
        let ctx = RuleContext::new(&snapshot, &config);

        assert!(DeadStockRule.evaluate(&ctx).is_none());
    }

    #[test]
    fn test_dead_stock_flags_unsold_products() {
        let snapshot = Snapshot {
            products: vec![
                product("Rice", 50.0, 10.0, 20.0, 30.0),
                product("Incense", 30.0, 5.0, 10.0, 25.0),
            ],
            sales: vec![sale("Rice", 4.0, 30.0, Some("2026-08-01"))],
            ..Default::default()
        };
        let config = EngineConfig::default();
        let ctx = RuleContext::new(&snapshot, &config);

        let insight = DeadStockRule.evaluate(&ctx).unwrap();
        assert!(insight.message.starts_with("1 in-stock"));
        assert!(insight.message.contains("Incense"));
        assert_eq!(insight.action, Some(SuggestedAction::Promote));
    }

    #[test]
    fn test_out_of_stock_products_are_not_dead_stock() {
        let snapshot = Snapshot {
            products: vec![product("Incense", 0.0, 5.0, 10.0, 25.0)],
            sales: vec![sale("Rice", 4.0, 30.0, Some("2026-08-01"))],
            ..Default::default()
        };
        let config = EngineConfig::default();
        let ctx = RuleContext::new(&snapshot, &config);

        assert!(DeadStockRule.evaluate(&ctx).is_none());
    }
}
