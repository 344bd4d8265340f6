//! Sales-pattern rules
//!
//! - Top seller: the product with the most units sold.
//! - Profit champions: products whose margin ratio clears the configured
//!   threshold.

use super::engine::{InsightRule, RuleContext};
use super::format_qty;
use super::types::{Insight, InsightKind, Priority, SuggestedAction};

/// Highlights the best-selling product by units
pub struct TopSellerRule;

impl InsightRule for TopSellerRule {
    fn id(&self) -> &'static str {
        "top-seller"
    }

    fn name(&self) -> &'static str {
        "Top Seller"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Insight> {
        let (name, units) = ctx.top_seller().filter(|(_, units)| *units > 0.0)?;

        Some(Insight::new(
            self.id(),
            InsightKind::Success,
            Priority::Medium,
            "Top Seller",
            format!(
                "{} is your best seller with {} units sold. Use this to plan your next \
                 restocking.",
                name,
                format_qty(units)
            ),
        ))
    }
}

/// Counts products earning above the configured margin ratio.
/// Zero-cost products never qualify: the ratio is undefined there.
pub struct ProfitChampionRule;

impl InsightRule for ProfitChampionRule {
    fn id(&self) -> &'static str {
        "profit-champions"
    }

    fn name(&self) -> &'static str {
        "Profit Champions"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Insight> {
        let threshold = ctx.config.margin_ratio_threshold;
        let champions = ctx
            .snapshot
            .products
            .iter()
            .filter(|p| p.margin_ratio().is_some_and(|r| r > threshold))
            .count();

        if champions == 0 {
            return None;
        }

        Some(
            Insight::new(
                self.id(),
                InsightKind::Success,
                Priority::Medium,
                "Profit Champions",
                format!(
                    "{} products earn a margin above {:.0}%. Consider promoting them more.",
                    champions,
                    threshold * 100.0
                ),
            )
            .with_action(SuggestedAction::ReviewPricing),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::insights::test_fixtures::{product, sale};
    use crate::snapshot::Snapshot;

    #[test]
    fn test_top_seller_names_highest_units() {
        let snapshot = Snapshot {
            sales: vec![
                sale("Rice", 4.0, 30.0, Some("2026-08-01")),
                sale("Dal", 6.0, 80.0, Some("2026-08-01")),
                sale("Rice", 1.0, 30.0, None),
            ],
            ..Default::default()
        };
        let config = EngineConfig::default();
        let ctx = RuleContext::new(&snapshot, &config);

        let insight = TopSellerRule.evaluate(&ctx).unwrap();
        assert!(insight.message.starts_with("Dal"));
        assert!(insight.message.contains("6 units"));
    }

    #[test]
    fn test_top_seller_silent_without_sales() {
        let snapshot = Snapshot {
            products: vec![product("Rice", 50.0, 10.0, 20.0, 30.0)],
            ..Default::default()
        };
        let config = EngineConfig::default();
        let ctx = RuleContext::new(&snapshot, &config);

        assert!(TopSellerRule.evaluate(&ctx).is_none());
    }

    #[test]
    fn test_zero_quantity_sales_do_not_count() {
        let snapshot = Snapshot {
            sales: vec![sale("Rice", 0.0, 30.0, None)],
            ..Default::default()
        };
        let config = EngineConfig::default();
        let ctx = RuleContext::new(&snapshot, &config);

        assert!(TopSellerRule.evaluate(&ctx).is_none());
    }

    #[test]
    fn test_profit_champion_counts_high_margin_products() {
        let snapshot = Snapshot {
            products: vec![
                product("Rice", 50.0, 10.0, 20.0, 30.0),  // ratio 0.5
                product("Dal", 20.0, 10.0, 40.0, 44.0),   // ratio 0.1
                product("Ghee", 10.0, 5.0, 100.0, 150.0), // ratio 0.5
            ],
            ..Default::default()
        };
        let config = EngineConfig::default();
        let ctx = RuleContext::new(&snapshot, &config);

        let insight = ProfitChampionRule.evaluate(&ctx).unwrap();
        assert!(insight.message.starts_with("2 products"));
        assert_eq!(insight.action, Some(SuggestedAction::ReviewPricing));
    }

    #[test]
    fn test_zero_cost_price_never_qualifies() {
        let snapshot = Snapshot {
            products: vec![product("Freebie", 10.0, 5.0, 0.0, 500.0)],
            ..Default::default()
        };
        let config = EngineConfig::default();
        let ctx = RuleContext::new(&snapshot, &config);

        assert!(ProfitChampionRule.evaluate(&ctx).is_none());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // Exactly at the threshold does not qualify
        let snapshot = Snapshot {
            products: vec![product("Rice", 50.0, 10.0, 100.0, 130.0)],
            ..Default::default()
        };
        let config = EngineConfig::default();
        let ctx = RuleContext::new(&snapshot, &config);

        assert!(ProfitChampionRule.evaluate(&ctx).is_none());
    }
}
