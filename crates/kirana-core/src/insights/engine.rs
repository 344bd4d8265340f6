//! Insight engine - ordered rule evaluation over shop snapshots

use std::collections::HashMap;

use crate::config::EngineConfig;
use crate::models::ExpenseCategory;
use crate::snapshot::Snapshot;

use super::types::{Insight, InsightKind, Priority, SuggestedAction};
use super::{
    DeadStockRule, DominantCategoryRule, ExpenseColdStartRule, ExpenseRatioRule, LowStockRule,
    ProfitChampionRule, SavingsOpportunityRule, TopSellerRule,
};

/// Context handed to each rule: the snapshot plus aggregates that several
/// rules share, computed once per run.
pub struct RuleContext<'a> {
    pub snapshot: &'a Snapshot,
    pub config: &'a EngineConfig,
    /// Units sold per product name
    units_sold: HashMap<&'a str, f64>,
    /// Sum of sale revenue across the snapshot
    pub total_revenue: f64,
    /// Sum of expense amounts across the snapshot
    pub total_expenses: f64,
    expenses_by_category: HashMap<ExpenseCategory, f64>,
}

impl<'a> RuleContext<'a> {
    pub fn new(snapshot: &'a Snapshot, config: &'a EngineConfig) -> Self {
        let mut units_sold: HashMap<&str, f64> = HashMap::new();
        let mut total_revenue = 0.0;
        for sale in &snapshot.sales {
            *units_sold.entry(sale.product_name.as_str()).or_insert(0.0) += sale.quantity;
            total_revenue += sale.revenue;
        }

        let mut expenses_by_category: HashMap<ExpenseCategory, f64> = HashMap::new();
        let mut total_expenses = 0.0;
        for expense in &snapshot.expenses {
            *expenses_by_category.entry(expense.category).or_insert(0.0) += expense.amount;
            total_expenses += expense.amount;
        }

        Self {
            snapshot,
            config,
            units_sold,
            total_revenue,
            total_expenses,
            expenses_by_category,
        }
    }

    /// Units sold for a product name (0 when never sold)
    pub fn units_sold(&self, product_name: &str) -> f64 {
        self.units_sold.get(product_name).copied().unwrap_or(0.0)
    }

    /// Best-selling product by units. Ties break toward the product whose
    /// sales appear first in the snapshot, keeping runs deterministic.
    pub fn top_seller(&self) -> Option<(&'a str, f64)> {
        let mut best: Option<(&str, f64)> = None;
        let mut seen: Vec<&str> = Vec::new();
        for sale in &self.snapshot.sales {
            let name = sale.product_name.as_str();
            if seen.contains(&name) {
                continue;
            }
            seen.push(name);
            let units = self.units_sold(name);
            if best.map_or(true, |(_, top)| units > top) {
                best = Some((name, units));
            }
        }
        best
    }

    /// Amount spent in a category (0 when none recorded)
    pub fn category_total(&self, category: ExpenseCategory) -> f64 {
        self.expenses_by_category
            .get(&category)
            .copied()
            .unwrap_or(0.0)
    }

    /// Largest expense category. Iterates the fixed category list so ties
    /// resolve the same way on every run.
    pub fn top_expense_category(&self) -> Option<(ExpenseCategory, f64)> {
        let mut best: Option<(ExpenseCategory, f64)> = None;
        for category in ExpenseCategory::ALL {
            let amount = self.category_total(category);
            if amount > 0.0 && best.map_or(true, |(_, top)| amount > top) {
                best = Some((category, amount));
            }
        }
        best
    }

    /// Expense rules only run once enough records exist to say anything
    /// meaningful about spending patterns.
    pub fn has_expense_sample(&self) -> bool {
        self.snapshot.expenses.len() >= self.config.min_expense_sample
    }
}

/// A business rule. Each evaluation emits at most one insight.
pub trait InsightRule: Send + Sync {
    /// Stable identifier, used as the insight key
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Insight>;
}

/// The insight engine: a fixed-order list of rules over a snapshot.
///
/// Output preserves registration order rather than sorting by priority,
/// keeping immediately actionable alerts (stock, expenses) ahead of
/// exploratory ones (patterns, tips).
pub struct InsightEngine {
    config: EngineConfig,
    rules: Vec<Box<dyn InsightRule>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Engine with the built-in rule set and default thresholds
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Engine with the built-in rule set and custom thresholds
    pub fn with_config(config: EngineConfig) -> Self {
        let mut engine = Self {
            config,
            rules: vec![],
        };

        // Registration order is the output order
        engine.register(Box::new(LowStockRule));
        engine.register(Box::new(TopSellerRule));
        engine.register(Box::new(DeadStockRule));
        engine.register(Box::new(ProfitChampionRule));
        engine.register(Box::new(ExpenseRatioRule));
        engine.register(Box::new(DominantCategoryRule));
        engine.register(Box::new(SavingsOpportunityRule));
        engine.register(Box::new(ExpenseColdStartRule));

        engine
    }

    pub fn register(&mut self, rule: Box<dyn InsightRule>) {
        self.rules.push(rule);
    }

    /// Ids of the registered rules, in evaluation order
    pub fn rule_ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// Evaluate every rule against the snapshot.
    ///
    /// Pure: the snapshot is never mutated, and identical snapshots produce
    /// identical insight lists. Always returns at least one insight.
    pub fn generate(&self, snapshot: &Snapshot) -> Vec<Insight> {
        let ctx = RuleContext::new(snapshot, &self.config);
        let mut insights = Vec::new();

        for rule in &self.rules {
            match rule.evaluate(&ctx) {
                Some(insight) => {
                    tracing::debug!(rule = rule.id(), kind = %insight.kind, "Rule fired");
                    insights.push(insight);
                }
                None => {
                    tracing::trace!(rule = rule.id(), "Rule did not fire");
                }
            }
        }

        if insights.is_empty() {
            insights.push(
                Insight::new(
                    "getting-started",
                    InsightKind::Info,
                    Priority::Low,
                    "No Insights Yet",
                    "Record your first sale to start seeing business insights here.",
                )
                .with_action(SuggestedAction::RecordSale),
            );
        }

        insights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::test_fixtures::{expense, product, sale};
    use crate::models::ExpenseCategory;

    #[test]
    fn test_built_in_rule_order() {
        let engine = InsightEngine::new();
        assert_eq!(
            engine.rule_ids(),
            vec![
                "low-stock",
                "top-seller",
                "dead-stock",
                "profit-champions",
                "expense-ratio",
                "dominant-category",
                "savings-opportunity",
                "expense-cold-start",
            ]
        );
    }

    #[test]
    fn test_empty_snapshot_gets_fallback() {
        let engine = InsightEngine::new();
        let insights = engine.generate(&Snapshot::default());

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].key, "getting-started");
        assert_eq!(insights[0].kind, InsightKind::Info);
        assert_eq!(insights[0].action, Some(SuggestedAction::RecordSale));
    }

    #[test]
    fn test_generate_never_empty() {
        let engine = InsightEngine::new();

        // A healthy snapshot that fires none of the alert rules
        let snapshot = Snapshot {
            products: vec![product("Rice", 50.0, 10.0, 30.0, 31.0)],
            sales: vec![sale("Rice", 2.0, 31.0, Some("2026-08-01"))],
            ..Default::default()
        };

        assert!(!engine.generate(&snapshot).is_empty());
    }

    #[test]
    fn test_generate_is_idempotent() {
        let engine = InsightEngine::new();
        let snapshot = Snapshot {
            products: vec![
                product("Rice", 5.0, 10.0, 20.0, 30.0),
                product("Dal", 40.0, 10.0, 50.0, 80.0),
            ],
            sales: vec![
                sale("Dal", 3.0, 80.0, Some("2026-08-01")),
                sale("Dal", 2.0, 80.0, None),
            ],
            expenses: (0..8)
                .map(|_| expense(ExpenseCategory::Rent, 500.0))
                .collect(),
            ..Default::default()
        };

        let first = engine.generate(&snapshot);
        let second = engine.generate(&snapshot);
        assert_eq!(first, second);
    }

    #[test]
    fn test_insights_follow_rule_order_not_priority() {
        let engine = InsightEngine::new();

        // Fires top-seller (medium) before expense-ratio (high)
        let snapshot = Snapshot {
            products: vec![product("Rice", 50.0, 10.0, 20.0, 30.0)],
            sales: vec![sale("Rice", 10.0, 30.0, Some("2026-08-01"))],
            expenses: (0..7)
                .map(|_| expense(ExpenseCategory::Rent, 100.0))
                .collect(),
            ..Default::default()
        };

        let insights = engine.generate(&snapshot);
        let keys: Vec<&str> = insights.iter().map(|i| i.key.as_str()).collect();

        let top_seller_pos = keys.iter().position(|k| *k == "top-seller").unwrap();
        let ratio_pos = keys.iter().position(|k| *k == "expense-ratio").unwrap();
        assert!(top_seller_pos < ratio_pos);
        assert_eq!(insights[top_seller_pos].priority, Priority::Medium);
        assert_eq!(insights[ratio_pos].priority, Priority::High);
    }

    /// Spec scenario: one low-stock product with a 0.5 margin ratio, no
    /// sales, no expenses.
    #[test]
    fn test_scenario_single_low_stock_product() {
        let engine = InsightEngine::new();
        let snapshot = Snapshot {
            products: vec![product("Rice", 5.0, 10.0, 20.0, 30.0)],
            ..Default::default()
        };

        let insights = engine.generate(&snapshot);
        let keys: Vec<&str> = insights.iter().map(|i| i.key.as_str()).collect();

        assert_eq!(
            keys,
            vec!["low-stock", "profit-champions", "expense-cold-start"]
        );

        // No supplier covers Rice, so the suggestion is to add one
        assert_eq!(insights[0].action, Some(SuggestedAction::AddSupplier));
        assert!(insights[0].message.contains("Rice"));
    }

    /// Spec scenario: 10 rent expenses totaling 10,000 against 5,000 of
    /// revenue fires all three expense rules.
    #[test]
    fn test_scenario_rent_dominates_expenses() {
        let engine = InsightEngine::new();
        let snapshot = Snapshot {
            products: vec![product("Rice", 50.0, 10.0, 20.0, 21.0)],
            sales: vec![sale("Rice", 250.0, 20.0, Some("2026-08-01"))],
            expenses: (0..10)
                .map(|_| expense(ExpenseCategory::Rent, 1000.0))
                .collect(),
            ..Default::default()
        };

        let insights = engine.generate(&snapshot);
        let keys: Vec<&str> = insights.iter().map(|i| i.key.as_str()).collect();

        assert!(keys.contains(&"expense-ratio"));
        assert!(keys.contains(&"dominant-category"));
        assert!(keys.contains(&"savings-opportunity"));

        let ratio = insights.iter().find(|i| i.key == "expense-ratio").unwrap();
        assert_eq!(ratio.kind, InsightKind::Alert);
        assert!(ratio.message.contains("200"));

        let dominant = insights
            .iter()
            .find(|i| i.key == "dominant-category")
            .unwrap();
        assert!(dominant.message.contains("Rent"));
        assert!(dominant.message.contains("100"));

        let savings = insights
            .iter()
            .find(|i| i.key == "savings-opportunity")
            .unwrap();
        assert!(savings.message.contains("1000"));
    }

    #[test]
    fn test_top_seller_tie_breaks_by_first_seen() {
        let config = EngineConfig::default();
        let snapshot = Snapshot {
            sales: vec![
                sale("Dal", 5.0, 80.0, None),
                sale("Rice", 5.0, 30.0, None),
            ],
            ..Default::default()
        };

        let ctx = RuleContext::new(&snapshot, &config);
        assert_eq!(ctx.top_seller(), Some(("Dal", 5.0)));
    }
}
