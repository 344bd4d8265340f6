//! Expense rules
//!
//! The ratio, dominant-category, and savings rules share an
//! insufficient-sample guard: below `min_expense_sample` records, spending
//! data is too thin to say anything about patterns. The cold-start rule is
//! the complement, nudging shops with no expense log at all.

use super::engine::{InsightRule, RuleContext};
use super::types::{Insight, InsightKind, Priority, SuggestedAction};

/// Alerts when expenses eat too much of revenue
pub struct ExpenseRatioRule;

impl InsightRule for ExpenseRatioRule {
    fn id(&self) -> &'static str {
        "expense-ratio"
    }

    fn name(&self) -> &'static str {
        "Expense Ratio"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Insight> {
        if !ctx.has_expense_sample() || ctx.total_revenue <= 0.0 {
            return None;
        }

        let ratio = ctx.total_expenses / ctx.total_revenue;
        if ratio <= ctx.config.expense_ratio_threshold {
            return None;
        }

        Some(
            Insight::new(
                self.id(),
                InsightKind::Alert,
                Priority::High,
                "Expense Alert",
                format!(
                    "Your expenses are {:.0}% of revenue - above the {:.0}% comfort line. \
                     Review where the money is going.",
                    ratio * 100.0,
                    ctx.config.expense_ratio_threshold * 100.0
                ),
            )
            .with_action(SuggestedAction::ReviewExpenses),
        )
    }
}

/// Points out when one category dominates total spending
pub struct DominantCategoryRule;

impl InsightRule for DominantCategoryRule {
    fn id(&self) -> &'static str {
        "dominant-category"
    }

    fn name(&self) -> &'static str {
        "Dominant Category"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Insight> {
        if !ctx.has_expense_sample() || ctx.total_expenses <= 0.0 {
            return None;
        }

        let (category, amount) = ctx.top_expense_category()?;
        let share = amount / ctx.total_expenses;
        if share <= ctx.config.dominant_category_share {
            return None;
        }

        Some(Insight::new(
            self.id(),
            InsightKind::Info,
            Priority::Low,
            "Spending Pattern",
            format!(
                "{} makes up {:.0}% of your expenses.",
                category.label(),
                share * 100.0
            ),
        ))
    }
}

/// Quantifies what trimming the top category would free up
pub struct SavingsOpportunityRule;

impl InsightRule for SavingsOpportunityRule {
    fn id(&self) -> &'static str {
        "savings-opportunity"
    }

    fn name(&self) -> &'static str {
        "Savings Opportunity"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Insight> {
        if !ctx.has_expense_sample() {
            return None;
        }

        let (category, amount) = ctx.top_expense_category()?;
        let saving = amount * ctx.config.savings_cut;
        if saving <= ctx.config.savings_floor {
            return None;
        }

        Some(
            Insight::new(
                self.id(),
                InsightKind::Success,
                Priority::Medium,
                "Savings Opportunity",
                format!(
                    "Cutting {} by {:.0}% would free up ₹{:.0} for the business.",
                    category.label(),
                    ctx.config.savings_cut * 100.0,
                    saving
                ),
            )
            .with_action(SuggestedAction::ReviewExpenses),
        )
    }
}

/// Nudges shops that have not logged any expenses yet
pub struct ExpenseColdStartRule;

impl InsightRule for ExpenseColdStartRule {
    fn id(&self) -> &'static str {
        "expense-cold-start"
    }

    fn name(&self) -> &'static str {
        "Expense Cold Start"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>) -> Option<Insight> {
        if !ctx.snapshot.expenses.is_empty() {
            return None;
        }

        Some(
            Insight::new(
                self.id(),
                InsightKind::Info,
                Priority::Low,
                "Track Your Expenses",
                "Start recording daily expenses (rent, electricity, wages) to unlock \
                 profit insights.",
            )
            .with_action(SuggestedAction::TrackExpenses),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::insights::test_fixtures::{expense, sale};
    use crate::models::ExpenseCategory;
    use crate::snapshot::Snapshot;

    fn expenses(category: ExpenseCategory, amount: f64, count: usize) -> Vec<crate::models::Expense> {
        (0..count).map(|_| expense(category, amount)).collect()
    }

    #[test]
    fn test_ratio_rule_needs_sample() {
        // 6 expenses with a terrible ratio: still silent
        let snapshot = Snapshot {
            sales: vec![sale("Rice", 1.0, 100.0, None)],
            expenses: expenses(ExpenseCategory::Rent, 1000.0, 6),
            ..Default::default()
        };
        let config = EngineConfig::default();
        let ctx = RuleContext::new(&snapshot, &config);

        assert!(ExpenseRatioRule.evaluate(&ctx).is_none());
    }

    #[test]
    fn test_ratio_rule_needs_revenue() {
        // No revenue: the denominator is zero, stay silent
        let snapshot = Snapshot {
            expenses: expenses(ExpenseCategory::Rent, 1000.0, 8),
            ..Default::default()
        };
        let config = EngineConfig::default();
        let ctx = RuleContext::new(&snapshot, &config);

        assert!(ExpenseRatioRule.evaluate(&ctx).is_none());
    }

    #[test]
    fn test_ratio_rule_fires_above_threshold() {
        let snapshot = Snapshot {
            sales: vec![sale("Rice", 10.0, 100.0, None)], // 1000 revenue
            expenses: expenses(ExpenseCategory::Rent, 100.0, 8), // 800 expenses
            ..Default::default()
        };
        let config = EngineConfig::default();
        let ctx = RuleContext::new(&snapshot, &config);

        let insight = ExpenseRatioRule.evaluate(&ctx).unwrap();
        assert_eq!(insight.kind, InsightKind::Alert);
        assert!(insight.message.contains("80%"));
    }

    #[test]
    fn test_dominant_category_fires_above_half() {
        let mut all = expenses(ExpenseCategory::Rent, 600.0, 6);
        all.extend(expenses(ExpenseCategory::Transport, 100.0, 4));

        let snapshot = Snapshot {
            expenses: all,
            ..Default::default()
        };
        let config = EngineConfig::default();
        let ctx = RuleContext::new(&snapshot, &config);

        // Rent: 3600 of 4000 = 90%
        let insight = DominantCategoryRule.evaluate(&ctx).unwrap();
        assert!(insight.message.contains("Rent"));
        assert!(insight.message.contains("90%"));
    }

    #[test]
    fn test_dominant_category_silent_on_even_split() {
        let mut all = expenses(ExpenseCategory::Rent, 100.0, 4);
        all.extend(expenses(ExpenseCategory::Transport, 100.0, 4));

        let snapshot = Snapshot {
            expenses: all,
            ..Default::default()
        };
        let config = EngineConfig::default();
        let ctx = RuleContext::new(&snapshot, &config);

        // Both at exactly 50%: not dominant
        assert!(DominantCategoryRule.evaluate(&ctx).is_none());
    }

    #[test]
    fn test_savings_opportunity_needs_meaningful_amount() {
        // Top category 900: a 10% cut (90) sits under the 100 floor
        let snapshot = Snapshot {
            expenses: expenses(ExpenseCategory::Rent, 100.0, 9),
            ..Default::default()
        };
        let config = EngineConfig::default();
        let ctx = RuleContext::new(&snapshot, &config);

        assert!(SavingsOpportunityRule.evaluate(&ctx).is_none());
    }

    #[test]
    fn test_savings_opportunity_quantifies_cut() {
        let snapshot = Snapshot {
            expenses: expenses(ExpenseCategory::StaffWages, 500.0, 8), // 4000 total
            ..Default::default()
        };
        let config = EngineConfig::default();
        let ctx = RuleContext::new(&snapshot, &config);

        let insight = SavingsOpportunityRule.evaluate(&ctx).unwrap();
        assert!(insight.message.contains("Staff Wages"));
        assert!(insight.message.contains("₹400"));
    }

    #[test]
    fn test_cold_start_only_when_no_expenses() {
        let config = EngineConfig::default();

        let empty = Snapshot::default();
        let ctx = RuleContext::new(&empty, &config);
        let insight = ExpenseColdStartRule.evaluate(&ctx).unwrap();
        assert_eq!(insight.action, Some(SuggestedAction::TrackExpenses));

        let some = Snapshot {
            expenses: vec![expense(ExpenseCategory::Rent, 100.0)],
            ..Default::default()
        };
        let ctx = RuleContext::new(&some, &config);
        assert!(ExpenseColdStartRule.evaluate(&ctx).is_none());
    }
}
