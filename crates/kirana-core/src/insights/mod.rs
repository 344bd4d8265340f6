//! Insight Engine - rule-based business recommendations
//!
//! Evaluates a fixed, ordered list of rules over a shop [`Snapshot`] and
//! returns alerts, opportunities, and tips. Each rule emits zero or one
//! insight; the output keeps rule order (actionable stock/expense alerts
//! first, exploratory patterns after) and is never empty thanks to a
//! fallback nudge.
//!
//! ## Rules, in evaluation order
//!
//! 1. Low stock (supplier-aware restock suggestion)
//! 2. Top seller
//! 3. Dead stock
//! 4. Profit champions
//! 5. Expense ratio
//! 6. Dominant expense category
//! 7. Savings opportunity
//! 8. Expense cold start
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kirana_core::insights::InsightEngine;
//!
//! let engine = InsightEngine::new();
//! let insights = engine.generate(&snapshot);
//! ```
//!
//! [`Snapshot`]: crate::snapshot::Snapshot

pub mod engine;
pub mod expenses;
pub mod sales;
pub mod stock;
pub mod types;

pub use engine::{InsightEngine, InsightRule, RuleContext};
pub use expenses::{
    DominantCategoryRule, ExpenseColdStartRule, ExpenseRatioRule, SavingsOpportunityRule,
};
pub use sales::{ProfitChampionRule, TopSellerRule};
pub use stock::{DeadStockRule, LowStockRule};
pub use types::{Insight, InsightKind, Priority, SuggestedAction};

/// Format a quantity without a trailing ".0" for whole numbers.
/// Fractional quantities (loose kg, litres) keep one decimal.
pub(crate) fn format_qty(qty: f64) -> String {
    if qty.fract() == 0.0 {
        format!("{:.0}", qty)
    } else {
        format!("{:.1}", qty)
    }
}

/// Shared builders for rule tests
#[cfg(test)]
pub(crate) mod test_fixtures {
    use chrono::{NaiveDate, Utc};

    use crate::models::{Expense, ExpenseCategory, Product, SaleTransaction, Supplier};

    pub fn product(name: &str, qty: f64, reorder: f64, cost: f64, sell: f64) -> Product {
        Product {
            id: 1,
            shop_id: 1,
            name: name.to_string(),
            category: None,
            quantity_on_hand: qty,
            reorder_level: reorder,
            unit: "pcs".to_string(),
            selling_price: sell,
            cost_price: cost,
            discount_percent: None,
            created_at: Utc::now(),
        }
    }

    pub fn sale(product_name: &str, qty: f64, price: f64, date: Option<&str>) -> SaleTransaction {
        SaleTransaction {
            id: 1,
            shop_id: 1,
            product_id: None,
            product_name: product_name.to_string(),
            quantity: qty,
            unit_price: price,
            revenue: qty * price,
            date: date.and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
            created_at: Utc::now(),
        }
    }

    pub fn expense(category: ExpenseCategory, amount: f64) -> Expense {
        Expense {
            id: 1,
            shop_id: 1,
            category,
            amount,
            description: None,
            date: None,
            created_at: Utc::now(),
        }
    }

    pub fn supplier(name: &str, reliability: u8, product_ids: Vec<i64>) -> Supplier {
        Supplier {
            id: 1,
            shop_id: 1,
            name: name.to_string(),
            phone: None,
            email: None,
            reliability_score: reliability,
            quality_rating: 5,
            average_delivery_days: Some(3),
            product_ids,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_fixture_sale_revenue() {
        assert_eq!(sale("Rice", 2.0, 30.0, None).revenue, 60.0);
    }
}
