//! Chat assistant - keyword-matched answers over live shop data
//!
//! Stateless by design: every call is a pure function of the utterance and
//! the snapshot slices passed in. There is no transcript memory and no
//! multi-turn context; the UI keeps the chat history, the assistant does
//! not.

pub mod intent;

pub use intent::Intent;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{Product, SaleTransaction};

/// Shop identity shown in replies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopContext {
    pub shop_name: String,
    pub business_type: String,
    pub currency: String,
}

/// A reply plus suggestion chips the UI can offer as follow-ups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub message: String,
    pub suggestions: Vec<String>,
}

/// The assistant itself. Carries no state; a single instance can serve any
/// number of concurrent callers.
#[derive(Debug, Default)]
pub struct Assistant;

impl Assistant {
    pub fn new() -> Self {
        Self
    }

    /// Answer an utterance using today's local date for "today" questions.
    pub fn respond(
        &self,
        utterance: &str,
        ctx: &ShopContext,
        products: &[Product],
        sales: &[SaleTransaction],
    ) -> ChatReply {
        self.respond_at(utterance, ctx, products, sales, Local::now().date_naive())
    }

    /// Date-injected variant so tests control what "today" means.
    pub fn respond_at(
        &self,
        utterance: &str,
        ctx: &ShopContext,
        products: &[Product],
        sales: &[SaleTransaction],
        today: NaiveDate,
    ) -> ChatReply {
        match Intent::detect(utterance) {
            Intent::Sales => self.sales_reply(utterance, ctx, sales, today),
            Intent::Inventory => self.inventory_reply(utterance, products, sales),
            Intent::Notifications => ChatReply {
                message: "The notification feed covers low stock alerts, your daily sales \
                          summary, and profit opportunities. Check the insights view for \
                          the full list."
                    .to_string(),
                suggestions: vec!["Check stock".to_string(), "Show sales".to_string()],
            },
            Intent::Greeting => ChatReply {
                message: format!(
                    "Hello! I'm the assistant for {}. Ask me about your sales, inventory, \
                     or suppliers - I answer from your shop's live data.",
                    ctx.shop_name
                ),
                suggestions: vec![
                    "How much did I sell today?".to_string(),
                    "What is low stock?".to_string(),
                    "Best selling product?".to_string(),
                ],
            },
            Intent::Fallback => ChatReply {
                message: "I can help with that! Try asking about \"sales today\", \
                          \"low stock items\", \"best selling product\", or \"total revenue\"."
                    .to_string(),
                suggestions: vec![
                    "Sales today".to_string(),
                    "Inventory status".to_string(),
                    "Total revenue".to_string(),
                ],
            },
        }
    }

    fn sales_reply(
        &self,
        utterance: &str,
        ctx: &ShopContext,
        sales: &[SaleTransaction],
        today: NaiveDate,
    ) -> ChatReply {
        // Sales without a date count toward all-time totals but never
        // toward "today"
        let today_sales: Vec<_> = sales.iter().filter(|s| s.date == Some(today)).collect();
        let today_revenue: f64 = today_sales.iter().map(|s| s.revenue).sum();
        let today_units: f64 = today_sales.iter().map(|s| s.quantity).sum();

        let message = if utterance.to_lowercase().contains("today") {
            format!(
                "Today you sold {} items for {}{:.2} in revenue. Keep it up!",
                trim_qty(today_units),
                ctx.currency,
                today_revenue
            )
        } else {
            let all_revenue: f64 = sales.iter().map(|s| s.revenue).sum();
            format!(
                "All-time revenue: {}{:.2}. Today: {}{:.2}. The analytics view has the \
                 full breakdown.",
                ctx.currency, all_revenue, ctx.currency, today_revenue
            )
        };

        ChatReply {
            message,
            suggestions: vec![
                "Show me today's sales".to_string(),
                "Best selling product?".to_string(),
            ],
        }
    }

    fn inventory_reply(
        &self,
        utterance: &str,
        products: &[Product],
        sales: &[SaleTransaction],
    ) -> ChatReply {
        let lower = utterance.to_lowercase();

        if lower.contains("low") || lower.contains("alert") {
            let low: Vec<_> = products.iter().filter(|p| p.is_low_stock()).collect();
            let message = match low.first() {
                Some(example) => format!(
                    "{} products are running low. Example: {} ({} {} left). The insights \
                     view has the full list.",
                    low.len(),
                    example.name,
                    trim_qty(example.quantity_on_hand),
                    example.unit
                ),
                None => "No products are below their reorder level. Everything looks good!"
                    .to_string(),
            };
            return ChatReply {
                message,
                suggestions: vec!["Reorder products".to_string(), "View inventory".to_string()],
            };
        }

        if lower.contains("best") || lower.contains("top") {
            let message = match top_seller(sales) {
                Some((name, units)) => format!(
                    "Your top product is {} with {} units sold. Use that to plan your \
                     next restocking.",
                    name,
                    trim_qty(units)
                ),
                None => "I need more sales data to determine your best seller. Start \
                         recording transactions!"
                    .to_string(),
            };
            return ChatReply {
                message,
                suggestions: vec!["Show revenue".to_string(), "Low stock items".to_string()],
            };
        }

        ChatReply {
            message: format!(
                "You currently have {} unique products in your inventory.",
                products.len()
            ),
            suggestions: vec![
                "What is dead stock?".to_string(),
                "Add new product".to_string(),
            ],
        }
    }
}

/// Best seller by units, first-seen on ties (same policy as the engine)
fn top_seller(sales: &[SaleTransaction]) -> Option<(&str, f64)> {
    let mut best: Option<(&str, f64)> = None;
    for sale in sales {
        let name = sale.product_name.as_str();
        let units: f64 = sales
            .iter()
            .filter(|s| s.product_name == name)
            .map(|s| s.quantity)
            .sum();
        if units > 0.0 && best.map_or(true, |(_, top)| units > top) {
            best = Some((name, units));
        }
    }
    best
}

fn trim_qty(qty: f64) -> String {
    if qty.fract() == 0.0 {
        format!("{:.0}", qty)
    } else {
        format!("{:.1}", qty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::test_fixtures::{product, sale};

    fn ctx() -> ShopContext {
        ShopContext {
            shop_name: "Sharma General Store".to_string(),
            business_type: "Grocery".to_string(),
            currency: "₹".to_string(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 5).unwrap()
    }

    #[test]
    fn test_today_sales_scoped_to_date() {
        let sales = vec![
            sale("Rice", 2.0, 30.0, Some("2026-08-05")),
            sale("Rice", 5.0, 30.0, Some("2026-08-04")),
            sale("Dal", 1.0, 80.0, None), // no date: excluded from today
        ];

        let reply = Assistant::new().respond_at("sales today?", &ctx(), &[], &sales, today());
        assert!(reply.message.contains("2 items"));
        assert!(reply.message.contains("₹60.00"));
    }

    #[test]
    fn test_all_time_revenue_includes_undated_sales() {
        let sales = vec![
            sale("Rice", 2.0, 30.0, Some("2026-08-04")),
            sale("Dal", 1.0, 80.0, None),
        ];

        let reply = Assistant::new().respond_at("total revenue", &ctx(), &[], &sales, today());
        assert!(reply.message.contains("₹140.00"));
    }

    #[test]
    fn test_low_stock_question() {
        let products = vec![
            product("Rice", 5.0, 10.0, 20.0, 30.0),
            product("Dal", 40.0, 10.0, 40.0, 55.0),
        ];

        let reply =
            Assistant::new().respond_at("what's on low stock?", &ctx(), &products, &[], today());
        assert!(reply.message.contains("1 products"));
        assert!(reply.message.contains("Rice"));
    }

    #[test]
    fn test_best_seller_question_without_data() {
        let reply =
            Assistant::new().respond_at("best product?", &ctx(), &[], &[], today());
        assert!(reply.message.contains("more sales data"));
    }

    #[test]
    fn test_best_seller_question_with_data() {
        let sales = vec![
            sale("Rice", 2.0, 30.0, None),
            sale("Dal", 6.0, 80.0, None),
        ];

        let reply =
            Assistant::new().respond_at("top product?", &ctx(), &[], &sales, today());
        assert!(reply.message.contains("Dal"));
        assert!(reply.message.contains("6 units"));
    }

    #[test]
    fn test_inventory_count_question() {
        let products = vec![product("Rice", 5.0, 10.0, 20.0, 30.0)];
        let reply =
            Assistant::new().respond_at("show products", &ctx(), &products, &[], today());
        assert!(reply.message.contains("1 unique products"));
    }

    #[test]
    fn test_greeting_names_the_shop() {
        let reply = Assistant::new().respond_at("hello!", &ctx(), &[], &[], today());
        assert!(reply.message.contains("Sharma General Store"));
        assert!(!reply.suggestions.is_empty());
    }

    #[test]
    fn test_fallback_always_suggests() {
        let reply = Assistant::new().respond_at("qwerty", &ctx(), &[], &[], today());
        assert!(!reply.suggestions.is_empty());
    }
}
