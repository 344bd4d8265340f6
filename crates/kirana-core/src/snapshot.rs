//! Read-only data snapshots consumed by the insight engine and assistant
//!
//! The engine never talks to storage. Callers load a [`Snapshot`] (through
//! [`SnapshotStore`] or [`Snapshot::from_value`]) and pass it in; the engine
//! treats it as immutable.
//!
//! [`Snapshot::from_value`] is the defensive boundary for untyped data
//! (JSON exports, hand-edited files): missing collections become empty,
//! missing numerics become 0, negative stock is clamped to 0, and unknown
//! expense categories fall back to Miscellaneous. Malformed records
//! contribute zero to every aggregate instead of failing the run.

use chrono::{NaiveDate, Utc};
use serde_json::Value;

use crate::error::Result;
use crate::models::{Expense, ExpenseCategory, Product, SaleTransaction, Supplier};

/// Point-in-time view of a shop's data
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub products: Vec<Product>,
    pub sales: Vec<SaleTransaction>,
    pub expenses: Vec<Expense>,
    pub suppliers: Vec<Supplier>,
}

/// Storage-agnostic snapshot source
///
/// The SQLite [`Database`](crate::db::Database) implements this; tests and
/// one-off tools can implement it over fixtures.
pub trait SnapshotStore {
    fn load_snapshot(&self, shop_id: i64) -> Result<Snapshot>;
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
            && self.sales.is_empty()
            && self.expenses.is_empty()
            && self.suppliers.is_empty()
    }

    /// Parse a JSON document into a snapshot. The document must be valid
    /// JSON; field-level problems are coalesced by [`Snapshot::from_value`].
    pub fn from_json_str(json: &str) -> Result<Snapshot> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Snapshot::from_value(&value))
    }

    /// Build a snapshot from untyped JSON, coalescing malformed fields.
    ///
    /// Accepts both the canonical field names and the legacy export names
    /// (`product_name`, `productName`, `current_cost_price`, `transactions`).
    pub fn from_value(value: &Value) -> Snapshot {
        let products = array(value, &["products"])
            .iter()
            .enumerate()
            .map(|(i, v)| product_from_value(i as i64, v))
            .collect();
        let sales = array(value, &["sales", "transactions"])
            .iter()
            .enumerate()
            .map(|(i, v)| sale_from_value(i as i64, v))
            .collect();
        let expenses = array(value, &["expenses"])
            .iter()
            .enumerate()
            .map(|(i, v)| expense_from_value(i as i64, v))
            .collect();
        let suppliers = array(value, &["suppliers"])
            .iter()
            .enumerate()
            .map(|(i, v)| supplier_from_value(i as i64, v))
            .collect();

        Snapshot {
            products,
            sales,
            expenses,
            suppliers,
        }
    }
}

/// First matching key that holds an array; anything else is empty.
fn array<'a>(value: &'a Value, keys: &[&str]) -> &'a [Value] {
    for key in keys {
        if let Some(arr) = value.get(key).and_then(Value::as_array) {
            return arr;
        }
    }
    &[]
}

/// Numeric field under any of the given keys, defaulting to 0.
/// Accepts numbers and numeric strings ("12.50").
fn num(value: &Value, keys: &[&str]) -> f64 {
    for key in keys {
        match value.get(key) {
            Some(Value::Number(n)) => return n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => {
                if let Ok(parsed) = s.trim().parse::<f64>() {
                    return parsed;
                }
            }
            _ => {}
        }
    }
    0.0
}

fn text(value: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(s) = value.get(key).and_then(Value::as_str) {
            let trimmed = s.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

/// Date field, tolerating full ISO timestamps by truncating to the date part.
fn date(value: &Value, keys: &[&str]) -> Option<NaiveDate> {
    let raw = text(value, keys)?;
    let date_part = raw.split(['T', ' ']).next().unwrap_or(&raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn product_from_value(fallback_id: i64, v: &Value) -> Product {
    Product {
        id: v.get("id").and_then(Value::as_i64).unwrap_or(fallback_id),
        shop_id: v.get("shop_id").and_then(Value::as_i64).unwrap_or(0),
        name: text(v, &["name", "product_name"]).unwrap_or_default(),
        category: text(v, &["category"]),
        quantity_on_hand: num(v, &["quantity_on_hand", "quantity"]).max(0.0),
        reorder_level: num(v, &["reorder_level"]).max(0.0),
        unit: text(v, &["unit"]).unwrap_or_else(|| "pcs".to_string()),
        selling_price: num(v, &["selling_price", "price"]),
        cost_price: num(v, &["cost_price", "current_cost_price"]),
        discount_percent: v
            .get("discount_percent")
            .and_then(Value::as_f64)
            .filter(|d| d.is_finite()),
        created_at: Utc::now(),
    }
}

fn sale_from_value(fallback_id: i64, v: &Value) -> SaleTransaction {
    let quantity = num(v, &["quantity", "qty"]).max(0.0);
    let unit_price = num(v, &["unit_price", "price"]);
    // Stored revenue wins; otherwise derive it
    let revenue = match v.get("revenue") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        _ => quantity * unit_price,
    };

    SaleTransaction {
        id: v.get("id").and_then(Value::as_i64).unwrap_or(fallback_id),
        shop_id: v.get("shop_id").and_then(Value::as_i64).unwrap_or(0),
        product_id: v.get("product_id").and_then(Value::as_i64),
        product_name: text(v, &["product_name", "productName", "product"]).unwrap_or_default(),
        quantity,
        unit_price,
        revenue,
        date: date(v, &["date", "timestamp"]),
        created_at: Utc::now(),
    }
}

fn expense_from_value(fallback_id: i64, v: &Value) -> Expense {
    let category = text(v, &["category"])
        .and_then(|s| s.parse().ok())
        .unwrap_or(ExpenseCategory::Miscellaneous);

    Expense {
        id: v.get("id").and_then(Value::as_i64).unwrap_or(fallback_id),
        shop_id: v.get("shop_id").and_then(Value::as_i64).unwrap_or(0),
        category,
        amount: num(v, &["amount"]).max(0.0),
        description: text(v, &["description"]),
        date: date(v, &["date", "timestamp"]),
        created_at: Utc::now(),
    }
}

fn supplier_from_value(fallback_id: i64, v: &Value) -> Supplier {
    // Ratings are clamped into the 1-10 scale rather than rejected
    let rating = |keys: &[&str]| (num(v, keys).round() as i64).clamp(1, 10) as u8;

    Supplier {
        id: v.get("id").and_then(Value::as_i64).unwrap_or(fallback_id),
        shop_id: v.get("shop_id").and_then(Value::as_i64).unwrap_or(0),
        name: text(v, &["name", "supplier_name"]).unwrap_or_default(),
        phone: text(v, &["phone", "contact"]),
        email: text(v, &["email"]),
        reliability_score: rating(&["reliability_score"]),
        quality_rating: rating(&["quality_rating"]),
        average_delivery_days: v
            .get("average_delivery_days")
            .and_then(Value::as_u64)
            .map(|d| d as u32),
        product_ids: v
            .get("product_ids")
            .and_then(Value::as_array)
            .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
            .unwrap_or_default(),
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_str_rejects_invalid_json() {
        assert!(Snapshot::from_json_str("{not json").is_err());
        let snap = Snapshot::from_json_str(r#"{"products": []}"#).unwrap();
        assert!(snap.is_empty());
    }

    #[test]
    fn test_missing_collections_become_empty() {
        let snap = Snapshot::from_value(&json!({}));
        assert!(snap.is_empty());

        // Non-array values are treated the same as absent ones
        let snap = Snapshot::from_value(&json!({"products": "oops", "sales": 42}));
        assert!(snap.products.is_empty());
        assert!(snap.sales.is_empty());
    }

    #[test]
    fn test_missing_numerics_coalesce_to_zero() {
        let snap = Snapshot::from_value(&json!({
            "products": [{"name": "Rice"}],
            "sales": [{"product_name": "Rice"}],
        }));

        assert_eq!(snap.products[0].quantity_on_hand, 0.0);
        assert_eq!(snap.products[0].selling_price, 0.0);
        assert_eq!(snap.sales[0].revenue, 0.0);
        assert!(snap.sales[0].date.is_none());
    }

    #[test]
    fn test_negative_stock_clamped() {
        let snap = Snapshot::from_value(&json!({
            "products": [{"name": "Rice", "quantity_on_hand": -3}],
        }));
        assert_eq!(snap.products[0].quantity_on_hand, 0.0);
    }

    #[test]
    fn test_legacy_field_names() {
        let snap = Snapshot::from_value(&json!({
            "products": [{"product_name": "Dal", "current_cost_price": 40, "selling_price": "55.5"}],
            "transactions": [{"productName": "Dal", "quantity": 2, "unit_price": 55.5}],
        }));

        assert_eq!(snap.products[0].name, "Dal");
        assert_eq!(snap.products[0].cost_price, 40.0);
        assert_eq!(snap.products[0].selling_price, 55.5);
        // Revenue derived from quantity * unit_price when not stored
        assert_eq!(snap.sales[0].revenue, 111.0);
    }

    #[test]
    fn test_unknown_expense_category_falls_back() {
        let snap = Snapshot::from_value(&json!({
            "expenses": [
                {"category": "fuel", "amount": 100},
                {"category": "Rent", "amount": 200, "date": "2026-07-01T10:30:00Z"},
            ],
        }));

        assert_eq!(snap.expenses[0].category, ExpenseCategory::Miscellaneous);
        assert_eq!(snap.expenses[1].category, ExpenseCategory::Rent);
        assert_eq!(
            snap.expenses[1].date,
            NaiveDate::from_ymd_opt(2026, 7, 1)
        );
    }

    #[test]
    fn test_supplier_ratings_clamped() {
        let snap = Snapshot::from_value(&json!({
            "suppliers": [{"name": "Agro", "reliability_score": 37, "product_ids": [1, 2]}],
        }));

        assert_eq!(snap.suppliers[0].reliability_score, 10);
        // Missing rating clamps up to the scale minimum
        assert_eq!(snap.suppliers[0].quality_rating, 1);
        assert_eq!(snap.suppliers[0].product_ids, vec![1, 2]);
    }
}
