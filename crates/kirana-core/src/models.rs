//! Domain models for Kirana

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A shop profile
///
/// Every other record is keyed by `shop_id`, mirroring the key-per-shop
/// storage scheme the data originally lived under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shop {
    pub id: i64,
    pub name: String,
    pub business_type: String,
    /// Display-only currency symbol (₹ by default)
    pub currency: String,
    pub created_at: DateTime<Utc>,
}

/// A product in the shop's inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub shop_id: i64,
    pub name: String,
    pub category: Option<String>,
    /// Units on the shelf. Fractional for weight-based units (kg, L).
    pub quantity_on_hand: f64,
    /// Restock trigger: at or below this level the product counts as low stock
    pub reorder_level: f64,
    pub unit: String,
    pub selling_price: f64,
    pub cost_price: f64,
    pub discount_percent: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// A product is low stock at or below its reorder level.
    pub fn is_low_stock(&self) -> bool {
        self.quantity_on_hand <= self.reorder_level
    }

    /// Absolute margin per unit sold
    pub fn margin(&self) -> f64 {
        self.selling_price - self.cost_price
    }

    /// Margin relative to cost. None when the cost price is zero or negative,
    /// since the ratio is undefined there.
    pub fn margin_ratio(&self) -> Option<f64> {
        if self.cost_price > 0.0 {
            Some(self.margin() / self.cost_price)
        } else {
            None
        }
    }
}

/// Fields for creating a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: Option<String>,
    pub quantity_on_hand: f64,
    pub reorder_level: f64,
    pub unit: String,
    pub selling_price: f64,
    pub cost_price: f64,
    pub discount_percent: Option<f64>,
}

/// A recorded sale. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleTransaction {
    pub id: i64,
    pub shop_id: i64,
    /// Sales reference products by name; the id link is best-effort since
    /// products can be renamed or deleted after the sale.
    pub product_id: Option<i64>,
    pub product_name: String,
    pub quantity: f64,
    pub unit_price: f64,
    /// quantity * unit_price, stored at record time
    pub revenue: f64,
    /// Missing dates are tolerated: such sales count toward all-time totals
    /// but are skipped by date-scoped aggregates.
    pub date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Fields for recording a sale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSale {
    pub product_name: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub date: Option<NaiveDate>,
}

impl NewSale {
    pub fn revenue(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// Expense categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Rent,
    Electricity,
    StaffWages,
    Transport,
    Miscellaneous,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 5] = [
        Self::Rent,
        Self::Electricity,
        Self::StaffWages,
        Self::Transport,
        Self::Miscellaneous,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rent => "rent",
            Self::Electricity => "electricity",
            Self::StaffWages => "staff_wages",
            Self::Transport => "transport",
            Self::Miscellaneous => "miscellaneous",
        }
    }

    /// Human-readable label for display
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rent => "Rent",
            Self::Electricity => "Electricity",
            Self::StaffWages => "Staff Wages",
            Self::Transport => "Transport",
            Self::Miscellaneous => "Miscellaneous",
        }
    }
}

impl std::str::FromStr for ExpenseCategory {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '-'], "_").as_str() {
            "rent" => Ok(Self::Rent),
            "electricity" | "power" => Ok(Self::Electricity),
            "staff_wages" | "wages" | "staff" | "salary" => Ok(Self::StaffWages),
            "transport" => Ok(Self::Transport),
            "miscellaneous" | "misc" | "other" => Ok(Self::Miscellaneous),
            _ => Err(format!("Unknown expense category: {}", s)),
        }
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A business expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub shop_id: i64,
    pub category: ExpenseCategory,
    pub amount: f64,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Fields for recording an expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
    pub category: ExpenseCategory,
    pub amount: f64,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

/// A supplier the shop restocks from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    pub id: i64,
    pub shop_id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    /// 1-10, shopkeeper's own rating
    pub reliability_score: u8,
    /// 1-10
    pub quality_rating: u8,
    pub average_delivery_days: Option<u32>,
    /// Ids of products this supplier can restock
    pub product_ids: Vec<i64>,
    pub created_at: DateTime<Utc>,
}

impl Supplier {
    pub fn supplies(&self, product_id: i64) -> bool {
        self.product_ids.contains(&product_id)
    }
}

/// Fields for creating a supplier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSupplier {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub reliability_score: u8,
    pub quality_rating: u8,
    pub average_delivery_days: Option<u32>,
}

/// Canned dashboard stats for a shop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub product_count: i64,
    pub low_stock_count: i64,
    pub supplier_count: i64,
    pub sale_count: i64,
    pub total_revenue: f64,
    pub today_revenue: f64,
    pub total_expenses: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn product(qty: f64, reorder: f64, cost: f64, sell: f64) -> Product {
        Product {
            id: 1,
            shop_id: 1,
            name: "Rice".to_string(),
            category: None,
            quantity_on_hand: qty,
            reorder_level: reorder,
            unit: "kg".to_string(),
            selling_price: sell,
            cost_price: cost,
            discount_percent: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_low_stock_boundary() {
        assert!(product(10.0, 10.0, 20.0, 30.0).is_low_stock());
        assert!(product(5.0, 10.0, 20.0, 30.0).is_low_stock());
        assert!(!product(11.0, 10.0, 20.0, 30.0).is_low_stock());
    }

    #[test]
    fn test_margin_ratio_guards_zero_cost() {
        assert_eq!(product(1.0, 1.0, 20.0, 30.0).margin_ratio(), Some(0.5));
        assert_eq!(product(1.0, 1.0, 0.0, 30.0).margin_ratio(), None);
        assert_eq!(product(1.0, 1.0, -5.0, 30.0).margin_ratio(), None);
    }

    #[test]
    fn test_expense_category_round_trip() {
        for cat in ExpenseCategory::ALL {
            assert_eq!(ExpenseCategory::from_str(cat.as_str()).unwrap(), cat);
        }
        assert_eq!(
            ExpenseCategory::from_str("Staff Wages").unwrap(),
            ExpenseCategory::StaffWages
        );
        assert!(ExpenseCategory::from_str("fuel").is_err());
    }
}
