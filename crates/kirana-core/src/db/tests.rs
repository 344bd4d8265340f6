//! Database layer tests

use chrono::NaiveDate;

use super::Database;
use crate::models::{ExpenseCategory, NewExpense, NewProduct, NewSale, NewSupplier};
use crate::snapshot::SnapshotStore;

fn setup() -> (Database, i64) {
    let db = Database::in_memory().unwrap();
    let shop_id = db.create_shop("Test Shop", "Grocery", "₹").unwrap();
    (db, shop_id)
}

fn new_product(name: &str, qty: f64) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        category: Some("Staples".to_string()),
        quantity_on_hand: qty,
        reorder_level: 10.0,
        unit: "kg".to_string(),
        selling_price: 30.0,
        cost_price: 20.0,
        discount_percent: None,
    }
}

#[test]
fn test_shop_round_trip() {
    let (db, shop_id) = setup();

    let shop = db.get_shop(shop_id).unwrap().unwrap();
    assert_eq!(shop.name, "Test Shop");
    assert_eq!(shop.business_type, "Grocery");
    assert_eq!(shop.currency, "₹");

    assert_eq!(db.list_shops().unwrap().len(), 1);
    assert_eq!(db.default_shop().unwrap().unwrap().id, shop_id);
}

#[test]
fn test_product_crud() {
    let (db, shop_id) = setup();

    let id = db.create_product(shop_id, &new_product("Rice", 50.0)).unwrap();
    let product = db.get_product(id).unwrap().unwrap();
    assert_eq!(product.name, "Rice");
    assert_eq!(product.quantity_on_hand, 50.0);

    let mut update = new_product("Rice", 45.0);
    update.selling_price = 32.0;
    db.update_product(id, &update).unwrap();
    let product = db.get_product(id).unwrap().unwrap();
    assert_eq!(product.selling_price, 32.0);

    db.delete_product(id).unwrap();
    assert!(db.get_product(id).unwrap().is_none());
    assert!(db.delete_product(id).is_err());
}

#[test]
fn test_product_names_unique_per_shop() {
    let (db, shop_id) = setup();

    db.create_product(shop_id, &new_product("Rice", 50.0)).unwrap();
    assert!(db.create_product(shop_id, &new_product("Rice", 10.0)).is_err());

    // Same name in another shop is fine
    let other = db.create_shop("Other", "Grocery", "₹").unwrap();
    assert!(db.create_product(other, &new_product("Rice", 10.0)).is_ok());
}

#[test]
fn test_negative_quantities_clamped_on_write() {
    let (db, shop_id) = setup();

    let id = db.create_product(shop_id, &new_product("Rice", -5.0)).unwrap();
    assert_eq!(db.get_product(id).unwrap().unwrap().quantity_on_hand, 0.0);
}

#[test]
fn test_record_sale_decrements_stock() {
    let (db, shop_id) = setup();
    let product_id = db.create_product(shop_id, &new_product("Rice", 50.0)).unwrap();

    let sale = NewSale {
        product_name: "Rice".to_string(),
        quantity: 3.0,
        unit_price: 30.0,
        date: NaiveDate::from_ymd_opt(2026, 8, 1),
    };
    db.record_sale(shop_id, &sale).unwrap();

    let product = db.get_product(product_id).unwrap().unwrap();
    assert_eq!(product.quantity_on_hand, 47.0);

    let sales = db.list_sales(shop_id, None).unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].revenue, 90.0);
    assert_eq!(sales[0].product_id, Some(product_id));
    assert_eq!(sales[0].date, NaiveDate::from_ymd_opt(2026, 8, 1));
}

#[test]
fn test_oversell_floors_at_zero() {
    let (db, shop_id) = setup();
    let product_id = db.create_product(shop_id, &new_product("Rice", 2.0)).unwrap();

    let sale = NewSale {
        product_name: "Rice".to_string(),
        quantity: 10.0,
        unit_price: 30.0,
        date: None,
    };
    db.record_sale(shop_id, &sale).unwrap();

    assert_eq!(db.get_product(product_id).unwrap().unwrap().quantity_on_hand, 0.0);
}

#[test]
fn test_sale_for_unknown_product_still_recorded() {
    let (db, shop_id) = setup();

    let sale = NewSale {
        product_name: "Mystery Item".to_string(),
        quantity: 1.0,
        unit_price: 10.0,
        date: None,
    };
    db.record_sale(shop_id, &sale).unwrap();

    let sales = db.list_sales(shop_id, None).unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].product_id, None);
    assert!(sales[0].date.is_none());
}

#[test]
fn test_expense_crud() {
    let (db, shop_id) = setup();

    let id = db
        .create_expense(
            shop_id,
            &NewExpense {
                category: ExpenseCategory::Rent,
                amount: 5000.0,
                description: Some("August rent".to_string()),
                date: NaiveDate::from_ymd_opt(2026, 8, 1),
            },
        )
        .unwrap();

    let expenses = db.list_expenses(shop_id).unwrap();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0].category, ExpenseCategory::Rent);
    assert_eq!(expenses[0].amount, 5000.0);

    db.delete_expense(id).unwrap();
    assert!(db.list_expenses(shop_id).unwrap().is_empty());
}

#[test]
fn test_supplier_links_and_reliability_order() {
    let (db, shop_id) = setup();
    let product_id = db.create_product(shop_id, &new_product("Rice", 50.0)).unwrap();

    let make = |name: &str, reliability: u8| NewSupplier {
        name: name.to_string(),
        phone: None,
        email: None,
        reliability_score: reliability,
        quality_rating: 5,
        average_delivery_days: Some(3),
    };

    let a = db.create_supplier(shop_id, &make("Agro Traders", 6)).unwrap();
    let b = db.create_supplier(shop_id, &make("Metro Wholesale", 9)).unwrap();
    db.create_supplier(shop_id, &make("Unrelated", 10)).unwrap();

    db.link_supplier_product(a, product_id).unwrap();
    db.link_supplier_product(b, product_id).unwrap();
    // Linking twice is a no-op
    db.link_supplier_product(b, product_id).unwrap();

    let covering = db.suppliers_for_product(product_id).unwrap();
    assert_eq!(covering.len(), 2);
    assert_eq!(covering[0].name, "Metro Wholesale");
    assert!(covering[0].product_ids.contains(&product_id));

    db.unlink_supplier_product(b, product_id).unwrap();
    assert_eq!(db.suppliers_for_product(product_id).unwrap().len(), 1);
}

#[test]
fn test_deleting_product_cascades_links_keeps_sales() {
    let (db, shop_id) = setup();
    let product_id = db.create_product(shop_id, &new_product("Rice", 50.0)).unwrap();
    let supplier_id = db
        .create_supplier(
            shop_id,
            &NewSupplier {
                name: "Agro".to_string(),
                phone: None,
                email: None,
                reliability_score: 5,
                quality_rating: 5,
                average_delivery_days: None,
            },
        )
        .unwrap();
    db.link_supplier_product(supplier_id, product_id).unwrap();

    db.record_sale(
        shop_id,
        &NewSale {
            product_name: "Rice".to_string(),
            quantity: 1.0,
            unit_price: 30.0,
            date: None,
        },
    )
    .unwrap();

    db.delete_product(product_id).unwrap();

    assert!(db.suppliers_for_product(product_id).unwrap().is_empty());
    let sales = db.list_sales(shop_id, None).unwrap();
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].product_id, None);
    assert_eq!(sales[0].product_name, "Rice");
}

#[test]
fn test_dashboard_stats() {
    let (db, shop_id) = setup();
    db.create_product(shop_id, &new_product("Rice", 5.0)).unwrap(); // below reorder 10
    db.create_product(shop_id, &new_product("Dal", 50.0)).unwrap();

    db.record_sale(
        shop_id,
        &NewSale {
            product_name: "Dal".to_string(),
            quantity: 2.0,
            unit_price: 55.0,
            date: NaiveDate::from_ymd_opt(2020, 1, 1),
        },
    )
    .unwrap();
    db.create_expense(
        shop_id,
        &NewExpense {
            category: ExpenseCategory::Transport,
            amount: 300.0,
            description: None,
            date: None,
        },
    )
    .unwrap();

    let stats = db.dashboard_stats(shop_id).unwrap();
    assert_eq!(stats.product_count, 2);
    assert_eq!(stats.low_stock_count, 1);
    assert_eq!(stats.sale_count, 1);
    assert_eq!(stats.total_revenue, 110.0);
    assert_eq!(stats.today_revenue, 0.0);
    assert_eq!(stats.total_expenses, 300.0);
}

#[test]
fn test_load_snapshot_scoped_to_shop() {
    let (db, shop_id) = setup();
    let other = db.create_shop("Other", "Pharmacy", "₹").unwrap();

    db.create_product(shop_id, &new_product("Rice", 50.0)).unwrap();
    db.create_product(other, &new_product("Bandages", 20.0)).unwrap();

    let snapshot = db.load_snapshot(shop_id).unwrap();
    assert_eq!(snapshot.products.len(), 1);
    assert_eq!(snapshot.products[0].name, "Rice");
    assert!(snapshot.sales.is_empty());
    assert!(snapshot.expenses.is_empty());
}

#[test]
fn test_soft_reset_keeps_products() {
    let (db, shop_id) = setup();
    db.create_product(shop_id, &new_product("Rice", 50.0)).unwrap();
    db.record_sale(
        shop_id,
        &NewSale {
            product_name: "Rice".to_string(),
            quantity: 1.0,
            unit_price: 30.0,
            date: None,
        },
    )
    .unwrap();

    db.soft_reset().unwrap();

    assert_eq!(db.list_products(shop_id).unwrap().len(), 1);
    assert!(db.list_sales(shop_id, None).unwrap().is_empty());
}
