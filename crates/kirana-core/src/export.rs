//! CSV export for products and sales

use csv::Writer;
use std::io::Write;

use crate::error::Result;
use crate::models::{Product, SaleTransaction};

/// Write products as CSV. The header matches what the importer accepts, so
/// an export can be re-imported as-is.
pub fn write_products_csv<W: Write>(writer: W, products: &[Product]) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);

    wtr.write_record([
        "name",
        "category",
        "quantity",
        "reorder_level",
        "unit",
        "selling_price",
        "cost_price",
        "discount_percent",
    ])?;

    for product in products {
        wtr.write_record([
            product.name.as_str(),
            product.category.as_deref().unwrap_or(""),
            &product.quantity_on_hand.to_string(),
            &product.reorder_level.to_string(),
            product.unit.as_str(),
            &product.selling_price.to_string(),
            &product.cost_price.to_string(),
            &product
                .discount_percent
                .map(|d| d.to_string())
                .unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write sales as CSV, one row per transaction
pub fn write_sales_csv<W: Write>(writer: W, sales: &[SaleTransaction]) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);

    wtr.write_record(["date", "product_name", "quantity", "unit_price", "revenue"])?;

    for sale in sales {
        wtr.write_record([
            &sale.date.map(|d| d.to_string()).unwrap_or_default(),
            sale.product_name.as_str(),
            &sale.quantity.to_string(),
            &sale.unit_price.to_string(),
            &sale.revenue.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::parse_products_csv;
    use crate::insights::test_fixtures::{product, sale};

    #[test]
    fn test_product_export_reimports() {
        let products = vec![
            product("Rice", 50.0, 10.0, 20.0, 30.0),
            product("Dal", 25.0, 5.0, 60.0, 80.0),
        ];

        let mut buf = Vec::new();
        write_products_csv(&mut buf, &products).unwrap();

        let import = parse_products_csv(buf.as_slice()).unwrap();
        assert!(import.errors.is_empty());
        assert_eq!(import.products.len(), 2);
        assert_eq!(import.products[0].name, "Rice");
        assert_eq!(import.products[0].quantity_on_hand, 50.0);
    }

    #[test]
    fn test_sales_export_handles_missing_dates() {
        let sales = vec![
            sale("Rice", 2.0, 30.0, Some("2026-08-01")),
            sale("Dal", 1.0, 80.0, None),
        ];

        let mut buf = Vec::new();
        write_sales_csv(&mut buf, &sales).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with("date,product_name"));
        assert!(text.contains("2026-08-01,Rice,2,30,60"));
        assert!(text.contains(",Dal,1,80,80"));
    }
}
