//! Bulk product import from CSV
//!
//! Header-driven: columns are matched by name, not position, so exports
//! from spreadsheets survive column reordering. Bad rows are collected as
//! errors instead of aborting the file.

use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::NewProduct;
use crate::validate::normalize_unit;

/// Outcome of parsing a product CSV
#[derive(Debug, Default)]
pub struct ProductImport {
    pub products: Vec<NewProduct>,
    /// One entry per rejected row: "row N: reason"
    pub errors: Vec<String>,
}

/// Case-insensitive header lookup
fn column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

fn field<'a>(record: &'a StringRecord, index: Option<usize>) -> Option<&'a str> {
    let value = record.get(index?)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn numeric(record: &StringRecord, index: Option<usize>) -> f64 {
    field(record, index)
        .and_then(|v| v.parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Parse products from CSV data.
///
/// Recognized headers: `name` (required), `category`, `quantity`,
/// `reorder_level`, `unit`, `selling_price`, `cost_price`,
/// `discount_percent`. Missing numeric fields default to 0.
pub fn parse_products_csv<R: Read>(reader: R) -> Result<ProductImport> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();

    let name_col = Some(
        column(&headers, "name")
            .or_else(|| column(&headers, "product_name"))
            .ok_or_else(|| Error::Import("CSV has no 'name' column".into()))?,
    );
    let category_col = column(&headers, "category");
    let quantity_col =
        column(&headers, "quantity").or_else(|| column(&headers, "quantity_on_hand"));
    let reorder_col = column(&headers, "reorder_level");
    let unit_col = column(&headers, "unit");
    let selling_col = column(&headers, "selling_price");
    let cost_col = column(&headers, "cost_price");
    let discount_col = column(&headers, "discount_percent");

    let mut import = ProductImport::default();

    for (i, result) in rdr.records().enumerate() {
        let row = i + 2; // 1-based, after the header line

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                import.errors.push(format!("row {}: {}", row, e));
                continue;
            }
        };

        let name = match field(&record, name_col) {
            Some(name) if name.len() >= 2 => name.to_string(),
            Some(_) => {
                import.errors.push(format!("row {}: product name too short", row));
                continue;
            }
            None => {
                import.errors.push(format!("row {}: missing product name", row));
                continue;
            }
        };

        import.products.push(NewProduct {
            name,
            category: field(&record, category_col).map(|c| c.to_string()),
            quantity_on_hand: numeric(&record, quantity_col).max(0.0),
            reorder_level: numeric(&record, reorder_col).max(0.0),
            unit: field(&record, unit_col)
                .map(normalize_unit)
                .unwrap_or_else(|| "pcs".to_string()),
            selling_price: numeric(&record, selling_col),
            cost_price: numeric(&record, cost_col),
            discount_percent: field(&record, discount_col).and_then(|v| v.parse().ok()),
        });
    }

    debug!(
        imported = import.products.len(),
        rejected = import.errors.len(),
        "Parsed product CSV"
    );

    Ok(import)
}
