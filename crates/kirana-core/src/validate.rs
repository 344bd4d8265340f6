//! Input validation for the CRUD boundary
//!
//! User-entered values are validated and normalized here, before they reach
//! storage. The insight engine assumes this has already happened and never
//! re-validates.

use chrono::{Local, NaiveDate};

use crate::error::{Error, Result};

/// Sanity cap for money and quantity values in a small shop
const MAX_REASONABLE_VALUE: f64 = 1_000_000.0;

/// Parse a numeric field, stripping currency symbols and separators.
///
/// Rejects negatives and implausibly large values.
pub fn parse_amount(input: &str, field: &str) -> Result<f64> {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let value: f64 = cleaned
        .parse()
        .map_err(|_| Error::InvalidData(format!("Please provide a valid {}", field)))?;

    if value < 0.0 {
        return Err(Error::InvalidData(format!("{} cannot be negative", field)));
    }
    if value > MAX_REASONABLE_VALUE {
        return Err(Error::InvalidData(format!(
            "{} value seems unrealistically high",
            field
        )));
    }
    Ok(value)
}

/// A price must additionally be non-zero.
pub fn parse_price(input: &str, field: &str) -> Result<f64> {
    let value = parse_amount(input, field)?;
    if value == 0.0 {
        return Err(Error::InvalidData(format!("{} cannot be zero", field)));
    }
    Ok(value)
}

/// Parse a YYYY-MM-DD date, rejecting dates in the future.
pub fn parse_past_date(input: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| Error::InvalidData("Please provide a valid date (YYYY-MM-DD)".into()))?;

    if date > Local::now().date_naive() {
        return Err(Error::InvalidData("Date cannot be in the future".into()));
    }
    Ok(date)
}

/// Trimmed product name, at least two characters.
pub fn validate_product_name(input: &str) -> Result<String> {
    let name = input.trim();
    if name.len() < 2 {
        return Err(Error::InvalidData("Product name is too short".into()));
    }
    Ok(name.to_string())
}

/// Soft category normalization: trim and title-case the first letter.
pub fn normalize_category(input: &str) -> String {
    let trimmed = input.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Collapse unit aliases to a canonical form (kg, g, pcs, L).
/// Unrecognized units pass through untouched.
pub fn normalize_unit(input: &str) -> String {
    match input.trim().to_lowercase().as_str() {
        "kg" | "kilogram" | "kilograms" => "kg".to_string(),
        "gm" | "g" | "gram" | "grams" => "g".to_string(),
        "pc" | "pcs" | "piece" | "pieces" => "pcs".to_string(),
        "l" | "ltr" | "liter" | "liters" | "litre" | "litres" => "L".to_string(),
        _ => input.trim().to_string(),
    }
}

/// A rating on the 1-10 scale
pub fn validate_rating(value: i64, field: &str) -> Result<u8> {
    if (1..=10).contains(&value) {
        Ok(value as u8)
    } else {
        Err(Error::InvalidData(format!(
            "{} must be between 1 and 10",
            field
        )))
    }
}
