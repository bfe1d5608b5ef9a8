//! Nutrient extraction from upstream records
//!
//! Every function here is total: whatever shape the record has, a missing or
//! unreadable nutrient comes back as 0.

use serde_json::Value;

use super::units::{field_for, round_nutrient, usda_unit_factor, NutrientField};
use crate::models::NutrientKey;

/// Extract one nutrient, per 100g, in its canonical unit
///
/// Recognized shapes, tried in order:
/// - `nutriments` map (`sodium_100g` in grams etc.), scaled by the field table
/// - USDA `foodNutrients` array, converted using each row's `unitName`
/// - an already canonical `nutrients` map (`{"calories": 120, ...}`)
pub fn extract_nutrient(record: &Value, key: NutrientKey) -> f64 {
    let field = field_for(key);

    let raw = record
        .get("nutriments")
        .and_then(|n| from_product(n, field))
        .or_else(|| {
            record
                .get("foodNutrients")
                .and_then(Value::as_array)
                .and_then(|rows| from_usda(rows, field))
        })
        .or_else(|| {
            record
                .get("nutrients")
                .and_then(|n| n.get(key.as_str()))
                .and_then(as_number)
        })
        .unwrap_or(0.0);

    round_nutrient(raw)
}

/// Calories per 100g, never negative
pub fn extract_calories(record: &Value) -> f64 {
    extract_nutrient(record, NutrientKey::Calories).max(0.0)
}

/// First non-zero product field; a zero falls through to the next name
fn from_product(nutriments: &Value, field: &NutrientField) -> Option<f64> {
    let values: Vec<f64> = field
        .product_fields
        .iter()
        .filter_map(|name| nutriments.get(*name).and_then(as_number))
        .collect();

    values
        .iter()
        .copied()
        .find(|v| *v != 0.0)
        .or_else(|| values.first().copied())
        .map(|v| v * field.product_scale)
}

fn from_usda(rows: &[Value], field: &NutrientField) -> Option<f64> {
    rows.iter().find_map(|row| {
        // Search results are flat; the food details endpoint nests under "nutrient"
        let nested = row.get("nutrient");
        let lookup = |flat: &str, inner: &str| {
            row.get(flat)
                .or_else(|| nested.and_then(|n| n.get(inner)))
                .and_then(value_to_string)
        };

        let number = lookup("nutrientNumber", "number");
        let id = lookup("nutrientId", "id");
        let name = lookup("nutrientName", "name").map(|n| n.to_lowercase());

        let matches = number
            .iter()
            .chain(id.iter())
            .any(|n| field.usda_numbers.contains(&n.as_str()))
            || name
                .as_deref()
                .map_or(false, |n| field.usda_names.iter().any(|p| n.starts_with(p)));
        if !matches {
            return None;
        }

        let unit = lookup("unitName", "unitName");
        let factor = usda_unit_factor(field.key, unit.as_deref())?;
        let amount = row.get("value").or_else(|| row.get("amount")).and_then(as_number)?;
        Some(amount * factor)
    })
}

/// Numbers, or strings that parse as numbers
fn as_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
