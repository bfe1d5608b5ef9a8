//! Food record model
//!
//! The canonical shape every food source is normalized into.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::nutrition::{NutrientKey, Nutrition};
use crate::nutrition::extract_nutrient;

/// Upstream identifier (barcode, FDC id, LLM code...)
///
/// Only ever compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    /// Read an identifier from a JSON value, accepting numbers or strings
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().map(RawId::Number),
            Value::String(s) if !s.trim().is_empty() => Some(RawId::Text(s.trim().to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawId::Number(n) => write!(f, "{}", n),
            RawId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RawId {
    fn from(n: i64) -> Self {
        RawId::Number(n)
    }
}

impl From<i32> for RawId {
    fn from(n: i32) -> Self {
        RawId::Number(i64::from(n))
    }
}

impl From<&str> for RawId {
    fn from(s: &str) -> Self {
        RawId::Text(s.to_string())
    }
}

/// A food with normalized per-100g nutrition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    pub raw_id: RawId,
    pub name: String,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub nutrients: Nutrition,
    /// Nutri-Score letter, passed through from upstream
    pub nutri_score: Option<String>,
    pub ingredients: Option<String>,
    pub health_benefits: Option<String>,
}

impl FoodRecord {
    /// Minimal record, mostly for callers building foods by hand
    pub fn new(raw_id: impl Into<RawId>, name: impl Into<String>, calories: f64) -> Self {
        let mut nutrients = Nutrition::zero();
        nutrients.calories = calories;
        Self {
            raw_id: raw_id.into(),
            name: name.into(),
            brand: None,
            category: None,
            nutrients,
            nutri_score: None,
            ingredients: None,
            health_benefits: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn calories(&self) -> f64 {
        self.nutrients.calories
    }

    /// Name shown to users: name, then brand, then a placeholder
    pub fn display_name(&self) -> &str {
        if !self.name.trim().is_empty() {
            &self.name
        } else {
            match self.brand.as_deref() {
                Some(b) if !b.trim().is_empty() => b,
                _ => "Unknown Product",
            }
        }
    }

    /// Build a record from either upstream schema
    ///
    /// Understands the LLM backend's product shape (`product_name`, `brands`,
    /// `categories`, `code`, `nutriments`) and USDA FoodData Central search
    /// hits (`description`, `brandOwner`, `foodCategory`, `fdcId`,
    /// `foodNutrients`). Returns None only when no identifier can be derived
    /// and there is no name to fall back on.
    pub fn from_upstream(value: &Value) -> Option<Self> {
        let name = first_string(value, &["product_name", "description", "name"]).unwrap_or_default();
        let brand = first_string(value, &["brands", "brandOwner", "brandName", "brand"]);

        let raw_id = ["code", "fdcId", "id", "_id"]
            .iter()
            .find_map(|k| value.get(*k).and_then(RawId::from_value))
            .or_else(|| {
                // Some LLM payloads omit the code entirely; the name is the best key left
                (!name.is_empty()).then(|| RawId::Text(name.to_lowercase()))
            })?;

        let mut nutrients = Nutrition::zero();
        for key in NutrientKey::ALL {
            nutrients.set(key, extract_nutrient(value, key));
        }

        Some(Self {
            raw_id,
            name,
            brand,
            category: first_string(value, &["categories", "foodCategory", "category"]),
            nutrients,
            nutri_score: first_string(value, &["nutriscore_grade", "nutri_score"]),
            ingredients: first_string(value, &["ingredients_text", "ingredients"]),
            health_benefits: first_string(value, &["health_benefits"]),
        })
    }
}

fn first_string(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| {
        value
            .get(*k)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    })
}
