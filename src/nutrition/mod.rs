//! Nutrition extraction module
//!
//! Normalizes upstream nutrient records into canonical per-100g values.

pub mod extractor;
pub mod units;

pub use extractor::{extract_calories, extract_nutrient};
pub use units::{round_nutrient, round_to, KCAL_PER_KG};
