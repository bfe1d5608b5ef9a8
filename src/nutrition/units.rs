//! Nutrient field table and unit conversion
//!
//! Maps each canonical nutrient to the upstream fields that carry it and the
//! factor needed to report it in its canonical unit.

use crate::models::NutrientKey;

/// Where a nutrient lives in each upstream schema
#[derive(Debug, Clone, Copy)]
pub struct NutrientField {
    pub key: NutrientKey,
    /// Keys in the `nutriments` map, tried in order
    pub product_fields: &'static [&'static str],
    /// Multiplier from the `nutriments` unit (grams) to the canonical unit
    pub product_scale: f64,
    /// USDA nutrient numbers
    pub usda_numbers: &'static [&'static str],
    /// USDA nutrient names (lowercase prefix match)
    pub usda_names: &'static [&'static str],
}

// ============================================================================
// Scale Constants
// ============================================================================

/// Milligrams per gram
pub const MG_PER_G: f64 = 1_000.0;
/// Micrograms per gram
pub const UG_PER_G: f64 = 1_000_000.0;

/// Energy stored per kilogram of body weight
pub const KCAL_PER_KG: f64 = 7_700.0;

// ============================================================================
// Field Table
// ============================================================================

pub const NUTRIENT_FIELDS: [NutrientField; 12] = [
    NutrientField {
        key: NutrientKey::Calories,
        product_fields: &["energy-kcal_100g", "energy_100g"],
        product_scale: 1.0,
        usda_numbers: &["208", "1008"],
        usda_names: &["energy"],
    },
    NutrientField {
        key: NutrientKey::Protein,
        product_fields: &["proteins_100g"],
        product_scale: 1.0,
        usda_numbers: &["203", "1003"],
        usda_names: &["protein"],
    },
    NutrientField {
        key: NutrientKey::Carbs,
        product_fields: &["carbohydrates_100g"],
        product_scale: 1.0,
        usda_numbers: &["205", "1005"],
        usda_names: &["carbohydrate, by difference"],
    },
    NutrientField {
        key: NutrientKey::Fat,
        product_fields: &["fat_100g"],
        product_scale: 1.0,
        usda_numbers: &["204", "1004"],
        usda_names: &["total lipid (fat)"],
    },
    NutrientField {
        key: NutrientKey::Fiber,
        product_fields: &["fiber_100g"],
        product_scale: 1.0,
        usda_numbers: &["291", "1079"],
        usda_names: &["fiber, total dietary"],
    },
    NutrientField {
        key: NutrientKey::Sugar,
        product_fields: &["sugars_100g"],
        product_scale: 1.0,
        usda_numbers: &["269", "2000"],
        usda_names: &["sugars, total"],
    },
    NutrientField {
        key: NutrientKey::Sodium,
        product_fields: &["sodium_100g"],
        product_scale: MG_PER_G,
        usda_numbers: &["307", "1093"],
        usda_names: &["sodium, na"],
    },
    NutrientField {
        key: NutrientKey::Calcium,
        product_fields: &["calcium_100g"],
        product_scale: MG_PER_G,
        usda_numbers: &["301", "1087"],
        usda_names: &["calcium, ca"],
    },
    NutrientField {
        key: NutrientKey::Iron,
        product_fields: &["iron_100g"],
        product_scale: MG_PER_G,
        usda_numbers: &["303", "1089"],
        usda_names: &["iron, fe"],
    },
    NutrientField {
        key: NutrientKey::VitaminC,
        product_fields: &["vitamin-c_100g"],
        product_scale: MG_PER_G,
        usda_numbers: &["401", "1162"],
        usda_names: &["vitamin c, total ascorbic acid"],
    },
    NutrientField {
        key: NutrientKey::VitaminA,
        product_fields: &["vitamin-a_100g"],
        product_scale: UG_PER_G,
        usda_numbers: &["320", "1106"],
        usda_names: &["vitamin a, rae"],
    },
    NutrientField {
        key: NutrientKey::Potassium,
        product_fields: &["potassium_100g"],
        product_scale: MG_PER_G,
        usda_numbers: &["306", "1092"],
        usda_names: &["potassium, k"],
    },
];

/// Look up the table row for a nutrient
pub fn field_for(key: NutrientKey) -> &'static NutrientField {
    // NUTRIENT_FIELDS is declared in NutrientKey::ALL order
    &NUTRIENT_FIELDS[NutrientKey::ALL
        .iter()
        .position(|k| *k == key)
        .unwrap_or_default()]
}

/// Factor converting a USDA `unitName` into the canonical unit for `key`
///
/// Returns None for units that cannot be converted (kJ energy, IU).
pub fn usda_unit_factor(key: NutrientKey, unit_name: Option<&str>) -> Option<f64> {
    let Some(unit) = unit_name.map(|u| u.trim().to_lowercase()) else {
        // No unit given: USDA already reports in the canonical unit
        return Some(1.0);
    };

    let target = key.unit();
    let factor = match (unit.as_str(), target) {
        ("kcal", "kcal") => 1.0,
        ("g", "g") | ("mg", "mg") => 1.0,
        ("mcg" | "ug" | "µg", "mcg") => 1.0,
        ("mg", "g") => 0.001,
        ("mcg" | "ug" | "µg", "g") => 0.000_001,
        ("g", "mg") => MG_PER_G,
        ("mcg" | "ug" | "µg", "mg") => 0.001,
        ("g", "mcg") => UG_PER_G,
        ("mg", "mcg") => 1_000.0,
        _ => return None,
    };
    Some(factor)
}

// ============================================================================
// Rounding
// ============================================================================

/// Canonical nutrient rounding
///
/// Below 0.1 (including negatives and NaN) is noise and becomes 0; values in
/// [0.1, 1) keep one decimal; everything else keeps two decimals.
pub fn round_nutrient(value: f64) -> f64 {
    if !value.is_finite() || value < 0.1 {
        return 0.0;
    }
    if value < 1.0 {
        round_to(value, 1)
    } else {
        round_to(value, 2)
    }
}

/// Half-away-from-zero rounding that ignores binary representation error
/// (12.345 rounds to 12.35, not 12.34)
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    let snapped = (scaled * 1e6).round() / 1e6;
    snapped.round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order_matches_keys() {
        for (i, key) in NutrientKey::ALL.iter().enumerate() {
            assert_eq!(NUTRIENT_FIELDS[i].key, *key);
            assert_eq!(field_for(*key).key, *key);
        }
    }

    #[test]
    fn test_product_scales() {
        assert_eq!(field_for(NutrientKey::Sodium).product_scale, 1_000.0);
        assert_eq!(field_for(NutrientKey::Potassium).product_scale, 1_000.0);
        assert_eq!(field_for(NutrientKey::VitaminA).product_scale, 1_000_000.0);
        assert_eq!(field_for(NutrientKey::Protein).product_scale, 1.0);
    }

    #[test]
    fn test_round_nutrient() {
        assert_eq!(round_nutrient(0.05), 0.0);
        assert_eq!(round_nutrient(0.55), 0.6);
        assert_eq!(round_nutrient(12.345), 12.35);
        assert_eq!(round_nutrient(280.0), 280.0);
        assert_eq!(round_nutrient(-3.0), 0.0);
        assert_eq!(round_nutrient(f64::NAN), 0.0);
        assert_eq!(round_nutrient(0.1), 0.1);
    }

    #[test]
    fn test_usda_unit_factor() {
        assert_eq!(usda_unit_factor(NutrientKey::Sodium, Some("MG")), Some(1.0));
        assert_eq!(usda_unit_factor(NutrientKey::Sodium, Some("G")), Some(1_000.0));
        assert_eq!(usda_unit_factor(NutrientKey::VitaminA, Some("UG")), Some(1.0));
        assert_eq!(usda_unit_factor(NutrientKey::Calories, Some("kJ")), None);
        assert_eq!(usda_unit_factor(NutrientKey::VitaminA, Some("IU")), None);
        assert_eq!(usda_unit_factor(NutrientKey::Protein, None), Some(1.0));
    }
}
