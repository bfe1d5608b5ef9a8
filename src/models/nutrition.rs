//! Shared nutrition data structure
//!
//! Canonical per-100g nutrient values carried by every food record.

use serde::{Deserialize, Serialize};

/// The twelve nutrients reported for a food
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientKey {
    Calories,
    Protein,
    Carbs,
    Fat,
    Fiber,
    Sugar,
    Sodium,
    Calcium,
    Iron,
    VitaminC,
    VitaminA,
    Potassium,
}

impl NutrientKey {
    /// All keys in display order
    pub const ALL: [NutrientKey; 12] = [
        NutrientKey::Calories,
        NutrientKey::Protein,
        NutrientKey::Carbs,
        NutrientKey::Fat,
        NutrientKey::Fiber,
        NutrientKey::Sugar,
        NutrientKey::Sodium,
        NutrientKey::Calcium,
        NutrientKey::Iron,
        NutrientKey::VitaminC,
        NutrientKey::VitaminA,
        NutrientKey::Potassium,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NutrientKey::Calories => "calories",
            NutrientKey::Protein => "protein",
            NutrientKey::Carbs => "carbs",
            NutrientKey::Fat => "fat",
            NutrientKey::Fiber => "fiber",
            NutrientKey::Sugar => "sugar",
            NutrientKey::Sodium => "sodium",
            NutrientKey::Calcium => "calcium",
            NutrientKey::Iron => "iron",
            NutrientKey::VitaminC => "vitamin_c",
            NutrientKey::VitaminA => "vitamin_a",
            NutrientKey::Potassium => "potassium",
        }
    }

    /// Parse from a loose name ("vitamin c", "carbohydrate", "sugars", ...)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "calories" | "energy" | "kcal" => Some(NutrientKey::Calories),
            "protein" | "proteins" => Some(NutrientKey::Protein),
            "carbs" | "carbohydrate" | "carbohydrates" => Some(NutrientKey::Carbs),
            "fat" | "total lipid" => Some(NutrientKey::Fat),
            "fiber" | "fibre" => Some(NutrientKey::Fiber),
            "sugar" | "sugars" => Some(NutrientKey::Sugar),
            "sodium" => Some(NutrientKey::Sodium),
            "calcium" => Some(NutrientKey::Calcium),
            "iron" => Some(NutrientKey::Iron),
            "vitamin c" | "vitaminc" => Some(NutrientKey::VitaminC),
            "vitamin a" | "vitamina" => Some(NutrientKey::VitaminA),
            "potassium" => Some(NutrientKey::Potassium),
            _ => None,
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            NutrientKey::Calories => "Calories",
            NutrientKey::Protein => "Protein",
            NutrientKey::Carbs => "Carbohydrates",
            NutrientKey::Fat => "Fat",
            NutrientKey::Fiber => "Fiber",
            NutrientKey::Sugar => "Sugar",
            NutrientKey::Sodium => "Sodium",
            NutrientKey::Calcium => "Calcium",
            NutrientKey::Iron => "Iron",
            NutrientKey::VitaminC => "Vitamin C",
            NutrientKey::VitaminA => "Vitamin A",
            NutrientKey::Potassium => "Potassium",
        }
    }

    /// Reporting unit after normalization
    pub fn unit(&self) -> &'static str {
        match self {
            NutrientKey::Calories => "kcal",
            NutrientKey::Protein
            | NutrientKey::Carbs
            | NutrientKey::Fat
            | NutrientKey::Fiber
            | NutrientKey::Sugar => "g",
            NutrientKey::Sodium
            | NutrientKey::Calcium
            | NutrientKey::Iron
            | NutrientKey::VitaminC
            | NutrientKey::Potassium => "mg",
            NutrientKey::VitaminA => "mcg",
        }
    }
}

/// Nutritional information per 100g
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,   // grams
    pub carbs: f64,     // grams
    pub fat: f64,       // grams
    pub fiber: f64,     // grams
    pub sugar: f64,     // grams
    pub sodium: f64,    // milligrams
    pub calcium: f64,   // milligrams
    pub iron: f64,      // milligrams
    pub vitamin_c: f64, // milligrams
    pub vitamin_a: f64, // micrograms
    pub potassium: f64, // milligrams
}

impl Nutrition {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, key: NutrientKey) -> f64 {
        match key {
            NutrientKey::Calories => self.calories,
            NutrientKey::Protein => self.protein,
            NutrientKey::Carbs => self.carbs,
            NutrientKey::Fat => self.fat,
            NutrientKey::Fiber => self.fiber,
            NutrientKey::Sugar => self.sugar,
            NutrientKey::Sodium => self.sodium,
            NutrientKey::Calcium => self.calcium,
            NutrientKey::Iron => self.iron,
            NutrientKey::VitaminC => self.vitamin_c,
            NutrientKey::VitaminA => self.vitamin_a,
            NutrientKey::Potassium => self.potassium,
        }
    }

    pub fn set(&mut self, key: NutrientKey, value: f64) {
        let slot = match key {
            NutrientKey::Calories => &mut self.calories,
            NutrientKey::Protein => &mut self.protein,
            NutrientKey::Carbs => &mut self.carbs,
            NutrientKey::Fat => &mut self.fat,
            NutrientKey::Fiber => &mut self.fiber,
            NutrientKey::Sugar => &mut self.sugar,
            NutrientKey::Sodium => &mut self.sodium,
            NutrientKey::Calcium => &mut self.calcium,
            NutrientKey::Iron => &mut self.iron,
            NutrientKey::VitaminC => &mut self.vitamin_c,
            NutrientKey::VitaminA => &mut self.vitamin_a,
            NutrientKey::Potassium => &mut self.potassium,
        };
        *slot = value;
    }

    /// Iterate (key, value) pairs in display order
    pub fn iter(&self) -> impl Iterator<Item = (NutrientKey, f64)> + '_ {
        NutrientKey::ALL.iter().map(move |k| (*k, self.get(*k)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_roundtrip_all_keys() {
        let mut n = Nutrition::zero();
        for (i, key) in NutrientKey::ALL.iter().enumerate() {
            n.set(*key, i as f64 + 1.0);
        }
        for (i, (key, value)) in n.iter().enumerate() {
            assert_eq!(key, NutrientKey::ALL[i]);
            assert_eq!(value, i as f64 + 1.0);
        }
    }

    #[test]
    fn test_key_from_loose_names() {
        assert_eq!(NutrientKey::from_str("vitamin c"), Some(NutrientKey::VitaminC));
        assert_eq!(NutrientKey::from_str("vitamin_a"), Some(NutrientKey::VitaminA));
        assert_eq!(NutrientKey::from_str("Carbohydrate"), Some(NutrientKey::Carbs));
        assert_eq!(NutrientKey::from_str("sugars"), Some(NutrientKey::Sugar));
        assert_eq!(NutrientKey::from_str("cholesterol"), None);
    }

    #[test]
    fn test_units() {
        assert_eq!(NutrientKey::Sodium.unit(), "mg");
        assert_eq!(NutrientKey::VitaminA.unit(), "mcg");
        assert_eq!(NutrientKey::Protein.unit(), "g");
    }
}
