//! Curated alternative terms
//!
//! A hand-authored, ordered table mapping common food names to healthier
//! search terms. Order matters: the first key contained in a food's name wins.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Ordered (key, terms) pairs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CuratedTerms(Vec<(String, Vec<String>)>);

impl CuratedTerms {
    pub fn new(entries: Vec<(String, Vec<String>)>) -> Self {
        Self(entries)
    }

    /// The built-in table
    pub fn builtin() -> Self {
        let table: &[(&str, &[&str])] = &[
            ("pizza", &["cauliflower crust pizza", "thin crust vegetable pizza", "whole wheat pita pizza"]),
            ("burger", &["turkey burger", "veggie burger", "black bean burger"]),
            ("fried chicken", &["grilled chicken breast", "baked chicken"]),
            ("french fries", &["baked sweet potato", "roasted potatoes"]),
            ("fries", &["baked sweet potato", "roasted potatoes"]),
            ("chips", &["air popped popcorn", "rice cakes", "baked tortilla chips"]),
            ("ice cream", &["frozen yogurt", "sorbet", "greek yogurt"]),
            ("soda", &["sparkling water", "unsweetened iced tea"]),
            ("donut", &["whole wheat english muffin", "bagel thin"]),
            ("cookie", &["oatmeal", "rice cake"]),
            ("chocolate", &["dark chocolate", "cocoa powder"]),
            ("bacon", &["turkey bacon", "canadian bacon"]),
            ("sausage", &["chicken sausage", "turkey sausage"]),
            ("white bread", &["whole wheat bread", "rye bread"]),
            ("pasta", &["whole wheat pasta", "zucchini noodles"]),
            ("white rice", &["brown rice", "cauliflower rice"]),
            ("whole milk", &["skim milk", "almond milk unsweetened"]),
            ("cheese", &["part skim mozzarella", "cottage cheese low fat"]),
            ("mayonnaise", &["greek yogurt plain", "mustard"]),
            ("sour cream", &["greek yogurt plain nonfat"]),
        ];

        Self(
            table
                .iter()
                .map(|(key, terms)| {
                    (key.to_string(), terms.iter().map(|t| t.to_string()).collect())
                })
                .collect(),
        )
    }

    /// Load from a JSON file shaped like `[["pizza", ["term", ...]], ...]`
    pub fn from_json_file(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_json(&text).map_err(|e| format!("Invalid curated terms in {}: {}", path.display(), e))
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Terms for the first key found (case-insensitively) in `food_name`
    pub fn terms_for(&self, food_name: &str) -> Option<(&str, &[String])> {
        let name = food_name.to_lowercase();
        self.0
            .iter()
            .find(|(key, _)| !key.trim().is_empty() && name.contains(&key.to_lowercase()))
            .map(|(key, terms)| (key.as_str(), terms.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
