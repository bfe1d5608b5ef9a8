//! Alternative filtering heuristics
//!
//! Pure predicates and pool operations shared by both matching tiers.

use std::collections::HashSet;

use crate::models::FoodRecord;

/// Maximum number of alternatives returned
pub const MAX_ALTERNATIVES: usize = 6;

/// Food types that make two differently-categorized foods comparable
pub const FOOD_TYPES: [&str; 10] = [
    "pizza", "burger", "sandwich", "chicken", "beef", "pasta", "bread", "cheese", "milk", "yogurt",
];

const STOP_WORDS: [&str; 5] = ["with", "and", "the", "from", "for"];

/// Candidate is a different food with fewer (but some) calories
pub fn is_lower_calorie_alternative(original: &FoodRecord, candidate: &FoodRecord) -> bool {
    let calories = candidate.calories();
    candidate.raw_id != original.raw_id && calories > 0.0 && calories < original.calories()
}

/// Same category (exact, case-sensitive) or a shared food-type word
pub fn same_category_or_similar(original: &FoodRecord, candidate: &FoodRecord) -> bool {
    if let (Some(a), Some(b)) = (&original.category, &candidate.category) {
        if a == b {
            return true;
        }
    }

    let a = original.name.to_lowercase();
    let b = candidate.name.to_lowercase();
    FOOD_TYPES.iter().any(|t| a.contains(t) && b.contains(t))
}

/// Significant description words: lowercase, longer than 3 chars, no stop words
pub fn significant_tokens(description: &str) -> HashSet<String> {
    description
        .split(|c: char| c.is_whitespace() || c == ',')
        .map(str::to_lowercase)
        .filter(|t| t.chars().count() > 3 && !STOP_WORDS.contains(&t.as_str()))
        .collect()
}

/// At least one significant word in common
pub fn has_ingredient_overlap(original: &FoodRecord, candidate: &FoodRecord) -> bool {
    let a = significant_tokens(&original.name);
    if a.is_empty() {
        return false;
    }
    significant_tokens(&candidate.name)
        .iter()
        .any(|t| a.contains(t))
}

/// Base predicate only (curated tier and model suggestions)
pub fn filter_lower_calorie(original: &FoodRecord, pool: Vec<FoodRecord>) -> Vec<FoodRecord> {
    pool.into_iter()
        .filter(|c| is_lower_calorie_alternative(original, c))
        .collect()
}

/// Category tier filter: base predicate, similarity and word overlap
pub fn filter_category(original: &FoodRecord, pool: Vec<FoodRecord>) -> Vec<FoodRecord> {
    pool.into_iter()
        .filter(|c| {
            is_lower_calorie_alternative(original, c)
                && same_category_or_similar(original, c)
                && has_ingredient_overlap(original, c)
        })
        .collect()
}

/// Dedupe by raw id keeping first occurrences, then cap the length
pub fn finalize(pool: Vec<FoodRecord>) -> Vec<FoodRecord> {
    let mut seen = HashSet::new();
    pool.into_iter()
        .filter(|f| seen.insert(f.raw_id.clone()))
        .take(MAX_ALTERNATIVES)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(id: i64, name: &str, calories: f64) -> FoodRecord {
        FoodRecord::new(id, name, calories)
    }

    #[test]
    fn test_lower_calorie_predicate() {
        let original = food(1, "cheese pizza", 280.0);
        assert!(is_lower_calorie_alternative(&original, &food(2, "veggie pizza", 200.0)));
        assert!(!is_lower_calorie_alternative(&original, &food(2, "veggie pizza", 280.0)));
        assert!(!is_lower_calorie_alternative(&original, &food(2, "water", 0.0)));
        assert!(!is_lower_calorie_alternative(&original, &food(1, "cheese pizza lite", 100.0)));
    }

    #[test]
    fn test_same_category_exact_and_case_sensitive() {
        let a = food(1, "x", 100.0).with_category("Dairy");
        assert!(same_category_or_similar(&a, &food(2, "y", 50.0).with_category("Dairy")));
        assert!(!same_category_or_similar(&a, &food(2, "y", 50.0).with_category("dairy")));
    }

    #[test]
    fn test_similar_by_food_type() {
        let a = food(1, "Beef Burger Deluxe", 300.0);
        assert!(same_category_or_similar(&a, &food(2, "turkey BURGER", 200.0)));
        assert!(!same_category_or_similar(&a, &food(2, "garden salad", 50.0)));
    }

    #[test]
    fn test_tokens_drop_short_and_stop_words() {
        let tokens = significant_tokens("Chicken, with rice and the beans from Mexico");
        assert!(tokens.contains("chicken"));
        assert!(tokens.contains("rice"));
        assert!(tokens.contains("beans"));
        assert!(tokens.contains("mexico"));
        assert!(!tokens.contains("with"));
        assert!(!tokens.contains("from"));
        assert!(!tokens.contains("and"));
    }

    #[test]
    fn test_ingredient_overlap() {
        let a = food(1, "Chicken breast, fried", 250.0);
        assert!(has_ingredient_overlap(&a, &food(2, "chicken breast, roasted", 165.0)));
        assert!(!has_ingredient_overlap(&a, &food(3, "Tofu, raw", 76.0)));
        // Only stop words and short tokens in common
        let b = food(4, "Pie with the jam", 300.0);
        assert!(!has_ingredient_overlap(&b, &food(5, "Tea with the milk", 40.0)));
    }

    #[test]
    fn test_filter_category_requires_all_predicates() {
        let original = food(1, "Chicken breast, fried", 250.0).with_category("Poultry Products");
        let pool = vec![
            food(2, "Chicken breast, roasted", 165.0).with_category("Poultry Products"),
            food(3, "Chicken thigh, fried", 280.0).with_category("Poultry Products"),
            food(4, "Turkey breast, roasted", 150.0).with_category("Poultry Products"),
            food(5, "Tofu, raw", 76.0).with_category("Legumes"),
            food(1, "Chicken breast, fried", 200.0),
        ];
        let out = filter_category(&original, pool);
        let ids: Vec<_> = out.iter().map(|f| f.raw_id.to_string()).collect();
        assert_eq!(ids, vec!["2", "4"]);
    }

    #[test]
    fn test_finalize_dedupes_and_caps() {
        let mut pool: Vec<_> = (0..10).map(|i| food(i, "x", 10.0)).collect();
        pool.insert(1, food(0, "duplicate", 5.0));
        let out = finalize(pool);
        assert_eq!(out.len(), MAX_ALTERNATIVES);
        assert_eq!(out[0].name, "x");
        let ids: HashSet<_> = out.iter().map(|f| f.raw_id.clone()).collect();
        assert_eq!(ids.len(), out.len());
    }
}
