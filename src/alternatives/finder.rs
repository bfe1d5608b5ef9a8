//! Two-tier alternative search
//!
//! Curated terms are tried first; the category pool is only consulted when
//! the curated tier yields nothing.

use async_trait::async_trait;

use super::curated::CuratedTerms;
use super::matcher::{filter_category, filter_lower_calorie, finalize};
use crate::models::FoodRecord;
use crate::source::SourceResult;

/// Where candidate foods come from
#[async_trait]
pub trait CandidateLookup: Send + Sync {
    /// Foods matching one curated search term
    async fn lookup_term(&self, term: &str) -> SourceResult<Vec<FoodRecord>>;

    /// Foods sharing the original's category (one lookup)
    async fn lookup_category(&self, original: &FoodRecord) -> SourceResult<Vec<FoodRecord>>;
}

/// Which tier produced the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Curated,
    Category,
    None,
}

/// Run the curated tier, falling back to the category tier
///
/// Lookup failures never abort the search: a failed term contributes no
/// candidates, and a failed category lookup yields an empty result.
pub async fn find_alternatives(
    original: &FoodRecord,
    lookup: &dyn CandidateLookup,
    curated: &CuratedTerms,
) -> (Vec<FoodRecord>, MatchTier) {
    if let Some((key, terms)) = curated.terms_for(&original.name) {
        tracing::debug!("Curated key '{}' matched '{}' ({} terms)", key, original.name, terms.len());

        let mut pool = Vec::new();
        for term in terms {
            match lookup.lookup_term(term).await {
                Ok(found) => pool.extend(found),
                Err(e) => tracing::warn!("Curated term lookup '{}' failed: {}", term, e),
            }
        }

        let matched = finalize(filter_lower_calorie(original, pool));
        if !matched.is_empty() {
            return (matched, MatchTier::Curated);
        }
    }

    let pool = match lookup.lookup_category(original).await {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!("Category lookup for '{}' failed: {}", original.name, e);
            Vec::new()
        }
    };

    let matched = finalize(filter_category(original, pool));
    if matched.is_empty() {
        (matched, MatchTier::None)
    } else {
        (matched, MatchTier::Category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceError;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeLookup {
        terms: HashMap<String, Vec<FoodRecord>>,
        category: Vec<FoodRecord>,
        failing_terms: Vec<String>,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CandidateLookup for FakeLookup {
        async fn lookup_term(&self, term: &str) -> SourceResult<Vec<FoodRecord>> {
            self.calls.lock().unwrap().push(format!("term:{}", term));
            if self.failing_terms.iter().any(|t| t == term) {
                return Err(SourceError::Backend("boom".into()));
            }
            Ok(self.terms.get(term).cloned().unwrap_or_default())
        }

        async fn lookup_category(&self, _original: &FoodRecord) -> SourceResult<Vec<FoodRecord>> {
            self.calls.lock().unwrap().push("category".into());
            Ok(self.category.clone())
        }
    }

    fn curated() -> CuratedTerms {
        CuratedTerms::new(vec![(
            "pizza".into(),
            vec!["veggie pizza".into(), "pita pizza".into()],
        )])
    }

    #[tokio::test]
    async fn test_curated_tier_preferred() {
        let original = FoodRecord::new(1, "cheese pizza", 280.0);
        let mut lookup = FakeLookup::default();
        lookup.terms.insert(
            "veggie pizza".into(),
            vec![
                FoodRecord::new(2, "Veggie Pizza", 220.0),
                FoodRecord::new(3, "Deep Dish Veggie Pizza", 310.0),
                FoodRecord::new(1, "cheese pizza", 200.0),
            ],
        );
        lookup.terms.insert(
            "pita pizza".into(),
            vec![FoodRecord::new(2, "Veggie Pizza", 220.0), FoodRecord::new(4, "Pita Pizza", 180.0)],
        );
        lookup.category = vec![FoodRecord::new(9, "cheese pizza slice", 100.0)];

        let (found, tier) = find_alternatives(&original, &lookup, &curated()).await;
        assert_eq!(tier, MatchTier::Curated);
        let ids: Vec<_> = found.iter().map(|f| f.raw_id.to_string()).collect();
        assert_eq!(ids, vec!["2", "4"]);
        assert!(!lookup.calls.lock().unwrap().contains(&"category".to_string()));
    }

    #[tokio::test]
    async fn test_failed_term_does_not_abort() {
        let original = FoodRecord::new(1, "cheese pizza", 280.0);
        let mut lookup = FakeLookup::default();
        lookup.failing_terms.push("veggie pizza".into());
        lookup
            .terms
            .insert("pita pizza".into(), vec![FoodRecord::new(4, "Pita Pizza", 180.0)]);

        let (found, tier) = find_alternatives(&original, &lookup, &curated()).await;
        assert_eq!(tier, MatchTier::Curated);
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_falls_back_to_category() {
        let original = FoodRecord::new(1, "Chicken breast, fried", 250.0).with_category("Poultry");
        let mut lookup = FakeLookup::default();
        lookup.category = vec![
            FoodRecord::new(2, "Chicken breast, roasted", 165.0).with_category("Poultry"),
            FoodRecord::new(3, "Apple, raw", 52.0).with_category("Fruits"),
        ];

        let (found, tier) = find_alternatives(&original, &lookup, &curated()).await;
        assert_eq!(tier, MatchTier::Category);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].raw_id.to_string(), "2");
    }

    #[tokio::test]
    async fn test_empty_curated_falls_through() {
        let original = FoodRecord::new(1, "cheese pizza", 280.0);
        let mut lookup = FakeLookup::default();
        lookup.terms.insert(
            "veggie pizza".into(),
            vec![FoodRecord::new(2, "Huge Veggie Pizza", 400.0)],
        );
        lookup.category = vec![FoodRecord::new(5, "cheese pizza, thin", 200.0)];

        let (found, tier) = find_alternatives(&original, &lookup, &curated()).await;
        assert_eq!(tier, MatchTier::Category);
        assert_eq!(found[0].raw_id.to_string(), "5");
    }

    #[tokio::test]
    async fn test_no_alternatives_is_not_an_error() {
        let original = FoodRecord::new(1, "water", 0.0);
        let lookup = FakeLookup::default();
        let (found, tier) = find_alternatives(&original, &lookup, &curated()).await;
        assert!(found.is_empty());
        assert_eq!(tier, MatchTier::None);
    }

    #[tokio::test]
    async fn test_deterministic_ordering() {
        let original = FoodRecord::new(1, "cheese pizza", 280.0);
        let mut lookup = FakeLookup::default();
        lookup.terms.insert(
            "veggie pizza".into(),
            (10..20).map(|i| FoodRecord::new(i, "pizza", 100.0 + i as f64)).collect(),
        );

        let (first, _) = find_alternatives(&original, &lookup, &curated()).await;
        let (second, _) = find_alternatives(&original, &lookup, &curated()).await;
        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
    }
}
