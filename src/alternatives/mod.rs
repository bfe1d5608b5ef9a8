//! Healthier alternative matching
//!
//! Curated-term lookups with a category-similarity fallback.

pub mod curated;
pub mod finder;
pub mod matcher;

pub use curated::CuratedTerms;
pub use finder::{find_alternatives, CandidateLookup, MatchTier};
pub use matcher::{
    filter_category, filter_lower_calorie, finalize, has_ingredient_overlap,
    is_lower_calorie_alternative, same_category_or_similar, MAX_ALTERNATIVES,
};
