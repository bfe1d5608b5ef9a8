//! USDA-backed food source
//!
//! Searches FoodData Central through the backend proxy and finds
//! alternatives with the curated/category matcher.

use async_trait::async_trait;

use super::client::{BackendClient, SourceResult};
use super::{to_records, FoodSource, SourceKind};
use crate::alternatives::matcher::FOOD_TYPES;
use crate::alternatives::{find_alternatives, CandidateLookup, CuratedTerms, MatchTier};
use crate::models::FoodRecord;

pub struct UsdaFoodSource {
    client: BackendClient,
    curated: CuratedTerms,
    page_size: u32,
    alternative_page_size: u32,
}

impl UsdaFoodSource {
    pub fn new(client: BackendClient, curated: CuratedTerms, page_size: u32, alternative_page_size: u32) -> Self {
        Self {
            client,
            curated,
            page_size: page_size.max(1),
            alternative_page_size: alternative_page_size.max(1),
        }
    }
}

/// Query used for the single category-tier lookup
///
/// The USDA category when known, else the food type in the name, else the
/// name itself.
pub fn category_query(original: &FoodRecord) -> String {
    if let Some(category) = original.category.as_deref().filter(|c| !c.trim().is_empty()) {
        return category.to_string();
    }
    let name = original.name.to_lowercase();
    FOOD_TYPES
        .iter()
        .find(|t| name.contains(*t))
        .map(|t| t.to_string())
        .unwrap_or_else(|| original.name.clone())
}

#[async_trait]
impl CandidateLookup for UsdaFoodSource {
    async fn lookup_term(&self, term: &str) -> SourceResult<Vec<FoodRecord>> {
        let foods = self.client.usda_search(term, self.alternative_page_size).await?;
        Ok(to_records(foods))
    }

    async fn lookup_category(&self, original: &FoodRecord) -> SourceResult<Vec<FoodRecord>> {
        // The category pool needs room for the filters to bite
        let foods = self
            .client
            .usda_search(&category_query(original), self.page_size.max(20))
            .await?;
        Ok(to_records(foods))
    }
}

#[async_trait]
impl FoodSource for UsdaFoodSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Usda
    }

    async fn search(&self, query: &str) -> SourceResult<Vec<FoodRecord>> {
        let foods = self.client.usda_search(query, self.page_size).await?;
        Ok(to_records(foods))
    }

    async fn alternatives(&self, food: &FoodRecord) -> SourceResult<Vec<FoodRecord>> {
        let (found, tier) = find_alternatives(food, self, &self.curated).await;
        match tier {
            MatchTier::Curated => tracing::info!("{} curated alternatives for '{}'", found.len(), food.name),
            MatchTier::Category => tracing::info!("{} category alternatives for '{}'", found.len(), food.name),
            MatchTier::None => tracing::info!("No alternatives for '{}'", food.name),
        }
        Ok(found)
    }
}
