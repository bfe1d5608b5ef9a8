//! LLM-backed food source
//!
//! The backend asks a language model for nutrition facts and alternatives;
//! results arrive in the `nutriments` product shape.

use async_trait::async_trait;

use super::client::{BackendClient, SourceResult};
use super::{to_records, FoodSource, SourceKind};
use crate::alternatives::{filter_lower_calorie, finalize};
use crate::models::FoodRecord;

pub struct LlmFoodSource {
    client: BackendClient,
}

impl LlmFoodSource {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FoodSource for LlmFoodSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Llm
    }

    async fn search(&self, query: &str) -> SourceResult<Vec<FoodRecord>> {
        let products = self.client.food_search(query).await?;
        Ok(to_records(products))
    }

    /// Model suggestions still have to be lower-calorie and distinct
    async fn alternatives(&self, food: &FoodRecord) -> SourceResult<Vec<FoodRecord>> {
        let suggested = self
            .client
            .find_alternatives(&food.name, food.calories(), food.category.as_deref())
            .await?;

        let suggested = to_records(suggested);
        let total = suggested.len();
        let kept = finalize(filter_lower_calorie(food, suggested));
        if kept.len() < total {
            tracing::debug!(
                "Dropped {} of {} suggested alternatives for '{}'",
                total - kept.len(),
                total,
                food.name
            );
        }
        Ok(kept)
    }
}
