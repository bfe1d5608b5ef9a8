//! Food sources
//!
//! One search/alternatives capability with two backend flavours: the LLM
//! endpoints and the USDA search endpoint plus curated matching.

pub mod client;
pub mod llm;
pub mod usda;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::alternatives::CuratedTerms;
use crate::models::FoodRecord;

pub use client::{BackendClient, CurrentUser, SourceError, SourceResult, StoredProfile};
pub use llm::LlmFoodSource;
pub use usda::UsdaFoodSource;

/// Which backend flavour to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Llm,
    Usda,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Llm => "llm",
            SourceKind::Usda => "usda",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "llm" | "ai" => Some(SourceKind::Llm),
            "usda" | "fdc" => Some(SourceKind::Usda),
            _ => None,
        }
    }
}

/// Search and alternative lookup
#[async_trait]
pub trait FoodSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    /// Foods matching a free-text query, best match first
    async fn search(&self, query: &str) -> SourceResult<Vec<FoodRecord>>;

    /// Healthier alternatives for a food; empty when none are found
    async fn alternatives(&self, food: &FoodRecord) -> SourceResult<Vec<FoodRecord>>;
}

/// Build the configured source
pub fn build_source(
    kind: SourceKind,
    client: BackendClient,
    curated: CuratedTerms,
    page_size: u32,
    alternative_page_size: u32,
) -> Arc<dyn FoodSource> {
    match kind {
        SourceKind::Llm => Arc::new(LlmFoodSource::new(client)),
        SourceKind::Usda => Arc::new(UsdaFoodSource::new(client, curated, page_size, alternative_page_size)),
    }
}

/// Normalize upstream records, skipping any that cannot be identified
pub(crate) fn to_records(items: Vec<Value>) -> Vec<FoodRecord> {
    let total = items.len();
    let records: Vec<FoodRecord> = items.iter().filter_map(FoodRecord::from_upstream).collect();
    if records.len() < total {
        tracing::debug!("Skipped {} unidentifiable records", total - records.len());
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_source_kind_parsing() {
        assert_eq!(SourceKind::from_str("LLM"), Some(SourceKind::Llm));
        assert_eq!(SourceKind::from_str(" usda "), Some(SourceKind::Usda));
        assert_eq!(SourceKind::from_str("openfoodfacts"), None);
    }

    #[test]
    fn test_to_records_skips_unidentifiable() {
        let records = to_records(vec![
            json!({"code": "1", "product_name": "Oat Milk"}),
            json!({"nutriments": {}}),
        ]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Oat Milk");
    }
}
