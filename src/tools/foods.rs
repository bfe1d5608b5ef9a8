//! Food lookup tools
//!
//! Search, alternative detail and comparison, reported as structured cards.

use serde::Serialize;

use crate::metabolic::{compare_weight_impact, project_intake, ComparisonRow, IntakeProjection, SavingsVerdict};
use crate::models::{FoodRecord, NutrientKey, UserProfile};
use crate::session::LookupSession;
use crate::source::FoodSource;

const NO_INGREDIENTS: &str = "Ingredient information not available for this product";

/// One nutrient row
#[derive(Debug, Serialize)]
pub struct NutrientLine {
    pub key: NutrientKey,
    pub label: &'static str,
    pub value: f64,
    pub unit: &'static str,
}

/// Full nutrition card for a food
#[derive(Debug, Serialize)]
pub struct FoodCard {
    pub id: String,
    pub name: String,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub nutri_score: Option<String>,
    /// Values are per 100g
    pub nutrients: Vec<NutrientLine>,
    pub ingredients: String,
    pub health_benefits: Option<String>,
    /// Gain if eaten daily; absent for foods without calories
    pub weight_impact: Option<IntakeProjection>,
}

impl FoodCard {
    pub fn build(food: &FoodRecord, profile: &UserProfile) -> Self {
        Self {
            id: food.raw_id.to_string(),
            name: food.display_name().to_string(),
            brand: food.brand.clone(),
            category: food.category.clone(),
            nutri_score: food.nutri_score.as_deref().map(str::to_uppercase),
            nutrients: food
                .nutrients
                .iter()
                .map(|(key, value)| NutrientLine {
                    key,
                    label: key.label(),
                    value,
                    unit: key.unit(),
                })
                .collect(),
            ingredients: food
                .ingredients
                .clone()
                .unwrap_or_else(|| NO_INGREDIENTS.to_string()),
            health_benefits: food.health_benefits.clone(),
            weight_impact: project_intake(food.calories(), profile),
        }
    }
}

/// Alternative entry in a search result
#[derive(Debug, Serialize)]
pub struct AlternativeSummary {
    pub index: usize,
    pub id: String,
    pub name: String,
    pub brand: Option<String>,
    pub calories: f64,
    pub nutri_score: Option<String>,
    pub health_benefits: Option<String>,
}

impl AlternativeSummary {
    fn build(index: usize, food: &FoodRecord) -> Self {
        Self {
            index,
            id: food.raw_id.to_string(),
            name: food.display_name().to_string(),
            brand: food.brand.clone(),
            calories: food.calories(),
            nutri_score: food.nutri_score.as_deref().map(str::to_uppercase),
            health_benefits: food.health_benefits.clone(),
        }
    }
}

/// Response for search_food
#[derive(Debug, Serialize)]
pub struct SearchFoodResponse {
    pub source: &'static str,
    pub food: FoodCard,
    pub alternatives: Vec<AlternativeSummary>,
    /// Set when the alternative lookup failed; the food itself is still valid
    pub alternatives_error: Option<String>,
    pub message: Option<String>,
    /// A newer search finished first; this result was not stored
    pub superseded: bool,
}

/// Search for a food, then look up alternatives for the best match
pub async fn search_food(
    source: &dyn FoodSource,
    session: &LookupSession,
    query: &str,
    profile: &UserProfile,
) -> Result<SearchFoodResponse, String> {
    let query = query.trim();
    if query.is_empty() {
        return Err("Please enter a food item to search".to_string());
    }

    let ticket = session.begin_search();
    tracing::info!("Searching '{}' via {}", query, source.kind().as_str());

    let results = source
        .search(query)
        .await
        .map_err(|e| format!("Search failed: {}", e))?;

    let Some(food) = results.into_iter().next() else {
        return Err(
            "Could not find this food item. Try common foods like \"pizza\", \"burger\", or brand names."
                .to_string(),
        );
    };

    let (alternatives, alternatives_error) = match source.alternatives(&food).await {
        Ok(found) => (found, None),
        Err(e) => {
            tracing::warn!("Alternative search for '{}' failed: {}", food.name, e);
            (Vec::new(), Some(format!("Alternative search failed: {}", e)))
        }
    };

    let message = (alternatives.is_empty() && alternatives_error.is_none()).then(|| {
        "No healthier alternatives found. Try searching for more specific product names or brands."
            .to_string()
    });

    let card = FoodCard::build(&food, profile);
    let summaries = alternatives
        .iter()
        .enumerate()
        .map(|(i, f)| AlternativeSummary::build(i, f))
        .collect();

    let superseded = !session.commit(ticket, food, alternatives);

    Ok(SearchFoodResponse {
        source: source.kind().as_str(),
        food: card,
        alternatives: summaries,
        alternatives_error,
        message,
        superseded,
    })
}

/// Detail card for one of the current alternatives
pub fn get_alternative(
    session: &LookupSession,
    index: usize,
    profile: &UserProfile,
) -> Result<FoodCard, String> {
    if session.snapshot().current_food.is_none() {
        return Err("No food has been searched yet".to_string());
    }
    let food = session
        .select(index)
        .ok_or_else(|| format!("No alternative at index {}", index))?;
    Ok(FoodCard::build(&food, profile))
}

/// Response for compare_foods
#[derive(Debug, Serialize)]
pub struct ComparisonReport {
    pub original: String,
    pub alternative: String,
    pub original_calories: f64,
    pub alternative_calories: f64,
    /// Positive means the alternative has fewer calories
    pub calorie_savings: f64,
    pub rows: Vec<ComparisonRow>,
    pub yearly_savings_kg: f64,
    pub verdict: SavingsVerdict,
    pub summary: String,
}

/// Compare the current food with the selected alternative
pub fn compare_foods(session: &LookupSession, profile: &UserProfile) -> Result<ComparisonReport, String> {
    let snapshot = session.snapshot();
    let original = snapshot
        .current_food
        .as_ref()
        .ok_or_else(|| "No food has been searched yet".to_string())?;
    let alternative = snapshot
        .selected_alternative()
        .ok_or_else(|| "Select an alternative with get_alternative first".to_string())?;

    Ok(comparison_report(original, alternative, profile))
}

pub fn comparison_report(original: &FoodRecord, alternative: &FoodRecord, profile: &UserProfile) -> ComparisonReport {
    let comparison = compare_weight_impact(original.calories(), alternative.calories(), profile);
    let summary = comparison.summary();

    ComparisonReport {
        original: original.display_name().to_string(),
        alternative: alternative.display_name().to_string(),
        original_calories: original.calories(),
        alternative_calories: alternative.calories(),
        calorie_savings: comparison.calorie_savings,
        rows: comparison.rows,
        yearly_savings_kg: comparison.yearly_savings_kg,
        verdict: comparison.verdict,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{SourceError, SourceKind, SourceResult};
    use async_trait::async_trait;

    struct StubSource {
        foods: Vec<FoodRecord>,
        alternatives: Option<Vec<FoodRecord>>,
    }

    #[async_trait]
    impl FoodSource for StubSource {
        fn kind(&self) -> SourceKind {
            SourceKind::Llm
        }

        async fn search(&self, _query: &str) -> SourceResult<Vec<FoodRecord>> {
            Ok(self.foods.clone())
        }

        async fn alternatives(&self, _food: &FoodRecord) -> SourceResult<Vec<FoodRecord>> {
            self.alternatives
                .clone()
                .ok_or_else(|| SourceError::Backend("model unavailable".into()))
        }
    }

    fn pizza() -> FoodRecord {
        let mut food = FoodRecord::new("p1", "Cheese Pizza", 280.0);
        food.nutri_score = Some("d".into());
        food
    }

    #[tokio::test]
    async fn test_search_commits_and_reports() {
        let source = StubSource {
            foods: vec![pizza()],
            alternatives: Some(vec![FoodRecord::new("p2", "Veggie Pizza", 200.0)]),
        };
        let session = LookupSession::new();

        let response = search_food(&source, &session, " pizza ", &UserProfile::default())
            .await
            .unwrap();
        assert_eq!(response.food.name, "Cheese Pizza");
        assert_eq!(response.food.nutri_score.as_deref(), Some("D"));
        assert_eq!(response.food.nutrients.len(), 12);
        assert_eq!(response.food.ingredients, NO_INGREDIENTS);
        assert!(response.food.weight_impact.is_some());
        assert_eq!(response.alternatives.len(), 1);
        assert!(!response.superseded);
        assert!(response.message.is_none());

        let card = get_alternative(&session, 0, &UserProfile::default()).unwrap();
        assert_eq!(card.name, "Veggie Pizza");

        let report = compare_foods(&session, &UserProfile::default()).unwrap();
        assert_eq!(report.calorie_savings, 80.0);
        assert_eq!(report.rows.len(), 5);
    }

    #[tokio::test]
    async fn test_empty_query_rejected() {
        let source = StubSource { foods: vec![], alternatives: Some(vec![]) };
        let err = search_food(&source, &LookupSession::new(), "  ", &UserProfile::default())
            .await
            .unwrap_err();
        assert_eq!(err, "Please enter a food item to search");
    }

    #[tokio::test]
    async fn test_no_results_is_error() {
        let source = StubSource { foods: vec![], alternatives: Some(vec![]) };
        let err = search_food(&source, &LookupSession::new(), "zzz", &UserProfile::default())
            .await
            .unwrap_err();
        assert!(err.starts_with("Could not find this food item"));
    }

    #[tokio::test]
    async fn test_alternative_failure_keeps_food() {
        let source = StubSource { foods: vec![pizza()], alternatives: None };
        let session = LookupSession::new();
        let response = search_food(&source, &session, "pizza", &UserProfile::default())
            .await
            .unwrap();
        assert!(response.alternatives.is_empty());
        assert!(response.alternatives_error.unwrap().contains("model unavailable"));
        assert!(session.snapshot().current_food.is_some());
    }

    #[tokio::test]
    async fn test_no_alternatives_message() {
        let source = StubSource { foods: vec![pizza()], alternatives: Some(vec![]) };
        let response = search_food(&source, &LookupSession::new(), "pizza", &UserProfile::default())
            .await
            .unwrap();
        assert!(response.message.unwrap().starts_with("No healthier alternatives found"));
    }

    #[test]
    fn test_compare_requires_selection() {
        let session = LookupSession::new();
        assert!(compare_foods(&session, &UserProfile::default()).is_err());
        let t = session.begin_search();
        session.commit(t, pizza(), vec![FoodRecord::new("p2", "Veggie Pizza", 200.0)]);
        let err = compare_foods(&session, &UserProfile::default()).unwrap_err();
        assert!(err.contains("get_alternative"));
    }
}
