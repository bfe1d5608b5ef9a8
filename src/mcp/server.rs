//! FoodSwap MCP Server Implementation
//!
//! Implements the MCP server with all FoodSwap tools.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::models::{ActivityLevel, Gender, UserProfile};
use crate::session::LookupSession;
use crate::source::{BackendClient, FoodSource};
use crate::tools::status::StatusTracker;
use crate::tools::{account, body, foods};

/// FoodSwap MCP Service
#[derive(Clone)]
pub struct FoodSwapService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    source: Arc<dyn FoodSource>,
    client: BackendClient,
    session: Arc<LookupSession>,
    tool_router: ToolRouter<FoodSwapService>,
}

impl FoodSwapService {
    pub fn new(source: Arc<dyn FoodSource>, client: BackendClient) -> Self {
        let tracker = StatusTracker::new(client.base_url(), source.kind());
        Self {
            status_tracker: Arc::new(Mutex::new(tracker)),
            source,
            client,
            session: Arc::new(LookupSession::new()),
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

/// Optional body profile accepted by profile-dependent tools
#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ProfileFields {
    /// Body weight in kilograms
    pub weight_kg: Option<f64>,
    /// Height in centimeters
    pub height_cm: Option<f64>,
    /// Age in years
    pub age_years: Option<u32>,
    /// "male" or "female"
    pub gender: Option<String>,
    /// "sedentary", "light", "moderate", "active" or "very_active"
    pub activity_level: Option<String>,
}

impl ProfileFields {
    pub fn to_profile(&self) -> Result<UserProfile, String> {
        let gender = match self.gender.as_deref().map(str::trim).filter(|g| !g.is_empty()) {
            Some(g) => Some(Gender::from_str(g).ok_or_else(|| format!("Invalid gender: {}", g))?),
            None => None,
        };
        let activity_level = match self.activity_level.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
            Some(a) => Some(ActivityLevel::from_str(a).ok_or_else(|| format!("Invalid activity level: {}", a))?),
            None => None,
        };

        Ok(UserProfile {
            weight_kg: self.weight_kg,
            height_cm: self.height_cm,
            age_years: self.age_years,
            gender,
            activity_level,
        })
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchFoodParams {
    /// Food name or brand product, e.g. "pizza"
    pub query: String,
    #[serde(flatten)]
    pub profile: ProfileFields,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetAlternativeParams {
    /// Index from the alternatives list of the last search
    pub index: usize,
    #[serde(flatten)]
    pub profile: ProfileFields,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ProfileParams {
    #[serde(flatten)]
    pub profile: ProfileFields,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateBmiParams {
    pub weight_kg: f64,
    pub height_cm: f64,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct WeightImpactParams {
    /// Calories eaten per day (negative for a deficit)
    pub calories: f64,
    #[serde(default = "default_days")]
    pub days: u32,
    /// Compare against this daily amount instead
    pub alternative_calories: Option<f64>,
    #[serde(flatten)]
    pub profile: ProfileFields,
}

fn default_days() -> u32 { 365 }

// ============================================================================
// Helpers
// ============================================================================

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn profile_of(fields: &ProfileFields) -> Result<UserProfile, McpError> {
    fields.to_profile().map_err(|e| McpError::invalid_params(e, None))
}

// ============================================================================
// Tools
// ============================================================================

#[tool_router]
impl FoodSwapService {
    // --- Status ---

    #[tool(description = "Get FoodSwap service status including build info, backend, uptime, and memory usage")]
    async fn foodswap_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status();
        json_result(&status)
    }

    #[tool(description = "Get instructions for using the FoodSwap tools. Call this when unsure how search, alternatives, comparison, and profile fields fit together.")]
    fn usage_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::USAGE_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(USAGE_INSTRUCTIONS)]))
    }

    // --- Foods ---

    #[tool(description = "Search a food and get its nutrition per 100g plus up to 6 lower-calorie alternatives. Replaces the previous search.")]
    async fn search_food(&self, Parameters(p): Parameters<SearchFoodParams>) -> Result<CallToolResult, McpError> {
        let profile = profile_of(&p.profile)?;
        let result = foods::search_food(self.source.as_ref(), &self.session, &p.query, &profile)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get the full nutrition card for an alternative from the last search and select it for comparison")]
    fn get_alternative(&self, Parameters(p): Parameters<GetAlternativeParams>) -> Result<CallToolResult, McpError> {
        let profile = profile_of(&p.profile)?;
        let result = foods::get_alternative(&self.session, p.index, &profile)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Compare weight impact of the searched food and the selected alternative over 1 week to 1 year of daily eating")]
    fn compare_foods(&self, Parameters(p): Parameters<ProfileParams>) -> Result<CallToolResult, McpError> {
        let profile = profile_of(&p.profile)?;
        let result = foods::compare_foods(&self.session, &profile).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Body metrics ---

    #[tool(description = "Calculate BMI with category and recommendation")]
    fn calculate_bmi(&self, Parameters(p): Parameters<CalculateBmiParams>) -> Result<CallToolResult, McpError> {
        let result = body::calculate_bmi(p.weight_kg, p.height_cm).map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Estimate daily calorie needs (Mifflin-St Jeor). Falls back to 2000 kcal when weight, height, age or gender is missing.")]
    fn daily_calorie_needs(&self, Parameters(p): Parameters<ProfileParams>) -> Result<CallToolResult, McpError> {
        let profile = profile_of(&p.profile)?;
        json_result(&body::daily_needs(&profile))
    }

    #[tool(description = "Project weight change from a daily calorie amount over a number of days (7700 kcal per kg), optionally compared with an alternative amount")]
    fn weight_impact(&self, Parameters(p): Parameters<WeightImpactParams>) -> Result<CallToolResult, McpError> {
        let profile = profile_of(&p.profile)?;
        let result = body::weight_impact(p.calories, p.days, p.alternative_calories, &profile)
            .map_err(|e| McpError::invalid_params(e, None))?;
        json_result(&result)
    }

    // --- Account ---

    #[tool(description = "Get the user logged in to the food backend, if any")]
    async fn current_user(&self) -> Result<CallToolResult, McpError> {
        let result = account::current_user(&self.client).await.map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Log out of the food backend")]
    async fn logout(&self) -> Result<CallToolResult, McpError> {
        let result = account::logout(&self.client).await.map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Get the profile stored on the food backend, with BMI when weight and height are set")]
    async fn get_profile(&self) -> Result<CallToolResult, McpError> {
        let result = account::get_profile(&self.client).await.map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Save profile fields to the food backend. Only the given fields are sent; at least one is required.")]
    async fn save_profile(&self, Parameters(p): Parameters<ProfileParams>) -> Result<CallToolResult, McpError> {
        let profile = profile_of(&p.profile)?;
        let result = account::save_profile(&self.client, &profile)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }
}

#[tool_handler]
impl ServerHandler for FoodSwapService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "foodswap".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("FoodSwap".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "FoodSwap - Nutrition lookup and healthier food alternatives. \
                 Call usage_instructions first if unsure. \
                 Foods: search_food, then get_alternative by index, then compare_foods. \
                 Body: calculate_bmi, daily_calorie_needs, weight_impact. \
                 Account: current_user, logout, get_profile, save_profile. \
                 Profile fields (weight_kg, height_cm, age_years, gender, activity_level) are optional on food and body tools."
                    .into(),
            ),
        }
    }
}
