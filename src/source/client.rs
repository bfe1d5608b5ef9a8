//! Backend HTTP client
//!
//! Thin reqwest wrapper over the food backend's REST endpoints.

use std::time::Duration;

use reqwest::header::COOKIE;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::UserProfile;

/// Backend error types
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned {status}")]
    Status { status: StatusCode, endpoint: String },

    #[error("{0}")]
    Backend(String),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),
}

/// Result type for backend operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Logged-in user as reported by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub username: String,
}

/// Profile as stored by the backend, with its derived values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredProfile {
    #[serde(flatten)]
    pub profile: UserProfile,
    #[serde(default)]
    pub bmi: Option<f64>,
    #[serde(default)]
    pub daily_calories: Option<f64>,
}

/// Food backend client
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
    session_cookie: Option<String>,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration, session_cookie: Option<String>) -> SourceResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session_cookie,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match &self.session_cookie {
            Some(cookie) => builder.header(COOKIE, cookie),
            None => builder,
        }
    }

    /// Send a request and unwrap the JSON payload
    ///
    /// An `error` field in the payload wins over the HTTP status, since the
    /// backend reports its own failures that way (often with a 4xx/5xx).
    async fn send(&self, endpoint: &str, builder: RequestBuilder) -> SourceResult<Value> {
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        let payload: Option<Value> = serde_json::from_str(&text).ok();
        if let Some(message) = payload
            .as_ref()
            .and_then(|p| p.get("error"))
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
        {
            return Err(SourceError::Backend(message.to_string()));
        }

        if !status.is_success() {
            return Err(SourceError::Status {
                status,
                endpoint: endpoint.to_string(),
            });
        }

        payload.ok_or_else(|| SourceError::Backend(format!("{} returned invalid JSON", endpoint)))
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> SourceResult<Value> {
        tracing::debug!("GET {}", path);
        self.send(path, self.request(Method::GET, path).query(query)).await
    }

    async fn post_json(&self, path: &str, body: Option<&Value>) -> SourceResult<Value> {
        tracing::debug!("POST {}", path);
        let builder = self.request(Method::POST, path);
        let builder = match body {
            Some(b) => builder.json(b),
            None => builder,
        };
        self.send(path, builder).await
    }

    // ------------------------------------------------------------------------
    // Food endpoints
    // ------------------------------------------------------------------------

    /// `GET /api/food_search` -> `products`
    pub async fn food_search(&self, query: &str) -> SourceResult<Vec<Value>> {
        let payload = self
            .get_json("/api/food_search", &[("query", query.to_string())])
            .await?;
        Ok(take_array(payload, "products"))
    }

    /// `GET /api/find_alternatives` -> `alternatives`
    pub async fn find_alternatives(
        &self,
        food_name: &str,
        calories: f64,
        category: Option<&str>,
    ) -> SourceResult<Vec<Value>> {
        let payload = self
            .get_json(
                "/api/find_alternatives",
                &[
                    ("food_name", food_name.to_string()),
                    ("calories", calories.to_string()),
                    ("category", category.unwrap_or_default().to_string()),
                ],
            )
            .await?;
        Ok(take_array(payload, "alternatives"))
    }

    /// `GET /api/usda_search` -> `foods`
    pub async fn usda_search(&self, query: &str, page_size: u32) -> SourceResult<Vec<Value>> {
        let payload = self
            .get_json(
                "/api/usda_search",
                &[("query", query.to_string()), ("pageSize", page_size.to_string())],
            )
            .await?;
        Ok(take_array(payload, "foods"))
    }

    // ------------------------------------------------------------------------
    // Account endpoints
    // ------------------------------------------------------------------------

    /// `GET /api/current_user`; None when nobody is logged in
    pub async fn current_user(&self) -> SourceResult<Option<CurrentUser>> {
        let payload = self.get_json("/api/current_user", &[]).await?;
        if !is_success(&payload) {
            return Ok(None);
        }
        Ok(payload
            .get("user")
            .cloned()
            .and_then(|u| serde_json::from_value(u).ok()))
    }

    /// `POST /api/logout`
    pub async fn logout(&self) -> SourceResult<bool> {
        let payload = self.post_json("/api/logout", None).await?;
        Ok(is_success(&payload))
    }

    /// `GET /api/profile`
    pub async fn get_profile(&self) -> SourceResult<Option<StoredProfile>> {
        let payload = self.get_json("/api/profile", &[]).await?;
        if !is_success(&payload) {
            return Ok(None);
        }
        Ok(payload
            .get("profile")
            .cloned()
            .and_then(|p| serde_json::from_value(p).ok()))
    }

    /// `POST /api/profile` with only the fields that are set
    pub async fn save_profile(&self, profile: &UserProfile) -> SourceResult<StoredProfile> {
        let body = profile_body(profile)?;
        let payload = self.post_json("/api/profile", Some(&body)).await?;
        if !is_success(&payload) {
            return Err(SourceError::Backend("Failed to save profile".to_string()));
        }

        let stored = payload
            .get("profile")
            .cloned()
            .ok_or_else(|| SourceError::Backend("Profile missing from response".to_string()))?;
        serde_json::from_value(stored)
            .map_err(|e| SourceError::Backend(format!("Unreadable profile: {}", e)))
    }
}

/// Partial profile body in the backend's field names
pub fn profile_body(profile: &UserProfile) -> SourceResult<Value> {
    let mut body = Map::new();
    if let Some(w) = profile.weight_kg {
        body.insert("weight".into(), w.into());
    }
    if let Some(h) = profile.height_cm {
        body.insert("height".into(), h.into());
    }
    if let Some(a) = profile.age_years {
        body.insert("age".into(), a.into());
    }
    if let Some(g) = profile.gender {
        body.insert("gender".into(), g.as_str().into());
    }
    if let Some(level) = profile.activity_level {
        body.insert("activity_level".into(), level.as_str().into());
    }

    if body.is_empty() {
        return Err(SourceError::InvalidProfile(
            "Please fill in at least one profile field".to_string(),
        ));
    }
    Ok(Value::Object(body))
}

fn is_success(payload: &Value) -> bool {
    payload.get("success").and_then(Value::as_bool).unwrap_or(false)
}

fn take_array(mut payload: Value, key: &str) -> Vec<Value> {
    match payload.get_mut(key).map(Value::take) {
        Some(Value::Array(items)) => items,
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityLevel, Gender};
    use serde_json::json;

    #[test]
    fn test_profile_body_skips_missing() {
        let profile = UserProfile {
            weight_kg: Some(72.5),
            gender: Some(Gender::Male),
            activity_level: Some(ActivityLevel::VeryActive),
            ..Default::default()
        };
        let body = profile_body(&profile).unwrap();
        assert_eq!(
            body,
            json!({"weight": 72.5, "gender": "male", "activity_level": "very_active"})
        );
    }

    #[test]
    fn test_profile_body_rejects_empty() {
        let err = profile_body(&UserProfile::default()).unwrap_err();
        assert!(matches!(err, SourceError::InvalidProfile(_)));
        assert!(err.to_string().contains("at least one profile field"));
    }

    #[test]
    fn test_take_array() {
        assert_eq!(take_array(json!({"foods": [1, 2]}), "foods").len(), 2);
        assert!(take_array(json!({"foods": null}), "foods").is_empty());
        assert!(take_array(json!({}), "products").is_empty());
    }

    #[test]
    fn test_stored_profile_parses_derived_fields() {
        let stored: StoredProfile = serde_json::from_value(json!({
            "weight": 80, "height": 180, "age": 40, "gender": "male",
            "activity_level": null, "bmi": 24.7, "daily_calories": 2660
        }))
        .unwrap();
        assert_eq!(stored.profile.weight_kg, Some(80.0));
        assert_eq!(stored.profile.activity_level, None);
        assert_eq!(stored.bmi, Some(24.7));
        assert_eq!(stored.daily_calories, Some(2660.0));
    }

    #[test]
    fn test_base_url_trimmed() {
        let client = BackendClient::new("http://localhost:5000/", Duration::from_secs(1), None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
    }
}
