//! Account tools backed by the backend's session endpoints

use serde::Serialize;

use super::body::{profile_bmi, BmiReport};
use crate::models::UserProfile;
use crate::source::{BackendClient, StoredProfile};

#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    pub logged_in: bool,
    pub username: Option<String>,
}

pub async fn current_user(client: &BackendClient) -> Result<CurrentUserResponse, String> {
    let user = client
        .current_user()
        .await
        .map_err(|e| format!("Failed to get current user: {}", e))?;

    Ok(CurrentUserResponse {
        logged_in: user.is_some(),
        username: user.map(|u| u.username),
    })
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

pub async fn logout(client: &BackendClient) -> Result<LogoutResponse, String> {
    let success = client
        .logout()
        .await
        .map_err(|e| format!("Failed to log out: {}", e))?;
    Ok(LogoutResponse { success })
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: Option<StoredProfile>,
    pub bmi: Option<BmiReport>,
}

impl ProfileResponse {
    fn from_stored(stored: Option<StoredProfile>) -> Self {
        let bmi = stored.as_ref().and_then(|s| profile_bmi(&s.profile));
        Self { profile: stored, bmi }
    }
}

pub async fn get_profile(client: &BackendClient) -> Result<ProfileResponse, String> {
    let stored = client
        .get_profile()
        .await
        .map_err(|e| format!("Failed to load profile: {}", e))?;
    Ok(ProfileResponse::from_stored(stored))
}

/// Save the given fields; an all-empty profile is rejected before any request
pub async fn save_profile(client: &BackendClient, profile: &UserProfile) -> Result<ProfileResponse, String> {
    let stored = client.save_profile(profile).await.map_err(|e| e.to_string())?;
    tracing::info!("Saved profile");
    Ok(ProfileResponse::from_stored(Some(stored)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_save_empty_profile_rejected_without_request() {
        // Nothing listens on port 9; an empty profile must fail before connecting
        let client = BackendClient::new("http://127.0.0.1:9", Duration::from_secs(1), None).unwrap();
        let err = save_profile(&client, &UserProfile::default()).await.unwrap_err();
        assert!(err.contains("at least one profile field"));
    }

    #[test]
    fn test_profile_response_includes_bmi() {
        let stored = StoredProfile {
            profile: UserProfile {
                weight_kg: Some(80.0),
                height_cm: Some(180.0),
                ..Default::default()
            },
            bmi: None,
            daily_calories: None,
        };
        let response = ProfileResponse::from_stored(Some(stored));
        assert_eq!(response.bmi.unwrap().bmi, 24.7);
        assert!(ProfileResponse::from_stored(None).bmi.is_none());
    }
}
