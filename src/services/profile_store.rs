use crate::models::UserProfile;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the profile store
#[derive(Debug, Error)]
pub enum ProfileStoreError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Client for the user profile store
///
/// The store exposes two read endpoints:
/// - `GET {base_url}/user/{id}` for a single profile
/// - `GET {base_url}/user/all` for every profile
pub struct ProfileStoreClient {
    base_url: String,
    client: Client,
}

impl ProfileStoreClient {
    /// Create a new profile store client
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProfileStoreError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Fetch a single profile by user ID
    pub async fn get_user(&self, user_id: &str) -> Result<UserProfile, ProfileStoreError> {
        let url = self.url(&format!("user/{}", urlencoding::encode(user_id)));

        tracing::debug!("Fetching profile for user: {}", user_id);

        let response = self.client.get(&url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(ProfileStoreError::NotFound(format!("User {} not found", user_id)));
            }
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
                tracing::error!("Failed to fetch profile for {}: {} - {}", user_id, status, body);
                return Err(ProfileStoreError::ApiError(format!("Failed to fetch profile: {}", status)));
            }
            _ => {}
        }

        let bytes = response.bytes().await?;

        serde_json::from_slice(&bytes)
            .map_err(|e| ProfileStoreError::InvalidResponse(format!("Failed to parse profile: {}", e)))
    }

    /// Fetch every profile in the store
    ///
    /// Documents that cannot be read as a profile (e.g. missing `_id`) are
    /// skipped rather than failing the whole pool.
    pub async fn list_users(&self) -> Result<Vec<UserProfile>, ProfileStoreError> {
        let url = self.url("user/all");

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ProfileStoreError::ApiError(format!(
                "Failed to list users: {}",
                response.status()
            )));
        }

        let bytes = response.bytes().await?;
        let documents: Vec<serde_json::Value> = serde_json::from_slice(&bytes)
            .map_err(|e| ProfileStoreError::InvalidResponse(format!("Expected an array of users: {}", e)))?;

        let total = documents.len();
        let profiles: Vec<UserProfile> = documents
            .into_iter()
            .filter_map(|doc| match serde_json::from_value(doc) {
                Ok(profile) => Some(profile),
                Err(e) => {
                    tracing::warn!("Skipping unreadable profile document: {}", e);
                    None
                }
            })
            .collect();

        tracing::debug!("Loaded {} profiles ({} documents)", profiles.len(), total);

        Ok(profiles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::Server) -> ProfileStoreClient {
        ProfileStoreClient::new(format!("{}/api/", server.url()), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_url_joining() {
        let client = ProfileStoreClient::new("http://store.test/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.url("user/all"), "http://store.test/api/user/all");
        assert_eq!(client.base_url(), "http://store.test/api/");
    }

    #[tokio::test]
    async fn test_get_user() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/user/abc123")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"_id": "abc123", "username": "ada", "fullname": "Ada", "learning_skills": ["Rust"]}"#)
            .create_async()
            .await;

        let profile = client_for(&server).get_user("abc123").await.unwrap();

        mock.assert_async().await;
        assert_eq!(profile.user_id, "abc123");
        assert_eq!(profile.learning_skills, vec!["Rust"]);
        assert!(profile.teaching_skills.is_empty());
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/user/missing")
            .with_status(404)
            .create_async()
            .await;

        let result = client_for(&server).get_user("missing").await;

        assert!(matches!(result, Err(ProfileStoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_user_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/user/u1")
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let result = client_for(&server).get_user("u1").await;

        assert!(matches!(result, Err(ProfileStoreError::ApiError(_))));
    }

    #[tokio::test]
    async fn test_list_users_skips_bad_documents() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/user/all")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"_id": "1", "about": "hi"}, {"username": "no id"}, {"_id": "2"}]"#)
            .create_async()
            .await;

        let users = client_for(&server).list_users().await.unwrap();

        let ids: Vec<&str> = users.iter().map(|u| u.user_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[tokio::test]
    async fn test_list_users_invalid_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/user/all")
            .with_status(200)
            .with_body(r#"{"users": []}"#)
            .create_async()
            .await;

        let result = client_for(&server).list_users().await;

        assert!(matches!(result, Err(ProfileStoreError::InvalidResponse(_))));
    }
}
