// Route exports
pub mod skills;
pub mod users;

use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse, Responder};
use std::sync::Arc;

use crate::config::MatchingSettings;
use crate::core::Matcher;
use crate::models::{ErrorResponse, HealthResponse, UserProfile};
use crate::services::{CacheKey, CacheManager, ProfileStoreClient, ProfileStoreError};

pub const SERVICE_NAME: &str = "recommendation_api";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProfileStoreClient>,
    pub cache: Arc<CacheManager>,
    pub matcher: Matcher,
    pub matching: MatchingSettings,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
        .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
        .route("/", web::get().to(root))
        .route("/health", web::get().to(health_check))
        .service(web::scope("/api/users").configure(users::configure))
        .service(web::scope("/api/skills").configure(skills::configure));
}

impl ErrorResponse {
    pub fn new(status: StatusCode, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            status_code: status.as_u16(),
        }
    }
}

impl std::fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for ErrorResponse {}

impl error::ResponseError for ErrorResponse {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ErrorResponse::new(StatusCode::BAD_REQUEST, "invalid_json", format!("Invalid JSON: {}", err)).into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    ErrorResponse::new(StatusCode::BAD_REQUEST, "invalid_query", format!("Invalid query: {}", err)).into()
}

/// 400 response for a request that failed validation
pub(crate) fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(
        StatusCode::BAD_REQUEST,
        "Validation failed",
        errors.to_string(),
    ))
}

/// Map a profile store failure onto an HTTP response
///
/// A missing user is the caller's problem (404); anything else means the
/// store is unavailable (503).
pub(crate) fn store_error_response(err: &ProfileStoreError) -> HttpResponse {
    match err {
        ProfileStoreError::NotFound(message) => HttpResponse::NotFound().json(ErrorResponse::new(
            StatusCode::NOT_FOUND,
            "User not found",
            message.clone(),
        )),
        other => HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
            StatusCode::SERVICE_UNAVAILABLE,
            "Could not fetch users from profile store",
            other.to_string(),
        )),
    }
}

/// Fetch one profile, going through the cache
pub(crate) async fn load_user(state: &AppState, user_id: &str) -> Result<UserProfile, ProfileStoreError> {
    let key = CacheKey::profile(user_id);
    if let Ok(profile) = state.cache.get::<UserProfile>(&key).await {
        return Ok(profile);
    }

    let profile = state.store.get_user(user_id).await?;
    if let Err(e) = state.cache.set(&key, &profile).await {
        tracing::warn!("Failed to cache profile {}: {}", user_id, e);
    }

    Ok(profile)
}

/// Fetch the full candidate pool, going through the cache
pub(crate) async fn load_pool(state: &AppState) -> Result<Vec<UserProfile>, ProfileStoreError> {
    let key = CacheKey::all_users();
    if let Ok(users) = state.cache.get::<Vec<UserProfile>>(&key).await {
        return Ok(users);
    }

    let users = state.store.list_users().await?;
    if let Err(e) = state.cache.set(&key, &users).await {
        tracing::warn!("Failed to cache user pool: {}", e);
    }

    Ok(users)
}

async fn root() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "SkillSwap Recommendation API is running"
    }))
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        cache: state.cache.stats().await,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_mapping() {
        let not_found = store_error_response(&ProfileStoreError::NotFound("u1".to_string()));
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let unavailable = store_error_response(&ProfileStoreError::ApiError("500".to_string()));
        assert_eq!(unavailable.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_error_response_status() {
        let err = ErrorResponse::new(StatusCode::BAD_REQUEST, "invalid_json", "oops");
        assert_eq!(error::ResponseError::status_code(&err), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "invalid_json: oops");
    }
}
