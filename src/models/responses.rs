use serde::{Deserialize, Serialize};
use crate::models::domain::MatchResult;
use crate::services::CacheStats;

/// Response for the find matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub matches: Vec<MatchResult>,
    pub total_candidates: usize,
    pub processing_time_ms: f64,
}

/// Response for the pairwise compatibility endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityResponse {
    pub user1_id: String,
    pub user2_id: String,
    /// Unrounded overall score
    pub compatibility_score: f64,
    pub match_details: MatchResult,
}

/// Response for the skill recommendation endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillRecommendationResponse {
    pub user_id: String,
    pub current_skills: Vec<String>,
    pub recommended_skills: Vec<String>,
    pub recommendation_count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub cache: CacheStats,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
