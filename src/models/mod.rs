// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{UserProfile, MatchResult, SkillOverlap, ScoringWeights};
pub use requests::{MatchRequest, CompatibilityQuery, LimitQuery};
pub use responses::{MatchResponse, CompatibilityResponse, SkillRecommendationResponse, HealthResponse, ErrorResponse};
