//! SkillSwap Match - content-based matching for the SkillSwap platform
//!
//! The core engine ranks candidate users by how well their skills complement
//! the requester's (who can teach what the other wants to learn), with a
//! small contribution from the similarity of their "about" sections. The
//! engine is pure and synchronous; the service layer around it fetches
//! profiles from the profile store and exposes the HTTP API.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{Matcher, score_skills, score_text};
pub use models::{UserProfile, MatchResult, SkillOverlap, ScoringWeights, MatchRequest, MatchResponse};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = Matcher::default();
        let user = UserProfile {
            user_id: "1".to_string(),
            ..Default::default()
        };
        assert!(matcher.rank(&user, &[user.clone()], 5, true).is_empty());
        assert_eq!(score_text("", ""), 0.0);
    }
}
