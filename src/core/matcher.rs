use crate::models::{UserProfile, MatchResult, ScoringWeights};
use crate::core::scoring::calculate_compatibility;

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Eligibility filter (self, optionally previous meetings)
/// 2. Skill overlap + about similarity per candidate
/// 3. Stable sort by compatibility, highest first
/// 4. Truncate to the requested limit
///
/// The matcher holds no state beyond its weights; every call is a pure
/// function of its inputs.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score a single (user, candidate) pair
    ///
    /// Returns the unrounded overall score and the packaged match result.
    pub fn score_pair(&self, user: &UserProfile, candidate: &UserProfile) -> (f64, MatchResult) {
        calculate_compatibility(user, candidate, &self.weights)
    }

    /// Whether `candidate` may be offered to `user` at all
    #[inline]
    pub fn is_eligible(user: &UserProfile, candidate: &UserProfile, exclude_previous: bool) -> bool {
        if candidate.user_id == user.user_id {
            return false;
        }

        !(exclude_previous && user.has_met(&candidate.user_id))
    }

    /// Rank candidates for a user
    ///
    /// # Arguments
    /// * `user` - The user seeking matches
    /// * `candidates` - The candidate pool, usually every known profile
    /// * `limit` - Maximum number of matches to return
    /// * `exclude_previous` - Skip users listed in `user.previous_meeting`
    ///
    /// # Returns
    /// At most `limit` results sorted by compatibility. Candidates with equal
    /// scores keep their pool order.
    pub fn rank(
        &self,
        user: &UserProfile,
        candidates: &[UserProfile],
        limit: usize,
        exclude_previous: bool,
    ) -> Vec<MatchResult> {
        let mut matches: Vec<MatchResult> = candidates
            .iter()
            .filter(|candidate| Self::is_eligible(user, candidate, exclude_previous))
            .map(|candidate| self.score_pair(user, candidate).1)
            .collect();

        // sort_by is stable, so ties keep candidate order
        matches.sort_by(|a, b| {
            b.compatibility_score
                .partial_cmp(&a.compatibility_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        tracing::debug!(
            "Ranked {} eligible candidates for user {}, keeping {}",
            matches.len(),
            user.user_id,
            limit.min(matches.len())
        );

        matches.truncate(limit);
        matches
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
