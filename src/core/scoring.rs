use crate::models::{UserProfile, MatchResult, ScoringWeights};
use crate::core::{skills::score_skills, text::score_text};

/// Share of the overall score taken by skill compatibility
pub const SKILL_WEIGHT: f64 = 0.8;
/// Share of the overall score taken by about-text similarity
pub const ABOUT_WEIGHT: f64 = 0.2;
/// Each common (same-intent) skill counts for this fraction of a complementary one
pub const COMMON_SKILL_WEIGHT: f64 = 0.3;
/// Multiplier applied when any complementary skill exists, before capping at 1.0
pub const COMPLEMENTARY_BOOST: f64 = 1.2;
/// Complementary skills count this many times in the skill numerator
pub const COMPLEMENTARY_MULTIPLIER: f64 = 2.0;
/// Added to the skill denominator, pulling small pools toward zero
pub const DENOMINATOR_OFFSET: f64 = 2.0;

/// Decimal places kept in reported scores
pub const SCORE_DECIMALS: usize = 3;

/// Round to a fixed number of decimal places
///
/// Goes through decimal formatting, which rounds the exact binary value and
/// sends ties to even: 0.0625 becomes 0.062, not 0.063.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{:.*}", decimals, value).parse().unwrap_or(value)
}

/// Round a score to 3 decimal places for output
#[inline]
pub fn round_score(score: f64) -> f64 {
    round_to(score, SCORE_DECIMALS)
}

/// Calculate the overall compatibility (0-1) of a candidate for a user
///
/// Scoring formula:
/// overall = skill_score * 0.8 + about_similarity * 0.2
/// overall = min(1, overall * 1.2)    # only if a complementary skill exists
///
/// The boost is all-or-nothing: one complementary skill earns the same
/// multiplier as ten.
///
/// Returns the unrounded overall score alongside the match result, whose
/// scores are rounded to 3 decimals.
pub fn calculate_compatibility(
    user: &UserProfile,
    candidate: &UserProfile,
    weights: &ScoringWeights,
) -> (f64, MatchResult) {
    let skills = score_skills(user, candidate, weights);
    let about_similarity = score_text(&user.about, &candidate.about);

    let mut overall = skills.score * weights.skills + about_similarity * weights.about;

    if skills.is_complementary() {
        overall = (overall * weights.complementary_boost).min(1.0);
    }

    let result = MatchResult {
        user_id: candidate.user_id.clone(),
        username: candidate.username.clone(),
        fullname: candidate.fullname.clone(),
        compatibility_score: round_score(overall),
        skill_matches: skills.common,
        learning_teaching_overlap: skills.learn_from,
        teaching_learning_overlap: skills.teach_to,
        about_similarity: round_score(about_similarity),
    };

    (overall, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_profile(
        id: &str,
        learning: &[&str],
        teaching: &[&str],
        about: &str,
    ) -> UserProfile {
        UserProfile {
            user_id: id.to_string(),
            username: format!("user{}", id),
            fullname: format!("User {}", id),
            about: about.to_string(),
            learning_skills: learning.iter().map(|s| s.to_string()).collect(),
            teaching_skills: teaching.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(0.64000000001), 0.64);
        assert_eq!(round_score(2.0 / 3.0), 0.667);
        assert_eq!(round_score(0.0), 0.0);
        assert_eq!(round_score(1.0), 1.0);
    }

    #[test]
    fn test_round_score_ties_to_even() {
        assert_eq!(round_score(0.0625), 0.062);
        assert_eq!(round_score(5.0 / 16.0), 0.312);
        assert_eq!(round_score(9.0 / 16.0), 0.562);
        assert_eq!(round_score(3.0 / 16.0), 0.188);
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(0.375, 2), 0.38);
    }

    #[test]
    fn test_about_similarity_tie_rounds_to_even() {
        let user = create_test_profile(
            "1",
            &[],
            &[],
            "alpha bravo charlie delta echo foxtrot golf hotel india juliet kilo lima mike november oscar papa",
        );
        let candidate = create_test_profile("2", &[], &[], "alpha");

        let (overall, result) = calculate_compatibility(&user, &candidate, &ScoringWeights::default());

        // Jaccard 1/16 = 0.0625
        assert!((overall - 0.0125).abs() < 1e-12);
        assert_eq!(result.about_similarity, 0.062);
        assert_eq!(result.compatibility_score, 0.013);
    }

    #[test]
    fn test_complementary_skill_boost() {
        let user = create_test_profile("1", &["guitar"], &[], "");
        let candidate = create_test_profile("2", &[], &["Guitar"], "");

        let (overall, result) = calculate_compatibility(&user, &candidate, &ScoringWeights::default());

        // (2/3 * 0.8) * 1.2
        assert!((overall - 0.64).abs() < 1e-9);
        assert_eq!(result.compatibility_score, 0.64);
        assert_eq!(result.learning_teaching_overlap, vec!["guitar"]);
        assert_eq!(result.about_similarity, 0.0);
        assert_eq!(result.user_id, "2");
        assert_eq!(result.username, "user2");
    }

    #[test]
    fn test_text_only_no_boost() {
        let about = "Weekend hiker and amateur astronomer";
        let user = create_test_profile("1", &[], &[], about);
        let candidate = create_test_profile("2", &[], &[], about);

        let (overall, result) = calculate_compatibility(&user, &candidate, &ScoringWeights::default());

        assert!((overall - 0.2).abs() < 1e-9);
        assert_eq!(result.compatibility_score, 0.2);
        assert_eq!(result.about_similarity, 1.0);
        assert!(result.skill_matches.is_empty());
    }

    #[test]
    fn test_common_skills_do_not_boost() {
        let user = create_test_profile("1", &["chess"], &[], "");
        let candidate = create_test_profile("2", &["chess"], &[], "");

        let (overall, result) = calculate_compatibility(&user, &candidate, &ScoringWeights::default());

        // 0.3 / 3 * 0.8, no boost
        assert!((overall - 0.08).abs() < 1e-9);
        assert_eq!(result.skill_matches, vec!["chess"]);
    }

    #[test]
    fn test_boost_capped_at_one() {
        let about = "Full stack developer teaching rust";
        let user = create_test_profile("1", &["french"], &["rust"], about);
        let candidate = create_test_profile("2", &["rust"], &["french"], about);

        let (overall, result) = calculate_compatibility(&user, &candidate, &ScoringWeights::default());

        assert_eq!(overall, 1.0);
        assert_eq!(result.compatibility_score, 1.0);
    }

    #[test]
    fn test_inputs_untouched() {
        let user = create_test_profile("1", &[" Guitar "], &[], "Some about text");
        let candidate = create_test_profile("2", &[], &["GUITAR"], "");
        let before = (user.clone(), candidate.clone());

        let _ = calculate_compatibility(&user, &candidate, &ScoringWeights::default());

        assert_eq!((user, candidate), before);
    }
}
