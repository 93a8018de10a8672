use std::collections::HashSet;

use crate::models::{UserProfile, SkillOverlap, ScoringWeights};
use crate::core::scoring::{COMPLEMENTARY_MULTIPLIER, DENOMINATOR_OFFSET};

/// Normalize a skill name for comparison
#[inline]
pub fn normalize_skill(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// Deduplicated, normalized view of one skill list
///
/// Keeps first-appearance order so the overlaps it produces are deterministic.
#[derive(Debug, Default)]
struct SkillSet {
    ordered: Vec<String>,
    members: HashSet<String>,
}

impl SkillSet {
    fn from_skills(skills: &[String]) -> Self {
        let mut set = Self::default();
        for skill in skills {
            let normalized = normalize_skill(skill);
            if set.members.insert(normalized.clone()) {
                set.ordered.push(normalized);
            }
        }
        set
    }

    fn len(&self) -> usize {
        self.ordered.len()
    }

    /// Members of `self` also present in `other`, in `self`'s order
    fn intersection(&self, other: &SkillSet) -> Vec<String> {
        self.ordered
            .iter()
            .filter(|skill| other.members.contains(*skill))
            .cloned()
            .collect()
    }
}

/// Calculate skill compatibility between a requester and a candidate
///
/// Scoring formula:
/// score = min(1, (complementary * 2 + common * 0.3) / (max_possible + 2))
///
/// where `complementary` counts skills flowing in either direction, `common`
/// counts skills both users share the same intent for, and `max_possible` is
/// the smaller of the two users' skill totals (learning + teaching, each list
/// deduplicated on its own and then summed).
///
/// A user with no skills at all scores 0.0 with no common skills.
pub fn score_skills(
    user: &UserProfile,
    candidate: &UserProfile,
    weights: &ScoringWeights,
) -> SkillOverlap {
    let user_learning = SkillSet::from_skills(&user.learning_skills);
    let user_teaching = SkillSet::from_skills(&user.teaching_skills);
    let candidate_learning = SkillSet::from_skills(&candidate.learning_skills);
    let candidate_teaching = SkillSet::from_skills(&candidate.teaching_skills);

    let learn_from = user_learning.intersection(&candidate_teaching);
    let teach_to = user_teaching.intersection(&candidate_learning);

    let mut common = user_learning.intersection(&candidate_learning);
    for skill in user_teaching.intersection(&candidate_teaching) {
        if !common.contains(&skill) {
            common.push(skill);
        }
    }

    // A skill listed under both learning and teaching counts twice here
    let total_user_skills = user_learning.len() + user_teaching.len();
    let total_candidate_skills = candidate_learning.len() + candidate_teaching.len();
    let max_possible = total_user_skills.min(total_candidate_skills);

    if max_possible == 0 {
        return SkillOverlap {
            score: 0.0,
            common: Vec::new(),
            learn_from,
            teach_to,
        };
    }

    let complementary = (learn_from.len() + teach_to.len()) as f64;
    let common_weighted = common.len() as f64 * weights.common_skill;

    let score = ((complementary * COMPLEMENTARY_MULTIPLIER + common_weighted)
        / (max_possible as f64 + DENOMINATOR_OFFSET))
        .min(1.0);

    SkillOverlap {
        score,
        common,
        learn_from,
        teach_to,
    }
}
