use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// User profile as consumed by the matching engine
///
/// The profile store hands out loosely shaped documents, so every defaulting
/// rule lives here at the deserialization boundary:
/// - missing or `null` text fields become empty strings
/// - missing or `null` lists become empty
/// - non-string entries inside skill and meeting lists are dropped
///
/// Skill strings are kept exactly as stored. Normalization only happens when
/// the engine compares them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(alias = "_id", deserialize_with = "string_or_default")]
    pub user_id: String,
    #[serde(default, deserialize_with = "string_or_default")]
    pub username: String,
    #[serde(default, deserialize_with = "string_or_default")]
    pub fullname: String,
    #[serde(default, deserialize_with = "string_or_default")]
    pub about: String,
    #[serde(default, deserialize_with = "string_list")]
    pub learning_skills: Vec<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub teaching_skills: Vec<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub previous_meeting: Vec<String>,
}

impl UserProfile {
    /// Whether this user has met `user_id` before
    pub fn has_met(&self, user_id: &str) -> bool {
        self.previous_meeting.iter().any(|id| id == user_id)
    }

    /// All skills this user listed, learning first, as stored
    pub fn all_skills(&self) -> impl Iterator<Item = &String> {
        self.learning_skills.iter().chain(self.teaching_skills.iter())
    }
}

/// Accepts a string, a number (ids are sometimes numeric) or `null`.
fn string_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Accepts an array (keeping only its string entries) or `null`.
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Scored match for one candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub user_id: String,
    pub username: String,
    pub fullname: String,
    /// Overall score in [0, 1], rounded to 3 decimals
    pub compatibility_score: f64,
    /// Skills both users share the same intent for
    pub skill_matches: Vec<String>,
    /// Skills the requester wants to learn that the candidate teaches
    pub learning_teaching_overlap: Vec<String>,
    /// Skills the requester teaches that the candidate wants to learn
    pub teaching_learning_overlap: Vec<String>,
    /// Jaccard similarity of the about sections, rounded to 3 decimals
    pub about_similarity: f64,
}

/// Output of the skill overlap analysis for one (user, candidate) pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillOverlap {
    pub score: f64,
    pub common: Vec<String>,
    pub learn_from: Vec<String>,
    pub teach_to: Vec<String>,
}

impl SkillOverlap {
    /// True when at least one skill flows in either direction
    pub fn is_complementary(&self) -> bool {
        !self.learn_from.is_empty() || !self.teach_to.is_empty()
    }
}

/// Scoring weights
///
/// Defaults reproduce the production formula exactly; see
/// [`crate::core::scoring`] for the named constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Share of the overall score taken by skill compatibility
    pub skills: f64,
    /// Share of the overall score taken by about-text similarity
    pub about: f64,
    /// Discount applied to each common (same-intent) skill
    pub common_skill: f64,
    /// Multiplier applied when any complementary skill exists
    pub complementary_boost: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        use crate::core::scoring::{ABOUT_WEIGHT, COMMON_SKILL_WEIGHT, COMPLEMENTARY_BOOST, SKILL_WEIGHT};

        Self {
            skills: SKILL_WEIGHT,
            about: ABOUT_WEIGHT,
            common_skill: COMMON_SKILL_WEIGHT,
            complementary_boost: COMPLEMENTARY_BOOST,
        }
    }
}
