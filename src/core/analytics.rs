//! Pool-wide skill analytics
//!
//! Plain counting over the raw skill strings users entered. Unlike the
//! matching engine these functions do not normalize skills, except
//! [`recommend_skills`] which compares against the user's own skills.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::core::scoring::round_to;
use crate::core::skills::normalize_skill;
use crate::models::UserProfile;

/// Number of entries in the "most common" lists of [`recommendation_stats`]
pub const STATS_TOP_N: usize = 10;
/// Number of entries in each list of [`supply_demand`]
pub const SUPPLY_DEMAND_TOP_N: usize = 20;
/// Ratio reported for skills with demand but no supply
pub const UNSUPPLIED_RATIO: f64 = 999.0;

/// A skill and how often it was mentioned, serialized as `[skill, count]`
pub type SkillCount = (String, usize);

/// Frequency table that remembers first-appearance order
///
/// Ranking by count with a stable sort means ties resolve to whichever skill
/// showed up first in the pool.
#[derive(Debug, Default)]
struct SkillCounter {
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

impl SkillCounter {
    fn tally<'a>(skills: impl IntoIterator<Item = &'a String>) -> Self {
        let mut counter = Self::default();
        for skill in skills {
            counter.add(skill.clone());
        }
        counter
    }

    fn add(&mut self, skill: String) {
        match self.counts.get_mut(&skill) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(skill.clone(), 1);
                self.order.push(skill);
            }
        }
    }

    fn get(&self, skill: &str) -> usize {
        self.counts.get(skill).copied().unwrap_or(0)
    }

    fn unique(&self) -> usize {
        self.order.len()
    }

    fn most_common(&self, n: usize) -> Vec<SkillCount> {
        let mut ranked: Vec<SkillCount> = self
            .order
            .iter()
            .map(|skill| (skill.clone(), self.get(skill)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(n);
        ranked
    }
}

/// Summary statistics over the whole user pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationStats {
    pub total_users: usize,
    pub total_learning_skills: usize,
    pub total_teaching_skills: usize,
    pub avg_learning_skills_per_user: f64,
    pub avg_teaching_skills_per_user: f64,
    pub most_common_learning_skills: Vec<SkillCount>,
    pub most_common_teaching_skills: Vec<SkillCount>,
}

pub fn recommendation_stats(users: &[UserProfile]) -> RecommendationStats {
    let total_users = users.len();
    let total_learning_skills: usize = users.iter().map(|u| u.learning_skills.len()).sum();
    let total_teaching_skills: usize = users.iter().map(|u| u.teaching_skills.len()).sum();
    let divisor = total_users.max(1) as f64;

    let learning = SkillCounter::tally(users.iter().flat_map(|u| u.learning_skills.iter()));
    let teaching = SkillCounter::tally(users.iter().flat_map(|u| u.teaching_skills.iter()));

    RecommendationStats {
        total_users,
        total_learning_skills,
        total_teaching_skills,
        avg_learning_skills_per_user: round_to(total_learning_skills as f64 / divisor, 2),
        avg_teaching_skills_per_user: round_to(total_teaching_skills as f64 / divisor, 2),
        most_common_learning_skills: learning.most_common(STATS_TOP_N),
        most_common_teaching_skills: teaching.most_common(STATS_TOP_N),
    }
}

/// Most mentioned skills, split by intent and combined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularSkills {
    pub most_wanted_to_learn: Vec<SkillCount>,
    pub most_offered_to_teach: Vec<SkillCount>,
    pub most_popular_overall: Vec<SkillCount>,
    pub total_unique_skills: usize,
    pub total_skill_mentions: usize,
}

pub fn popular_skills(users: &[UserProfile], limit: usize) -> PopularSkills {
    let learning = SkillCounter::tally(users.iter().flat_map(|u| u.learning_skills.iter()));
    let teaching = SkillCounter::tally(users.iter().flat_map(|u| u.teaching_skills.iter()));

    // All learning mentions first, then all teaching mentions
    let combined = SkillCounter::tally(
        users
            .iter()
            .flat_map(|u| u.learning_skills.iter())
            .chain(users.iter().flat_map(|u| u.teaching_skills.iter())),
    );
    let total_skill_mentions = combined.counts.values().sum();

    PopularSkills {
        most_wanted_to_learn: learning.most_common(limit),
        most_offered_to_teach: teaching.most_common(limit),
        most_popular_overall: combined.most_common(limit),
        total_unique_skills: combined.unique(),
        total_skill_mentions,
    }
}

/// Demand (learners) versus supply (teachers) for one skill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillBalance {
    pub skill: String,
    pub demand: usize,
    pub supply: usize,
    pub demand_to_supply_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyDemandReport {
    pub high_demand_skills: Vec<SkillBalance>,
    pub high_supply_skills: Vec<SkillBalance>,
    pub high_demand_low_supply_skills: Vec<SkillBalance>,
    pub total_unique_skills: usize,
    pub total_users_analyzed: usize,
}

pub fn supply_demand(users: &[UserProfile]) -> SupplyDemandReport {
    let demand = SkillCounter::tally(users.iter().flat_map(|u| u.learning_skills.iter()));
    let supply = SkillCounter::tally(users.iter().flat_map(|u| u.teaching_skills.iter()));

    let mut seen: HashSet<String> = HashSet::new();
    let balances: Vec<SkillBalance> = demand
        .order
        .iter()
        .chain(supply.order.iter())
        .filter(|skill| seen.insert(skill.to_string()))
        .map(|skill| {
            let wanted = demand.get(skill);
            let offered = supply.get(skill);
            let ratio = if offered > 0 {
                wanted as f64 / offered as f64
            } else if wanted > 0 {
                UNSUPPLIED_RATIO
            } else {
                0.0
            };

            SkillBalance {
                skill: skill.clone(),
                demand: wanted,
                supply: offered,
                demand_to_supply_ratio: ratio,
            }
        })
        .collect();

    let high_demand_skills = top_balances(balances.clone(), |a, b| b.demand.cmp(&a.demand));
    let high_supply_skills = top_balances(balances.clone(), |a, b| b.supply.cmp(&a.supply));
    let high_demand_low_supply_skills = top_balances(
        balances.iter().filter(|b| b.supply > 0).cloned().collect(),
        |a, b| {
            b.demand_to_supply_ratio
                .partial_cmp(&a.demand_to_supply_ratio)
                .unwrap_or(Ordering::Equal)
        },
    );

    SupplyDemandReport {
        high_demand_skills,
        high_supply_skills,
        high_demand_low_supply_skills,
        total_unique_skills: balances.len(),
        total_users_analyzed: users.len(),
    }
}

fn top_balances<F>(mut items: Vec<SkillBalance>, compare: F) -> Vec<SkillBalance>
where
    F: FnMut(&SkillBalance, &SkillBalance) -> Ordering,
{
    items.sort_by(compare);
    items.truncate(SUPPLY_DEMAND_TOP_N);
    items
}

/// Keyword buckets, checked in order; the first matching bucket wins
const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Technology",
        &["programming", "coding", "javascript", "python", "web", "app", "software", "data", "ai", "machine learning", "computer"],
    ),
    ("Languages", &["english", "spanish", "french", "german", "chinese", "japanese", "language"]),
    ("Arts & Design", &["design", "drawing", "painting", "photography", "video", "editing", "graphic"]),
    ("Business", &["marketing", "sales", "business", "management", "entrepreneurship", "finance"]),
    ("Sports & Fitness", &["fitness", "gym", "sports", "running", "yoga", "workout", "exercise"]),
    ("Music", &["music", "guitar", "piano", "singing", "drums", "violin"]),
    ("Academic", &["math", "science", "physics", "chemistry", "biology", "history", "literature"]),
    ("Life Skills", &["cooking", "cleaning", "organization", "time management", "communication"]),
];

pub const OTHER_CATEGORY: &str = "Other";

/// Pick the category for a raw skill name by substring keyword match
///
/// Matching is plain substring search, so short keywords can claim
/// unrelated skills ("ai" matches "painting").
pub fn categorize_skill(skill: &str) -> &'static str {
    let lowered = skill.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(OTHER_CATEGORY)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub skills: Vec<String>,
    pub count: usize,
}

/// Skills grouped by category, in keyword priority order with `Other` last
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillCategories(Vec<(&'static str, CategoryStats)>);

impl SkillCategories {
    pub fn get(&self, category: &str) -> Option<&CategoryStats> {
        self.0
            .iter()
            .find(|(name, _)| *name == category)
            .map(|(_, stats)| stats)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(name, _)| *name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for SkillCategories {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, stats) in &self.0 {
            map.serialize_entry(name, stats)?;
        }
        map.end()
    }
}

/// Group every distinct skill in the pool by category
///
/// Every category is present in the output, even when empty.
pub fn categorize_skills(users: &[UserProfile]) -> SkillCategories {
    let mut categories: Vec<(&'static str, CategoryStats)> = CATEGORY_KEYWORDS
        .iter()
        .map(|(category, _)| *category)
        .chain(std::iter::once(OTHER_CATEGORY))
        .map(|category| (category, CategoryStats::default()))
        .collect();

    let distinct: HashSet<&String> = users.iter().flat_map(|u| u.all_skills()).collect();

    for skill in distinct {
        let category = categorize_skill(skill);
        if let Some((_, stats)) = categories.iter_mut().find(|(name, _)| *name == category) {
            stats.skills.push(skill.clone());
        }
    }

    for (_, stats) in categories.iter_mut() {
        stats.skills.sort();
        stats.count = stats.skills.len();
    }

    SkillCategories(categories)
}

/// Suggest skills from the pool that the user does not list yet
///
/// Skills are normalized before comparison; the most mentioned come first.
pub fn recommend_skills(user_skills: &[String], all_skills: &[String], limit: usize) -> Vec<String> {
    let owned: HashSet<String> = user_skills.iter().map(|s| normalize_skill(s)).collect();

    let mut pool = SkillCounter::default();
    for skill in all_skills {
        pool.add(normalize_skill(skill));
    }

    pool.most_common(usize::MAX)
        .into_iter()
        .map(|(skill, _)| skill)
        .filter(|skill| !owned.contains(skill))
        .take(limit)
        .collect()
}
