// Core algorithm exports
pub mod analytics;
pub mod matcher;
pub mod scoring;
pub mod skills;
pub mod text;

pub use matcher::Matcher;
pub use scoring::{calculate_compatibility, round_score};
pub use skills::{normalize_skill, score_skills};
pub use text::{score_text, tokenize};
