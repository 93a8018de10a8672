use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to find matches
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "userId")]
    pub user_id: String,
    #[validate(range(min = 1, max = 20))]
    #[serde(default = "default_match_limit")]
    pub limit: u16,
    #[serde(default = "default_true", alias = "excludePrevious")]
    pub exclude_previous: bool,
}

fn default_match_limit() -> u16 {
    5
}

fn default_true() -> bool {
    true
}

/// Query parameters for the pairwise compatibility endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompatibilityQuery {
    #[validate(length(min = 1))]
    pub user1_id: String,
    #[validate(length(min = 1))]
    pub user2_id: String,
}

/// Optional `?limit=` query parameter
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LimitQuery {
    pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_request_defaults() {
        let req: MatchRequest = serde_json::from_str(r#"{"user_id": "u1"}"#).unwrap();
        assert_eq!(req.limit, 5);
        assert!(req.exclude_previous);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_match_request_limit_bounds() {
        let req: MatchRequest = serde_json::from_str(r#"{"user_id": "u1", "limit": 21}"#).unwrap();
        assert!(req.validate().is_err());

        let req: MatchRequest = serde_json::from_str(r#"{"user_id": "u1", "limit": 0}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_match_request_rejects_empty_user() {
        let req: MatchRequest = serde_json::from_str(r#"{"userId": "", "excludePrevious": false}"#).unwrap();
        assert!(!req.exclude_previous);
        assert!(req.validate().is_err());
    }
}
