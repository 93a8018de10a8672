use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::scoring::{ABOUT_WEIGHT, COMMON_SKILL_WEIGHT, COMPLEMENTARY_BOOST, SKILL_WEIGHT};
use crate::models::ScoringWeights;

/// Application configuration
///
/// Every section has defaults, so the service starts with no config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub profile_store: ProfileStoreSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileStoreSettings {
    #[serde(default = "default_store_url")]
    pub base_url: String,
    #[serde(default = "default_store_timeout")]
    pub timeout_secs: u64,
}

impl Default for ProfileStoreSettings {
    fn default() -> Self {
        Self {
            base_url: default_store_url(),
            timeout_secs: default_store_timeout(),
        }
    }
}

fn default_store_url() -> String { "http://localhost:5000/api".to_string() }
fn default_store_timeout() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_l1_cache_size")]
    pub l1_cache_size: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
            l1_cache_size: default_l1_cache_size(),
        }
    }
}

fn default_cache_ttl() -> u64 { 30 }
fn default_l1_cache_size() -> u64 { 1000 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_popular_limit")]
    pub popular_limit: usize,
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            popular_limit: default_popular_limit(),
            recommendation_limit: default_recommendation_limit(),
        }
    }
}

fn default_popular_limit() -> usize { 20 }
fn default_recommendation_limit() -> usize { 10 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_skills_weight")]
    pub skills: f64,
    #[serde(default = "default_about_weight")]
    pub about: f64,
    #[serde(default = "default_common_skill_weight")]
    pub common_skill: f64,
    #[serde(default = "default_complementary_boost")]
    pub complementary_boost: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            skills: default_skills_weight(),
            about: default_about_weight(),
            common_skill: default_common_skill_weight(),
            complementary_boost: default_complementary_boost(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            skills: config.skills,
            about: config.about,
            common_skill: config.common_skill,
            complementary_boost: config.complementary_boost,
        }
    }
}

fn default_skills_weight() -> f64 { SKILL_WEIGHT }
fn default_about_weight() -> f64 { ABOUT_WEIGHT }
fn default_common_skill_weight() -> f64 { COMMON_SKILL_WEIGHT }
fn default_complementary_boost() -> f64 { COMPLEMENTARY_BOOST }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SKILLSWAP_)
    /// 5. NODE_API_URL, if set, for the profile store base URL
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(
            Config::builder()
                .add_source(File::with_name("config/default").required(false))
                .add_source(File::with_name("config/local").required(false)),
        )
    }

    /// Load configuration from a custom path
    ///
    /// Environment variables and NODE_API_URL still override the file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::build(Config::builder().add_source(File::from(path.as_ref())))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        // e.g., SKILLSWAP__SERVER__PORT -> server.port
        let settings = builder.add_source(environment()).build()?;

        apply_legacy_env(settings, std::env::var("NODE_API_URL").ok())?.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("SKILLSWAP")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// Honor the NODE_API_URL variable older deployments set for the profile store
fn apply_legacy_env(settings: Config, node_api_url: Option<String>) -> Result<Config, ConfigError> {
    match node_api_url {
        Some(url) if !url.trim().is_empty() => Config::builder()
            .add_source(settings)
            .set_override("profile_store.base_url", url)?
            .build(),
        _ => Ok(settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_weights() {
        let weights = ScoringWeights::from(&WeightsConfig::default());
        assert_eq!(weights, ScoringWeights::default());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_load_from_partial_file() {
        let path = std::env::temp_dir().join(format!("skillswap-config-{}.toml", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[server]\nport = 9100\n\n[scoring.weights]\ncomplementary_boost = 1.5").unwrap();

        let settings = Settings::load_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.scoring.weights.complementary_boost, 1.5);
        assert_eq!(settings.scoring.weights.skills, 0.8);
        assert_eq!(settings.profile_store.timeout_secs, 10);
        assert_eq!(settings.cache.ttl_secs, 30);
    }

    #[test]
    fn test_node_api_url_overrides_base_url() {
        let settings = Config::builder()
            .set_override("profile_store.base_url", "http://from-file/api")
            .unwrap()
            .build()
            .unwrap();

        let overridden: Settings = apply_legacy_env(settings.clone(), Some("http://node:5000/api".to_string()))
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(overridden.profile_store.base_url, "http://node:5000/api");

        let blank: Settings = apply_legacy_env(settings, Some("  ".to_string()))
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(blank.profile_store.base_url, "http://from-file/api");
    }
}
