//! Configuration management for the tracker client
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: TRACKER__)

use crate::api::AppFlavor;
use crate::error::ClientResult;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracker_shared::types::{DEFAULT_CALORIE_GOAL, DEFAULT_WATER_GOAL_ML};

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
    #[serde(default)]
    pub categories: CategoriesConfig,
    #[serde(default)]
    pub goals: GoalsConfig,
}

/// Backend connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub flavor: AppFlavor,
    /// Request timeout; 0 leaves the transport default
    pub timeout_secs: u64,
    pub user_agent: String,
}

/// Persisted session location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub path: PathBuf,
}

/// Category picker behavior
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoriesConfig {
    /// Offer the built-in categories when the backend returns none
    pub fallback_defaults: bool,
}

/// Goals used when the profile and backend leave them unset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalsConfig {
    pub water_ml: u32,
    pub calories: u32,
}

impl Default for GoalsConfig {
    fn default() -> Self {
        Self {
            water_ml: DEFAULT_WATER_GOAL_ML,
            calories: DEFAULT_CALORIE_GOAL,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:8000/api".to_string(),
                flavor: AppFlavor::Skillup,
                timeout_secs: 30,
                user_agent: format!("tracker/{}", env!("CARGO_PKG_VERSION")),
            },
            session: SessionConfig {
                path: PathBuf::from(".tracker_session.json"),
            },
            categories: CategoriesConfig::default(),
            goals: GoalsConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with TRACKER__ prefix
    pub fn load() -> ClientResult<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let config_file = format!("config/{}.toml", env);

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&AppConfig::default())?)
            .add_source(config::File::with_name(&config_file).required(false))
            // e.g. TRACKER__API__BASE_URL=https://example.com sets api.base_url
            .add_source(config::Environment::with_prefix("TRACKER").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Apply command-line overrides on top of the loaded layers
    pub fn with_overrides(
        mut self,
        base_url: Option<String>,
        flavor: Option<AppFlavor>,
        session_path: Option<PathBuf>,
    ) -> Self {
        if let Some(base_url) = base_url {
            self.api.base_url = base_url;
        }
        if let Some(flavor) = flavor {
            self.api.flavor = flavor;
        }
        if let Some(path) = session_path {
            self.session.path = path;
        }
        self
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api.flavor, AppFlavor::Skillup);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.session.path, PathBuf::from(".tracker_session.json"));
        assert!(!config.categories.fallback_defaults);
        assert_eq!(config.goals.water_ml, 2000);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default().with_overrides(
            Some("https://api.example.com".to_string()),
            Some(AppFlavor::Fitness),
            None,
        );
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.flavor, AppFlavor::Fitness);
        assert_eq!(config.session.path, PathBuf::from(".tracker_session.json"));
    }

    #[test]
    fn test_is_production() {
        assert!(!AppConfig::is_production());
    }
}
