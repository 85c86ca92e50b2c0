//! Configuration loading and management
//!
//! ```yaml
//! api:
//!   base_url: http://localhost:5000/api
//!   timeout_secs: 10
//! server:
//!   bind: 0.0.0.0:8080
//! screens:
//!   bookings:
//!     path: /admin/bookings
//!     page_size: 7
//! ```

use crate::core::error::ConfigError;
use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Environment variable overriding `api.base_url`
pub const ENV_API_BASE_URL: &str = "TOURDESK_API_BASE_URL";
/// Environment variable overriding `server.bind`
pub const ENV_BIND: &str = "TOURDESK_BIND";
/// Environment variable overriding `api.session_cookie`
pub const ENV_SESSION_COOKIE: &str = "TOURDESK_SESSION_COOKIE";

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApiConfig {
    /// Base URL every backend path is joined to
    #[validate(url)]
    pub base_url: String,

    /// Cookie header forwarded with every request (e.g. "connect.sid=...")
    #[serde(default)]
    pub session_cookie: Option<String>,

    /// Request timeout in seconds; no timeout when absent
    #[serde(default)]
    #[validate(range(min = 1))]
    pub timeout_secs: Option<u64>,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            session_cookie: None,
            timeout_secs: None,
        }
    }
}

/// Gateway listener settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    /// Address to bind (e.g. "127.0.0.1:8080")
    #[serde(default = "default_bind")]
    #[validate(length(min = 1))]
    pub bind: String,

    /// Allowed CORS origins; any origin when empty
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors_origins: Vec::new(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

/// Settings of one list screen
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScreenConfig {
    /// Backend path the List Store is loaded from
    #[validate(length(min = 1))]
    pub path: String,

    /// Records per page
    #[validate(range(min = 1, max = 100))]
    pub page_size: usize,

    /// Overrides the screen's default sort field
    #[serde(default)]
    pub default_sort: Option<String>,

    /// Overrides the screen's searched fields
    #[serde(default)]
    pub search_fields: Option<Vec<String>>,
}

impl ScreenConfig {
    pub fn new(path: &str, page_size: usize) -> Self {
        Self {
            path: path.to_string(),
            page_size,
            default_sort: None,
            search_fields: None,
        }
    }
}

/// Complete gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    #[validate(nested)]
    pub api: ApiConfig,

    #[serde(default)]
    #[validate(nested)]
    pub server: ServerConfig,

    /// Screens to expose, keyed by screen name
    #[serde(default = "default_screens")]
    pub screens: IndexMap<String, ScreenConfig>,
}

fn default_screens() -> IndexMap<String, ScreenConfig> {
    use crate::screens::{bookings, coupons, reviews, tours};

    [
        (reviews::NAME, ScreenConfig::new(reviews::DEFAULT_PATH, reviews::PAGE_SIZE)),
        (bookings::NAME, ScreenConfig::new(bookings::DEFAULT_PATH, bookings::PAGE_SIZE)),
        (coupons::NAME, ScreenConfig::new(coupons::DEFAULT_PATH, coupons::PAGE_SIZE)),
        (tours::NAME, ScreenConfig::new(tours::DEFAULT_PATH, tours::PAGE_SIZE)),
    ]
    .into_iter()
    .map(|(name, config)| (name.to_string(), config))
    .collect()
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        Ok(config)
    }

    /// Load from an optional file, apply environment overrides, validate
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default_config(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.check()?;
        Ok(config)
    }

    /// Apply overrides looked up by environment variable name
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_BASE_URL) {
            self.api.base_url = url;
        }
        if let Some(bind) = lookup(ENV_BIND) {
            self.server.bind = bind;
        }
        if let Some(cookie) = lookup(ENV_SESSION_COOKIE) {
            self.api.session_cookie = Some(cookie);
        }
    }

    /// Validate every section, including each screen
    pub fn check(&self) -> Result<(), ConfigError> {
        self.validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        for (name, screen) in &self.screens {
            screen
                .validate()
                .map_err(|e| ConfigError::Invalid(format!("screen '{}': {}", name, e)))?;
        }
        Ok(())
    }

    /// Default configuration pointing at a local backend
    pub fn default_config() -> Self {
        Self {
            api: ApiConfig::new("http://localhost:5000/api"),
            server: ServerConfig::default(),
            screens: default_screens(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default_config();

        assert_eq!(config.screens.len(), 4);
        assert_eq!(config.screens["bookings"].page_size, 7);
        assert_eq!(config.screens["reviews"].page_size, 5);
        assert!(config.check().is_ok());
    }

    #[test]
    fn test_yaml_serialization() {
        let config = AppConfig::default_config();
        let yaml = serde_yaml::to_string(&config).unwrap();

        let parsed = AppConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed.screens.len(), config.screens.len());
        assert_eq!(parsed.api.base_url, config.api.base_url);
    }

    #[test]
    fn test_minimal_yaml_gets_default_screens() {
        let config = AppConfig::from_yaml_str("api:\n  base_url: http://backend:5000\n").unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        let names: Vec<_> = config.screens.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["reviews", "bookings", "coupons", "tours"]);
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = AppConfig::from_yaml_str("api:\n  base_url: not a url\n").unwrap();
        assert!(matches!(config.check(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let yaml = r#"
api:
  base_url: http://backend:5000
screens:
  coupons:
    path: /admin/coupons
    page_size: 0
"#;
        let config = AppConfig::from_yaml_str(yaml).unwrap();
        let err = config.check().unwrap_err();
        assert!(err.to_string().contains("coupons"));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default_config();
        config.apply_overrides(|key| match key {
            ENV_API_BASE_URL => Some("https://api.example.com".to_string()),
            ENV_SESSION_COOKIE => Some("sid=abc".to_string()),
            _ => None,
        });
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.session_cookie.as_deref(), Some("sid=abc"));
        assert_eq!(config.server.bind, "127.0.0.1:8080");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api:\n  base_url: http://backend:5000\nserver:\n  bind: 0.0.0.0:9000").unwrap();

        let config = AppConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:9000");
    }

    #[test]
    fn test_parse_error_is_config_error() {
        let err = AppConfig::from_yaml_str("api: [").unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }
}
