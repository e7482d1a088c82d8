use crate::SearchError;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Recipe sources the search can be pointed at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum ProviderKind {
    #[default]
    #[serde(rename = "themealdb")]
    TheMealDb,
    #[serde(rename = "spoonacular")]
    Spoonacular,
    #[serde(rename = "edamam")]
    Edamam,
    /// Bundled sample catalogue, no network
    #[serde(rename = "mock")]
    Sample,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::TheMealDb => "themealdb",
            ProviderKind::Spoonacular => "spoonacular",
            ProviderKind::Edamam => "edamam",
            ProviderKind::Sample => "mock",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "themealdb" => Ok(ProviderKind::TheMealDb),
            "spoonacular" => Ok(ProviderKind::Spoonacular),
            "edamam" => Ok(ProviderKind::Edamam),
            "mock" | "sample" => Ok(ProviderKind::Sample),
            _ => Err(SearchError::UnknownProvider(s.to_string())),
        }
    }
}

/// Main search configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Provider to query
    #[serde(default)]
    pub provider: ProviderKind,
    /// API key for providers that need one (Spoonacular, Edamam)
    pub api_key: Option<String>,
    /// Application id (Edamam specific)
    pub app_id: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Quiet period before a changed search is dispatched, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Base URL overrides
    #[serde(default)]
    pub endpoints: EndpointsConfig,
}

/// Base URLs of each provider's API
#[derive(Debug, Deserialize, Clone)]
pub struct EndpointsConfig {
    #[serde(default = "default_themealdb_url")]
    pub themealdb: String,
    #[serde(default = "default_spoonacular_url")]
    pub spoonacular: String,
    #[serde(default = "default_edamam_url")]
    pub edamam: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            themealdb: default_themealdb_url(),
            spoonacular: default_spoonacular_url(),
            edamam: default_edamam_url(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            api_key: None,
            app_id: None,
            timeout: default_timeout(),
            debounce_ms: default_debounce_ms(),
            endpoints: EndpointsConfig::default(),
        }
    }
}

// Default value functions
fn default_timeout() -> u64 {
    30
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_themealdb_url() -> String {
    "https://www.themealdb.com/api/json/v1/1".to_string()
}

fn default_spoonacular_url() -> String {
    "https://api.spoonacular.com".to_string()
}

fn default_edamam_url() -> String {
    "https://api.edamam.com".to_string()
}

impl SearchConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_FINDER__ prefix
    /// 2. recipe-finder.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_FINDER__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Config for `provider` with every other setting at its default
    pub fn for_provider(provider: ProviderKind) -> Self {
        Self {
            provider,
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

/// Load configuration from file and environment variables
///
/// See [`SearchConfig::load`] for the precedence rules.
pub fn load_config() -> Result<SearchConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-finder").required(false))
        // Use double underscore for nested: RECIPE_FINDER__ENDPOINTS__THEMEALDB
        .add_source(
            Environment::with_prefix("RECIPE_FINDER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_timeout(), 30);
        assert_eq!(default_debounce_ms(), 300);
        assert_eq!(
            default_themealdb_url(),
            "https://www.themealdb.com/api/json/v1/1"
        );
    }

    #[test]
    fn test_search_config_default() {
        let config = SearchConfig::default();
        assert_eq!(config.provider, ProviderKind::TheMealDb);
        assert!(config.api_key.is_none());
        assert!(config.app_id.is_none());
        assert_eq!(config.debounce(), Duration::from_millis(300));
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_provider_kind_from_str() {
        assert_eq!(
            "TheMealDB".parse::<ProviderKind>().unwrap(),
            ProviderKind::TheMealDb
        );
        assert_eq!(
            "mock".parse::<ProviderKind>().unwrap(),
            ProviderKind::Sample
        );
        assert_eq!(
            "edamam".parse::<ProviderKind>().unwrap(),
            ProviderKind::Edamam
        );
        assert!("allrecipes".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let settings = Config::builder()
            .add_source(config::File::from_str(
                r#"
                provider = "spoonacular"
                api_key = "abc123"

                [endpoints]
                spoonacular = "http://localhost:9999"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let config: SearchConfig = settings.try_deserialize().unwrap();
        assert_eq!(config.provider, ProviderKind::Spoonacular);
        assert_eq!(config.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.endpoints.spoonacular, "http://localhost:9999");
        assert_eq!(config.endpoints.edamam, "https://api.edamam.com");
        assert_eq!(config.debounce_ms, 300);
    }
}
