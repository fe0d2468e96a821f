use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_aux::prelude::deserialize_vec_from_string_or_vec;
use std::time::Duration;

/// Application configuration loaded from multiple sources.
///
/// Configuration is loaded in priority order (lowest to highest):
/// 1. Struct defaults
/// 2. parlvotes.yaml file (if exists)
/// 3. Environment variables with PV_ prefix (always wins)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub upstream: UpstreamConfig,
    /// Ordered CORS relay templates; `{url}` is replaced by the encoded target.
    /// Accepts either an array or comma-separated string.
    #[serde(default = "default_proxies", deserialize_with = "deserialize_list")]
    pub proxies: Vec<String>,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub outcome: OutcomeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Open-data catalog base (datasets endpoint).
    #[serde(default = "default_opendata_base")]
    pub opendata_base: String,

    /// Dataset holding the national register of elected officials.
    #[serde(default = "default_opendata_dataset")]
    pub opendata_dataset: String,

    /// Lower-chamber host (per-deputy detail, votes, roll calls, groups).
    #[serde(default = "default_deputes_base")]
    pub deputes_base: String,

    /// Upper-chamber host (per-senator detail, votes, roll calls).
    #[serde(default = "default_senateurs_base")]
    pub senateurs_base: String,

    /// Legislature number used in lower-chamber roll-call paths.
    #[serde(default = "default_legislature")]
    pub legislature: String,

    /// Records per page requested from the open-data catalog.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Seconds a fetched payload stays fresh.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl CacheConfig {
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutcomeConfig {
    /// Raw outcome strings meaning "adopted", compared case- and accent-insensitively.
    #[serde(
        default = "default_adopted_spellings",
        deserialize_with = "deserialize_list"
    )]
    pub adopted_spellings: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level filter (debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Deserialize a list from comma-separated string or array, filtering empty values.
fn deserialize_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items: Vec<String> = deserialize_vec_from_string_or_vec(deserializer)?;
    Ok(items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect())
}

fn default_opendata_base() -> String {
    "https://public.opendatasoft.com/api/explore/v2.1/catalog/datasets".to_string()
}

fn default_opendata_dataset() -> String {
    "repertoire-national-des-elus-deputes-et-senateurs".to_string()
}

fn default_deputes_base() -> String {
    "https://www.nosdeputes.fr".to_string()
}

fn default_senateurs_base() -> String {
    "https://www.nossenateurs.fr".to_string()
}

fn default_legislature() -> String {
    "17".to_string()
}

// These functions cannot be const because serde uses function pointers for defaults
#[allow(clippy::missing_const_for_fn)]
fn default_page_size() -> usize {
    100
}

#[allow(clippy::missing_const_for_fn)]
fn default_ttl_secs() -> u64 {
    600 // 10 minutes
}

fn default_proxies() -> Vec<String> {
    vec![
        "https://api.allorigins.win/raw?url={url}".to_string(),
        "https://corsproxy.io/?{url}".to_string(),
    ]
}

fn default_adopted_spellings() -> Vec<String> {
    ["adopte", "adoptee", "adopté", "adoptée"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            opendata_base: default_opendata_base(),
            opendata_dataset: default_opendata_dataset(),
            deputes_base: default_deputes_base(),
            senateurs_base: default_senateurs_base(),
            legislature: default_legislature(),
            page_size: default_page_size(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl Default for OutcomeConfig {
    fn default() -> Self {
        Self {
            adopted_spellings: default_adopted_spellings(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upstream: UpstreamConfig::default(),
            proxies: default_proxies(),
            cache: CacheConfig::default(),
            outcome: OutcomeConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Sources are merged in priority order:
    /// 1. Struct defaults (lowest)
    /// 2. parlvotes.yaml file (if exists)
    /// 3. Environment variables with PV_ prefix (highest)
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("parlvotes.yaml")
    }

    /// Load configuration with a custom YAML file path.
    ///
    /// # Errors
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load_from(yaml_path: &str) -> Result<Self, ConfigError> {
        let config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(yaml_path))
            .merge(Env::prefixed("PV_").split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let upstream = &self.upstream;
        for (field, value) in [
            ("upstream.opendata_base", &upstream.opendata_base),
            ("upstream.deputes_base", &upstream.deputes_base),
            ("upstream.senateurs_base", &upstream.senateurs_base),
        ] {
            if !is_http_url(value) {
                return Err(ConfigError::Validation(format!(
                    "{field} must start with http:// or https://, got: '{value}'"
                )));
            }
        }

        if upstream.opendata_dataset.trim().is_empty() {
            return Err(ConfigError::Validation(
                "upstream.opendata_dataset cannot be empty".into(),
            ));
        }

        if upstream.legislature.trim().is_empty() {
            return Err(ConfigError::Validation(
                "upstream.legislature cannot be empty".into(),
            ));
        }

        if upstream.page_size == 0 {
            return Err(ConfigError::Validation(
                "upstream.page_size cannot be 0".into(),
            ));
        }

        if self.cache.ttl_secs == 0 {
            return Err(ConfigError::Validation("cache.ttl_secs cannot be 0".into()));
        }

        // Proxy templates must be relays over http(s) with a target placeholder
        for proxy in &self.proxies {
            if !is_http_url(proxy) || !proxy.contains("{url}") {
                return Err(ConfigError::Validation(format!(
                    "proxies contains invalid template '{proxy}'. Must start with http:// or https:// and contain {{url}}"
                )));
            }
        }

        if self.outcome.adopted_spellings.is_empty() {
            return Err(ConfigError::Validation(
                "outcome.adopted_spellings needs at least one spelling".into(),
            ));
        }

        Ok(())
    }
}
