use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub firestore: FirestoreSettings,
    pub collection: CollectionSettings,
    pub cache: CacheSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FirestoreSettings {
    #[serde(default = "default_firestore_endpoint")]
    pub endpoint: String,
    pub api_key: String,
    pub project_id: String,
    #[serde(default = "default_database_id")]
    pub database_id: String,
}

fn default_firestore_endpoint() -> String {
    "https://firestore.googleapis.com/v1".to_string()
}

fn default_database_id() -> String {
    "(default)".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    #[serde(default = "default_user_profiles_collection")]
    pub user_profiles: String,
    #[serde(default = "default_job_listings_collection")]
    pub job_listings: String,
}

fn default_user_profiles_collection() -> String {
    "userProfiles".to_string()
}

fn default_job_listings_collection() -> String {
    "jobListings".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub redis_url: String,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_location_exact_weight")]
    pub location_exact: f64,
    #[serde(default = "default_location_partial_weight")]
    pub location_partial: f64,
    #[serde(default = "default_requirements_weight")]
    pub requirements: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            location_exact: default_location_exact_weight(),
            location_partial: default_location_partial_weight(),
            requirements: default_requirements_weight(),
        }
    }
}

fn default_location_exact_weight() -> f64 { 0.4 }
fn default_location_partial_weight() -> f64 { 0.2 }
fn default_requirements_weight() -> f64 { 0.6 }

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
    /// 3. Environment variables (prefixed with ROZGAR_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with ROZGAR_)
            // e.g., ROZGAR_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("ROZGAR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("ROZGAR")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply well-known environment variables on top of the file configuration
///
/// REDIS_URL and the Firestore credentials are commonly injected directly by
/// the deployment platform without the ROZGAR_ prefix.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let redis_url = env::var("REDIS_URL")
        .or_else(|_| env::var("ROZGAR_CACHE__REDIS_URL"))
        .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());

    let firestore_api_key = env::var("ROZGAR_FIRESTORE__API_KEY").ok();
    let firestore_project_id = env::var("ROZGAR_FIRESTORE__PROJECT_ID").ok();
    let firestore_endpoint = env::var("ROZGAR_FIRESTORE__ENDPOINT").ok();

    let mut builder = Config::builder()
        .add_source(settings)
        .set_override("cache.redis_url", redis_url)?;

    if let Some(api_key) = firestore_api_key {
        builder = builder.set_override("firestore.api_key", api_key)?;
    }
    if let Some(project_id) = firestore_project_id {
        builder = builder.set_override("firestore.project_id", project_id)?;
    }
    if let Some(endpoint) = firestore_endpoint {
        builder = builder.set_override("firestore.endpoint", endpoint)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.location_exact, 0.4);
        assert_eq!(weights.location_partial, 0.2);
        assert_eq!(weights.requirements, 0.6);
        // The score range invariant: full location + full overlap = 1.0.
        assert_eq!(weights.location_exact + weights.requirements, 1.0);
    }

    #[test]
    fn test_default_collections() {
        assert_eq!(default_user_profiles_collection(), "userProfiles");
        assert_eq!(default_job_listings_collection(), "jobListings");
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }
}
