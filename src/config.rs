use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub store: StoreSettings,
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
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_service_radius_km")]
    pub default_service_radius_km: f64,
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default = "default_average_speed_kmh")]
    pub average_speed_kmh: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_service_radius_km: default_service_radius_km(),
            max_results: default_max_results(),
            average_speed_kmh: default_average_speed_kmh(),
        }
    }
}

fn default_service_radius_km() -> f64 { 25.0 }
fn default_max_results() -> usize { 20 }
fn default_average_speed_kmh() -> f64 { 30.0 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_distance_weight")]
    pub distance: f64,
    #[serde(default = "default_rating_weight")]
    pub rating: f64,
    #[serde(default = "default_rating_filtered_weight")]
    pub rating_filtered: f64,
    #[serde(default = "default_experience_weight")]
    pub experience: f64,
    #[serde(default = "default_jobs_per_point")]
    pub jobs_per_point: f64,
    #[serde(default = "default_specialty_weight")]
    pub specialty: f64,
    #[serde(default = "default_specialty_baseline")]
    pub specialty_baseline: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            distance: default_distance_weight(),
            rating: default_rating_weight(),
            rating_filtered: default_rating_filtered_weight(),
            experience: default_experience_weight(),
            jobs_per_point: default_jobs_per_point(),
            specialty: default_specialty_weight(),
            specialty_baseline: default_specialty_baseline(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            distance: config.distance,
            rating: config.rating,
            rating_filtered: config.rating_filtered,
            experience: config.experience,
            jobs_per_point: config.jobs_per_point,
            specialty: config.specialty,
            specialty_baseline: config.specialty_baseline,
        }
    }
}

fn default_distance_weight() -> f64 { 40.0 }
fn default_rating_weight() -> f64 { 30.0 }
fn default_rating_filtered_weight() -> f64 { 25.0 }
fn default_experience_weight() -> f64 { 20.0 }
fn default_jobs_per_point() -> f64 { 10.0 }
fn default_specialty_weight() -> f64 { 10.0 }
fn default_specialty_baseline() -> f64 { 5.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_geocode_cache_size")]
    pub geocode_cache_size: u64,
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            geocode_cache_size: default_geocode_cache_size(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

fn default_geocode_cache_size() -> u64 { 1000 }
fn default_ttl_secs() -> u64 { 3600 }

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    /// Load the development providers at startup
    #[serde(default = "default_seed_sample_providers")]
    pub seed_sample_providers: bool,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            seed_sample_providers: default_seed_sample_providers(),
        }
    }
}

fn default_seed_sample_providers() -> bool { true }

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
    /// 4. Environment variables (prefixed with GEOMATCH__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., GEOMATCH__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        settings.try_deserialize::<Settings>()?.validated()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        settings.try_deserialize::<Settings>()?.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let matching = &self.matching;
        if matching.average_speed_kmh <= 0.0 {
            return Err(ConfigError::Message(
                "matching.average_speed_kmh must be positive".to_string(),
            ));
        }
        if matching.default_service_radius_km <= 0.0 {
            return Err(ConfigError::Message(
                "matching.default_service_radius_km must be positive".to_string(),
            ));
        }
        if self.scoring.weights.jobs_per_point <= 0.0 {
            return Err(ConfigError::Message(
                "scoring.weights.jobs_per_point must be positive".to_string(),
            ));
        }
        Ok(self)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("GEOMATCH")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
