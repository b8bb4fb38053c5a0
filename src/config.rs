use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::DEFAULT_MAX_RESULTS;
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub cors: CorsSettings,
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
fn default_port() -> u16 { 5000 }

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self { path: default_catalog_path() }
    }
}

fn default_catalog_path() -> PathBuf { PathBuf::from("data/neighborhood_data.csv") }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default)]
    pub weights: WeightsConfig,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            weights: WeightsConfig::default(),
        }
    }
}

fn default_max_results() -> usize { DEFAULT_MAX_RESULTS }

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_budget_weight")]
    pub budget: f64,
    #[serde(default = "default_safety_weight")]
    pub safety: f64,
    #[serde(default = "default_walkability_weight")]
    pub walkability: f64,
    #[serde(default = "default_family_weight")]
    pub family: f64,
    #[serde(default = "default_quiet_weight")]
    pub quiet: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            budget: default_budget_weight(),
            safety: default_safety_weight(),
            walkability: default_walkability_weight(),
            family: default_family_weight(),
            quiet: default_quiet_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            budget: config.budget,
            safety: config.safety,
            walkability: config.walkability,
            family: config.family,
            quiet: config.quiet,
        }
    }
}

fn default_budget_weight() -> f64 { 0.30 }
fn default_safety_weight() -> f64 { 0.25 }
fn default_walkability_weight() -> f64 { 0.20 }
fn default_family_weight() -> f64 { 0.15 }
fn default_quiet_weight() -> f64 { 0.10 }

#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// `*` allows any origin
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self { allowed_origins: default_allowed_origins() }
    }
}

fn default_allowed_origins() -> Vec<String> { vec!["*".to_string()] }

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
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with NEIGHBORFIT__)
    /// 5. Legacy variables DATA_PATH, NEIGHBORHOOD_DATA_FILE and MAX_RESULTS
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., NEIGHBORFIT__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?;

        apply_legacy_env(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?;

        settings.try_deserialize()
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.matching.weights)
    }

    /// Whether the CORS layer should accept any origin
    pub fn cors_is_permissive(&self) -> bool {
        self.cors.allowed_origins.iter().any(|o| o == "*")
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("NEIGHBORFIT")
        .prefix_separator("__")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("cors.allowed_origins")
        .try_parsing(true)
}

/// Apply the flat environment variables used by earlier deployments
fn apply_legacy_env(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    let data_dir = env::var("DATA_PATH").ok();
    let data_file = env::var("NEIGHBORHOOD_DATA_FILE").ok();
    if data_dir.is_some() || data_file.is_some() {
        let dir = PathBuf::from(data_dir.unwrap_or_else(|| "data".to_string()));
        let file = data_file.unwrap_or_else(|| "neighborhood_data.csv".to_string());
        builder = builder.set_override("catalog.path", dir.join(file).to_string_lossy().into_owned())?;
    }

    if let Ok(max_results) = env::var("MAX_RESULTS") {
        let max_results: i64 = max_results
            .parse()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| ConfigError::Message(format!("MAX_RESULTS must be a positive integer, got {}", max_results)))?;
        builder = builder.set_override("matching.max_results", max_results)?;
    }

    builder.build()
}
