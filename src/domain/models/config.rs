//! Runtime configuration.

use serde::{Deserialize, Serialize};

/// Main configuration structure for pmos.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Model-call collaborator configuration
    #[serde(default)]
    pub model: ModelConfig,

    /// Knowledge-retrieval collaborator configuration
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// How many prior turns the context builder fetches
    #[serde(default = "default_turns_limit")]
    pub turns_limit: u32,

    /// Optional YAML file overriding the built-in workflow rules
    #[serde(default)]
    pub rules_file: Option<String>,
}

const fn default_turns_limit() -> u32 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            model: ModelConfig::default(),
            retrieval: RetrievalConfig::default(),
            logging: LoggingConfig::default(),
            turns_limit: default_turns_limit(),
            rules_file: None,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatabaseConfig {
    /// Path to the `SQLite` database file
    #[serde(default = "default_database_path")]
    pub path: String,

    /// Maximum number of database connections in pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_database_path() -> String {
    ".pmos/pmos.db".to_string()
}

const fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Model-call collaborator configuration.
///
/// Provider mechanics (fallback, retries) stay inside the adapter; the
/// pipeline only sees "text in, text out, or error".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ModelConfig {
    #[serde(default = "default_model_base_url")]
    pub base_url: String,

    #[serde(default = "default_model_name")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_model_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_model_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_model_name() -> String {
    "claude-sonnet-4-5-20250929".to_string()
}

const fn default_max_tokens() -> u32 {
    2048
}

const fn default_temperature() -> f32 {
    0.3
}

const fn default_model_timeout_secs() -> u64 {
    120
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: default_model_base_url(),
            model: default_model_name(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_secs: default_model_timeout_secs(),
        }
    }
}

/// Knowledge-retrieval collaborator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetrievalConfig {
    /// Base URL of the retrieval service. Unset disables retrieval
    /// (the pipeline degrades to empty knowledge context).
    #[serde(default)]
    pub base_url: Option<String>,

    /// Results requested by the broad pre-classification pass
    #[serde(default = "default_broad_results")]
    pub broad_results: u32,

    /// Results requested by each specialist's deep pass
    #[serde(default = "default_deep_results")]
    pub deep_results: u32,

    #[serde(default = "default_retrieval_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_broad_results() -> u32 {
    3
}

const fn default_deep_results() -> u32 {
    5
}

const fn default_retrieval_timeout_secs() -> u64 {
    10
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            broad_results: default_broad_results(),
            deep_results: default_deep_results(),
            timeout_secs: default_retrieval_timeout_secs(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
