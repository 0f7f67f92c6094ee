//! Reporter configuration: structs, parsing, and validation.
//!
//! Secrets (the management API bearer token and the completion API key)
//! are never read from the config file; they arrive via CLI flags or
//! environment variables.

mod common;

pub use common::ConfigError;

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    ASSESSMENTS_PATH, DEFAULT_API_BASE_URL, DEFAULT_API_VERSION, DEFAULT_COMPLETION_ENDPOINT,
    DEFAULT_COMPLETION_MODEL, DEFAULT_COMPLETION_SEED, DEFAULT_EXPORT_DESTINATION,
    DEFAULT_MAX_CONCURRENCY, DEFAULT_TASK_TIMEOUT, METADATA_PATH,
};

// ── Top-level config ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub enrichment: EnrichmentSection,

    #[serde(default)]
    pub export: ExportConfig,

    #[serde(default = "default_log_level")]
    pub log_level: LogLevel,

    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            enrichment: EnrichmentSection::default(),
            export: ExportConfig::default(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

impl AppConfig {
    /// Load config from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the config after deserialization.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.is_empty() {
            return Err(ConfigError::Validation {
                field: "api.base_url".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.api.api_version.is_empty() {
            return Err(ConfigError::Validation {
                field: "api.api_version".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.enrichment.max_concurrency == 0 {
            return Err(ConfigError::Validation {
                field: "enrichment.max_concurrency".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.enrichment.task_timeout_secs == 0 {
            return Err(ConfigError::Validation {
                field: "enrichment.task_timeout_secs".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.enrichment.model.is_empty() {
            return Err(ConfigError::Validation {
                field: "enrichment.model".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if self.export.destination.is_empty() {
            return Err(ConfigError::Validation {
                field: "export.destination".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

// ── Fetch API section ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Scope path fragment (e.g. `subscriptions/<id>` or
    /// `providers/Microsoft.Management/managementGroups/<name>`).
    /// May instead be supplied on the command line.
    #[serde(default)]
    pub scope: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_version: default_api_version(),
            scope: None,
        }
    }
}

impl ApiConfig {
    /// Findings endpoint for the given scope fragment.
    pub fn findings_url(&self, scope: &str) -> String {
        format!(
            "{}/{}/{}?api-version={}",
            self.base_url, scope, ASSESSMENTS_PATH, self.api_version
        )
    }

    /// Metadata endpoint (tenant-wide, not scoped).
    pub fn metadata_url(&self) -> String {
        format!(
            "{}/{}?api-version={}",
            self.base_url, METADATA_PATH, self.api_version
        )
    }
}

// ── Enrichment section ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentSection {
    #[serde(default = "default_completion_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Reproducibility seed sent with every completion request.
    #[serde(default = "default_seed")]
    pub seed: i64,

    /// Maximum completion calls in flight at once.
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Per-task timeout in seconds.
    #[serde(default = "default_task_timeout_secs")]
    pub task_timeout_secs: u64,
}

impl EnrichmentSection {
    pub fn task_timeout(&self) -> Duration {
        Duration::from_secs(self.task_timeout_secs)
    }
}

impl Default for EnrichmentSection {
    fn default() -> Self {
        Self {
            endpoint: default_completion_endpoint(),
            model: default_model(),
            seed: default_seed(),
            max_concurrency: default_max_concurrency(),
            task_timeout_secs: default_task_timeout_secs(),
        }
    }
}

// ── Export section ─────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Output file the report is written to.
    #[serde(default = "default_destination")]
    pub destination: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            destination: default_destination(),
        }
    }
}

// ── Serde defaults ─────────────────────────────────────────────────

fn default_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}
fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}
fn default_completion_endpoint() -> String {
    DEFAULT_COMPLETION_ENDPOINT.to_string()
}
fn default_model() -> String {
    DEFAULT_COMPLETION_MODEL.to_string()
}
fn default_seed() -> i64 {
    DEFAULT_COMPLETION_SEED
}
fn default_max_concurrency() -> usize {
    DEFAULT_MAX_CONCURRENCY
}
fn default_task_timeout_secs() -> u64 {
    DEFAULT_TASK_TIMEOUT.as_secs()
}
fn default_destination() -> String {
    DEFAULT_EXPORT_DESTINATION.to_string()
}
fn default_log_level() -> LogLevel {
    LogLevel::Info
}
fn default_log_format() -> LogFormat {
    LogFormat::Json
}

// ── Log level ──────────────────────────────────────────────────────

/// Verbosity threshold for the tracing subscriber. Also the fallback
/// `EnvFilter` directive when `RUST_LOG` is unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive string understood by `tracing_subscriber::EnvFilter`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

// FromStr lets clap parse `--log-level` values; the config file path
// goes through serde instead.
impl std::str::FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            other => Err(ConfigError::Validation {
                field: "log_level".to_string(),
                message: format!("unknown level '{other}': expected error|warn|info|debug|trace"),
            }),
        }
    }
}

// ── Log format ────────────────────────────────────────────────────

/// Output shape of the tracing subscriber: machine-readable JSON or
/// human-readable text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Json,
    Text,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "pretty" => Ok(Self::Text),
            other => Err(ConfigError::Validation {
                field: "log_format".to_string(),
                message: format!("unknown format '{other}': expected json|text"),
            }),
        }
    }
}
