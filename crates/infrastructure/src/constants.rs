use std::time::Duration;

// ── Defaults ───────────────────────────────────────────────────────

pub const DEFAULT_CONFIG_PATH: &str = "secreport.yaml";

/// Management-plane base URL for the findings and metadata endpoints.
pub const DEFAULT_API_BASE_URL: &str = "https://management.azure.com";
pub const DEFAULT_API_VERSION: &str = "2021-06-01";

/// Provider path for per-scope security assessments.
pub const ASSESSMENTS_PATH: &str = "providers/Microsoft.Security/assessments";
/// Provider path for tenant-wide assessment metadata (not scoped).
pub const METADATA_PATH: &str = "providers/Microsoft.Security/assessmentMetadata";

// ── Enrichment ─────────────────────────────────────────────────────

pub const DEFAULT_COMPLETION_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-4o";
/// Fixed reproducibility seed sent with every completion request.
pub const DEFAULT_COMPLETION_SEED: i64 = 1;
pub const DEFAULT_MAX_CONCURRENCY: usize = 16;
pub const DEFAULT_TASK_TIMEOUT: Duration = Duration::from_secs(120);

// ── Export ─────────────────────────────────────────────────────────

pub const DEFAULT_EXPORT_DESTINATION: &str = "recommendations.csv";
