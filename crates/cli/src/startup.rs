use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use adapters::completion::openai_client::OpenAiCompletionClient;
use adapters::export::csv_sink::CsvReportSink;
use adapters::http::paginated_client::PaginatedClient;
use application::enrichment::EnrichmentConfig;
use application::report_pipeline::ReportPipeline;
use infrastructure::config::AppConfig;
use infrastructure::logging::init_logging;
use tracing::{info, warn};

use crate::cli::Cli;
use crate::shutdown::create_shutdown_token;

/// Run the full report pipeline and block until it finishes or a
/// shutdown signal cancels it.
pub async fn run(cli: &Cli) -> anyhow::Result<()> {
    // ── 1. Load config ──────────────────────────────────────────────
    // A missing config file is fine; every field has a default.
    let config_path = Path::new(&cli.config);
    let config = if config_path.exists() {
        AppConfig::load(config_path)?
    } else {
        AppConfig::default()
    };

    // ── 2. Initialize logging ───────────────────────────────────────
    // CLI flags take precedence over config file
    let log_level = cli.log_level.unwrap_or(config.log_level);
    let log_format = cli.log_format.unwrap_or(config.log_format);
    init_logging(log_level, log_format);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %cli.config,
        "starting report run"
    );

    // ── 3. Resolve inputs ───────────────────────────────────────────
    let scope = cli
        .scope()
        .or_else(|| config.api.scope.clone())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "no scope given: pass --subscription or --management-group, \
                 or set api.scope in the config file"
            )
        })?;

    let token = cli
        .token
        .clone()
        .ok_or_else(|| anyhow::anyhow!("no API token: pass --token or set SECREPORT_TOKEN"))?;

    let completion_key = cli.completion_key.clone().ok_or_else(|| {
        anyhow::anyhow!("no completion API key: pass --completion-key or set OPENAI_API_KEY")
    })?;

    let destination = cli
        .output
        .clone()
        .unwrap_or_else(|| config.export.destination.clone());

    // ── 4. Wire adapters into the pipeline ──────────────────────────
    let source = Arc::new(PaginatedClient::new(
        config.api.findings_url(&scope),
        config.api.metadata_url(),
        token,
    )?);

    let completion = Arc::new(OpenAiCompletionClient::new(
        config.enrichment.endpoint.clone(),
        completion_key,
        config.enrichment.model.clone(),
        config.enrichment.seed,
    )?);

    let enrichment = EnrichmentConfig {
        max_concurrency: config.enrichment.max_concurrency,
        task_timeout: config.enrichment.task_timeout(),
    };

    let pipeline = ReportPipeline::new(source, completion, Arc::new(CsvReportSink), enrichment);

    // ── 5. Run ──────────────────────────────────────────────────────
    let shutdown = create_shutdown_token();
    let started = Instant::now();

    let summary = pipeline.run(&destination, shutdown).await?;

    info!(
        scope = %scope,
        destination = %destination,
        findings = summary.findings_fetched,
        recommendations = summary.recommendations,
        enriched = summary.enriched,
        failed = summary.failures.len(),
        elapsed_secs = started.elapsed().as_secs_f64(),
        "report run complete"
    );

    for failure in &summary.failures {
        warn!(id = %failure.id, reason = %failure.reason, "enrichment failed");
    }

    Ok(())
}
