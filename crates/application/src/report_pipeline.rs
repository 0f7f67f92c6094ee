use std::sync::Arc;

use domain::common::error::PipelineError;
use domain::recommendation::aggregate::build_recommendations;
use ports::secondary::assessment_source::AssessmentSource;
use ports::secondary::completion_client::CompletionClient;
use ports::secondary::report_sink::ReportSink;
use tokio_util::sync::CancellationToken;

use crate::enrichment::{EnrichmentConfig, EnrichmentFailure, enrich_all};

/// Report pipeline application service.
///
/// Sequences Fetch → Aggregate → Enrich → Export against the secondary
/// ports. A failed fetch is logged and replaced by an empty set for that
/// source (the remaining source still contributes); the aggregation pass
/// tolerates empty inputs. Enrichment failures are collected per record
/// and reported, never fatal. Export failure terminates the run.
pub struct ReportPipeline {
    source: Arc<dyn AssessmentSource>,
    completion: Arc<dyn CompletionClient>,
    sink: Arc<dyn ReportSink>,
    enrichment: EnrichmentConfig,
}

/// Counts and failures from one pipeline run.
#[derive(Debug)]
pub struct RunSummary {
    pub findings_fetched: usize,
    pub metadata_fetched: usize,
    pub recommendations: usize,
    pub enriched: usize,
    pub failures: Vec<EnrichmentFailure>,
}

impl ReportPipeline {
    pub fn new(
        source: Arc<dyn AssessmentSource>,
        completion: Arc<dyn CompletionClient>,
        sink: Arc<dyn ReportSink>,
        enrichment: EnrichmentConfig,
    ) -> Self {
        Self {
            source,
            completion,
            sink,
            enrichment,
        }
    }

    /// Run the full pipeline, writing the report to `destination`.
    pub async fn run(
        &self,
        destination: &str,
        cancel_token: CancellationToken,
    ) -> Result<RunSummary, PipelineError> {
        tracing::info!("fetching findings and metadata");

        let findings = match self.source.fetch_findings().await {
            Ok(findings) => findings,
            Err(e) => {
                tracing::warn!(error = %e, "findings fetch failed, continuing with empty set");
                Vec::new()
            }
        };
        let metadata = match self.source.fetch_metadata().await {
            Ok(metadata) => metadata,
            Err(e) => {
                tracing::warn!(error = %e, "metadata fetch failed, continuing with empty set");
                Vec::new()
            }
        };

        let recommendations = build_recommendations(&findings, &metadata);
        tracing::info!(
            findings = findings.len(),
            metadata = metadata.len(),
            recommendations = recommendations.len(),
            "aggregation complete"
        );

        let recommendation_count = recommendations.len();
        let report = enrich_all(
            recommendations,
            Arc::clone(&self.completion),
            &self.enrichment,
            cancel_token,
        )
        .await;

        // Completion order is non-deterministic; sort so the export is
        // reproducible across runs.
        let mut enriched = report.enriched;
        enriched.sort_by(|a, b| a.id.cmp(&b.id));

        self.sink.write_report(&enriched, destination)?;
        tracing::info!(
            destination,
            enriched = enriched.len(),
            failed = report.failures.len(),
            "report exported"
        );

        Ok(RunSummary {
            findings_fetched: findings.len(),
            metadata_fetched: metadata.len(),
            recommendations: recommendation_count,
            enriched: enriched.len(),
            failures: report.failures,
        })
    }
}
