use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use domain::enrichment::parser::parse_completion;
use domain::enrichment::prompt::build_prompt;
use domain::recommendation::entity::Recommendation;
use ports::secondary::completion_client::CompletionClient;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Fan-out bounds for the enrichment scheduler. Built from the loaded
/// configuration; defaults live with the other config defaults.
#[derive(Debug, Clone)]
pub struct EnrichmentConfig {
    /// Maximum completion calls in flight at once.
    pub max_concurrency: usize,
    /// Timeout per enrichment task, covering the completion call.
    pub task_timeout: Duration,
}

/// One task's terminal failure: the record is returned unenriched alongside
/// the reason, so completed sibling work is never discarded.
#[derive(Debug, Clone)]
pub struct EnrichmentFailure {
    pub id: String,
    pub reason: String,
}

/// Fan-in result: the enriched subset plus a report of every failed task.
#[derive(Debug, Default)]
pub struct EnrichmentReport {
    pub enriched: Vec<Recommendation>,
    pub failures: Vec<EnrichmentFailure>,
}

/// Dispatch one enrichment task per recommendation and collect all results.
///
/// Each task exclusively owns its recommendation by move, so no two tasks
/// ever touch the same record and the task bodies need no locking. A task
/// builds the deterministic prompt, calls the completion port, and on
/// success overwrites `description`, `remediation` and `context` from the
/// parsed response. Concurrency is capped by a semaphore; each task carries
/// a timeout and observes the cancellation token.
///
/// Results are drained in completion order — there is no ordering guarantee
/// across tasks. A task failure never aborts the run: it becomes an entry
/// in the failure report and the remaining tasks run to completion.
pub async fn enrich_all(
    recommendations: Vec<Recommendation>,
    client: Arc<dyn CompletionClient>,
    config: &EnrichmentConfig,
    cancel_token: CancellationToken,
) -> EnrichmentReport {
    let semaphore = Arc::new(Semaphore::new(config.max_concurrency.max(1)));
    let task_timeout = config.task_timeout;

    let mut join_set = JoinSet::new();
    // Record id per task id, so a join error can still name the record
    // whose enrichment was lost.
    let mut record_ids: HashMap<tokio::task::Id, String> = HashMap::new();
    for recommendation in recommendations {
        let client = Arc::clone(&client);
        let semaphore = Arc::clone(&semaphore);
        let cancel = cancel_token.clone();
        let record_id = recommendation.id.clone();

        let handle = join_set.spawn(async move {
            // Semaphore is never closed while tasks run; a closed-error here
            // means the runtime is tearing down, treated as cancellation.
            let Ok(_permit) = semaphore.acquire().await else {
                return Err(EnrichmentFailure {
                    id: recommendation.id,
                    reason: "scheduler shut down before dispatch".to_string(),
                });
            };
            enrich_one(recommendation, &*client, task_timeout, &cancel).await
        });
        record_ids.insert(handle.id(), record_id);
    }

    let mut report = EnrichmentReport::default();
    while let Some(joined) = join_set.join_next().await {
        match joined {
            Ok(Ok(rec)) => report.enriched.push(rec),
            Ok(Err(failure)) => {
                tracing::warn!(
                    id = %failure.id,
                    reason = %failure.reason,
                    "enrichment task failed"
                );
                report.failures.push(failure);
            }
            Err(join_err) => {
                let id = record_ids
                    .get(&join_err.id())
                    .cloned()
                    .unwrap_or_default();
                tracing::error!(id = %id, error = %join_err, "enrichment task panicked");
                report.failures.push(EnrichmentFailure {
                    id,
                    reason: format!("task join error: {join_err}"),
                });
            }
        }
    }

    report
}

/// Run a single enrichment task to its terminal state.
async fn enrich_one(
    mut recommendation: Recommendation,
    client: &dyn CompletionClient,
    task_timeout: Duration,
    cancel: &CancellationToken,
) -> Result<Recommendation, EnrichmentFailure> {
    let prompt = build_prompt(&recommendation);
    tracing::debug!(id = %recommendation.id, "enrichment dispatched");

    let response = tokio::select! {
        () = cancel.cancelled() => {
            return Err(EnrichmentFailure {
                id: recommendation.id,
                reason: "cancelled".to_string(),
            });
        }
        result = tokio::time::timeout(task_timeout, client.complete(&prompt)) => {
            match result {
                Ok(Ok(text)) => text,
                Ok(Err(e)) => {
                    return Err(EnrichmentFailure {
                        id: recommendation.id,
                        reason: e.to_string(),
                    });
                }
                Err(_elapsed) => {
                    return Err(EnrichmentFailure {
                        id: recommendation.id,
                        reason: format!("completion call timed out after {task_timeout:?}"),
                    });
                }
            }
        }
    };

    let sections = parse_completion(&response);
    recommendation.description = sections.explanation;
    recommendation.remediation = sections.remediation;
    recommendation.context = sections.context;

    tracing::debug!(id = %recommendation.id, "enrichment completed");
    Ok(recommendation)
}
