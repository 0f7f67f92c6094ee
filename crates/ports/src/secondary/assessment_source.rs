use std::future::Future;
use std::pin::Pin;

use domain::assessment::entity::{RawFinding, RawMetadata};
use domain::common::error::PipelineError;

/// Secondary port for fetching raw findings and their metadata.
///
/// Both fetches run pagination to completion and fail fast: an error means
/// no data was returned for that source, never a partial set alongside an
/// error. Uses `Pin<Box<dyn Future>>` return types (instead of RPITIT) so
/// the trait is dyn-compatible and can be used as `Arc<dyn AssessmentSource>`.
pub trait AssessmentSource: Send + Sync {
    /// Fetch all findings across every page, in arrival order.
    fn fetch_findings<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawFinding>, PipelineError>> + Send + 'a>>;

    /// Fetch all finding metadata across every page, in arrival order.
    fn fetch_metadata<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawMetadata>, PipelineError>> + Send + 'a>>;
}
