use domain::common::error::PipelineError;
use domain::recommendation::entity::Recommendation;

/// Pluggable sink for the final recommendation collection.
///
/// Implementations write one header row and one data row per record, in
/// the order supplied. The trait is object-safe for use behind
/// `Arc<dyn ReportSink>`.
pub trait ReportSink: Send + Sync {
    /// Write the full report to the named destination.
    fn write_report(
        &self,
        recommendations: &[Recommendation],
        destination: &str,
    ) -> Result<(), PipelineError>;
}
