use domain::common::error::PipelineError;
use domain::recommendation::entity::Recommendation;
use ports::secondary::report_sink::ReportSink;

/// Column headers, in export order.
const HEADERS: [&str; 6] = [
    "DisplayName",
    "Description",
    "Severity",
    "AffectedResources",
    "Remediation",
    "Context",
];

/// Report sink that writes the recommendation collection as CSV.
///
/// One header row, one data row per record in the order supplied;
/// affected resources are joined with `", "` into a single cell.
pub struct CsvReportSink;

impl ReportSink for CsvReportSink {
    fn write_report(
        &self,
        recommendations: &[Recommendation],
        destination: &str,
    ) -> Result<(), PipelineError> {
        let mut writer = csv::Writer::from_path(destination)
            .map_err(|e| PipelineError::Export(format!("cannot open '{destination}': {e}")))?;

        writer
            .write_record(HEADERS)
            .map_err(|e| PipelineError::Export(format!("header write failed: {e}")))?;

        for rec in recommendations {
            writer
                .write_record([
                    rec.display_name.as_str(),
                    rec.description.as_str(),
                    rec.severity.as_str(),
                    &rec.affected_resources.join(", "),
                    rec.remediation.as_str(),
                    rec.context.as_str(),
                ])
                .map_err(|e| {
                    PipelineError::Export(format!("row write failed for '{}': {e}", rec.id))
                })?;
        }

        writer
            .flush()
            .map_err(|e| PipelineError::Export(format!("flush failed: {e}")))?;

        tracing::info!(destination, rows = recommendations.len(), "report written");
        Ok(())
    }
}
