pub mod assessment_source;
pub mod completion_client;
pub mod report_sink;
