use thiserror::Error;

/// Error taxonomy for the report pipeline.
///
/// `Transport` and `Decode` cover the paginated fetch (connectivity/HTTP
/// failure vs. malformed page envelope), `Completion` covers the text
/// generation call, `Export` covers the sink write.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("completion error: {0}")]
    Completion(String),

    #[error("export error: {0}")]
    Export(String),
}
