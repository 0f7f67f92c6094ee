use std::future::Future;
use std::pin::Pin;

use domain::common::error::PipelineError;

/// Secondary port for the external text-generation service.
///
/// The model identifier and reproducibility seed are adapter configuration;
/// callers supply only the prompt and receive the first choice's text.
/// Every failure surfaces as `PipelineError::Completion`.
pub trait CompletionClient: Send + Sync {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, PipelineError>> + Send + 'a>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DummyClient;
    impl CompletionClient for DummyClient {
        fn complete<'a>(
            &'a self,
            _prompt: &'a str,
        ) -> Pin<Box<dyn Future<Output = Result<String, PipelineError>> + Send + 'a>> {
            Box::pin(async { Ok(String::new()) })
        }
    }

    #[test]
    fn completion_client_is_dyn_compatible() {
        let client: Box<dyn CompletionClient> = Box::new(DummyClient);
        let _ = client;
    }
}
