use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use domain::common::error::PipelineError;
use ports::secondary::completion_client::CompletionClient;
use serde::{Deserialize, Serialize};

/// Completion client for OpenAI-compatible chat endpoints.
///
/// Sends the prompt as a single user message with a fixed reproducibility
/// seed and returns the first choice's text. Only the request/response
/// contract is consumed here; any endpoint speaking the chat-completions
/// shape works.
pub struct OpenAiCompletionClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    seed: i64,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    seed: i64,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl OpenAiCompletionClient {
    pub fn new(
        endpoint: String,
        api_key: String,
        model: String,
        seed: i64,
    ) -> Result<Self, PipelineError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(120))
            .user_agent("secreport/0.1")
            .build()
            .map_err(|e| PipelineError::Completion(format!("HTTP client init failed: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            api_key,
            model,
            seed,
        })
    }

    async fn do_complete(&self, prompt: &str) -> Result<String, PipelineError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            seed: self.seed,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| PipelineError::Completion(format!("completion request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(PipelineError::Completion(format!(
                "completion endpoint returned HTTP {}",
                response.status()
            )));
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            PipelineError::Completion(format!("malformed completion response: {e}"))
        })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| PipelineError::Completion("completion returned no choices".to_string()))
    }
}

impl CompletionClient for OpenAiCompletionClient {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, PipelineError>> + Send + 'a>> {
        Box::pin(self.do_complete(prompt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_model_seed_and_message() {
        let request = ChatRequest {
            model: "gpt-4o",
            messages: vec![ChatMessage {
                role: "user",
                content: "enrich this",
            }],
            seed: 1,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["seed"], 1);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "enrich this");
    }

    #[test]
    fn response_first_choice_is_extracted() {
        let body = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "first"}},
                {"message": {"role": "assistant", "content": "second"}}
            ]
        }"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap();
        assert_eq!(content, "first");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_completion_error() {
        let client = OpenAiCompletionClient::new(
            "http://127.0.0.1:1/v1/chat/completions".to_string(),
            "sk-test".to_string(),
            "gpt-4o".to_string(),
            1,
        )
        .unwrap();

        let result = client.complete("prompt").await;
        assert!(matches!(result, Err(PipelineError::Completion(_))));
    }

    #[test]
    fn client_is_send_sync() {
        fn _assert<T: Send + Sync>() {}
        _assert::<OpenAiCompletionClient>();
    }
}
