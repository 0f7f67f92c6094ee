use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use domain::assessment::entity::{RawFinding, RawMetadata};
use domain::common::error::PipelineError;
use ports::secondary::assessment_source::AssessmentSource;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// One page of a cursor-paginated listing. The cursor is an opaque
/// absolute URL; an empty value ends pagination.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct PageEnvelope<T> {
    #[serde(default)]
    pub items: Vec<T>,
    #[serde(default)]
    pub next_cursor: String,
}

/// Follow a cursor chain to completion, concatenating page items in
/// arrival order.
///
/// Fail-fast: the first page error aborts the whole fetch and no items
/// from earlier pages are returned. Generic over the page producer so the
/// pagination rule is testable without a server.
pub async fn follow_pages<T, F, Fut>(
    start_url: &str,
    mut fetch_page: F,
) -> Result<Vec<T>, PipelineError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<PageEnvelope<T>, PipelineError>>,
{
    let mut items = Vec::new();
    let mut url = start_url.to_string();

    while !url.is_empty() {
        let page = fetch_page(url).await?;
        items.extend(page.items);
        url = page.next_cursor;
    }

    Ok(items)
}

/// Cursor-following HTTP fetcher for the findings and metadata endpoints.
///
/// Issues bearer-authenticated GETs and accumulates all pages; generic
/// over the element type, so both endpoints are served identically.
pub struct PaginatedClient {
    client: reqwest::Client,
    token: String,
    findings_url: String,
    metadata_url: String,
}

impl PaginatedClient {
    /// Create a new client with default settings (30s request timeout).
    pub fn new(
        findings_url: String,
        metadata_url: String,
        token: String,
    ) -> Result<Self, PipelineError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("secreport/0.1")
            .build()
            .map_err(|e| PipelineError::Transport(format!("HTTP client init failed: {e}")))?;

        Ok(Self {
            client,
            token,
            findings_url,
            metadata_url,
        })
    }

    /// Create with a custom reqwest client (for testing or advanced config).
    pub fn with_client(
        client: reqwest::Client,
        findings_url: String,
        metadata_url: String,
        token: String,
    ) -> Self {
        Self {
            client,
            token,
            findings_url,
            metadata_url,
        }
    }

    async fn fetch_all<T: DeserializeOwned>(
        &self,
        start_url: &str,
    ) -> Result<Vec<T>, PipelineError> {
        let client = &self.client;
        let token = &self.token;

        follow_pages(start_url, move |url| {
            let client = client.clone();
            let token = token.clone();
            async move {
                let response = client
                    .get(&url)
                    .bearer_auth(&token)
                    .send()
                    .await
                    .map_err(|e| PipelineError::Transport(format!("GET {url} failed: {e}")))?;

                if !response.status().is_success() {
                    return Err(PipelineError::Transport(format!(
                        "GET {url} returned HTTP {}",
                        response.status()
                    )));
                }

                let body = response.text().await.map_err(|e| {
                    PipelineError::Transport(format!("body read failed for {url}: {e}"))
                })?;

                serde_json::from_str::<PageEnvelope<T>>(&body).map_err(|e| {
                    PipelineError::Decode(format!("malformed page envelope from {url}: {e}"))
                })
            }
        })
        .await
    }
}

impl AssessmentSource for PaginatedClient {
    fn fetch_findings<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawFinding>, PipelineError>> + Send + 'a>> {
        Box::pin(self.fetch_all(&self.findings_url))
    }

    fn fetch_metadata<'a>(
        &'a self,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RawMetadata>, PipelineError>> + Send + 'a>> {
        Box::pin(self.fetch_all(&self.metadata_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    fn page(items: &[&str], next: &str) -> PageEnvelope<String> {
        PageEnvelope {
            items: items.iter().map(|s| s.to_string()).collect(),
            next_cursor: next.to_string(),
        }
    }

    #[tokio::test]
    async fn pagination_follows_cursors_until_empty() {
        let pages = Mutex::new(VecDeque::from([
            page(&["a", "b"], "https://example.com/p2"),
            page(&["c"], "https://example.com/p3"),
            page(&["d", "e"], ""),
        ]));

        let items = follow_pages("https://example.com/p1", |_url| async {
            Ok(pages.lock().unwrap().pop_front().unwrap())
        })
        .await
        .unwrap();

        assert_eq!(items, vec!["a", "b", "c", "d", "e"]);
        // Fetching stopped after the page with the empty cursor
        assert!(pages.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn requested_urls_follow_the_cursor_chain() {
        let pages = Mutex::new(VecDeque::from([
            page(&["a"], "https://example.com/p2"),
            page(&["b"], ""),
        ]));
        let urls = Mutex::new(Vec::new());

        let _ = follow_pages("https://example.com/p1", |url| {
            urls.lock().unwrap().push(url);
            async { Ok(pages.lock().unwrap().pop_front().unwrap()) }
        })
        .await
        .unwrap();

        assert_eq!(
            *urls.lock().unwrap(),
            vec![
                "https://example.com/p1".to_string(),
                "https://example.com/p2".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn single_page_with_empty_cursor_fetches_once() {
        let calls = Mutex::new(0u32);

        let items = follow_pages("https://example.com/p1", |_url| {
            *calls.lock().unwrap() += 1;
            async { Ok(page(&["only"], "")) }
        })
        .await
        .unwrap();

        assert_eq!(items, vec!["only"]);
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn page_error_aborts_without_partial_data() {
        let pages = Mutex::new(VecDeque::from([page(&["a", "b"], "https://example.com/p2")]));

        let result: Result<Vec<String>, _> =
            follow_pages("https://example.com/p1", |_url| async {
                match pages.lock().unwrap().pop_front() {
                    Some(p) => Ok(p),
                    None => Err(PipelineError::Transport("connection reset".to_string())),
                }
            })
            .await;

        // First page succeeded, second failed: no items survive
        assert!(matches!(result, Err(PipelineError::Transport(_))));
    }

    #[test]
    fn malformed_envelope_fails_to_decode() {
        let body = r#"{"items": "not an array", "nextCursor": ""}"#;
        assert!(serde_json::from_str::<PageEnvelope<RawFinding>>(body).is_err());
    }

    #[test]
    fn envelope_deserializes_camel_case_cursor() {
        let body = r#"{"items": [], "nextCursor": "https://example.com/p2"}"#;
        let envelope: PageEnvelope<RawFinding> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.next_cursor, "https://example.com/p2");
    }

    #[test]
    fn envelope_fields_default_when_absent() {
        let envelope: PageEnvelope<RawFinding> = serde_json::from_str("{}").unwrap();
        assert!(envelope.items.is_empty());
        assert!(envelope.next_cursor.is_empty());
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error() {
        let client = PaginatedClient::new(
            "http://127.0.0.1:1/findings".to_string(),
            "http://127.0.0.1:1/metadata".to_string(),
            "token".to_string(),
        )
        .unwrap();

        let result = client.fetch_findings().await;
        assert!(matches!(result, Err(PipelineError::Transport(_))));
    }

    #[test]
    fn paginated_client_is_send_sync() {
        fn _assert<T: Send + Sync>() {}
        _assert::<PaginatedClient>();
    }

    #[test]
    fn paginated_client_implements_assessment_source() {
        fn _assert<T: AssessmentSource>() {}
        _assert::<PaginatedClient>();
    }
}
