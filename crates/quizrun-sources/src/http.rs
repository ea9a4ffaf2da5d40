//! Pool source backed by an HTTP(S) endpoint.

use std::time::Duration;

use async_trait::async_trait;
use tracing::instrument;

use quizrun_core::traits::PoolSource;
use quizrun_core::ExamError;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fetches a pool with a single GET request.
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ExamError> {
        let url = url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ExamError::fetch_failed(&url, format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            url,
            client,
            timeout,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PoolSource for HttpSource {
    fn name(&self) -> &str {
        &self.url
    }

    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<serde_json::Value, ExamError> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                ExamError::fetch_failed(
                    &self.url,
                    format!("request timed out after {}s", self.timeout.as_secs()),
                )
            } else {
                ExamError::fetch_failed(&self.url, e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "pool request rejected");
            return Err(ExamError::fetch_failed(
                &self.url,
                format!("HTTP {}", status.as_u16()),
            ));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ExamError::fetch_failed(&self.url, e))?;
        serde_json::from_str(&body)
            .map_err(|e| ExamError::InvalidPoolFormat(format!("{}: not valid JSON: {e}", self.url)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizrun_core::pool::load_pool;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source(server: &MockServer) -> HttpSource {
        HttpSource::new(
            format!("{}/questions.json", server.uri()),
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn successful_fetch() {
        let server = MockServer::start().await;
        let body = serde_json::json!([
            { "id": "fr", "question": "Capital of France?", "options": ["Paris", "Lyon", "Nice"], "correct": ["A"] },
            { "id": "pr", "question": "Primes?", "options": ["2", "4", "5"], "correct": ["A", "C"] }
        ]);

        Mock::given(method("GET"))
            .and(path("/questions.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&server)
            .await;

        let pool = load_pool(&source(&server)).await.unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.questions()[1].correct_letters(), "A, C");
    }

    #[tokio::test]
    async fn error_status_is_fetch_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/questions.json"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not here"))
            .mount(&server)
            .await;

        let err = source(&server).fetch().await.unwrap_err();
        assert!(matches!(err, ExamError::PoolFetchFailed { .. }));
        assert!(err.to_string().contains("HTTP 404"));
    }

    #[tokio::test]
    async fn undecodable_body_is_invalid_format() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/questions.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = source(&server).fetch().await.unwrap_err();
        assert!(matches!(err, ExamError::InvalidPoolFormat(_)));
    }

    #[tokio::test]
    async fn unreachable_host_is_fetch_failure() {
        let server = MockServer::start().await;
        let url = format!("{}/questions.json", server.uri());
        drop(server);

        let source = HttpSource::new(url, Duration::from_secs(2)).unwrap();
        let err = source.fetch().await.unwrap_err();
        assert!(err.is_load_error());
        assert!(matches!(err, ExamError::PoolFetchFailed { .. }));
    }
}
