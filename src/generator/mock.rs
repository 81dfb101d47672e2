//! Mock generators for testing without a live endpoint.
//!
//! [`MockGenerator`] returns pre-configured responses in order, so
//! stage and pipeline tests are deterministic. [`FailingGenerator`]
//! always errors, exercising the call-failure fallback path.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::Client;

use super::{GenRequest, GenResponse, Generator};
use crate::error::Result;
use crate::PlanError;

/// A test generator that returns canned responses in order.
///
/// Cycles back to the beginning when all responses have been consumed.
#[derive(Debug)]
pub struct MockGenerator {
    responses: Vec<String>,
    index: AtomicUsize,
}

impl MockGenerator {
    /// Create a mock with the given canned responses.
    ///
    /// Responses are returned in order. When exhausted, cycles from the
    /// beginning.
    pub fn new(responses: Vec<String>) -> Self {
        assert!(
            !responses.is_empty(),
            "MockGenerator requires at least one response"
        );
        Self {
            responses,
            index: AtomicUsize::new(0),
        }
    }

    /// Create a mock that always returns the same response.
    pub fn fixed(response: impl Into<String>) -> Self {
        Self::new(vec![response.into()])
    }

    fn next_response(&self) -> String {
        let idx = self.index.fetch_add(1, Ordering::Relaxed) % self.responses.len();
        self.responses[idx].clone()
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(
        &self,
        _client: &Client,
        _base_url: &str,
        _request: &GenRequest,
    ) -> Result<GenResponse> {
        Ok(GenResponse {
            text: self.next_response(),
            status: 200,
            metadata: None,
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// A test generator whose every call fails with the given status.
#[derive(Debug)]
pub struct FailingGenerator {
    status: u16,
}

impl FailingGenerator {
    pub fn new(status: u16) -> Self {
        Self { status }
    }
}

impl Default for FailingGenerator {
    fn default() -> Self {
        Self::new(500)
    }
}

#[async_trait]
impl Generator for FailingGenerator {
    async fn generate(
        &self,
        _client: &Client,
        _base_url: &str,
        _request: &GenRequest,
    ) -> Result<GenResponse> {
        Err(PlanError::Http {
            status: self.status,
            body: "simulated generator failure".into(),
        })
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GenConfig;

    fn test_request() -> GenRequest {
        GenRequest {
            model: "test".into(),
            system_prompt: None,
            prompt: "test".into(),
            config: GenConfig::default(),
        }
    }

    #[tokio::test]
    async fn test_mock_fixed_response() {
        let mock = MockGenerator::fixed(r#"{"ok": true}"#);
        let client = Client::new();
        let resp = mock
            .generate(&client, "http://unused", &test_request())
            .await
            .unwrap();
        assert_eq!(resp.text, r#"{"ok": true}"#);
        assert_eq!(resp.status, 200);
    }

    #[tokio::test]
    async fn test_mock_cycles_responses() {
        let mock = MockGenerator::new(vec!["first".into(), "second".into()]);
        let client = Client::new();
        let request = test_request();
        let r1 = mock.generate(&client, "http://unused", &request).await.unwrap();
        let r2 = mock.generate(&client, "http://unused", &request).await.unwrap();
        let r3 = mock.generate(&client, "http://unused", &request).await.unwrap();
        assert_eq!(r1.text, "first");
        assert_eq!(r2.text, "second");
        assert_eq!(r3.text, "first"); // cycles
    }

    #[tokio::test]
    async fn test_failing_generator() {
        let failing = FailingGenerator::new(503);
        let client = Client::new();
        let err = failing
            .generate(&client, "http://unused", &test_request())
            .await
            .unwrap_err();
        match err {
            PlanError::Http { status, .. } => assert_eq!(status, 503),
            other => panic!("expected Http error, got {other:?}"),
        }
    }
}
