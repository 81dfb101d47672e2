//! Generator trait and normalized request/response types.
//!
//! The [`Generator`] trait is the boundary to the text-generation
//! service: structured prompt in, structured JSON text out, or failure.
//! The pipeline treats it as opaque. Built-in implementations:
//! [`OllamaGenerator`] for a live endpoint, [`MockGenerator`] and
//! [`FailingGenerator`] for tests.

pub mod mock;
pub mod ollama;

pub use mock::{FailingGenerator, MockGenerator};
pub use ollama::OllamaGenerator;

use crate::error::Result;
use async_trait::async_trait;
use reqwest::Client;

/// Generation parameters shared by every stage call.
#[derive(Debug, Clone)]
pub struct GenConfig {
    /// Temperature (0.0 = deterministic, 1.0 = creative).
    pub temperature: f64,

    /// Maximum tokens to generate.
    pub max_tokens: u32,

    /// Request JSON format output from the model.
    pub json_mode: bool,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 2048,
            json_mode: false,
        }
    }
}

impl GenConfig {
    pub fn with_temperature(mut self, temp: f64) -> Self {
        self.temperature = temp;
        self
    }

    pub fn with_max_tokens(mut self, tokens: u32) -> Self {
        self.max_tokens = tokens;
        self
    }

    pub fn with_json_mode(mut self, enabled: bool) -> Self {
        self.json_mode = enabled;
        self
    }
}

/// A normalized generation request — provider-agnostic.
///
/// Each stage builds one of these from its rendered prompt; the
/// [`Generator`] translates it into the provider-specific HTTP request.
#[derive(Debug, Clone)]
pub struct GenRequest {
    /// Model identifier (e.g. `"llama3.2:3b"`).
    pub model: String,

    /// If `Some`, this is a chat-style call with a system prompt.
    /// If `None`, this is a generate-style call (prompt only).
    pub system_prompt: Option<String>,

    /// The user prompt text.
    pub prompt: String,

    /// Generation parameters.
    pub config: GenConfig,
}

/// A normalized generation response.
#[derive(Debug)]
pub struct GenResponse {
    /// The generated text content.
    pub text: String,

    /// HTTP status code (for diagnostics).
    pub status: u16,

    /// Provider-specific metadata (token counts, timing, model info).
    /// Stored as raw JSON — each provider returns different fields.
    pub metadata: Option<serde_json::Value>,
}

/// Abstraction over text-generation providers.
///
/// Implementors translate between the normalized [`GenRequest`]/
/// [`GenResponse`] pair and the provider's HTTP API. One call per
/// stage invocation; no retry, no streaming.
///
/// # Object Safety
///
/// Object-safe by design — the execution context holds an
/// `Arc<dyn Generator>` so it can be shared across concurrent runs.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Execute a single generation call.
    async fn generate(
        &self,
        client: &Client,
        base_url: &str,
        request: &GenRequest,
    ) -> Result<GenResponse>;

    /// Human-readable name for diagnostics.
    fn name(&self) -> &'static str;
}
