//! Execution context shared across stage invocations.
//!
//! [`PlanCtx`] carries the HTTP client, generator handle, endpoint,
//! model id, generation config, and optional event handler. It is
//! constructed once and shared by every stage of a run; concurrent runs
//! can share one context because everything in it is read-only after
//! construction.
//!
//! The generator handle is optional: a context without one is *offline*,
//! and every stage substitutes its documented fallback without
//! attempting a call. This keeps "no backend configured" distinguishable
//! from "call failed".

use crate::events::EventHandler;
use crate::generator::{GenConfig, Generator, OllamaGenerator};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Default Ollama endpoint.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default model when none is configured.
pub const DEFAULT_MODEL: &str = "llama3.2:3b";

/// Shared execution context for a planning run.
///
/// # Example
///
/// ```
/// use learnpath::PlanCtx;
///
/// let ctx = PlanCtx::builder("http://localhost:11434")
///     .model("llama3.2:3b")
///     .build();
/// assert!(ctx.is_available());
/// ```
pub struct PlanCtx {
    /// HTTP client (cheap to clone -- uses `Arc` internally).
    pub client: Client,
    /// Base URL for the generation provider.
    pub base_url: String,
    /// Generator handle; `None` means offline (fallbacks only).
    pub generator: Option<Arc<dyn Generator>>,
    /// Model identifier passed to the generator.
    pub model: String,
    /// Generation parameters shared by every stage call.
    pub config: GenConfig,
    /// Optional event handler for stage lifecycle events.
    pub event_handler: Option<Arc<dyn EventHandler>>,
}

impl PlanCtx {
    /// Create a new builder. The default generator is [`OllamaGenerator`].
    pub fn builder(base_url: impl Into<String>) -> PlanCtxBuilder {
        PlanCtxBuilder {
            client: None,
            base_url: base_url.into(),
            generator: Some(Arc::new(OllamaGenerator)),
            model: DEFAULT_MODEL.to_string(),
            config: GenConfig::default(),
            event_handler: None,
            timeout: None,
        }
    }

    /// A context with no generator: every stage returns its fallback.
    pub fn offline() -> PlanCtx {
        Self::builder(DEFAULT_BASE_URL).offline().build()
    }

    /// Build a context from the environment.
    ///
    /// Reads `OLLAMA_HOST` for the endpoint and `LEARNPATH_MODEL` for the
    /// model id. With no `OLLAMA_HOST` set, the context is offline.
    pub fn from_env() -> PlanCtx {
        let mut builder = match std::env::var("OLLAMA_HOST") {
            Ok(host) if !host.is_empty() => Self::builder(host),
            _ => Self::builder(DEFAULT_BASE_URL).offline(),
        };
        if let Ok(model) = std::env::var("LEARNPATH_MODEL") {
            if !model.is_empty() {
                builder = builder.model(model);
            }
        }
        builder.build()
    }

    /// Whether a generator is configured.
    pub fn is_available(&self) -> bool {
        self.generator.is_some()
    }
}

impl std::fmt::Debug for PlanCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanCtx")
            .field("base_url", &self.base_url)
            .field("generator", &self.generator.as_ref().map(|g| g.name()))
            .field("model", &self.model)
            .field("has_event_handler", &self.event_handler.is_some())
            .finish()
    }
}

/// Builder for [`PlanCtx`].
pub struct PlanCtxBuilder {
    client: Option<Client>,
    base_url: String,
    generator: Option<Arc<dyn Generator>>,
    model: String,
    config: GenConfig,
    event_handler: Option<Arc<dyn EventHandler>>,
    timeout: Option<Duration>,
}

impl PlanCtxBuilder {
    /// Set the HTTP client. If not set, a default client is created.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the generator. Default: [`OllamaGenerator`].
    pub fn generator(mut self, generator: Arc<dyn Generator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Remove the generator: stages fall back without attempting a call.
    pub fn offline(mut self) -> Self {
        self.generator = None;
        self
    }

    /// Set the model identifier.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the generation parameters.
    pub fn config(mut self, config: GenConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the event handler.
    pub fn event_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.event_handler = Some(handler);
        self
    }

    /// Set the request timeout. Default: 60 seconds.
    ///
    /// Applies to the default client only; a custom client provided via
    /// `.client()` keeps its own timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the execution context.
    pub fn build(self) -> PlanCtx {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(60));
        let client = self.client.unwrap_or_else(|| {
            Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client")
        });
        PlanCtx {
            client,
            base_url: normalize_base_url(&self.base_url),
            generator: self.generator,
            model: self.model,
            config: self.config,
            event_handler: self.event_handler,
        }
    }
}

/// Strip known provider path suffixes from a base URL.
/// Prevents double-pathing when the generator appends its own paths.
/// e.g., "http://localhost:11434/api" -> "http://localhost:11434"
fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    for suffix in &["/api/generate", "/api/chat", "/api"] {
        if let Some(stripped) = trimmed.strip_suffix(suffix) {
            return stripped.to_string();
        }
    }
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::MockGenerator;

    #[test]
    fn test_normalize_base_url_strips_api() {
        assert_eq!(normalize_base_url("http://localhost:11434/api"), "http://localhost:11434");
        assert_eq!(normalize_base_url("http://localhost:11434/api/"), "http://localhost:11434");
    }

    #[test]
    fn test_normalize_base_url_strips_full_path() {
        assert_eq!(
            normalize_base_url("http://localhost:11434/api/generate"),
            "http://localhost:11434"
        );
    }

    #[test]
    fn test_normalize_base_url_preserves_clean() {
        assert_eq!(normalize_base_url("http://localhost:11434"), "http://localhost:11434");
    }

    #[test]
    fn test_normalize_base_url_trailing_slash() {
        assert_eq!(normalize_base_url("http://localhost:11434/"), "http://localhost:11434");
    }

    #[test]
    fn test_default_generator_is_ollama() {
        let ctx = PlanCtx::builder(DEFAULT_BASE_URL).build();
        assert!(ctx.is_available());
        assert_eq!(ctx.generator.as_ref().unwrap().name(), "ollama");
        assert_eq!(ctx.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_offline_ctx_has_no_generator() {
        let ctx = PlanCtx::offline();
        assert!(!ctx.is_available());
    }

    #[test]
    fn test_builder_with_mock_generator() {
        let ctx = PlanCtx::builder("http://unused")
            .generator(Arc::new(MockGenerator::fixed("{}")))
            .model("test-model")
            .build();
        assert_eq!(ctx.generator.as_ref().unwrap().name(), "mock");
        assert_eq!(ctx.model, "test-model");
    }

    #[test]
    fn test_builder_timeout_accepted() {
        let _ctx = PlanCtx::builder(DEFAULT_BASE_URL)
            .timeout(Duration::from_secs(120))
            .build();
        // Smoke test: builds without panic
    }
}
