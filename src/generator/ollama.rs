//! Generator for Ollama's native API.
//!
//! [`OllamaGenerator`] translates normalized [`GenRequest`]s into
//! Ollama's `/api/generate` endpoint, or `/api/chat` when a system
//! prompt is present.

use super::{GenRequest, GenResponse, Generator};
use crate::error::Result;
use crate::PlanError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

/// Generator for Ollama's native API.
///
/// Endpoints: `/api/generate` (prompt-only), `/api/chat` (with system
/// prompt). This is the default generator when a context is built
/// without an explicit one.
#[derive(Debug, Clone)]
pub struct OllamaGenerator;

impl OllamaGenerator {
    /// Build the Ollama `options` object from the config.
    fn build_options(request: &GenRequest) -> Value {
        json!({
            "temperature": request.config.temperature,
            "num_predict": request.config.max_tokens,
        })
    }

    /// Whether this request should use `/api/chat` (vs `/api/generate`).
    fn use_chat(request: &GenRequest) -> bool {
        request
            .system_prompt
            .as_ref()
            .is_some_and(|s| !s.is_empty())
    }

    /// Build the JSON body for `/api/generate`.
    fn build_generate_body(request: &GenRequest) -> Value {
        let mut body = json!({
            "model": request.model,
            "prompt": request.prompt,
            "stream": false,
            "options": Self::build_options(request),
        });
        if request.config.json_mode {
            body["format"] = json!("json");
        }
        body
    }

    /// Build the JSON body for `/api/chat`.
    fn build_chat_body(request: &GenRequest) -> Value {
        let mut messages = Vec::new();

        if let Some(ref sys) = request.system_prompt {
            if !sys.is_empty() {
                messages.push(json!({"role": "system", "content": sys}));
            }
        }
        messages.push(json!({"role": "user", "content": request.prompt}));

        let mut body = json!({
            "model": request.model,
            "messages": messages,
            "stream": false,
            "options": Self::build_options(request),
        });
        if request.config.json_mode {
            body["format"] = json!("json");
        }
        body
    }

    /// Send a request and parse the response envelope.
    async fn send_request(client: &Client, url: &str, body: &Value) -> Result<(Value, u16)> {
        let resp = client.post(url).json(body).send().await.map_err(|e| {
            PlanError::Other(format!("Failed to connect to generator at {}: {}", url, e))
        })?;

        let status = resp.status().as_u16();

        if !resp.status().is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(PlanError::Http { status, body: text });
        }

        let json_resp: Value = resp.json().await?;
        Ok((json_resp, status))
    }

    /// Extract metadata fields from an Ollama response.
    fn extract_metadata(json_resp: &Value) -> Option<Value> {
        let mut meta = serde_json::Map::new();
        for key in ["total_duration", "eval_count", "prompt_eval_count", "model"] {
            if let Some(v) = json_resp.get(key) {
                meta.insert(key.into(), v.clone());
            }
        }
        if meta.is_empty() {
            None
        } else {
            Some(Value::Object(meta))
        }
    }
}

#[async_trait]
impl Generator for OllamaGenerator {
    async fn generate(
        &self,
        client: &Client,
        base_url: &str,
        request: &GenRequest,
    ) -> Result<GenResponse> {
        let base = base_url.trim_end_matches('/');

        if Self::use_chat(request) {
            let body = Self::build_chat_body(request);
            let url = format!("{}/api/chat", base);
            let (json_resp, status) = Self::send_request(client, &url, &body).await?;

            let text = json_resp
                .get("message")
                .and_then(|m| m.get("content"))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();

            Ok(GenResponse {
                text,
                status,
                metadata: Self::extract_metadata(&json_resp),
            })
        } else {
            let body = Self::build_generate_body(request);
            let url = format!("{}/api/generate", base);
            let (json_resp, status) = Self::send_request(client, &url, &body).await?;

            let text = json_resp
                .get("response")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string();

            Ok(GenResponse {
                text,
                status,
                metadata: Self::extract_metadata(&json_resp),
            })
        }
    }

    fn name(&self) -> &'static str {
        "ollama"
    }
}
