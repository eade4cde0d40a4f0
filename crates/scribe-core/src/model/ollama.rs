//! Ollama-backed model client.
//!
//! Speaks the `/api/generate` endpoint of an Ollama daemon: one POST with
//! the model name, the prompt, and sampling options, reading the
//! `response` string field of the JSON reply. Streaming is disabled; the
//! pipeline consumes whole completions.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Value, json};
use thiserror::Error;

use super::Invoker;

/// Request timeout for one completion.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Errors from talking to the model host.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The HTTP request itself failed (connect, timeout, decode).
    #[error("model request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The host answered with a non-success status.
    #[error("model host returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The reply parsed as JSON but had no `response` string field.
    #[error("malformed model response: missing `response` field")]
    MalformedResponse,
}

/// Client for one Ollama model.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    host: String,
    model: String,
    temperature: f32,
}

impl OllamaClient {
    /// Build a client for `model` served at `host`.
    pub fn new(host: &str, model: &str, temperature: f32) -> Result<Self, ModelError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent("scribe/0.1")
            .build()?;

        Ok(Self {
            http,
            host: host.trim_end_matches('/').to_string(),
            model: model.to_string(),
            temperature,
        })
    }

    /// One blocking text completion.
    pub async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        let request = json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
            "options": {
                "temperature": self.temperature,
            },
        });

        let response = self
            .http
            .post(format!("{}/api/generate", self.host))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let reply: Value = response.json().await?;
        reply["response"]
            .as_str()
            .map(str::to_string)
            .ok_or(ModelError::MalformedResponse)
    }
}

#[async_trait]
impl Invoker for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn invoke(&self, prompt: &str) -> Result<String> {
        Ok(self.generate(prompt).await?)
    }
}
