//! OpenAI-Compatible HTTP Backend
//!
//! Streams chat completions from any provider exposing the de-facto standard
//! `POST <base>/chat/completions` endpoint with server-sent events. All
//! cataloged providers (OpenRouter, OpenAI, Groq, Mistral, DeepSeek, local
//! Ollama) speak this protocol.
//!
//! # Wire format
//!
//! The response body is a stream of SSE lines. Payload lines look like
//! `data: {"choices":[{"delta":{"content":"..."}}]}`; the stream terminates
//! with `data: [DONE]`. Comment lines (`: keep-alive`) and blank lines carry
//! nothing and are skipped.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use tokio::sync::mpsc;

use super::{ChatBackend, ChatRequest, StreamToken};
use crate::catalog::ProviderSpec;

/// Streaming chat client for one provider.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    name: String,
    base_url: String,
    api_key: Option<String>,
    http_client: reqwest::Client,
}

impl HttpBackend {
    /// Create a backend for an arbitrary endpoint.
    pub fn new(name: impl Into<String>, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            api_key,
            http_client: reqwest::Client::builder()
                .timeout(Duration::from_secs(120))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Create a backend for a cataloged provider, reading its API key from
    /// the provider's environment variable.
    pub fn for_provider(provider: &ProviderSpec) -> Self {
        Self::new(provider.id, provider.base_url, provider.api_key())
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_payload(request: &ChatRequest) -> serde_json::Value {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if !request.system.is_empty() {
            messages.push(serde_json::json!({
                "role": "system",
                "content": request.system,
            }));
        }
        for message in &request.messages {
            messages.push(serde_json::json!({
                "role": message.role.as_str(),
                "content": message.content,
            }));
        }
        serde_json::json!({
            "model": request.model,
            "messages": messages,
            "stream": true,
        })
    }
}

/// The payload of an SSE data line, if this line carries one.
fn sse_data(line: &str) -> Option<&str> {
    line.strip_prefix("data:").map(str::trim)
}

/// The text fragment inside one streamed completion chunk.
fn delta_text(value: &serde_json::Value) -> Option<&str> {
    value
        .get("choices")?
        .get(0)?
        .get("delta")?
        .get("content")?
        .as_str()
}

/// The error message inside an in-stream error payload, if any.
fn error_text(value: &serde_json::Value) -> Option<String> {
    let error = value.get("error")?;
    Some(
        error
            .get("message")
            .and_then(|message| message.as_str())
            .map(String::from)
            .unwrap_or_else(|| error.to_string()),
    )
}

#[async_trait]
impl ChatBackend for HttpBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send_streaming(&self, request: &ChatRequest) -> anyhow::Result<mpsc::Receiver<StreamToken>> {
        let (tx, rx) = mpsc::channel(100);

        let mut http_request = self
            .http_client
            .post(self.completions_url())
            .json(&Self::build_payload(request));
        if let Some(ref key) = self.api_key {
            http_request = http_request.bearer_auth(key);
        }

        let response = http_request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("{} returned {status}: {body}", self.name);
        }

        let mut stream = response.bytes_stream();

        tokio::spawn(async move {
            let mut buffer = String::new();
            let mut full_response = String::new();

            while let Some(chunk) = stream.next().await {
                let bytes = match chunk {
                    Ok(bytes) => bytes,
                    Err(error) => {
                        let _ = tx.send(StreamToken::Error(error.to_string())).await;
                        return;
                    }
                };
                buffer.push_str(&String::from_utf8_lossy(&bytes));

                while let Some(pos) = buffer.find('\n') {
                    let line = buffer[..pos].trim().to_string();
                    buffer.drain(..=pos);

                    let Some(data) = sse_data(&line) else { continue };
                    if data == "[DONE]" {
                        let _ = tx.send(StreamToken::Complete { message: full_response }).await;
                        return;
                    }
                    let Ok(value) = serde_json::from_str::<serde_json::Value>(data) else {
                        tracing::debug!(%line, "skipping unparseable stream line");
                        continue;
                    };
                    if let Some(message) = error_text(&value) {
                        let _ = tx.send(StreamToken::Error(message)).await;
                        return;
                    }
                    if let Some(delta) = delta_text(&value) {
                        if delta.is_empty() {
                            continue;
                        }
                        full_response.push_str(delta);
                        if tx.send(StreamToken::Delta(delta.to_string())).await.is_err() {
                            // Receiver dropped, stop streaming
                            return;
                        }
                    }
                }
            }

            // Stream ended without a [DONE] terminator
            let _ = tx.send(StreamToken::Complete { message: full_response }).await;
        });

        Ok(rx)
    }
}
