// artifact-replay: Artifact-to-Git Replay Tool
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! OpenAI-compatible chat-completions client.
//!
//! ```text
//! OpenAiClient::new(&ApiConfig, Credential, RetryPolicy)
//!        |
//!        v
//!   complete() --RetryPolicy::run--> send_once()
//!                                      POST {base_url}/chat/completions
//!                                      Authorization: Bearer <credential>
//!                                      timeout: api.timeout()
//!
//! Global client: OnceLock, connection pool, keep-alive
//! ```
//!
//! Non-success statuses keep `Retry-After` so the retry loop can honour it.

use std::sync::OnceLock;
use std::time::Duration;

use reqwest::Client;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{ChatMessage, ChatModel, ChatReply, ChatRequest, RetryPolicy, ToolCall, ToolDefinition};
use crate::config::types::{ApiConfig, Credential};
use crate::error::AnalysisError;

/// Longest error body kept in an `AnalysisError::Http` message.
const MAX_ERROR_BODY: usize = 512;

/// Global HTTP client - initialized once, reused across all requests.
/// Falls back to a basic client if custom configuration fails.
fn global_client() -> &'static Client {
    static CLIENT: OnceLock<Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        Client::builder()
            .user_agent(format!("artifact-replay/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new())
    })
}

/// Chat-completions client for OpenAI and compatible servers.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    url: String,
    credential: Credential,
    timeout: Duration,
    temperature: f64,
    top_p: f64,
    retry: RetryPolicy,
}

impl OpenAiClient {
    #[must_use]
    pub fn new(api: &ApiConfig, credential: Credential, retry: RetryPolicy) -> Self {
        Self {
            url: api.completions_url(),
            credential,
            timeout: api.timeout(),
            temperature: api.temperature,
            top_p: api.top_p,
            retry,
        }
    }

    /// Endpoint requests are posted to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn send_once(&self, body: &WireRequest<'_>) -> Result<ChatReply, AnalysisError> {
        let response = global_client()
            .post(&self.url)
            .bearer_auth(self.credential.expose())
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let retry_after = parse_retry_after(response.headers());
        let text = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;

        if !status.is_success() {
            return Err(AnalysisError::Http {
                status: status.as_u16(),
                message: error_message(&text),
                retry_after,
            });
        }

        trace!(bytes = text.len(), "received completion");
        let parsed: WireResponse =
            serde_json::from_str(&text).map_err(|e| AnalysisError::Decode(e.to_string()))?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AnalysisError::Decode("response has no choices".to_string()))?;

        Ok(ChatReply {
            content: choice.message.content,
            tool_calls: choice.message.tool_calls.unwrap_or_default(),
            finish_reason: choice.finish_reason,
        })
    }

    fn transport_error(&self, err: &reqwest::Error) -> AnalysisError {
        if err.is_timeout() {
            AnalysisError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else if err.is_decode() {
            AnalysisError::Decode(err.to_string())
        } else {
            AnalysisError::Network(err.to_string())
        }
    }
}

impl ChatModel for OpenAiClient {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatReply, AnalysisError> {
        let body = WireRequest {
            model: &request.model,
            messages: &request.messages,
            tool_choice: (!request.tools.is_empty()).then_some("auto"),
            tools: &request.tools,
            temperature: self.temperature,
            top_p: self.top_p,
        };
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "sending chat completion"
        );
        self.retry.run(|| self.send_once(&body)).await
    }
}

/// `Retry-After` in delta-seconds. HTTP-date values are ignored.
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// Pull `error.message` out of an OpenAI error body, else keep a prefix of the body.
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct Envelope {
        error: Detail,
    }
    #[derive(Deserialize)]
    struct Detail {
        message: String,
    }

    if let Ok(envelope) = serde_json::from_str::<Envelope>(body) {
        return envelope.error.message;
    }
    let trimmed = body.trim();
    match trimmed.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "<[ToolDefinition]>::is_empty")]
    tools: &'a [ToolDefinition],
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<&'static str>,
    temperature: f64,
    top_p: f64,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ToolCall>>,
}
