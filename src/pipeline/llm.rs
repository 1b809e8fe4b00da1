//! The LLM boundary: the [`Generator`] seam and the HTTP client behind it.
//!
//! Every pipeline talks to the model through `Arc<dyn Generator>`, so
//! tests substitute a scripted generator and the orchestration logic never
//! knows the difference. [`AnthropicClient`] is the one real
//! implementation, speaking the Messages API over reqwest.
//!
//! ## Transport discipline
//!
//! * One outbound call per `generate` invocation, no retries — failures
//!   propagate immediately and the caller decides whether to re-run the
//!   whole pipeline step.
//! * 300-second default timeout: the user message can carry the full
//!   extracted text of a lecture PDF, and generation of a complete LaTeX
//!   document runs long.
//! * The client is built with `.no_proxy()` so `HTTP_PROXY`-style ambient
//!   environment cannot reroute or break calls between hosts.

use crate::config::LlmConfig;
use crate::error::CramdownError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// The unit of work sent to the LLM: one system prompt, one user message,
/// one generated text back.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, CramdownError>;
}

/// Anthropic Messages API client.
///
/// Constructed from an [`LlmConfig`]; construction validates credentials
/// and builds the isolated reqwest client once, so `generate` is
/// allocation-light per call.
pub struct AnthropicClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicClient {
    /// Build a client from the config.
    ///
    /// Fails with [`CramdownError::MissingCredentials`] on an empty API
    /// key (configs built through `LlmConfig::builder()` have already been
    /// checked, but configs assembled field-by-field have not).
    pub fn new(config: &LlmConfig) -> Result<Self, CramdownError> {
        if config.api_key.trim().is_empty() {
            return Err(CramdownError::MissingCredentials);
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .no_proxy()
            .build()
            .map_err(|e| CramdownError::InvalidConfig(format!("HTTP client: {e}")))?;

        Ok(Self {
            http,
            endpoint: config.effective_endpoint().to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }
}

#[async_trait]
impl Generator for AnthropicClient {
    async fn generate(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, CramdownError> {
        if user_message.trim().is_empty() {
            return Err(CramdownError::Generation {
                detail: "user message must not be empty".into(),
            });
        }

        let request = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: system_prompt,
            messages: vec![Message {
                role: "user",
                content: user_message,
            }],
        };

        let url = format!("{}/v1/messages", self.endpoint);
        debug!(
            model = %self.model,
            user_chars = user_message.len(),
            "sending generation request"
        );

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&request)
            .send()
            .await
            .map_err(|e| CramdownError::Generation {
                detail: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            // The API puts the useful part (auth vs. rate limit vs. bad
            // request) in the body; keep it.
            let body = response.text().await.unwrap_or_default();
            return Err(CramdownError::Generation {
                detail: format!("HTTP {status}: {body}"),
            });
        }

        let parsed: MessagesResponse =
            response
                .json()
                .await
                .map_err(|e| CramdownError::Generation {
                    detail: format!("malformed response: {e}"),
                })?;

        let text = parsed
            .content
            .into_iter()
            .find_map(|block| block.text)
            .ok_or_else(|| CramdownError::Generation {
                detail: "response contained no text content block".into(),
            })?;

        debug!(output_chars = text.len(), "generation complete");
        Ok(text)
    }
}

// ── Wire types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

/// One content block of the response. Non-text blocks deserialize with
/// `text: None` and are skipped.
#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}
