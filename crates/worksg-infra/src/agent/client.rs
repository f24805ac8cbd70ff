//! OpenAiAgentRunner -- concrete [`AgentRunner`] implementation.
//!
//! Drives the OpenAI chat-completions API (`/v1/chat/completions`) with a
//! bounded tool loop: each iteration sends the conversation, and any tool
//! calls in the reply are executed locally and fed back as tool messages
//! until the model produces a final text answer or the turn ceiling is hit.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use worksg_core::chat::{AgentRunner, RunOptions};
use worksg_types::chat::ChatTurn;
use worksg_types::error::AgentError;

use super::tools;
use super::types::{CompletionsRequest, CompletionsResponse, WireMessage};

/// System instructions for the assistant, sent with every run.
const INSTRUCTIONS: &str = "You are a concise, helpful assistant for the Workflow SG site. \
     Use the available tools when the user asks about the current time or the weather.";

/// OpenAI-backed agent runner.
// Intentionally does NOT derive Debug to prevent accidental exposure of
// internal state alongside the credential.
pub struct OpenAiAgentRunner {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl OpenAiAgentRunner {
    /// Create a new runner.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key wrapped in SecretString
    /// * `model` - Model identifier (e.g., "gpt-5")
    pub fn new(api_key: SecretString, model: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300)) // 5 min safety net for long generations
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://api.openai.com".to_string(),
            model,
        }
    }

    /// The configured model for this runner.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Override the base URL (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Send one completions request and parse the response.
    async fn complete(
        &self,
        request: &CompletionsRequest,
    ) -> Result<CompletionsResponse, AgentError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|e| AgentError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after_ms = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(|secs| secs * 1_000);
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 => AgentError::AuthenticationFailed,
                429 => AgentError::RateLimited { retry_after_ms },
                _ => AgentError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        response
            .json()
            .await
            .map_err(|e| AgentError::Deserialization(format!("failed to parse response: {e}")))
    }
}

impl AgentRunner for OpenAiAgentRunner {
    async fn run(&self, turns: &[ChatTurn], options: RunOptions) -> Result<String, AgentError> {
        let mut messages: Vec<WireMessage> = Vec::with_capacity(turns.len() + 2);
        messages.push(WireMessage::text("system", INSTRUCTIONS));
        messages.extend(
            turns
                .iter()
                .map(|t| WireMessage::text(t.role.to_string(), t.content.clone())),
        );

        let limit = options.max_turns.max(1);
        for turn in 0..limit {
            let request = CompletionsRequest {
                model: self.model.clone(),
                messages: messages.clone(),
                tools: tools::tool_definitions(),
                user: options.conversation_id.clone(),
            };

            let response = self.complete(&request).await?;
            let choice = response.choices.into_iter().next().ok_or_else(|| {
                AgentError::Deserialization("response contained no choices".to_string())
            })?;

            match choice.message.tool_calls {
                Some(calls) if !calls.is_empty() => {
                    debug!(turn, tools = calls.len(), "executing tool calls");
                    messages.push(WireMessage {
                        role: "assistant".to_string(),
                        content: choice.message.content,
                        tool_calls: Some(calls.clone()),
                        tool_call_id: None,
                    });
                    for call in calls {
                        let output = tools::execute(
                            &self.client,
                            &call.function.name,
                            &call.function.arguments,
                        )
                        .await?;
                        messages.push(WireMessage::tool_result(call.id, output));
                    }
                }
                _ => return Ok(choice.message.content.unwrap_or_default()),
            }
        }

        Err(AgentError::MaxTurnsExceeded { limit })
    }
}
