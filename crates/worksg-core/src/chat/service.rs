//! Chat service orchestrating the per-request pipeline.
//!
//! One inbound chat request maps to exactly one delegated run:
//! validate the message, sanitize the supplied history into the bounded
//! window, append the new user turn, delegate, and translate the outcome.
//! Every path is terminal; nothing is retried and nothing is persisted.

use serde_json::Value;
use tracing::{debug, error};

use worksg_types::chat::ChatTurn;
use worksg_types::error::ChatError;

use crate::chat::runner::{AgentRunner, RunOptions};
use crate::history::{HISTORY_WINDOW, sanitize_history, truncate_chars};

/// Hard cutoff for the inbound message.
pub const MESSAGE_MAX: usize = 1800;

/// Ceiling on internal agent turns forwarded with every run.
pub const MAX_AGENT_TURNS: u32 = 8;

/// Orchestrates validation, history windowing, and delegation.
///
/// Generic over [`AgentRunner`] so the core never depends on the concrete
/// upstream client (which lives in worksg-infra).
pub struct ChatService<R: AgentRunner> {
    runner: R,
}

impl<R: AgentRunner> ChatService<R> {
    /// Create a chat service around the given runner.
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Process one chat request end to end.
    ///
    /// `message` and `history` arrive as raw JSON values from the wire;
    /// a missing/non-string/blank message is the only validation failure,
    /// while malformed history degrades to an empty window.
    pub async fn respond(
        &self,
        message: Option<&Value>,
        history: Option<&Value>,
        conversation_id: Option<String>,
    ) -> Result<String, ChatError> {
        let message = message
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .ok_or(ChatError::EmptyMessage)?;

        let mut turns = sanitize_history(history);
        turns.push(ChatTurn::user(truncate_chars(message, MESSAGE_MAX)));
        debug_assert!(turns.len() <= HISTORY_WINDOW + 1);

        debug!(turns = turns.len(), "delegating chat request");

        let options = RunOptions {
            max_turns: MAX_AGENT_TURNS,
            conversation_id,
        };

        let output = self.runner.run(&turns, options).await.map_err(|err| {
            // Full upstream detail stays in the server log; callers get a
            // fixed message from the HTTP layer.
            error!(error = %err, "agent run failed");
            err
        })?;

        let reply = output.trim();
        if reply.is_empty() {
            return Err(ChatError::EmptyReply);
        }

        Ok(reply.to_string())
    }
}
