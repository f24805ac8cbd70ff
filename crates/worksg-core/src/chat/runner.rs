//! AgentRunner trait definition.
//!
//! The delegation collaborator: an external agent-execution service that
//! takes an ordered sequence of role-tagged turns plus run options and
//! produces a final textual output, or fails with a status-bearing error.
//! The chat service treats it as an opaque single-shot call -- no retries,
//! no streaming.
//!
//! Uses native async fn in traits (RPITIT, Rust 2024 edition). The
//! concrete implementation lives in worksg-infra (`OpenAiAgentRunner`).

use worksg_types::chat::ChatTurn;
use worksg_types::error::AgentError;

/// Options forwarded with each delegated run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Ceiling on internal agent turns (tool round-trips) per run.
    pub max_turns: u32,
    /// Opaque client-supplied conversation identifier, passed through for
    /// upstream attribution. Never interpreted locally.
    pub conversation_id: Option<String>,
}

/// Trait for agent-execution backends.
pub trait AgentRunner: Send + Sync {
    /// Execute one agent run over the prepared conversation and return the
    /// final output text.
    fn run(
        &self,
        turns: &[ChatTurn],
        options: RunOptions,
    ) -> impl std::future::Future<Output = Result<String, AgentError>> + Send;
}
