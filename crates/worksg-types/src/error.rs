//! Error types for chat delegation and the chat pipeline.
//!
//! `AgentError` covers failures of the delegated agent run (upstream HTTP
//! status mapping, tool execution, turn-ceiling exhaustion). `ChatError`
//! is the chat pipeline's terminal failure set; the HTTP layer maps each
//! variant to a fixed status code and user-facing message, never exposing
//! the upstream detail.

/// Errors from a delegated agent run.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Upstream signalled HTTP 429. Surfaced to clients as a fixed
    /// high-load message with status 429.
    #[error("rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("tool '{name}' failed: {message}")]
    Tool { name: String, message: String },

    /// The run did not produce a final answer within the turn ceiling.
    #[error("agent exceeded the maximum of {limit} turns")]
    MaxTurnsExceeded { limit: u32 },
}

impl AgentError {
    /// Whether this failure carries the upstream rate-limit indicator.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, AgentError::RateLimited { .. })
    }
}

/// Terminal outcomes of the chat request pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// The message was missing, not a string, or empty after trimming.
    #[error("message is required")]
    EmptyMessage,

    /// The delegated run succeeded but produced no usable text.
    #[error("assistant returned no usable output")]
    EmptyReply,

    /// The delegated run failed.
    #[error(transparent)]
    Agent(#[from] AgentError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limited_detection() {
        assert!(
            AgentError::RateLimited {
                retry_after_ms: None
            }
            .is_rate_limited()
        );
        assert!(
            !AgentError::Provider {
                message: "boom".into()
            }
            .is_rate_limited()
        );
    }

    #[test]
    fn test_chat_error_wraps_agent_error() {
        let err: ChatError = AgentError::AuthenticationFailed.into();
        assert!(matches!(err, ChatError::Agent(_)));
    }
}
