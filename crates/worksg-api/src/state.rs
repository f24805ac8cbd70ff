//! Application state wiring the core services to their infra backends.
//!
//! `AppState` pins the generic [`ChatService`] to the concrete
//! [`OpenAiAgentRunner`]. The chat service is `None` when no credential is
//! configured; the handler turns that into a 503. The origin policy is
//! built once here and shared read-only with the middleware.

use std::sync::Arc;

use worksg_core::chat::ChatService;
use worksg_core::origin::OriginPolicy;
use worksg_infra::agent::OpenAiAgentRunner;
use worksg_infra::config::ServerConfig;

/// Concrete type alias pinning the core service generic to the infra runner.
pub type ConcreteChatService = ChatService<OpenAiAgentRunner>;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Chat pipeline; absent when `OPENAI_API_KEY` is not configured.
    pub chat: Option<Arc<ConcreteChatService>>,
    /// Immutable cross-origin allow-list.
    pub policy: Arc<OriginPolicy>,
}

impl AppState {
    /// Build the state from resolved configuration.
    pub fn from_config(config: &ServerConfig) -> Self {
        let chat = config.openai_api_key.clone().map(|key| {
            let runner = OpenAiAgentRunner::new(key, config.model.clone());
            Arc::new(ChatService::new(runner))
        });

        Self {
            chat,
            policy: Arc::new(OriginPolicy::new(&config.allowed_origins)),
        }
    }
}
