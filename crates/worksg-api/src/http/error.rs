//! Application error type mapping to HTTP status codes and `{"error"}` bodies.
//!
//! Every user-visible message here is fixed text. Upstream detail (provider
//! payloads, stack traces, credentials) is logged where the failure is
//! caught and never reaches the response body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use worksg_types::error::ChatError;

/// Application-level error that maps to an HTTP response.
#[derive(Debug, PartialEq, Eq)]
pub enum AppError {
    /// No upstream credential configured.
    Unconfigured,
    /// Body was not valid JSON for the chat request shape.
    InvalidBody,
    /// Missing/blank chat message.
    MessageRequired,
    /// Request origin failed the allow-list.
    OriginDenied,
    /// Upstream signalled rate limiting.
    RateLimited,
    /// Upstream succeeded but produced no usable text.
    EmptyUpstreamReply,
    /// Any other upstream failure.
    Upstream,
}

impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::EmptyMessage => AppError::MessageRequired,
            ChatError::EmptyReply => AppError::EmptyUpstreamReply,
            ChatError::Agent(agent) if agent.is_rate_limited() => AppError::RateLimited,
            ChatError::Agent(_) => AppError::Upstream,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unconfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Chat service is not configured.",
            ),
            AppError::InvalidBody => (StatusCode::BAD_REQUEST, "Invalid request body."),
            AppError::MessageRequired => (StatusCode::BAD_REQUEST, "Message is required."),
            AppError::OriginDenied => (StatusCode::FORBIDDEN, "Origin not allowed"),
            AppError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                "Our assistant is receiving a lot of questions. Please try again shortly.",
            ),
            AppError::EmptyUpstreamReply => (
                StatusCode::BAD_GATEWAY,
                "Unexpected response from assistant.",
            ),
            AppError::Upstream => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unable to reach the assistant right now.",
            ),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worksg_types::error::AgentError;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_origin_denied_is_exactly_403_with_fixed_body() {
        let response = AppError::OriginDenied.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(body_json(response).await, json!({"error": "Origin not allowed"}));
    }

    #[tokio::test]
    async fn test_unconfigured_is_503() {
        let response = AppError::Unconfigured.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Chat service is not configured."})
        );
    }

    #[tokio::test]
    async fn test_invalid_body_is_400_with_json_envelope() {
        let response = AppError::InvalidBody.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Invalid request body."})
        );
    }

    #[tokio::test]
    async fn test_message_required_is_400() {
        let response = AppError::MessageRequired.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Message is required."})
        );
    }

    #[tokio::test]
    async fn test_rate_limited_is_429_with_friendly_message() {
        let err: AppError = ChatError::Agent(AgentError::RateLimited {
            retry_after_ms: Some(500),
        })
        .into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Our assistant is receiving a lot of questions. Please try again shortly."})
        );
    }

    #[tokio::test]
    async fn test_empty_reply_is_502_and_other_failures_500() {
        let empty: AppError = ChatError::EmptyReply.into();
        assert_eq!(
            empty.into_response().status(),
            StatusCode::BAD_GATEWAY
        );

        let upstream: AppError = ChatError::Agent(AgentError::Provider {
            message: "secret detail".into(),
        })
        .into();
        let response = upstream.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // Fixed message only; upstream detail never leaks.
        assert_eq!(
            body_json(response).await,
            json!({"error": "Unable to reach the assistant right now."})
        );
    }
}
