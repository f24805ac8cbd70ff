//! POST /api/chat -- proxy a message to the assistant.
//!
//! Decodes the body, answers 503 when no credential is configured, and
//! otherwise hands the raw message/history values to the chat service,
//! which owns validation, history windowing, and delegation.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use worksg_types::chat::{ChatReply, ChatRequestBody};

use crate::http::error::AppError;
use crate::state::AppState;

/// POST /api/chat
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatRequestBody>, JsonRejection>,
) -> Result<Json<ChatReply>, AppError> {
    let Some(service) = state.chat.as_ref() else {
        return Err(AppError::Unconfigured);
    };

    // An undecodable body gets the same json envelope as every other error.
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!(%rejection, "rejected chat request body");
        AppError::InvalidBody
    })?;

    let reply = service
        .respond(
            body.message.as_ref(),
            body.history.as_ref(),
            body.conversation_id,
        )
        .await?;

    Ok(Json(ChatReply { reply }))
}
