//! Sanitization of client-supplied conversation history.
//!
//! The `history` field of a chat request is untrusted JSON: it may be
//! missing, the wrong type, or a mix of valid and garbage entries. The
//! sanitizer never errors; anything malformed degrades to an empty
//! history, and invalid elements are dropped while valid neighbours keep
//! their relative order.

use serde_json::Value;
use worksg_types::chat::{ChatRole, ChatTurn};

/// Sliding-window size: only the most recent turns are forwarded.
pub const HISTORY_WINDOW: usize = 6;

/// Hard cutoff for a single history turn's content.
pub const TURN_CONTENT_MAX: usize = 1500;

/// Reduce an untrusted history value to a well-formed, bounded window.
///
/// 1. Non-array input produces an empty history.
/// 2. Elements without a string `role` of `user`/`assistant` and a string
///    `content` are dropped.
/// 3. Only the last [`HISTORY_WINDOW`] survivors are kept, in order.
/// 4. Content is trimmed, hard-truncated to [`TURN_CONTENT_MAX`] chars
///    (not word-aware), and trimmed again. A turn whose content ends up
///    empty is still kept; only role/type validity gates inclusion.
pub fn sanitize_history(raw: Option<&Value>) -> Vec<ChatTurn> {
    let Some(Value::Array(entries)) = raw else {
        return Vec::new();
    };

    let valid: Vec<&serde_json::Map<String, Value>> = entries
        .iter()
        .filter_map(|entry| entry.as_object())
        .filter(|obj| {
            let role_ok = obj
                .get("role")
                .and_then(Value::as_str)
                .is_some_and(|r| r.parse::<ChatRole>().is_ok());
            role_ok && obj.get("content").is_some_and(Value::is_string)
        })
        .collect();

    let skip = valid.len().saturating_sub(HISTORY_WINDOW);
    valid
        .into_iter()
        .skip(skip)
        .map(|obj| {
            // Both lookups were verified by the filter above.
            let role = obj
                .get("role")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .parse::<ChatRole>()
                .unwrap_or(ChatRole::User);
            let content = obj.get("content").and_then(Value::as_str).unwrap_or_default();
            let content = truncate_chars(content.trim(), TURN_CONTENT_MAX)
                .trim()
                .to_string();
            ChatTurn { role, content }
        })
        .collect()
}

/// Truncate to at most `max` characters, respecting char boundaries.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
