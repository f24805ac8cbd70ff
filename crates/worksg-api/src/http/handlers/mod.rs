//! HTTP route handlers.

pub mod chat;
pub mod content;
