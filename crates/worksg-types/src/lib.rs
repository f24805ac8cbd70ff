//! Shared domain types for the Workflow SG site server.
//!
//! This crate contains the types used across the server: chat turns and
//! wire payloads, the fixed marketing content records, and the error enums.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod chat;
pub mod content;
pub mod error;
