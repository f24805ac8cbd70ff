//! OpenAI-backed agent runner.
//!
//! This module implements the
//! [`AgentRunner`](worksg_core::chat::AgentRunner) trait against the OpenAI
//! chat-completions API, including the bounded tool loop and the two
//! assistant tools (current time, weather lookup).

pub mod client;
pub mod tools;
pub mod types;

pub use client::OpenAiAgentRunner;
