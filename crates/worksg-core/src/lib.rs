//! Request-processing logic for the Workflow SG site server.
//!
//! Three concerns live here, all free of I/O except through traits:
//! - [`origin`]: the immutable cross-origin allow-list policy.
//! - [`history`]: sanitization of client-supplied conversation history.
//! - [`chat`]: the per-request chat pipeline and the [`chat::AgentRunner`]
//!   trait the delegated agent implements (concrete runner lives in
//!   worksg-infra).

pub mod chat;
pub mod history;
pub mod origin;
