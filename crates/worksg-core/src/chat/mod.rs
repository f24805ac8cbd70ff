//! Chat request pipeline: validation, history windowing, delegation.

pub mod runner;
pub mod service;

pub use runner::{AgentRunner, RunOptions};
pub use service::ChatService;
