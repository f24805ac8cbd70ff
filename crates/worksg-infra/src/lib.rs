//! Infrastructure layer for the Workflow SG site server.
//!
//! Contains the concrete collaborators behind the traits and values defined
//! in `worksg-core`: environment-driven configuration and the OpenAI-backed
//! agent runner with its assistant tools.

pub mod agent;
pub mod config;
