//! HTTP layer: router, middleware, handlers, and error mapping.

pub mod error;
pub mod handlers;
pub mod origin;
pub mod router;
