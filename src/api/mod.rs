//! HTTP API: routes, error mapping, and server lifecycle.
//!
//! The router is composable — `api_router()` returns a `Router` that can be
//! mounted on any axum server instance. Both prediction routes accept one
//! multipart `image` field and reply with structured JSON.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_api_server, ApiServer, ApiSession};
pub use types::ApiContext;
