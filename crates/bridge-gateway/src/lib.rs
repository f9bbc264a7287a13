//! HTTP relay with bearer auth: echoes JSON payloads or forwards them to per-route webhooks.

mod error;
mod handlers;
mod relay;
mod router;
mod server;

pub use error::GatewayError;
pub use server::GatewayServer;
