//! Configuration loading, route catalogue, and shared HTTP client for the bridge.

pub mod config;
pub mod http;
pub mod route;
pub mod secret;

pub use route::Route;
pub use secret::Secret;
