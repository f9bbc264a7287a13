use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bridge_core::Route;
use bridge_core::Secret;
use bridge_core::config::HookConfig;
use tokio::sync::watch;

use crate::error::GatewayError;
use crate::relay::RelayClient;
use crate::router::build_router;

#[derive(Clone)]
pub(crate) struct AppState {
    pub relay: RelayClient,
    pub hooks: Arc<HookConfig>,
    pub started_at: Instant,
}

pub struct GatewayServer {
    addr: SocketAddr,
    auth_token: Secret,
    hooks: HookConfig,
    rate_limit: u32,
    max_body_size: usize,
    relay_timeout: Duration,
    shutdown_rx: watch::Receiver<bool>,
}

impl GatewayServer {
    #[must_use]
    pub fn new(
        bind: &str,
        port: u16,
        auth_token: Secret,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        let addr: SocketAddr = format!("{bind}:{port}").parse().unwrap_or_else(|e| {
            tracing::warn!("invalid bind '{bind}': {e}, falling back to 127.0.0.1:{port}");
            SocketAddr::from(([127, 0, 0, 1], port))
        });

        if bind == "0.0.0.0" {
            tracing::warn!("bridge binding to 0.0.0.0, ensure this is intended for production");
        }

        Self {
            addr,
            auth_token,
            hooks: HookConfig::default(),
            rate_limit: 120,
            max_body_size: 1_048_576,
            relay_timeout: Duration::from_secs(15),
            shutdown_rx,
        }
    }

    #[must_use]
    pub fn with_hooks(mut self, hooks: HookConfig) -> Self {
        self.hooks = hooks;
        self
    }

    #[must_use]
    pub fn with_rate_limit(mut self, limit: u32) -> Self {
        self.rate_limit = limit;
        self
    }

    #[must_use]
    pub fn with_max_body_size(mut self, size: usize) -> Self {
        self.max_body_size = size;
        self
    }

    #[must_use]
    pub fn with_relay_timeout(mut self, timeout: Duration) -> Self {
        self.relay_timeout = timeout;
        self
    }

    /// Start the HTTP relay server.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind or encounters a fatal I/O error.
    pub async fn serve(self) -> Result<(), GatewayError> {
        for route in Route::ALL {
            let mode = if self.hooks.get(route).is_some() {
                "relay"
            } else {
                "echo"
            };
            tracing::info!(%route, path = route.path(), mode, "route registered");
        }

        let state = AppState {
            relay: RelayClient::new(bridge_core::http::default_client(self.relay_timeout)),
            hooks: Arc::new(self.hooks),
            started_at: Instant::now(),
        };

        let router = build_router(state, self.auth_token, self.rate_limit, self.max_body_size);

        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(|e| GatewayError::Bind(self.addr.to_string(), e))?;
        tracing::info!("bridge listening on {}", self.addr);

        let mut shutdown_rx = self.shutdown_rx;
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            while !*shutdown_rx.borrow_and_update() {
                if shutdown_rx.changed().await.is_err() {
                    std::future::pending::<()>().await;
                }
            }
            tracing::info!("bridge shutting down");
        })
        .await
        .map_err(|e| GatewayError::Server(format!("{e}")))?;

        Ok(())
    }
}
