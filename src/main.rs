use std::path::PathBuf;

use anyhow::Context;
use bridge_core::config::Config;
use bridge_gateway::GatewayServer;
use clap::Parser;
use tokio::sync::watch;

/// Authenticated JSON relay between a Custom GPT action and Zapier webhooks.
#[derive(Debug, Parser)]
#[command(name = "bridge", version, about)]
struct Cli {
    /// Path to the TOML config file (falls back to `BRIDGE_CONFIG`, then `config/default.toml`).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Override `gateway.bind`.
    #[arg(long)]
    bind: Option<String>,
    /// Override `gateway.port`.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_subscriber();

    let cli = Cli::parse();
    let config_path = resolve_config_path(cli.config.as_ref());
    let mut config = Config::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    if let Some(bind) = cli.bind {
        config.gateway.bind = bind;
    }
    if let Some(port) = cli.port {
        config.gateway.port = port;
    }
    config.validate()?;

    let auth_token = config
        .gateway
        .auth_token
        .clone()
        .context("API_BEARER_TOKEN must be set")?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    tokio::spawn(async move {
        wait_for_signal().await;
        tracing::info!("received shutdown signal");
        let _ = shutdown_tx.send(true);
    });

    let relay_timeout = config.relay_timeout();
    GatewayServer::new(
        &config.gateway.bind,
        config.gateway.port,
        auth_token,
        shutdown_rx,
    )
    .with_hooks(config.hooks)
    .with_rate_limit(config.gateway.rate_limit)
    .with_max_body_size(config.gateway.max_body_size)
    .with_relay_timeout(relay_timeout)
    .serve()
    .await?;

    Ok(())
}

fn resolve_config_path(cli_path: Option<&PathBuf>) -> PathBuf {
    if let Some(path) = cli_path {
        return path.clone();
    }
    if let Ok(path) = std::env::var("BRIDGE_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from("config/default.toml")
}

fn init_subscriber() {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

async fn wait_for_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    res = tokio::signal::ctrl_c() => {
                        if let Err(e) = res {
                            tracing::error!("failed to listen for ctrl-c: {e:#}");
                        }
                    }
                    _ = sigterm.recv() => {}
                }
                return;
            }
            Err(e) => tracing::warn!("failed to install SIGTERM handler: {e:#}"),
        }
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for ctrl-c: {e:#}");
        std::future::pending::<()>().await;
    }
}
