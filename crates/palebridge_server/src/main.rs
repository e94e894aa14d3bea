//! Illustrative bootstrap: loads a config value, wires it into a
//! [`SessionManager`], and runs until interrupted. The actual RakNet and TCP
//! transports, the interactive console, and real configuration loading all
//! live outside this crate's scope — a production deployment replaces this
//! file, not `palebridge_core`.

use std::sync::Arc;

use palebridge_core::{ProxyConfig, SessionManager};
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "palebridge.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_config(DEFAULT_CONFIG_PATH).await?;
    tracing::info!(
        bind = %format!("{}:{}", config.bind_address, config.bind_port),
        remote = %format!("{}:{}", config.remote_address, config.remote_port),
        max_players = config.max_players,
        "starting palebridge"
    );

    let manager = Arc::new(SessionManager::new(config));
    let tick_task = tokio::spawn(manager.clone().run_tick_loop());

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown signal received, draining sessions");

    tick_task.abort();
    manager.shutdown().await;

    tracing::info!("shutdown complete");
    Ok(())
}

/// Reads `path` as JSON into a [`ProxyConfig`]. Real deployments load YAML
/// through an out-of-scope collaborator; this reads JSON directly because
/// that's the only deserializer already in the dependency stack, and falls
/// back to defaults so the binary is runnable without any config file at all.
async fn load_config(path: &str) -> anyhow::Result<ProxyConfig> {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => Ok(serde_json::from_str(&contents)?),
        Err(e) => {
            tracing::warn!(%path, error = %e, "no config file found, using defaults");
            Ok(ProxyConfig::default())
        }
    }
}
