// ABOUTME: CLI entry point for the bridge server binary
// ABOUTME: Loads config, connects the bus, builds the registry, and serves the axum app
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use clap::Parser;
use statebridge::bus::{MessageBus, MqttBus};
use statebridge::config::BridgeConfig;
use statebridge::registry::{Dependencies, ProviderRegistry};
use statebridge::types::BridgeError;

use statebridge_server::router;
use statebridge_server::state::ServerState;

/// statebridge-server — bridge exposing device states and functions over HTTP
#[derive(Parser)]
#[command(name = "statebridge-server", version, about)]
struct Cli {
    /// HTTP listen port
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// HTTP listen host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Path to the provider configuration file
    #[arg(long, default_value = "config.toml")]
    config: String,

    /// MQTT broker URL (`mqtt://` or `mqtts://`, with optional credentials)
    #[arg(long, default_value = "mqtt://localhost:1883")]
    mqtt_url: String,

    /// Broker CA certificate path, required for mqtts URLs
    #[arg(long)]
    mqtt_ca: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = BridgeConfig::load(&cli.config)?;

    let ca = match &cli.mqtt_ca {
        Some(path) => Some(std::fs::read(path).map_err(|e| {
            BridgeError::config(format!("Failed to read CA certificate {path}: {e}"))
        })?),
        None => None,
    };
    let bus = MqttBus::connect(&cli.mqtt_url, ca)?;

    let dependencies = Dependencies {
        bus: Arc::new(bus) as Arc<dyn MessageBus>,
        http: reqwest::Client::new(),
    };
    let registry = ProviderRegistry::from_config(&config, &dependencies).await?;

    let state = Arc::new(ServerState::new(registry));
    let app = router::build(state);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| BridgeError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!(address = %addr, config = %cli.config, "Starting bridge server");

    axum::serve(listener, app)
        .await
        .map_err(|e| BridgeError::internal(format!("Server error: {e}")))?;

    Ok(())
}
