//! Trello callback entry point.
//!
//! This binary is the composition root. Responsibilities:
//!
//! 1. **Parse configuration**: defaults, `trello-callback.toml`, environment.
//! 2. **Wire observability**: `tracing-subscriber` with a text or JSON layer
//!    and an optional OpenTelemetry OTLP exporter.
//! 3. **Construct infrastructure**: build the `TrelloClient` and inject it
//!    into the listener state. Missing credentials leave the listener
//!    unconfigured instead of aborting startup.
//! 4. **Serve**: run the webhook listener until Ctrl+C or SIGTERM.

mod config;
mod telemetry;

use std::sync::Arc;

use anyhow::{Context, Result};
use listener::AppState;
use tracing::{error, info};
use trello::TrelloClient;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().context("failed to load configuration")?;
    let _telemetry =
        telemetry::init(config.log_format, config.otel_exporter_otlp_endpoint.as_deref())?;

    info!(version = env!("CARGO_PKG_VERSION"), config = ?config, "Starting trello-callback");

    let addr = config.server_addr()?;
    let state = build_state(&config)?;

    listener::start_server(state, addr).await.context("webhook listener failed")?;

    info!("trello-callback stopped");
    Ok(())
}

/// Builds the listener state from configuration.
fn build_state(config: &Config) -> Result<AppState> {
    let credentials = match config.credentials() {
        Ok(credentials) => credentials,
        Err(e) => {
            error!(error = %e, "Trello credentials missing; webhook deliveries will be answered with 500");
            return Ok(AppState::unconfigured());
        },
    };

    let client = TrelloClient::new(credentials, config.client_config())
        .context("failed to construct Trello client")?;
    info!(base_url = %client.base_url(), "Trello client ready");

    Ok(AppState::configured(Arc::new(client)))
}
