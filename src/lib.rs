//! Single-action location relay: ask for location permission, read the last
//! known fix and POST it as one record to a REST backend.

pub mod config;
pub mod handlers;
pub mod models;
pub mod ui;

use std::sync::Arc;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::info;
use crate::config::{AppConfig, Cli, LocationSource};
use crate::handlers::location_flow::LocationFlow;
use crate::handlers::location_provider::{FixFileLocationProvider, LocationProvider, StaticLocationProvider};
use crate::handlers::permission_gate::{ConsolePermission, PermissionGate};
use crate::handlers::sync_client::LocationSyncClient;
use crate::models::error::SyncResult;
use crate::ui::console::Console;

const UI_EVENT_BUFFER: usize = 32;

pub fn location_provider(source: &LocationSource) -> Arc<dyn LocationProvider> {
    match source {
        LocationSource::FixFile(path) => Arc::new(FixFileLocationProvider::new(path)),
        LocationSource::Static(coordinates) => Arc::new(StaticLocationProvider::new(Some(*coordinates))),
        LocationSource::None => Arc::new(StaticLocationProvider::new(None)),
    }
}

/// Wires the console, returning whether the last `--once` action stored its record.
/// Interactive sessions always report `true`.
pub async fn run(cli: Cli) -> SyncResult<bool> {
    let config = AppConfig::validate(cli)?;
    let (ui_tx, ui_rx) = mpsc::channel(UI_EVENT_BUFFER);

    let client = LocationSyncClient::new(&config.base_url, config.api_key.clone())?;
    info!("Syncing to {}", client.endpoint());

    let gate = PermissionGate::new(
        ConsolePermission::new(config.permission_granted, ui_tx.clone()),
        ui_tx.clone(),
    );
    let flow = Arc::new(LocationFlow::new(gate, location_provider(&config.location), client, ui_tx));
    let console = Console::new(flow, ui_rx, BufReader::new(tokio::io::stdin()), std::io::stdout());

    if config.once {
        let (stored, _) = console.run_once().await?;
        Ok(stored)
    } else {
        console.run().await?;
        Ok(true)
    }
}
