use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use crate::handlers::events::{Notice, UiEvent};
use crate::handlers::location_provider::LocationProvider;
use crate::handlers::permission_gate::{PermissionGate, PermissionPlatform, PermissionStatus};
use crate::handlers::sync_client::LocationSyncClient;
use crate::models::coordinates::LocationFix;
use crate::models::error::SyncResult;
use crate::models::location_record::LocationRecord;

pub type SubmitOutcome = SyncResult<LocationRecord>;

/// How a single "get location" action ended, as seen by its caller.
#[derive(Debug)]
pub enum FlowOutcome {
    PermissionDenied,
    LocationUnavailable,
    Submitted(JoinHandle<SubmitOutcome>),
}

/// permission → last known fix → display → background POST.
pub struct LocationFlow<P> {
    gate: PermissionGate<P>,
    provider: Arc<dyn LocationProvider>,
    client: LocationSyncClient,
    ui: mpsc::Sender<UiEvent>,
}

impl<P: PermissionPlatform> LocationFlow<P> {
    pub fn new(
        gate: PermissionGate<P>,
        provider: Arc<dyn LocationProvider>,
        client: LocationSyncClient,
        ui: mpsc::Sender<UiEvent>,
    ) -> Self {
        Self { gate, provider, client, ui }
    }

    pub async fn trigger(&self) -> FlowOutcome {
        if self.gate.ensure_location_permission().await == PermissionStatus::Denied {
            return FlowOutcome::PermissionDenied;
        }

        let coordinates = match self.provider.fetch_location().await {
            LocationFix::Coordinates(coordinates) => coordinates,
            LocationFix::Unavailable => {
                info!("No last known location");
                self.notify(Notice::LocationUnavailable).await;
                return FlowOutcome::LocationUnavailable;
            }
        };

        debug!("Got fix {:?}", coordinates);
        self.ui.send(UiEvent::ShowLocation(coordinates)).await.ok();

        let client = self.client.clone();
        let ui = self.ui.clone();
        FlowOutcome::Submitted(tokio::spawn(async move {
            let outcome = client.submit(coordinates).await;
            let notice = match &outcome {
                Ok(_) => Notice::Saved,
                Err(e) => {
                    error!("Sync failed: {}", e);
                    Notice::from(e)
                }
            };
            ui.send(UiEvent::Notify(notice)).await.ok();
            outcome
        }))
    }

    async fn notify(&self, notice: Notice) {
        self.ui.send(UiEvent::Notify(notice)).await.ok();
    }
}
