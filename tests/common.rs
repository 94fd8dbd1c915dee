#![allow(dead_code)]
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use reqwest::Url;
use tokio::sync::mpsc;
use location_sync::handlers::events::UiEvent;
use location_sync::handlers::location_flow::LocationFlow;
use location_sync::handlers::location_provider::StaticLocationProvider;
use location_sync::handlers::permission_gate::{PermissionGate, PermissionPlatform, PermissionStatus};
use location_sync::handlers::sync_client::LocationSyncClient;
use location_sync::models::coordinates::Coordinates;

pub const API_KEY: &str = "test-anon-key";

pub struct CapturedRequest {
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

#[derive(Clone)]
struct BackendState {
    status: StatusCode,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// In-process stand-in for the REST backend: records every POST and answers
/// with `status`.
pub struct MockBackend {
    pub base_url: Url,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockBackend {
    pub async fn start(status: StatusCode) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/rest/v1/locations", post(record_location))
            .with_state(BackendState { status, requests: requests.clone() });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: Url::parse(&format!("http://{}/", addr)).unwrap(),
            requests,
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn take_requests(&self) -> Vec<CapturedRequest> {
        std::mem::take(&mut *self.requests.lock().unwrap())
    }
}

async fn record_location(State(state): State<BackendState>, headers: HeaderMap, body: String) -> StatusCode {
    let body = serde_json::from_str(&body).unwrap_or(serde_json::Value::Null);
    state.requests.lock().unwrap().push(CapturedRequest { headers, body });
    state.status
}

/// A base URL nothing listens on.
pub async fn dead_base_url() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{}", addr)).unwrap()
}

/// Permission double: a fixed current state and a fixed answer to the prompt.
pub struct FakePermission {
    granted: bool,
    answer: PermissionStatus,
    prompts: Arc<AtomicUsize>,
}

impl FakePermission {
    pub fn granted() -> Self {
        Self::new(true, PermissionStatus::Granted)
    }

    pub fn answering(answer: PermissionStatus) -> Self {
        Self::new(false, answer)
    }

    fn new(granted: bool, answer: PermissionStatus) -> Self {
        Self { granted, answer, prompts: Arc::new(AtomicUsize::new(0)) }
    }

    pub fn prompts(&self) -> Arc<AtomicUsize> {
        self.prompts.clone()
    }
}

#[async_trait]
impl PermissionPlatform for FakePermission {
    fn check(&self) -> PermissionStatus {
        if self.granted { PermissionStatus::Granted } else { PermissionStatus::Denied }
    }

    async fn request(&self) -> PermissionStatus {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

pub fn quito() -> Coordinates {
    Coordinates::new(-0.1807, -78.4678).unwrap()
}

pub fn flow<P: PermissionPlatform>(
    platform: P,
    fix: Option<Coordinates>,
    base_url: &Url,
) -> (LocationFlow<P>, mpsc::Receiver<UiEvent>) {
    let (ui_tx, ui_rx) = mpsc::channel(16);
    let client = LocationSyncClient::new(base_url, API_KEY).unwrap();
    let flow = LocationFlow::new(
        PermissionGate::new(platform, ui_tx.clone()),
        Arc::new(StaticLocationProvider::new(fix)),
        client,
        ui_tx,
    );
    (flow, ui_rx)
}

pub fn drain(rx: &mut mpsc::Receiver<UiEvent>) -> Vec<UiEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
