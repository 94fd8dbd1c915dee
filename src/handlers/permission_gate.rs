use std::sync::atomic::{AtomicBool, Ordering};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};
use crate::handlers::events::{Notice, UiEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl From<bool> for PermissionStatus {
    fn from(granted: bool) -> Self {
        if granted { PermissionStatus::Granted } else { PermissionStatus::Denied }
    }
}

/// Whatever owns the location permission: the OS, a console prompt, a test double.
#[async_trait]
pub trait PermissionPlatform: Send + Sync {
    fn check(&self) -> PermissionStatus;
    async fn request(&self) -> PermissionStatus;
}

pub struct PermissionGate<P> {
    platform: P,
    ui: mpsc::Sender<UiEvent>,
}

impl<P: PermissionPlatform> PermissionGate<P> {
    pub fn new(platform: P, ui: mpsc::Sender<UiEvent>) -> Self {
        Self { platform, ui }
    }

    /// Prompts at most once per call. A denial is reported to the user and
    /// not remembered.
    pub async fn ensure_location_permission(&self) -> PermissionStatus {
        if self.platform.check() == PermissionStatus::Granted {
            debug!("Location permission already granted");
            return PermissionStatus::Granted;
        }

        let status = self.platform.request().await;
        if status == PermissionStatus::Denied {
            info!("Location permission denied");
            self.ui.send(UiEvent::Notify(Notice::PermissionDenied)).await.ok();
        }
        status
    }
}

/// Asks the user through the foreground console. A grant sticks for the
/// rest of the session.
pub struct ConsolePermission {
    granted: AtomicBool,
    ui: mpsc::Sender<UiEvent>,
}

impl ConsolePermission {
    pub fn new(pre_granted: bool, ui: mpsc::Sender<UiEvent>) -> Self {
        Self { granted: AtomicBool::new(pre_granted), ui }
    }
}

#[async_trait]
impl PermissionPlatform for ConsolePermission {
    fn check(&self) -> PermissionStatus {
        self.granted.load(Ordering::SeqCst).into()
    }

    async fn request(&self) -> PermissionStatus {
        let (answer, answered) = oneshot::channel();
        if self.ui.send(UiEvent::PromptPermission(answer)).await.is_err() {
            return PermissionStatus::Denied;
        }

        // A dropped prompt counts as a refusal.
        let granted = answered.await.unwrap_or(false);
        if granted {
            self.granted.store(true, Ordering::SeqCst);
        }
        granted.into()
    }
}
