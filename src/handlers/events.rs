use std::fmt::{Display, Formatter};
use tokio::sync::oneshot;
use crate::models::coordinates::Coordinates;
use crate::models::error::SyncError;

/// Everything the foreground context is asked to render or answer.
#[derive(Debug)]
pub enum UiEvent {
    ShowLocation(Coordinates),
    Notify(Notice),
    PromptPermission(oneshot::Sender<bool>),
}

/// Transient status messages shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    PermissionDenied,
    LocationUnavailable,
    Saved,
    SyncFailed(String),
}

impl Notice {
    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::Saved)
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::PermissionDenied => write!(f, "{}", SyncError::PermissionDenied),
            Notice::LocationUnavailable => write!(f, "{}", SyncError::LocationUnavailable),
            Notice::Saved => write!(f, "Location saved successfully"),
            Notice::SyncFailed(reason) => write!(f, "Error: {}", reason),
        }
    }
}

impl From<&SyncError> for Notice {
    fn from(e: &SyncError) -> Self {
        match e {
            SyncError::PermissionDenied => Notice::PermissionDenied,
            SyncError::LocationUnavailable => Notice::LocationUnavailable,
            other => Notice::SyncFailed(other.to_string()),
        }
    }
}
