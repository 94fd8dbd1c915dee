use std::io;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Permission denied")]
    PermissionDenied,

    #[error("Could not get location")]
    LocationUnavailable,

    /// Backend answered with a non-2xx status.
    #[error("{0}")]
    Http(StatusCode),

    #[error("{0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid coordinates: lat {latitude}, lon {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SyncResult<T> = Result<T, SyncError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_displays_status_line() {
        let err = SyncError::Http(StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "404 Not Found");
    }

    #[test]
    fn flow_error_messages() {
        assert_eq!(SyncError::PermissionDenied.to_string(), "Permission denied");
        assert_eq!(SyncError::LocationUnavailable.to_string(), "Could not get location");
    }
}
