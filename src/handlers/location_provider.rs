use std::io::ErrorKind;
use std::path::PathBuf;
use async_trait::async_trait;
use tracing::{debug, warn};
use crate::models::coordinates::{Coordinates, LocationFix};

/// Source of the device's last known position. Best effort: a missing fix is
/// `Unavailable`, never an error.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn fetch_location(&self) -> LocationFix;
}

pub struct StaticLocationProvider {
    fix: Option<Coordinates>,
}

impl StaticLocationProvider {
    pub fn new(fix: Option<Coordinates>) -> Self {
        Self { fix }
    }
}

#[async_trait]
impl LocationProvider for StaticLocationProvider {
    async fn fetch_location(&self) -> LocationFix {
        self.fix.into()
    }
}

/// Reads `{"latitude": .., "longitude": ..}` left behind by an external GPS
/// source. The file is read fresh on every fetch.
pub struct FixFileLocationProvider {
    path: PathBuf,
}

impl FixFileLocationProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl LocationProvider for FixFileLocationProvider {
    async fn fetch_location(&self) -> LocationFix {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No fix file at {}", self.path.display());
                return LocationFix::Unavailable;
            }
            Err(e) => {
                warn!("Unable to read fix file {}: {}", self.path.display(), e);
                return LocationFix::Unavailable;
            }
        };

        if content.trim().is_empty() {
            return LocationFix::Unavailable;
        }

        match serde_json::from_str::<Coordinates>(&content) {
            Ok(coordinates) => LocationFix::Coordinates(coordinates),
            Err(e) => {
                warn!("Ignoring malformed fix file {}: {}", self.path.display(), e);
                LocationFix::Unavailable
            }
        }
    }
}
