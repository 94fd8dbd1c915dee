use serde::{Deserialize, Serialize};
use crate::models::error::{SyncError, SyncResult};

/// A validated latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinates")]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinates {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinates> for Coordinates {
    type Error = SyncError;

    fn try_from(raw: RawCoordinates) -> SyncResult<Self> {
        Coordinates::new(raw.latitude, raw.longitude)
    }
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> SyncResult<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);

        if valid {
            Ok(Self { latitude, longitude })
        } else {
            Err(SyncError::InvalidCoordinates { latitude, longitude })
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Result of asking the platform for its last known position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationFix {
    Coordinates(Coordinates),
    Unavailable,
}

impl From<Option<Coordinates>> for LocationFix {
    fn from(value: Option<Coordinates>) -> Self {
        value.map_or(LocationFix::Unavailable, LocationFix::Coordinates)
    }
}
