use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use uuid::Uuid;
use crate::models::coordinates::Coordinates;

/// One position reading as stored by the backend. Write-once: fields are only
/// readable after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRecord {
    id: Uuid,
    latitude: f64,
    longitude: f64,
    #[serde(serialize_with = "serialize_timestamp")]
    timestamp: DateTime<Utc>,
}

impl LocationRecord {
    pub fn new(coordinates: Coordinates) -> Self {
        Self::with_timestamp(coordinates, Utc::now())
    }

    pub fn with_timestamp(coordinates: Coordinates, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            latitude: coordinates.latitude(),
            longitude: coordinates.longitude(),
            timestamp,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}
