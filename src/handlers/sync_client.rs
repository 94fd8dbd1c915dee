use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Url};
use tracing::{error, info};
use crate::models::coordinates::Coordinates;
use crate::models::error::{SyncError, SyncResult};
use crate::models::location_record::LocationRecord;

const LOCATIONS_PATH: [&str; 3] = ["rest", "v1", "locations"];
const JSON: &str = "application/json";

/// Posts single location records to `{base_url}/rest/v1/locations`.
#[derive(Clone)]
pub struct LocationSyncClient {
    http: Client,
    endpoint: Url,
    api_key: String,
}

impl LocationSyncClient {
    pub fn new(base_url: &Url, api_key: impl Into<String>) -> SyncResult<Self> {
        Ok(Self {
            http: Client::new(),
            endpoint: locations_endpoint(base_url)?,
            api_key: api_key.into(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// One POST, no retry. Any non-2xx status comes back as `SyncError::Http`.
    pub async fn submit(&self, coordinates: Coordinates) -> SyncResult<LocationRecord> {
        let record = LocationRecord::new(coordinates);
        info!("Submitting location {} to {}", record.id(), self.endpoint);

        let response = self.http
            .post(self.endpoint.clone())
            .header("apikey", &self.api_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, JSON)
            .header(ACCEPT, JSON)
            .json(&[&record])
            .send()
            .await
            .map_err(|e| {
                error!("Location {} not sent: {}", record.id(), e);
                SyncError::Network(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Backend rejected location {}: {}", record.id(), status);
            return Err(SyncError::Http(status));
        }

        info!("Location {} stored ({})", record.id(), status);
        Ok(record)
    }
}

/// Appends the locations path to whatever path the base URL already has;
/// query and fragment are left alone.
fn locations_endpoint(base_url: &Url) -> SyncResult<Url> {
    let mut endpoint = base_url.clone();
    endpoint
        .path_segments_mut()
        .map_err(|_| SyncError::Config(format!("{} cannot be used as a base URL", base_url)))?
        .pop_if_empty()
        .extend(LOCATIONS_PATH);
    Ok(endpoint)
}
