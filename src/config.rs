use std::path::PathBuf;
use clap::{ArgAction, Parser};
use reqwest::Url;
use crate::models::coordinates::Coordinates;
use crate::models::error::{SyncError, SyncResult};

/// Send the device's last known location to a REST backend.
#[derive(Parser, Debug, Clone)]
#[command(name = "location-sync", version = env!("CARGO_PKG_VERSION"), long_about = None)]
pub struct Cli {
    /// Backend base URL; records go to {base-url}/rest/v1/locations
    #[arg(long, env = "SYNC_BASE_URL", default_value = "")]
    pub base_url: String,

    /// Static API key, sent both as `apikey` and as bearer token
    #[arg(long, env = "SYNC_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    /// JSON file holding the last known fix
    #[arg(long, env = "LOCATION_FIX_FILE")]
    pub fix_file: Option<PathBuf>,

    #[arg(long, env = "LOCATION_LATITUDE", allow_negative_numbers = true)]
    pub latitude: Option<f64>,

    #[arg(long, env = "LOCATION_LONGITUDE", allow_negative_numbers = true)]
    pub longitude: Option<f64>,

    /// Treat location permission as already granted (`granted`, or `prompt` to ask)
    #[arg(
        long,
        env = "LOCATION_PERMISSION",
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value = "prompt",
        default_missing_value = "granted",
        value_parser = parse_permission,
    )]
    pub grant_location: bool,

    /// Trigger a single action and exit
    #[arg(long)]
    pub once: bool,
}

fn parse_permission(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "granted" | "true" | "yes" | "1" => Ok(true),
        "prompt" | "denied" | "false" | "no" | "0" | "" => Ok(false),
        other => Err(format!("expected `granted` or `prompt`, got `{}`", other)),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LocationSource {
    FixFile(PathBuf),
    Static(Coordinates),
    None,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: Url,
    pub api_key: String,
    pub location: LocationSource,
    pub permission_granted: bool,
    pub once: bool,
}

impl AppConfig {
    pub fn validate(cli: Cli) -> SyncResult<Self> {
        if cli.base_url.trim().is_empty() {
            return Err(SyncError::Config("base URL is not set (--base-url or SYNC_BASE_URL)".to_string()));
        }
        if cli.api_key.trim().is_empty() {
            return Err(SyncError::Config("API key is not set (--api-key or SYNC_API_KEY)".to_string()));
        }

        let base_url = Url::parse(cli.base_url.trim())
            .map_err(|e| SyncError::Config(format!("invalid base URL {}: {}", cli.base_url, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(SyncError::Config(format!("unsupported URL scheme {}", base_url.scheme())));
        }
        if base_url.query().is_some() || base_url.fragment().is_some() {
            return Err(SyncError::Config(format!("base URL {} must not carry a query or fragment", base_url)));
        }

        let location = match (cli.fix_file, cli.latitude, cli.longitude) {
            (Some(path), _, _) => LocationSource::FixFile(path),
            (None, Some(lat), Some(lon)) => LocationSource::Static(Coordinates::new(lat, lon)?),
            (None, None, None) => LocationSource::None,
            (None, _, _) => {
                return Err(SyncError::Config("latitude and longitude must be given together".to_string()))
            }
        };

        Ok(Self {
            base_url,
            api_key: cli.api_key.trim().to_string(),
            location,
            permission_granted: cli.grant_location,
            once: cli.once,
        })
    }
}
