//! Host position sources
//!
//! A source yields one fix per call. The flow wraps the call in the
//! configured timeout; sources that remember their last fix honour
//! `maximum_age` themselves.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::error::LocationError;
use crate::state::{Position, PositionOptions};

pub const DEFAULT_GEOIP_URL: &str = "http://ip-api.com/json";

#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn current_position(&self, options: &PositionOptions)
        -> Result<Position, LocationError>;
}

/// Coordinates supplied up front (`--lat` / `--lon`).
#[derive(Debug, Clone)]
pub struct FixedPosition {
    position: Position,
}

impl FixedPosition {
    pub fn new(position: Position) -> Self {
        Self { position }
    }
}

#[async_trait]
impl PositionSource for FixedPosition {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<Position, LocationError> {
        Ok(self.position)
    }
}

#[derive(Debug, Deserialize)]
struct GeoIpResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
    message: Option<String>,
}

/// Approximate position of the host from an IP geolocation endpoint.
pub struct IpPositionSource {
    http: Client,
    endpoint: String,
    last_fix: Mutex<Option<(Instant, Position)>>,
}

impl IpPositionSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
            last_fix: Mutex::new(None),
        }
    }

    async fn lookup(&self) -> Result<Position, LocationError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("fields", "status,message,lat,lon")])
            .send()
            .await
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LocationError::Unavailable(format!(
                "geoip lookup returned status {status}"
            )));
        }

        let body: GeoIpResponse = response
            .json()
            .await
            .map_err(|e| LocationError::Unavailable(e.to_string()))?;

        if body.status != "success" {
            return Err(LocationError::Unavailable(
                body.message.unwrap_or(body.status),
            ));
        }

        let (Some(lat), Some(lon)) = (body.lat, body.lon) else {
            return Err(LocationError::Unavailable(
                "geoip response without coordinates".into(),
            ));
        };

        let position = Position::new(lat, lon);
        if !position.is_valid() {
            return Err(LocationError::Unavailable(format!(
                "coordinates out of range: {lat}, {lon}"
            )));
        }
        Ok(position)
    }
}

#[async_trait]
impl PositionSource for IpPositionSource {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<Position, LocationError> {
        let mut last_fix = self.last_fix.lock().await;

        if let Some((taken_at, position)) = *last_fix {
            if taken_at.elapsed() <= options.maximum_age() {
                tracing::debug!("Reusing position fix from {:?} ago", taken_at.elapsed());
                return Ok(position);
            }
        }

        if options.enable_high_accuracy {
            tracing::debug!("High accuracy requested; geoip has a single accuracy level");
        }

        let position = self.lookup().await?;
        *last_fix = Some((Instant::now(), position));
        Ok(position)
    }
}
