//! OpenWeatherMap client: reverse geocoding and current conditions

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::FetchError;
use crate::state::{Condition, PlaceName, Position, WeatherSnapshot};

pub const DEFAULT_API_BASE: &str = "https://api.openweathermap.org";

/// The two remote lookups the flow needs.
#[async_trait]
pub trait WeatherService: Send + Sync {
    /// First candidate place for the position, `None` if the provider has none.
    async fn reverse_geocode(&self, position: Position) -> Result<Option<PlaceName>, FetchError>;

    async fn current_weather(&self, position: Position) -> Result<WeatherSnapshot, FetchError>;
}

// ============================================================================
// Wire types
// ============================================================================

/// Either field may be missing; the card shows a placeholder for it.
#[derive(Debug, Deserialize)]
struct GeoEntry {
    #[serde(default)]
    name: String,
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: Option<OwMain>,
    #[serde(default)]
    weather: Vec<OwCondition>,
    wind: Option<OwWind>,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: Option<f64>,
    humidity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    id: Option<u16>,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: Option<f64>,
}

impl From<OwCurrentResponse> for WeatherSnapshot {
    fn from(response: OwCurrentResponse) -> Self {
        let (temperature, humidity) = response
            .main
            .map(|main| (main.temp, main.humidity))
            .unwrap_or_default();
        WeatherSnapshot {
            temperature,
            humidity,
            wind_speed: response.wind.and_then(|wind| wind.speed),
            conditions: response
                .weather
                .into_iter()
                .map(|c| Condition {
                    id: c.id,
                    description: c.description,
                })
                .collect(),
        }
    }
}

// ============================================================================
// Client
// ============================================================================

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;
        tracing::debug!("GET {} -> {}", path, status);

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| FetchError::Parse(e.to_string()))
    }
}

#[async_trait]
impl WeatherService for OpenWeatherClient {
    async fn reverse_geocode(&self, position: Position) -> Result<Option<PlaceName>, FetchError> {
        let entries: Vec<GeoEntry> = self
            .get_json(
                "/geo/1.0/reverse",
                &[
                    ("lat", position.latitude.to_string()),
                    ("lon", position.longitude.to_string()),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;

        Ok(entries.into_iter().next().map(|entry| PlaceName {
            name: entry.name,
            country: entry.country,
        }))
    }

    async fn current_weather(&self, position: Position) -> Result<WeatherSnapshot, FetchError> {
        let response: OwCurrentResponse = self
            .get_json(
                "/data/2.5/weather",
                &[
                    ("lat", position.latitude.to_string()),
                    ("lon", position.longitude.to_string()),
                    ("units", "metric".to_string()),
                ],
            )
            .await?;

        Ok(response.into())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
