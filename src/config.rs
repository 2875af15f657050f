//! Startup configuration: CLI flags with environment fallbacks
//!
//! `main` loads `.env` before parsing, so every `env = ...` below can also
//! come from that file.

use std::path::PathBuf;

use crate::api::DEFAULT_API_BASE;
use crate::error::ConfigError;
use crate::position::DEFAULT_GEOIP_URL;
use crate::state::{
    DEFAULT_POSITION_MAXIMUM_AGE_MS, DEFAULT_POSITION_TIMEOUT_MS, Position, PositionOptions,
};

#[derive(clap::Args, Debug, Clone)]
pub struct ConfigArgs {
    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Fixed latitude; skips geoip lookup when given with --lon
    #[arg(long, env = "LOCALWEATHER_LAT", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Fixed longitude
    #[arg(long, env = "LOCALWEATHER_LON", allow_hyphen_values = true)]
    pub lon: Option<f64>,

    /// Position request timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_POSITION_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// Accept a remembered position fix up to this age, in milliseconds
    #[arg(long, default_value_t = DEFAULT_POSITION_MAXIMUM_AGE_MS)]
    pub maximum_age_ms: u64,

    /// Do not ask for a high-accuracy position
    #[arg(long)]
    pub low_accuracy: bool,

    /// OpenWeatherMap base URL
    #[arg(long, env = "OPENWEATHER_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// IP geolocation endpoint used when no fixed coordinates are given
    #[arg(long, env = "LOCALWEATHER_GEOIP_URL", default_value = DEFAULT_GEOIP_URL)]
    pub geoip_url: String,

    /// Directory for log files
    #[arg(long, env = "LOCALWEATHER_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}

/// Where the position comes from
#[derive(Debug, Clone, PartialEq)]
pub enum PositionSourceConfig {
    Fixed(Position),
    GeoIp { endpoint: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base: String,
    pub position: PositionSourceConfig,
    pub options: PositionOptions,
    pub log_dir: PathBuf,
}

impl ConfigArgs {
    pub fn into_config(self) -> Result<Config, ConfigError> {
        let api_key = self
            .api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let position = match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => {
                let position = Position::new(lat, lon);
                if !position.is_valid() {
                    return Err(ConfigError::InvalidCoordinates {
                        lat: lat.to_string(),
                        lon: lon.to_string(),
                    });
                }
                PositionSourceConfig::Fixed(position)
            }
            (None, None) => PositionSourceConfig::GeoIp {
                endpoint: self.geoip_url,
            },
            _ => return Err(ConfigError::PartialCoordinates),
        };

        Ok(Config {
            api_key,
            api_base: self.api_base,
            position,
            options: PositionOptions {
                enable_high_accuracy: !self.low_accuracy,
                timeout_ms: self.timeout_ms,
                maximum_age_ms: self.maximum_age_ms,
            },
            log_dir: self.log_dir.unwrap_or_else(default_log_dir),
        })
    }
}

fn default_log_dir() -> PathBuf {
    dirs_next::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("localweather")
        .join("logs")
}
