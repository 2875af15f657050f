//! Error types for position acquisition, remote lookups and startup config

use std::path::PathBuf;
use std::time::Duration;

/// Shown for any position failure, whatever the cause.
pub const LOCATION_ERROR_MESSAGE: &str = "Failed to get location so please try again";

/// Shown for any failure of either remote lookup.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch weather data";

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LocationError {
    #[error("position unavailable: {0}")]
    Unavailable(String),
    #[error("position request timed out after {0:?}")]
    Timeout(Duration),
}

impl LocationError {
    pub fn user_message(&self) -> &'static str {
        LOCATION_ERROR_MESSAGE
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(String),
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("response parse error: {0}")]
    Parse(String),
}

impl FetchError {
    pub fn user_message(&self) -> &'static str {
        FETCH_ERROR_MESSAGE
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "missing OpenWeatherMap API key (set OPENWEATHER_API_KEY, add it to .env, or pass --api-key)"
    )]
    MissingApiKey,
    #[error("--lat and --lon must be given together")]
    PartialCoordinates,
    #[error("coordinates out of range: lat {lat}, lon {lon}")]
    InvalidCoordinates { lat: String, lon: String },
}

#[derive(thiserror::Error, Debug)]
pub enum LogInitError {
    #[error("cannot create log directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot open log file in {}: {source}", path.display())]
    Appender {
        path: PathBuf,
        source: tracing_appender::rolling::InitError,
    },
    #[error("logging already initialized: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_location_error_maps_to_one_message() {
        let errors = [
            LocationError::Unavailable("no fix".into()),
            LocationError::Timeout(Duration::from_secs(15)),
        ];
        for error in errors {
            assert_eq!(error.user_message(), LOCATION_ERROR_MESSAGE);
        }
    }

    #[test]
    fn every_fetch_error_maps_to_one_message() {
        let errors = [
            FetchError::Request("connection refused".into()),
            FetchError::Status {
                status: 401,
                body: "Invalid API key".into(),
            },
            FetchError::Parse("expected value".into()),
        ];
        for error in errors {
            assert_eq!(error.user_message(), FETCH_ERROR_MESSAGE);
        }
    }

    #[test]
    fn detail_stays_in_display_output() {
        let error = FetchError::Status {
            status: 401,
            body: "Invalid API key".into(),
        };
        assert_eq!(error.to_string(), "unexpected status 401: Invalid API key");
    }
}
