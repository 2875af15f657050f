//! Application state - single source of truth

use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A fix from the host position source, in degrees
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both coordinates are finite and within ±90 / ±180.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Reverse-geocoded place for a position
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PlaceName {
    pub name: String,
    /// ISO 3166 country code, e.g. "IN"
    pub country: String,
}

/// One entry of the provider's condition list
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Condition {
    /// OpenWeatherMap condition id (800 = clear sky)
    pub id: Option<u16>,
    pub description: String,
}

/// Current conditions, metric units. Any field may be missing upstream.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherSnapshot {
    /// °C
    pub temperature: Option<f64>,
    /// %
    pub humidity: Option<f64>,
    /// m/s
    pub wind_speed: Option<f64>,
    pub conditions: Vec<Condition>,
}

impl WeatherSnapshot {
    pub fn primary_condition(&self) -> Option<&Condition> {
        self.conditions.first()
    }
}

/// Result of the two remote lookups for one position
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Conditions {
    pub place: Option<PlaceName>,
    pub weather: WeatherSnapshot,
}

/// Options handed to the position source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PositionOptions {
    pub enable_high_accuracy: bool,
    pub timeout_ms: u64,
    pub maximum_age_ms: u64,
}

pub const DEFAULT_POSITION_TIMEOUT_MS: u64 = 15_000;
pub const DEFAULT_POSITION_MAXIMUM_AGE_MS: u64 = 10_000;

impl PositionOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn maximum_age(&self) -> Duration {
        Duration::from_millis(self.maximum_age_ms)
    }
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            enable_high_accuracy: true,
            timeout_ms: DEFAULT_POSITION_TIMEOUT_MS,
            maximum_age_ms: DEFAULT_POSITION_MAXIMUM_AGE_MS,
        }
    }
}

/// What the screen shows: exactly one of these at any instant
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum ViewState {
    #[default]
    Loading,
    Error(String),
    Ready {
        place: Option<PlaceName>,
        weather: Option<WeatherSnapshot>,
    },
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Spinner frame interval while loading.
pub const SPINNER_TICK_MS: u64 = 80;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, Default, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Loading → Error | Ready, written only by the reducer
    #[debug(section = "Screen", label = "View", debug_fmt)]
    pub view: ViewState,

    /// The one fix acquired this session
    #[debug(section = "Location", label = "Position", debug_fmt)]
    pub position: Option<Position>,

    #[debug(section = "Location", label = "Options", debug_fmt)]
    pub options: PositionOptions,

    /// Spinner frame counter
    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    pub fn new(options: PositionOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }
}
