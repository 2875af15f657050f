//! Condition groups from OpenWeatherMap condition ids

/// Condition groups, keyed by the leading digit of the provider id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCondition {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Atmosphere,
    ClearSky,
    PartlyCloudy,
    Cloudy,
    Unknown,
}

impl WeatherCondition {
    /// See https://openweathermap.org/weather-conditions
    pub fn from_id(id: u16) -> Self {
        match id {
            200..=299 => WeatherCondition::Thunderstorm,
            300..=399 => WeatherCondition::Drizzle,
            500..=599 => WeatherCondition::Rain,
            600..=699 => WeatherCondition::Snow,
            700..=799 => WeatherCondition::Atmosphere,
            800 => WeatherCondition::ClearSky,
            801 | 802 => WeatherCondition::PartlyCloudy,
            803 | 804 => WeatherCondition::Cloudy,
            _ => WeatherCondition::Unknown,
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            WeatherCondition::Thunderstorm => "\u{26c8}\u{fe0f}",
            WeatherCondition::Drizzle => "\u{1f326}\u{fe0f}",
            WeatherCondition::Rain => "\u{1f327}\u{fe0f}",
            WeatherCondition::Snow => "\u{1f328}\u{fe0f}",
            WeatherCondition::Atmosphere => "\u{1f32b}\u{fe0f}",
            WeatherCondition::ClearSky => "\u{2600}\u{fe0f}",
            WeatherCondition::PartlyCloudy => "\u{26c5}",
            WeatherCondition::Cloudy | WeatherCondition::Unknown => "\u{2601}\u{fe0f}",
        }
    }
}
