//! Display strings for the weather card
//!
//! Everything the card shows is computed here from the `Ready` payload, so
//! the formatting rules can be checked without a terminal.

use crate::condition::WeatherCondition;
use crate::state::{PlaceName, WeatherSnapshot};

/// Substituted for any value the provider did not send.
pub const PLACEHOLDER: &str = "--";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub location: String,
    pub temperature: String,
    pub description: String,
    pub humidity: String,
    pub wind: String,
    pub glyph: Option<&'static str>,
}

impl CardView {
    pub fn from_ready(place: Option<&PlaceName>, weather: Option<&WeatherSnapshot>) -> Self {
        let location = format!(
            "{}, {}",
            or_placeholder(place.map(|p| p.name.as_str())),
            or_placeholder(place.map(|p| p.country.as_str())),
        );

        let condition = weather.and_then(WeatherSnapshot::primary_condition);

        Self {
            location,
            temperature: format_temperature(weather.and_then(|w| w.temperature)),
            description: condition
                .map(|c| c.description.clone())
                .unwrap_or_default(),
            humidity: format!(
                "Humidity: {}%",
                format_value(weather.and_then(|w| w.humidity))
            ),
            wind: format!(
                "Wind: {} m/s",
                format_value(weather.and_then(|w| w.wind_speed))
            ),
            glyph: condition
                .and_then(|c| c.id)
                .map(|id| WeatherCondition::from_id(id).emoji()),
        }
    }
}

fn or_placeholder(text: Option<&str>) -> &str {
    text.filter(|t| !t.trim().is_empty()).unwrap_or(PLACEHOLDER)
}

/// Nearest whole degree, halves toward +∞ (27.5 → 28, -2.5 → -2).
pub fn round_degrees(celsius: f64) -> i64 {
    (celsius + 0.5).floor() as i64
}

pub fn format_temperature(celsius: Option<f64>) -> String {
    match celsius {
        Some(t) if t.is_finite() => format!("{}°C", round_degrees(t)),
        _ => format!("{PLACEHOLDER}°C"),
    }
}

/// Shortest decimal form, unrounded; `--` when absent.
pub fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Condition;
    use pretty_assertions::assert_eq;

    fn bengaluru() -> PlaceName {
        PlaceName {
            name: "Bengaluru".into(),
            country: "IN".into(),
        }
    }

    fn clear_sky() -> WeatherSnapshot {
        WeatherSnapshot {
            temperature: Some(27.6),
            humidity: Some(65.0),
            wind_speed: Some(3.1),
            conditions: vec![Condition {
                id: Some(800),
                description: "clear sky".into(),
            }],
        }
    }

    #[test]
    fn full_card() {
        let card = CardView::from_ready(Some(&bengaluru()), Some(&clear_sky()));

        assert_eq!(
            card,
            CardView {
                location: "Bengaluru, IN".into(),
                temperature: "28°C".into(),
                description: "clear sky".into(),
                humidity: "Humidity: 65%".into(),
                wind: "Wind: 3.1 m/s".into(),
                glyph: Some(WeatherCondition::ClearSky.emoji()),
            }
        );
    }

    #[test]
    fn missing_temperature_renders_placeholder() {
        let weather = WeatherSnapshot {
            temperature: None,
            ..clear_sky()
        };
        let card = CardView::from_ready(Some(&bengaluru()), Some(&weather));

        assert_eq!(card.temperature, "--°C");
        assert_eq!(card.humidity, "Humidity: 65%");
        assert_eq!(card.wind, "Wind: 3.1 m/s");
        assert_eq!(card.description, "clear sky");
    }

    #[test]
    fn missing_place_and_weather() {
        let card = CardView::from_ready(None, None);

        assert_eq!(card.location, "--, --");
        assert_eq!(card.temperature, "--°C");
        assert_eq!(card.description, "");
        assert_eq!(card.humidity, "Humidity: --%");
        assert_eq!(card.wind, "Wind: -- m/s");
        assert_eq!(card.glyph, None);
    }

    #[test]
    fn place_without_country() {
        let place = PlaceName {
            name: "Somewhere".into(),
            country: String::new(),
        };
        let card = CardView::from_ready(Some(&place), Some(&clear_sky()));

        assert_eq!(card.location, "Somewhere, --");
    }

    #[test]
    fn empty_condition_list_gives_blank_description() {
        let weather = WeatherSnapshot {
            conditions: Vec::new(),
            ..clear_sky()
        };
        let card = CardView::from_ready(Some(&bengaluru()), Some(&weather));

        assert_eq!(card.description, "");
        assert_eq!(card.glyph, None);
    }

    #[test]
    fn zero_degrees_is_a_value() {
        assert_eq!(format_temperature(Some(0.0)), "0°C");
        assert_eq!(format_temperature(Some(-0.4)), "0°C");
    }

    #[test]
    fn rounding_halves_go_up() {
        assert_eq!(round_degrees(27.5), 28);
        assert_eq!(round_degrees(27.4), 27);
        assert_eq!(round_degrees(-2.5), -2);
        assert_eq!(round_degrees(-2.6), -3);
    }

    #[test]
    fn values_are_not_rounded() {
        assert_eq!(format_value(Some(65.0)), "65");
        assert_eq!(format_value(Some(3.25)), "3.25");
        assert_eq!(format_value(None), "--");
    }
}
