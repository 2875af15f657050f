pub mod weather_card;
pub mod weather_screen;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use weather_card::{WeatherCard, WeatherCardProps};
pub use weather_screen::{SPINNER_FRAMES, WeatherScreen, WeatherScreenProps};
