//! Async bodies behind each effect
//!
//! Each function here runs inside one spawned task and resolves to the
//! action the reducer should see next.

use crate::action::Action;
use crate::api::WeatherService;
use crate::error::{FetchError, LocationError};
use crate::position::PositionSource;
use crate::state::{Conditions, Position, PositionOptions};

/// One position request, bounded by `options.timeout`.
pub async fn locate(
    source: &dyn PositionSource,
    options: &PositionOptions,
) -> Result<Position, LocationError> {
    let timeout = options.timeout();
    match tokio::time::timeout(timeout, source.current_position(options)).await {
        Ok(result) => result,
        Err(_) => Err(LocationError::Timeout(timeout)),
    }
}

/// Reverse geocode, then current weather. The second request is only sent
/// once the first has resolved; a failure in either discards both.
pub async fn fetch_conditions(
    service: &dyn WeatherService,
    position: Position,
) -> Result<Conditions, FetchError> {
    let place = service.reverse_geocode(position).await?;
    let weather = service.current_weather(position).await?;
    Ok(Conditions { place, weather })
}

pub async fn locate_action(source: &dyn PositionSource, options: &PositionOptions) -> Action {
    match locate(source, options).await {
        Ok(position) => {
            tracing::info!("Position acquired");
            tracing::debug!(
                "Position: {:.4}, {:.4}",
                position.latitude,
                position.longitude
            );
            Action::LocationDidLoad(position)
        }
        Err(e) => {
            tracing::warn!("Position request failed: {}", e);
            Action::LocationDidError(e.user_message().to_string())
        }
    }
}

pub async fn conditions_action(service: &dyn WeatherService, position: Position) -> Action {
    match fetch_conditions(service, position).await {
        Ok(conditions) => {
            tracing::info!(
                "Conditions loaded for {}",
                conditions
                    .place
                    .as_ref()
                    .map(|p| p.name.as_str())
                    .unwrap_or("unnamed place")
            );
            Action::WeatherDidLoad(conditions)
        }
        Err(e) => {
            tracing::warn!("Weather lookup failed: {}", e);
            Action::WeatherDidError(e.user_message().to_string())
        }
    }
}
