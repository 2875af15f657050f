//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, ViewState};

/// The reducer handles all state transitions.
///
/// Result actions only apply while the view is still `Loading`; anything that
/// arrives after the screen has settled is dropped.
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Location actions =====
        Action::LocationFetch => {
            // One position request per screen lifetime.
            if state.position.is_some() || !state.view.is_loading() {
                return DispatchResult::unchanged();
            }
            state.tick_count = 0;
            DispatchResult::changed_with(Effect::LocatePosition {
                options: state.options.clone(),
            })
        }

        Action::LocationDidLoad(position) => {
            if state.position.is_some() || !state.view.is_loading() {
                return DispatchResult::unchanged();
            }
            state.position = Some(position);
            DispatchResult::changed_with(Effect::FetchConditions { position })
        }

        Action::LocationDidError(message) => {
            if state.position.is_some() || !state.view.is_loading() {
                return DispatchResult::unchanged();
            }
            state.view = ViewState::Error(message);
            DispatchResult::changed()
        }

        // ===== Weather actions =====
        Action::WeatherDidLoad(conditions) => {
            if state.position.is_none() || !state.view.is_loading() {
                return DispatchResult::unchanged();
            }
            state.view = ViewState::Ready {
                place: conditions.place,
                weather: Some(conditions.weather),
            };
            DispatchResult::changed()
        }

        Action::WeatherDidError(message) => {
            if state.position.is_none() || !state.view.is_loading() {
                return DispatchResult::unchanged();
            }
            state.view = ViewState::Error(message);
            DispatchResult::changed()
        }

        // ===== Global actions =====
        Action::Tick => {
            if state.view.is_loading() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}
