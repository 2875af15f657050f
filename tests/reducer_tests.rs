//! Store-level tests for the retrieval flow
//!
//! FRAMEWORK PATTERN: EffectStore / EffectStoreTestHarness
//! - Dispatch intents, drain the declared effects
//! - Feed back the result actions an effect task would produce
//! - Assert on the resulting view state

use localweather::{
    action::Action,
    components::{Component, WeatherScreen, WeatherScreenProps},
    effect::Effect,
    error::{FETCH_ERROR_MESSAGE, LOCATION_ERROR_MESSAGE},
    reducer::reducer,
    state::{AppState, Condition, Conditions, PlaceName, Position, ViewState, WeatherSnapshot},
};
use tui_dispatch::testing::*;
use tui_dispatch::{EffectStore, NumericComponentId};

fn bengaluru() -> Position {
    Position::new(12.97, 77.59)
}

fn mock_conditions() -> Conditions {
    Conditions {
        place: Some(PlaceName {
            name: "Bengaluru".into(),
            country: "IN".into(),
        }),
        weather: WeatherSnapshot {
            temperature: Some(27.6),
            humidity: Some(65.0),
            wind_speed: Some(3.1),
            conditions: vec![Condition {
                id: Some(800),
                description: "clear sky".into(),
            }],
        },
    }
}

#[test]
fn test_store_initial_fetch() {
    let mut store = EffectStore::new(AppState::default(), reducer);

    assert!(store.state().view.is_loading());

    let result = store.dispatch(Action::LocationFetch);
    assert!(result.changed);
    assert_eq!(result.effects.len(), 1);
    assert!(matches!(result.effects[0], Effect::LocatePosition { .. }));
}

#[test]
fn test_full_flow_reaches_ready() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::LocationFetch);
    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(|e| matches!(e, Effect::LocatePosition { .. }));

    // Position task resolves
    harness.complete_action(Action::LocationDidLoad(bengaluru()));
    harness.process_emitted();
    harness.assert_state(|s| s.position == Some(bengaluru()));
    harness.assert_state(|s| s.view.is_loading());

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(
        |e| matches!(e, Effect::FetchConditions { position } if *position == bengaluru()),
    );

    // Conditions task resolves
    harness.complete_action(Action::WeatherDidLoad(mock_conditions()));
    let (changed, total) = harness.process_emitted();
    assert_eq!((changed, total), (1, 1));

    harness.assert_state(|s| s.view.is_ready());
    harness.assert_state(|s| match &s.view {
        ViewState::Ready { place, weather } => {
            place.as_ref().map(|p| p.name.as_str()) == Some("Bengaluru")
                && weather.as_ref().and_then(|w| w.humidity) == Some(65.0)
        }
        _ => false,
    });

    harness.drain_effects().effects_empty();
}

#[test]
fn test_location_error_flow() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::LocationFetch);
    harness.complete_action(Action::LocationDidError(LOCATION_ERROR_MESSAGE.into()));
    harness.process_emitted();

    harness.assert_state(|s| s.view.error() == Some(LOCATION_ERROR_MESSAGE));
    harness.assert_state(|s| s.position.is_none());
}

#[test]
fn test_weather_error_flow() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::LocationFetch);
    harness.complete_action(Action::LocationDidLoad(bengaluru()));
    harness.process_emitted();
    harness.complete_action(Action::WeatherDidError(FETCH_ERROR_MESSAGE.into()));
    harness.process_emitted();

    harness.assert_state(|s| s.view.error() == Some(FETCH_ERROR_MESSAGE));
}

#[test]
fn test_stale_results_after_settling_are_dropped() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::LocationFetch);
    harness.complete_action(Action::LocationDidLoad(bengaluru()));
    harness.complete_action(Action::WeatherDidLoad(mock_conditions()));
    harness.complete_action(Action::WeatherDidError(FETCH_ERROR_MESSAGE.into()));
    let (changed, total) = harness.process_emitted();

    assert_eq!(total, 3);
    assert_eq!(changed, 2, "late error must not overwrite Ready");
    harness.assert_state(|s| s.view.is_ready());
}

#[test]
fn test_second_fetch_does_not_request_again() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::LocationFetch);
    harness.complete_action(Action::LocationDidLoad(bengaluru()));
    harness.process_emitted();
    harness.drain_effects();

    harness.dispatch_collect(Action::LocationFetch);
    harness.drain_effects().effects_empty();
}

#[test]
fn test_identical_inputs_give_identical_payload() {
    let run = || {
        let mut store = EffectStore::new(AppState::default(), reducer);
        store.dispatch(Action::LocationFetch);
        store.dispatch(Action::LocationDidLoad(bengaluru()));
        store.dispatch(Action::WeatherDidLoad(mock_conditions()));
        store.state().view.clone()
    };

    assert_eq!(run(), run());
}

#[test]
fn test_quit_key_through_component() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    let mut component = WeatherScreen;

    let actions = harness.send_keys::<NumericComponentId, _, _>("q", |state, event| {
        let props = WeatherScreenProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });

    actions.assert_count(1);
    actions.assert_first(Action::Quit);
}
