//! Actions: one intent at mount, then the results flowing back from effects

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{Conditions, Position};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Location category =====
    /// Intent: acquire the device position (dispatched once at startup)
    LocationFetch,

    /// Result: position source produced a fix
    LocationDidLoad(Position),

    /// Result: position could not be acquired
    LocationDidError(String),

    // ===== Weather category =====
    /// Result: place name and current conditions loaded
    WeatherDidLoad(Conditions),

    /// Result: either remote lookup failed
    WeatherDidError(String),

    // ===== Uncategorized (global) =====
    /// Spinner animation tick
    Tick,

    /// Exit the application
    Quit,
}
