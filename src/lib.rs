//! localweather - current conditions for wherever the terminal is
//!
//! The binary wires these modules into a tui-dispatch runtime; the library
//! exposes them for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod condition;
pub mod config;
pub mod effect;
pub mod error;
pub mod flow;
pub mod logging;
pub mod position;
pub mod reducer;
pub mod state;
pub mod view;
