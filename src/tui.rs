//! Ratatui front end: one human seat against bots.
//!
//! [`app::AppState`] holds the game and the UI state and turns key presses into
//! [`app::InputAction`]s; [`ui`] draws it; [`controller::run`] owns the event loop.

pub mod app;
pub mod controller;
pub mod ui;
