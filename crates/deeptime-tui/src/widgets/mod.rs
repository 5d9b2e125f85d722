//! UI widgets for the TUI.
//!
//! This module provides:
//! - [`SliderTrack`] - One slider row with handles and the past/future gradient
//! - [`StatusBar`] - Top status bar with playback, selection and step
//! - [`DateInput`] - Single-line date entry
//! - [`FooterHints`] - Bottom keybinding hints

mod date_input;
mod footer_hints;
mod slider;
mod status_bar;

pub use date_input::{DateInput, DateInputState};
pub use footer_hints::{hints_for_mode, FooterHints, KeyHint};
pub use slider::SliderTrack;
pub use status_bar::{StatusBar, StatusBarContent};
