//! Theme components for the TUI.
//!
//! This module provides:
//! - [`Theme`] - Color palette and the past/future track gradient
//! - [`GlyphSet`] - Track glyphs with Unicode/ASCII modes

mod colors;
mod glyphs;

pub use colors::Theme;
pub use glyphs::{GlyphMode, GlyphSet};
