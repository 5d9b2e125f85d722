//! deeptime-engine: Headless core of the deep time timeline explorer
//!
//! This crate holds everything that does not need a display:
//! - Minute arithmetic over a ±14 billion year axis
//! - Date ranges, granularity levels and playback
//! - The dual-slider state machine and its input events
//! - Era lookup, text date parsing and label formatting
//! - Configuration

pub mod config;
pub mod date;
pub mod era;
pub mod granularity;
pub mod input;
pub mod minutes;
pub mod playback;
pub mod range;
pub mod state;
pub mod widget;

// Re-export commonly used types
pub use config::{Config, ConfigError};
pub use date::{format_minutes, format_span, parse_date, DateParseError, LabelMode};
pub use era::{era_at, era_name, Era, EraKind, ERAS, UNKNOWN_ERA};
pub use granularity::{Granularity, UnknownGranularity};
pub use input::{DateField, Handle, InputError, InputEvent, Slider, Transition};
pub use minutes::{now_minutes, Minutes, MAX_MINUTES, MINUTES_PER_YEAR, MIN_MINUTES};
pub use playback::PlaybackState;
pub use range::DateRange;
pub use state::{default_domain, TimelineOptions, TimelineState, ViewWindow};
pub use widget::{ChangeCallback, TimelineWidget};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
