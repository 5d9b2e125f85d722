//! Configuration for the timeline explorer.
//!
//! Stored as JSON at `.deeptime/config.json`. Every field has a default, so a
//! partial file (or none at all) is valid.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::date::{parse_date, DateParseError, LabelMode};
use crate::granularity::Granularity;
use crate::input::DateField;
use crate::minutes::Minutes;
use crate::playback::DEFAULT_SPEED;
use crate::state::{TimelineOptions, DEFAULT_MIN_SEPARATION, DEFAULT_TRACK_WIDTH};

/// Directory holding the config file, relative to the working directory.
pub const CONFIG_DIR: &str = ".deeptime";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.json";

/// Persisted settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Initial selection start, in any accepted text date form.
    #[serde(default = "default_initial_start")]
    pub initial_start: String,

    /// Initial selection end.
    #[serde(default = "default_initial_end")]
    pub initial_end: String,

    /// Minimum distance between the selection's handles.
    #[serde(default = "default_min_separation")]
    pub min_separation_minutes: Minutes,

    /// Drag granularity on startup.
    #[serde(default)]
    pub granularity: Granularity,

    /// Playback speed multiplier.
    #[serde(default = "default_playback_speed")]
    pub playback_speed: f64,

    /// Stop playback at the end of the context window.
    #[serde(default)]
    pub bounded_playback: bool,

    /// Track width used before the terminal reports one.
    #[serde(default = "default_track_width")]
    pub track_width: u16,

    /// Start in Earth view (labels relative to now).
    #[serde(default)]
    pub earth_view: bool,

    /// Draw with ASCII glyphs only.
    #[serde(default)]
    pub ascii: bool,
}

fn default_initial_start() -> String {
    "now".into()
}

fn default_initial_end() -> String {
    "now+1d".into()
}

fn default_min_separation() -> Minutes {
    DEFAULT_MIN_SEPARATION
}

fn default_playback_speed() -> f64 {
    DEFAULT_SPEED
}

fn default_track_width() -> u16 {
    DEFAULT_TRACK_WIDTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_start: default_initial_start(),
            initial_end: default_initial_end(),
            min_separation_minutes: default_min_separation(),
            granularity: Granularity::default(),
            playback_speed: default_playback_speed(),
            bounded_playback: false,
            track_width: default_track_width(),
            earth_view: false,
            ascii: false,
        }
    }
}

impl Config {
    /// Default config path under `root`.
    pub fn path_in(root: &Path) -> PathBuf {
        root.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Resolve the text dates against `now` and build timeline options.
    pub fn to_options(&self, now: Minutes) -> Result<TimelineOptions, ConfigError> {
        let resolve = |field, text: &str| {
            parse_date(text, now).map_err(|source| ConfigError::InvalidDate { field, source })
        };
        Ok(TimelineOptions {
            initial_start: Some(resolve(DateField::Start, &self.initial_start)?),
            initial_end: Some(resolve(DateField::End, &self.initial_end)?),
            now,
            min_separation: self.min_separation_minutes,
            granularity: self.granularity,
            speed: self.playback_speed,
            bounded_playback: self.bounded_playback,
            track_width: self.track_width,
            label_mode: if self.earth_view {
                LabelMode::EarthView
            } else {
                LabelMode::Calendar
            },
            ..TimelineOptions::default()
        })
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A configured date could not be parsed.
    #[error("invalid initial {field} date: {source}")]
    InvalidDate {
        field: DateField,
        #[source]
        source: DateParseError,
    },
}
