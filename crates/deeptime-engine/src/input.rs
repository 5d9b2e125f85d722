//! Input events understood by the timeline state machine.
//!
//! Pointer coordinates are pixel (or terminal column) offsets from the left
//! edge of the slider track they refer to.

use crate::date::DateParseError;
use crate::granularity::Granularity;
use crate::minutes::Minutes;

/// Which of the two sliders an event targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slider {
    /// Coarse slider over the whole domain; its handles pick the context window.
    Top,
    /// Fine slider over the context window; its handles pick the selection.
    Bottom,
}

/// One end of a slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handle {
    Start,
    End,
}

/// Text field a committed date belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateField {
    Start,
    End,
}

impl std::fmt::Display for DateField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::End => write!(f, "end"),
        }
    }
}

/// A discrete input to the timeline.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed on a slider track; grabs the nearest handle.
    PointerDown { slider: Slider, x: i32 },
    /// Pointer moved while a handle is grabbed.
    PointerMove { x: i32 },
    /// Pointer released.
    PointerUp,
    /// A text date was entered for one end of the selection.
    TextCommit { field: DateField, text: String },
    /// Animation tick; `elapsed` is in seconds.
    Tick { elapsed: f64 },
    SetGranularity(Granularity),
    Finer,
    Coarser,
    TogglePlayback,
    SetSpeed(f64),
    Faster,
    Slower,
    ToggleEarthView,
    /// Shift the selection one granularity step later.
    StepForward,
    /// Shift the selection one granularity step earlier.
    StepBackward,
    /// Reframe the context window around the selection.
    ZoomToSelection,
    /// Track width changed.
    Resize { width: u16 },
    /// The present moved (wall clock refresh).
    SetNow(Minutes),
}

/// Why an input was rejected. State is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error(transparent)]
    Parse(#[from] DateParseError),

    #[error("{field} would leave less than {min_separation} minute(s) before the other end")]
    Inverted {
        field: DateField,
        min_separation: Minutes,
    },

    #[error("date lies outside the timeline")]
    OutsideDomain,
}

/// What an event did to the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changed.
    Idle,
    /// Presentation changed (context window, granularity, playback, ...);
    /// the selection did not.
    ViewChanged,
    /// The committed selection changed.
    Committed(crate::range::DateRange),
    /// Input was rejected; the previous valid state is retained.
    Rejected(InputError),
}

impl Transition {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}
