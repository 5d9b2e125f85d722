//! Host-facing timeline widget.
//!
//! Wraps [`TimelineState`] with the change callback a host registers. The
//! callback fires on every committed selection change and on every explicit
//! [`TimelineWidget::set_date_range`] call.

use tracing::trace;

use crate::input::{InputEvent, Transition};
use crate::minutes::Minutes;
use crate::range::DateRange;
use crate::state::{TimelineOptions, TimelineState};

/// Callback invoked with the newly committed selection.
pub type ChangeCallback = Box<dyn FnMut(DateRange) + Send>;

/// The dual-slider deep time explorer.
pub struct TimelineWidget {
    state: TimelineState,
    on_change: Option<ChangeCallback>,
}

impl TimelineWidget {
    pub fn new(options: &TimelineOptions) -> Self {
        Self {
            state: TimelineState::new(options),
            on_change: None,
        }
    }

    /// Register the change callback, replacing any previous one.
    #[must_use]
    pub fn on_date_range_change(mut self, callback: impl FnMut(DateRange) + Send + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// The committed selection.
    pub fn date_range(&self) -> DateRange {
        self.state.date_range()
    }

    /// Commit a selection programmatically and notify the callback.
    ///
    /// Values are normalized the same way interactive input is, so the
    /// callback receives the range actually stored.
    pub fn set_date_range(&mut self, start: Minutes, end: Minutes) -> DateRange {
        let range = self.state.set_date_range(start, end);
        self.notify(range);
        range
    }

    /// Feed one input event through the state machine.
    pub fn dispatch(&mut self, event: InputEvent) -> Transition {
        let transition = self.state.apply(event);
        if let Transition::Committed(range) = transition {
            self.notify(range);
        }
        transition
    }

    pub fn state(&self) -> &TimelineState {
        &self.state
    }

    fn notify(&mut self, range: DateRange) {
        trace!(start = range.start(), end = range.end(), "date range committed");
        if let Some(callback) = self.on_change.as_mut() {
            callback(range);
        }
    }
}

impl std::fmt::Debug for TimelineWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimelineWidget")
            .field("state", &self.state)
            .field("has_callback", &self.on_change.is_some())
            .finish()
    }
}
