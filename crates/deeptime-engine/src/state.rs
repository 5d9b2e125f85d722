//! Timeline state and its transition function.
//!
//! [`TimelineState`] owns everything the widget knows: the context window,
//! the selection, granularity, playback and any in-progress drag. The only
//! way to change it is [`TimelineState::apply`] (or [`TimelineState::set_date_range`]),
//! so every transition can be exercised without a display.

use serde::Serialize;
use tracing::debug;

use crate::date::{format_minutes, format_span, parse_date, LabelMode};
use crate::era::era_name;
use crate::granularity::Granularity;
use crate::input::{DateField, Handle, InputError, InputEvent, Slider, Transition};
use crate::minutes::{
    clamp_between, clamp_wide, now_minutes, offset, year_start, Minutes, MINUTES_PER_DAY,
};
use crate::playback::{PlaybackState, DEFAULT_SPEED};
use crate::range::DateRange;

/// Minimum distance kept between the selection's handles.
pub const DEFAULT_MIN_SEPARATION: Minutes = 1;

/// Track width used until the host reports one.
pub const DEFAULT_TRACK_WIDTH: u16 = 80;

/// Narrowest track the state will map onto.
pub const MIN_TRACK_WIDTH: u16 = 2;

/// First year of the default domain (roughly the Big Bang).
pub const DOMAIN_START_YEAR: i64 = -13_800_000_000;

/// Last year of the default domain.
pub const DOMAIN_END_YEAR: i64 = 1_000_000_000;

/// The default domain covered by the top slider.
pub fn default_domain() -> DateRange {
    DateRange::new(year_start(DOMAIN_START_YEAR), year_start(DOMAIN_END_YEAR))
}

/// The pair of nested windows shown by the two sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewWindow {
    /// Context window; handles of the top slider, track of the bottom slider.
    pub top: DateRange,
    /// Selection; always inside `top`.
    pub bottom: DateRange,
}

/// Construction options for the timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineOptions {
    /// Selection start. Defaults to `now`.
    pub initial_start: Option<Minutes>,
    /// Selection end. Defaults to one day after the start.
    pub initial_end: Option<Minutes>,
    /// The present, used for relative dates and the past/future split.
    pub now: Minutes,
    /// Span of the top slider.
    pub domain: DateRange,
    pub min_separation: Minutes,
    pub granularity: Granularity,
    pub speed: f64,
    /// Stop playback at the end of the context window instead of sliding it.
    pub bounded_playback: bool,
    pub track_width: u16,
    pub label_mode: LabelMode,
}

impl Default for TimelineOptions {
    fn default() -> Self {
        Self {
            initial_start: None,
            initial_end: None,
            now: now_minutes(),
            domain: default_domain(),
            min_separation: DEFAULT_MIN_SEPARATION,
            granularity: Granularity::default(),
            speed: DEFAULT_SPEED,
            bounded_playback: false,
            track_width: DEFAULT_TRACK_WIDTH,
            label_mode: LabelMode::default(),
        }
    }
}

/// A grabbed handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Drag {
    slider: Slider,
    /// `None` while both handles sit under the pointer; resolved by the
    /// direction of the first move.
    handle: Option<Handle>,
    last_x: i32,
}

/// All mutable timeline state.
#[derive(Debug, Clone)]
pub struct TimelineState {
    domain: DateRange,
    view: ViewWindow,
    granularity: Granularity,
    playback: PlaybackState,
    min_separation: Minutes,
    bounded_playback: bool,
    label_mode: LabelMode,
    track_width: u16,
    now: Minutes,
    drag: Option<Drag>,
    last_rejection: Option<InputError>,
}

impl TimelineState {
    /// Build the initial state from options.
    ///
    /// The context window starts as the selection padded by its own length on
    /// each side.
    pub fn new(options: &TimelineOptions) -> Self {
        let mut state = Self {
            domain: options.domain,
            view: ViewWindow {
                top: options.domain,
                bottom: options.domain,
            },
            granularity: options.granularity,
            playback: PlaybackState::new(options.speed),
            min_separation: options.min_separation.max(0),
            bounded_playback: options.bounded_playback,
            label_mode: options.label_mode,
            track_width: options.track_width.max(MIN_TRACK_WIDTH),
            now: options.now,
            drag: None,
            last_rejection: None,
        };

        let start = options.initial_start.unwrap_or(options.now);
        let end = options
            .initial_end
            .unwrap_or_else(|| offset(start, MINUTES_PER_DAY));
        let bottom = state.normalize(start, end);
        state.view.bottom = bottom;
        state.view.top = state.framed(bottom);
        state
    }

    // === Accessors ===

    /// The committed selection.
    pub fn date_range(&self) -> DateRange {
        self.view.bottom
    }

    pub fn view(&self) -> ViewWindow {
        self.view
    }

    pub fn domain(&self) -> DateRange {
        self.domain
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    pub fn min_separation(&self) -> Minutes {
        self.min_separation
    }

    pub fn bounded_playback(&self) -> bool {
        self.bounded_playback
    }

    pub fn label_mode(&self) -> LabelMode {
        self.label_mode
    }

    pub fn track_width(&self) -> u16 {
        self.track_width
    }

    pub fn now(&self) -> Minutes {
        self.now
    }

    /// The most recent rejected input, cleared by the next accepted commit.
    pub fn last_rejection(&self) -> Option<&InputError> {
        self.last_rejection.as_ref()
    }

    /// The grabbed slider and handle, if a drag is in progress.
    pub fn active_drag(&self) -> Option<(Slider, Option<Handle>)> {
        self.drag.map(|d| (d.slider, d.handle))
    }

    /// Selection length in units of the active granularity.
    pub fn steps_between_handles(&self) -> Minutes {
        self.view.bottom.len() / self.granularity.minutes_per_pixel()
    }

    // === Geometry ===

    /// The span a slider's track covers.
    pub fn track_span(&self, slider: Slider) -> DateRange {
        match slider {
            Slider::Top => self.domain,
            Slider::Bottom => self.view.top,
        }
    }

    /// The range a slider's handles mark.
    pub fn handle_range(&self, slider: Slider) -> DateRange {
        match slider {
            Slider::Top => self.view.top,
            Slider::Bottom => self.view.bottom,
        }
    }

    /// Column of `minutes` on a slider's track, rounded to nearest.
    pub fn minutes_to_x(&self, slider: Slider, minutes: Minutes) -> u16 {
        let span = self.track_span(slider);
        if span.is_empty() {
            return 0;
        }
        let last = i128::from(self.track_width - 1);
        let len = i128::from(span.len());
        let rel = i128::from(span.clamp(minutes) - span.start());
        ((rel * last + len / 2) / len) as u16
    }

    /// Instant at column `x` of a slider's track.
    pub fn x_to_minutes(&self, slider: Slider, x: u16) -> Minutes {
        let span = self.track_span(slider);
        let last = i128::from(self.track_width - 1);
        let x = i128::from(x.min(self.track_width - 1));
        let len = i128::from(span.len());
        clamp_wide(i128::from(span.start()) + (x * len + last / 2) / last)
    }

    /// Columns of both handles of a slider.
    pub fn handle_offsets(&self, slider: Slider) -> (u16, u16) {
        let range = self.handle_range(slider);
        (
            self.minutes_to_x(slider, range.start()),
            self.minutes_to_x(slider, range.end()),
        )
    }

    /// Column of the present on a slider, if the track covers it.
    pub fn now_offset(&self, slider: Slider) -> Option<u16> {
        let span = self.track_span(slider);
        span.contains(self.now)
            .then(|| self.minutes_to_x(slider, self.now))
    }

    /// Whether column `x` of a slider lies before the present.
    pub fn is_past(&self, slider: Slider, x: u16) -> bool {
        self.x_to_minutes(slider, x) < self.now
    }

    // === Labels ===

    /// Label an instant using the current label mode.
    pub fn label(&self, minutes: Minutes) -> String {
        format_minutes(minutes, self.label_mode, self.now)
    }

    /// `start → end (length)` for the selection.
    pub fn range_text(&self) -> String {
        let range = self.view.bottom;
        format!(
            "{} \u{2192} {} ({})",
            self.label(range.start()),
            self.label(range.end()),
            format_span(range.len())
        )
    }

    /// Era names at both ends of the selection, collapsed when equal.
    pub fn era_text(&self) -> String {
        let range = self.view.bottom;
        let start = era_name(range.start());
        let end = era_name(range.end());
        if start == end {
            start.to_string()
        } else {
            format!("{start} \u{2192} {end}")
        }
    }

    // === Transitions ===

    /// Commit a selection.
    ///
    /// An inverted pair is swapped, ends are clamped into the domain, the
    /// minimum separation is enforced, and the context window grows if needed
    /// so the selection stays inside it. Returns the committed range.
    pub fn set_date_range(&mut self, start: Minutes, end: Minutes) -> DateRange {
        let range = self.normalize(start, end);
        self.view.bottom = range;
        self.view.top = self.view.top.union(range);
        self.last_rejection = None;
        range
    }

    /// Apply one input event.
    pub fn apply(&mut self, event: InputEvent) -> Transition {
        match event {
            InputEvent::PointerDown { slider, x } => self.pointer_down(slider, x),
            InputEvent::PointerMove { x } => self.pointer_move(x),
            InputEvent::PointerUp => {
                if self.drag.take().is_some() {
                    Transition::ViewChanged
                } else {
                    Transition::Idle
                }
            }
            InputEvent::TextCommit { field, text } => self.text_commit(field, &text),
            InputEvent::Tick { elapsed } => self.tick(elapsed),
            InputEvent::SetGranularity(granularity) => self.set_granularity(granularity),
            InputEvent::Finer => self.set_granularity(self.granularity.finer()),
            InputEvent::Coarser => self.set_granularity(self.granularity.coarser()),
            InputEvent::TogglePlayback => {
                self.playback.toggle();
                Transition::ViewChanged
            }
            InputEvent::SetSpeed(speed) => {
                self.playback.set_speed(speed);
                Transition::ViewChanged
            }
            InputEvent::Faster => {
                self.playback.faster();
                Transition::ViewChanged
            }
            InputEvent::Slower => {
                self.playback.slower();
                Transition::ViewChanged
            }
            InputEvent::ToggleEarthView => {
                self.label_mode = match self.label_mode {
                    LabelMode::Calendar => LabelMode::EarthView,
                    LabelMode::EarthView => LabelMode::Calendar,
                };
                Transition::ViewChanged
            }
            InputEvent::StepForward => self.step(1),
            InputEvent::StepBackward => self.step(-1),
            InputEvent::ZoomToSelection => self.zoom_to_selection(),
            InputEvent::Resize { width } => {
                let width = width.max(MIN_TRACK_WIDTH);
                if width == self.track_width {
                    return Transition::Idle;
                }
                self.track_width = width;
                Transition::ViewChanged
            }
            InputEvent::SetNow(now) => {
                if now == self.now {
                    return Transition::Idle;
                }
                self.now = now;
                Transition::ViewChanged
            }
        }
    }

    fn normalize(&self, a: Minutes, b: Minutes) -> DateRange {
        let range = DateRange::new(self.domain.clamp(a), self.domain.clamp(b));
        range.with_min_len(self.min_separation, self.domain)
    }

    /// Context window framing `range`: padded by its length on each side.
    fn framed(&self, range: DateRange) -> DateRange {
        let pad = range.len().max(self.granularity.minutes_per_pixel());
        range
            .padded(pad)
            .intersect(self.domain)
            .unwrap_or(self.domain)
    }

    fn commit_bottom(&mut self, range: DateRange) -> Transition {
        if range == self.view.bottom {
            return Transition::Idle;
        }
        self.view.bottom = range;
        self.last_rejection = None;
        Transition::Committed(range)
    }

    fn pointer_down(&mut self, slider: Slider, x: i32) -> Transition {
        let (start_x, end_x) = self.handle_offsets(slider);
        let (start_x, end_x) = (i32::from(start_x), i32::from(end_x));

        let handle = if start_x == end_x && x == start_x {
            None
        } else if x <= start_x {
            Some(Handle::Start)
        } else if x >= end_x {
            Some(Handle::End)
        } else if x - start_x <= end_x - x {
            Some(Handle::Start)
        } else {
            Some(Handle::End)
        };

        self.drag = Some(Drag {
            slider,
            handle,
            last_x: x,
        });
        Transition::ViewChanged
    }

    fn pointer_move(&mut self, x: i32) -> Transition {
        let Some(mut drag) = self.drag else {
            return Transition::Idle;
        };
        let delta_px = i64::from(x) - i64::from(drag.last_x);
        drag.last_x = x;
        if delta_px == 0 {
            self.drag = Some(drag);
            return Transition::Idle;
        }
        let handle = *drag.handle.get_or_insert(if delta_px < 0 {
            Handle::Start
        } else {
            Handle::End
        });
        self.drag = Some(drag);

        let delta = i128::from(delta_px) * i128::from(self.granularity.minutes_per_pixel());
        let top = self.view.top;
        let bottom = self.view.bottom;
        let sep = self.min_separation;

        match (drag.slider, handle) {
            (Slider::Bottom, Handle::Start) => {
                let target = clamp_wide(i128::from(bottom.start()) + delta);
                let start = clamp_between(target, top.start(), offset(bottom.end(), -sep));
                self.commit_bottom(DateRange::new(start, bottom.end()))
            }
            (Slider::Bottom, Handle::End) => {
                let target = clamp_wide(i128::from(bottom.end()) + delta);
                let end = clamp_between(target, offset(bottom.start(), sep), top.end());
                self.commit_bottom(DateRange::new(bottom.start(), end))
            }
            (Slider::Top, Handle::Start) => {
                let target = clamp_wide(i128::from(top.start()) + delta);
                let start = clamp_between(target, self.domain.start(), bottom.start());
                self.set_top(DateRange::new(start, top.end()))
            }
            (Slider::Top, Handle::End) => {
                let target = clamp_wide(i128::from(top.end()) + delta);
                let end = clamp_between(target, bottom.end(), self.domain.end());
                self.set_top(DateRange::new(top.start(), end))
            }
        }
    }

    fn set_top(&mut self, top: DateRange) -> Transition {
        if top == self.view.top {
            return Transition::Idle;
        }
        self.view.top = top;
        Transition::ViewChanged
    }

    fn text_commit(&mut self, field: DateField, text: &str) -> Transition {
        match self.validate_text(field, text) {
            Ok((start, end)) => {
                let before = self.view.bottom;
                let range = self.set_date_range(start, end);
                if range == before {
                    Transition::Idle
                } else {
                    Transition::Committed(range)
                }
            }
            Err(err) => {
                debug!(%field, input = text, error = %err, "rejected date input");
                self.last_rejection = Some(err.clone());
                Transition::Rejected(err)
            }
        }
    }

    fn validate_text(&self, field: DateField, text: &str) -> Result<(Minutes, Minutes), InputError> {
        let minutes = parse_date(text, self.now)?;
        if !self.domain.contains(minutes) {
            return Err(InputError::OutsideDomain);
        }
        let bottom = self.view.bottom;
        let (start, end) = match field {
            DateField::Start => (minutes, bottom.end()),
            DateField::End => (bottom.start(), minutes),
        };
        if i128::from(end) - i128::from(start) < i128::from(self.min_separation) {
            return Err(InputError::Inverted {
                field,
                min_separation: self.min_separation,
            });
        }
        Ok((start, end))
    }

    fn tick(&mut self, elapsed: f64) -> Transition {
        let was_playing = self.playback.is_playing();
        let delta = self
            .playback
            .advance(elapsed, self.granularity.minutes_per_pixel());
        if delta <= 0 {
            return Transition::Idle;
        }

        let bottom = self.view.bottom;
        let limit = if self.bounded_playback {
            self.view.top.end()
        } else {
            self.domain.end()
        };
        let room = limit - bottom.end();
        let applied = delta.min(room);
        if applied < delta {
            debug!(limit, "playback reached the end of the timeline");
            self.playback.set_playing(false);
        }
        if applied <= 0 {
            return if was_playing {
                Transition::ViewChanged
            } else {
                Transition::Idle
            };
        }

        let moved = DateRange::new(bottom.start() + applied, bottom.end() + applied);
        if moved.end() > self.view.top.end() {
            // Unbounded playback: the context window slides with the selection.
            self.view.top = self.view.top.shift(moved.end() - self.view.top.end());
        }
        self.commit_bottom(moved)
    }

    fn set_granularity(&mut self, granularity: Granularity) -> Transition {
        if granularity == self.granularity {
            return Transition::Idle;
        }
        self.granularity = granularity;
        Transition::ViewChanged
    }

    fn step(&mut self, direction: Minutes) -> Transition {
        let delta = direction * self.granularity.minutes_per_pixel();
        let moved = self.view.bottom.shift(delta).fit_within(self.view.top);
        self.commit_bottom(moved)
    }

    fn zoom_to_selection(&mut self) -> Transition {
        let top = self.framed(self.view.bottom);
        self.set_top(top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::era::UNKNOWN_ERA;
    use crate::minutes::{years_to_minutes, MINUTES_PER_HOUR};
    use proptest::prelude::*;

    /// 2024-01-01T00:00Z.
    const NOW: Minutes = 28_401_120;

    fn options() -> TimelineOptions {
        TimelineOptions {
            now: NOW,
            track_width: 301,
            ..TimelineOptions::default()
        }
    }

    fn create_test_state() -> TimelineState {
        TimelineState::new(&options())
    }

    fn drag(state: &mut TimelineState, slider: Slider, from: i32, to: i32) -> Transition {
        state.apply(InputEvent::PointerDown { slider, x: from });
        let transition = state.apply(InputEvent::PointerMove { x: to });
        state.apply(InputEvent::PointerUp);
        transition
    }

    #[test]
    fn test_initial_range_is_one_day_from_now() {
        let state = create_test_state();
        let range = state.date_range();
        assert_eq!(range.start(), NOW);
        assert_eq!(range.end(), NOW + 1_440);
        assert_eq!(state.steps_between_handles(), 1_440);
    }

    #[test]
    fn test_initial_handles_sit_in_middle_third() {
        let state = create_test_state();
        assert_eq!(state.view().top, DateRange::new(NOW - 1_440, NOW + 2_880));
        assert_eq!(state.handle_offsets(Slider::Bottom), (100, 200));
    }

    #[test]
    fn test_initial_range_from_options() {
        let state = TimelineState::new(&TimelineOptions {
            initial_start: Some(NOW + 500),
            initial_end: Some(NOW),
            ..options()
        });
        assert_eq!(state.date_range(), DateRange::new(NOW, NOW + 500));
    }

    #[test]
    fn test_set_date_range_round_trip() {
        let mut state = create_test_state();
        let committed = state.set_date_range(NOW - 10_000, NOW - 5_000);
        assert_eq!(committed, DateRange::new(NOW - 10_000, NOW - 5_000));
        assert_eq!(state.date_range(), committed);
        assert!(state.view().top.contains_range(&committed));
    }

    #[test]
    fn test_set_date_range_swaps_and_separates() {
        let mut state = create_test_state();
        assert_eq!(state.set_date_range(NOW + 10, NOW), DateRange::new(NOW, NOW + 10));
        assert_eq!(state.set_date_range(NOW, NOW), DateRange::new(NOW, NOW + 1));
    }

    #[test]
    fn test_set_date_range_clamps_to_domain() {
        let mut state = create_test_state();
        let domain = state.domain();
        let range = state.set_date_range(Minutes::MIN, Minutes::MAX);
        assert_eq!(range, domain);
    }

    #[test]
    fn test_drag_end_before_start_clamps_to_separation() {
        let mut state = create_test_state();
        let (_, end_x) = state.handle_offsets(Slider::Bottom);
        let transition = drag(&mut state, Slider::Bottom, i32::from(end_x), -10_000);
        let range = state.date_range();
        assert_eq!(range.end(), range.start() + DEFAULT_MIN_SEPARATION);
        assert_eq!(range.start(), NOW);
        assert!(transition.is_committed());
    }

    #[test]
    fn test_drag_start_moves_by_granularity() {
        let mut state = create_test_state();
        state.apply(InputEvent::SetGranularity(Granularity::Hour));
        let (start_x, _) = state.handle_offsets(Slider::Bottom);
        let start_x = i32::from(start_x);
        drag(&mut state, Slider::Bottom, start_x, start_x + 3);
        assert_eq!(state.date_range().start(), NOW + 3 * MINUTES_PER_HOUR);
        assert_eq!(state.date_range().end(), NOW + 1_440);
    }

    #[test]
    fn test_drag_bottom_clamped_to_context_window() {
        let mut state = create_test_state();
        let (start_x, _) = state.handle_offsets(Slider::Bottom);
        drag(&mut state, Slider::Bottom, i32::from(start_x), -1_000_000);
        assert_eq!(state.date_range().start(), state.view().top.start());
    }

    #[test]
    fn test_drag_top_cannot_cut_into_selection() {
        let mut state = create_test_state();
        state.apply(InputEvent::SetGranularity(Granularity::Day));
        state.apply(InputEvent::PointerDown {
            slider: Slider::Top,
            x: 0,
        });
        // Grabs the top start handle; dragging right stops at the selection start.
        state.apply(InputEvent::PointerMove { x: 50 });
        assert_eq!(state.view().top.start(), state.date_range().start());
    }

    #[test]
    fn test_drag_top_end_widens_context() {
        let mut state = create_test_state();
        state.apply(InputEvent::SetGranularity(Granularity::Year));
        let transition = drag(&mut state, Slider::Top, 300, 302);
        assert_eq!(transition, Transition::ViewChanged);
        assert_eq!(
            state.view().top.end(),
            NOW + 2_880 + 2 * crate::minutes::MINUTES_PER_YEAR
        );
        assert_eq!(state.date_range(), DateRange::new(NOW, NOW + 1_440));
    }

    #[test]
    fn test_coincident_handles_resolve_by_direction() {
        let mut state = create_test_state();
        // On the coarse top track the whole context window fits in one column.
        let (start_x, end_x) = state.handle_offsets(Slider::Top);
        assert_eq!(start_x, end_x);
        state.apply(InputEvent::SetGranularity(Granularity::Hour));
        state.apply(InputEvent::PointerDown {
            slider: Slider::Top,
            x: i32::from(start_x),
        });
        assert_eq!(state.active_drag(), Some((Slider::Top, None)));
        state.apply(InputEvent::PointerMove {
            x: i32::from(start_x) - 1,
        });
        assert_eq!(state.active_drag(), Some((Slider::Top, Some(Handle::Start))));
        assert_eq!(state.view().top.start(), NOW - 1_440 - MINUTES_PER_HOUR);
    }

    #[test]
    fn test_drag_to_extreme_pointer_positions_saturates() {
        let mut state = create_test_state();
        state.apply(InputEvent::PointerDown {
            slider: Slider::Bottom,
            x: -10,
        });
        state.apply(InputEvent::PointerMove { x: i32::MAX });
        assert_eq!(state.date_range(), DateRange::new(NOW + 1_439, NOW + 1_440));

        // Full swing back still moves the start handle, clamped to the context
        state.apply(InputEvent::PointerMove { x: i32::MIN });
        assert_eq!(state.date_range(), DateRange::new(NOW - 1_440, NOW + 1_440));
        assert_eq!(
            state.active_drag(),
            Some((Slider::Bottom, Some(Handle::Start)))
        );
    }

    #[test]
    fn test_move_without_drag_is_idle() {
        let mut state = create_test_state();
        assert_eq!(state.apply(InputEvent::PointerMove { x: 10 }), Transition::Idle);
        assert_eq!(state.apply(InputEvent::PointerUp), Transition::Idle);
    }

    #[test]
    fn test_granularity_change_does_not_move_handles() {
        let mut state = create_test_state();
        let before = state.handle_offsets(Slider::Bottom);
        state.apply(InputEvent::Coarser);
        state.apply(InputEvent::Coarser);
        assert_eq!(state.granularity(), Granularity::Day);
        assert_eq!(state.handle_offsets(Slider::Bottom), before);
        assert_eq!(state.apply(InputEvent::SetGranularity(Granularity::Day)), Transition::Idle);
    }

    #[test]
    fn test_text_commit_accepts_valid_date() {
        let mut state = create_test_state();
        let transition = state.apply(InputEvent::TextCommit {
            field: DateField::Start,
            text: "2023-12-31".into(),
        });
        assert_eq!(
            transition,
            Transition::Committed(DateRange::new(NOW - 1_440, NOW + 1_440))
        );
        assert!(state.view().top.contains_range(&state.date_range()));
    }

    #[test]
    fn test_text_commit_rejects_unparseable() {
        let mut state = create_test_state();
        let before = state.date_range();
        let transition = state.apply(InputEvent::TextCommit {
            field: DateField::End,
            text: "someday".into(),
        });
        assert!(matches!(transition, Transition::Rejected(InputError::Parse(_))));
        assert_eq!(state.date_range(), before);
        assert!(state.last_rejection().is_some());
    }

    #[test]
    fn test_text_commit_rejects_inverted() {
        let mut state = create_test_state();
        let before = state.date_range();
        let transition = state.apply(InputEvent::TextCommit {
            field: DateField::End,
            text: "2023-06-01".into(),
        });
        assert_eq!(
            transition,
            Transition::Rejected(InputError::Inverted {
                field: DateField::End,
                min_separation: 1,
            })
        );
        assert_eq!(state.date_range(), before);
    }

    #[test]
    fn test_text_commit_rejects_outside_domain() {
        let mut state = TimelineState::new(&TimelineOptions {
            domain: DateRange::new(NOW - 100_000, NOW + 100_000),
            ..options()
        });
        let transition = state.apply(InputEvent::TextCommit {
            field: DateField::Start,
            text: "1 Ma".into(),
        });
        assert_eq!(transition, Transition::Rejected(InputError::OutsideDomain));
    }

    #[test]
    fn test_accepted_commit_clears_rejection() {
        let mut state = create_test_state();
        state.apply(InputEvent::TextCommit {
            field: DateField::Start,
            text: "???".into(),
        });
        assert!(state.last_rejection().is_some());
        state.apply(InputEvent::TextCommit {
            field: DateField::Start,
            text: "now-1h".into(),
        });
        assert!(state.last_rejection().is_none());
    }

    #[test]
    fn test_playback_ten_ticks() {
        let mut state = create_test_state();
        state.apply(InputEvent::TogglePlayback);
        let mut commits = 0;
        for _ in 0..10 {
            if state.apply(InputEvent::Tick { elapsed: 1.0 }).is_committed() {
                commits += 1;
            }
        }
        assert_eq!(commits, 10);
        assert_eq!(state.date_range(), DateRange::new(NOW + 10, NOW + 1_450));
    }

    #[test]
    fn test_tick_when_stopped_is_idle() {
        let mut state = create_test_state();
        assert_eq!(state.apply(InputEvent::Tick { elapsed: 1.0 }), Transition::Idle);
    }

    #[test]
    fn test_unbounded_playback_slides_context() {
        let mut state = create_test_state();
        state.apply(InputEvent::SetGranularity(Granularity::Day));
        state.apply(InputEvent::TogglePlayback);
        for _ in 0..5 {
            state.apply(InputEvent::Tick { elapsed: 1.0 });
        }
        let view = state.view();
        assert_eq!(view.bottom.start(), NOW + 5 * 1_440);
        assert!(view.top.contains_range(&view.bottom));
        assert!(state.playback().is_playing());
    }

    #[test]
    fn test_bounded_playback_stops_at_context_end() {
        let mut state = TimelineState::new(&TimelineOptions {
            bounded_playback: true,
            granularity: Granularity::Hour,
            ..options()
        });
        state.apply(InputEvent::TogglePlayback);
        for _ in 0..30 {
            state.apply(InputEvent::Tick { elapsed: 1.0 });
        }
        assert_eq!(state.date_range().end(), state.view().top.end());
        assert!(!state.playback().is_playing());
    }

    #[test]
    fn test_step_forward_and_back() {
        let mut state = create_test_state();
        state.apply(InputEvent::SetGranularity(Granularity::Hour));
        state.apply(InputEvent::StepForward);
        assert_eq!(state.date_range().start(), NOW + 60);
        state.apply(InputEvent::StepBackward);
        state.apply(InputEvent::StepBackward);
        assert_eq!(state.date_range().start(), NOW - 60);
    }

    #[test]
    fn test_step_stays_inside_context() {
        let mut state = create_test_state();
        state.apply(InputEvent::SetGranularity(Granularity::Year));
        state.apply(InputEvent::StepForward);
        assert_eq!(state.date_range().end(), state.view().top.end());
        assert_eq!(state.date_range().len(), 1_440);
    }

    #[test]
    fn test_zoom_to_selection() {
        let mut state = create_test_state();
        state.set_date_range(NOW - 100_000, NOW - 90_000);
        state.apply(InputEvent::ZoomToSelection);
        assert_eq!(state.view().top, DateRange::new(NOW - 110_000, NOW - 80_000));
        assert_eq!(state.apply(InputEvent::ZoomToSelection), Transition::Idle);
    }

    #[test]
    fn test_resize_changes_offsets() {
        let mut state = create_test_state();
        state.apply(InputEvent::Resize { width: 31 });
        assert_eq!(state.handle_offsets(Slider::Bottom), (10, 20));
        state.apply(InputEvent::Resize { width: 0 });
        assert_eq!(state.track_width(), MIN_TRACK_WIDTH);
    }

    #[test]
    fn test_x_to_minutes_inverts_offsets() {
        let state = create_test_state();
        assert_eq!(state.x_to_minutes(Slider::Bottom, 0), NOW - 1_440);
        assert_eq!(state.x_to_minutes(Slider::Bottom, 300), NOW + 2_880);
        assert_eq!(state.x_to_minutes(Slider::Bottom, 100), NOW);
    }

    #[test]
    fn test_past_future_split() {
        let state = create_test_state();
        assert_eq!(state.now_offset(Slider::Bottom), Some(100));
        assert!(state.is_past(Slider::Bottom, 99));
        assert!(!state.is_past(Slider::Bottom, 100));
        assert!(!state.is_past(Slider::Bottom, 250));
    }

    #[test]
    fn test_deep_time_selection_resolves_hadean() {
        let mut state = create_test_state();
        let ago = years_to_minutes(4.5e9).unwrap();
        state.set_date_range(NOW - ago, NOW - ago + 1_440);
        assert_eq!(state.era_text(), "Hadean");
        state.set_date_range(NOW - years_to_minutes(13e9).unwrap(), NOW);
        assert_eq!(state.era_text(), format!("{UNKNOWN_ERA} \u{2192} Contemporary"));
    }

    #[test]
    fn test_earth_view_labels() {
        let mut state = create_test_state();
        assert_eq!(
            state.range_text(),
            "2024-01-01 00:00 \u{2192} 2024-01-02 00:00 (1 day)"
        );
        state.apply(InputEvent::ToggleEarthView);
        assert_eq!(state.label_mode(), LabelMode::EarthView);
        assert_eq!(state.range_text(), "now \u{2192} in 1 day (1 day)");
    }

    fn event_strategy() -> impl Strategy<Value = InputEvent> {
        prop_oneof![
            (any::<bool>(), -50i32..350).prop_map(|(top, x)| InputEvent::PointerDown {
                slider: if top { Slider::Top } else { Slider::Bottom },
                x,
            }),
            (-500i32..800).prop_map(|x| InputEvent::PointerMove { x }),
            any::<i32>().prop_map(|x| InputEvent::PointerMove { x }),
            Just(InputEvent::PointerUp),
            Just(InputEvent::Finer),
            Just(InputEvent::Coarser),
            Just(InputEvent::TogglePlayback),
            Just(InputEvent::StepForward),
            Just(InputEvent::StepBackward),
            Just(InputEvent::ZoomToSelection),
            (0.0f64..5.0).prop_map(|elapsed| InputEvent::Tick { elapsed }),
        ]
    }

    proptest! {
        #[test]
        fn prop_events_preserve_nesting(events in prop::collection::vec(event_strategy(), 1..60)) {
            let mut state = create_test_state();
            for event in events {
                let before = state.date_range();
                let transition = state.apply(event);
                let view = state.view();
                prop_assert!(state.domain().contains_range(&view.top));
                prop_assert!(view.top.contains_range(&view.bottom));
                prop_assert!(view.bottom.len() >= state.min_separation());
                if !transition.is_committed() {
                    prop_assert_eq!(state.date_range(), before);
                }
            }
        }

        #[test]
        fn prop_set_date_range_round_trips(a in -1_000_000_000i64..1_000_000_000, len in 1i64..1_000_000) {
            let mut state = create_test_state();
            let committed = state.set_date_range(a, a + len);
            prop_assert_eq!(committed, DateRange::new(a, a + len));
            prop_assert_eq!(state.date_range(), committed);
        }
    }

    #[test]
    fn test_speed_events() {
        let mut state = create_test_state();
        state.apply(InputEvent::Faster);
        assert!((state.playback().speed() - 2.0).abs() < f64::EPSILON);
        state.apply(InputEvent::SetSpeed(0.5));
        state.apply(InputEvent::Slower);
        assert!((state.playback().speed() - 0.25).abs() < f64::EPSILON);
    }
}
