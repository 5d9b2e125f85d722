//! Application state and update logic for the deeptime TUI.

use crate::event::{key_to_action, Action};
use crate::theme::{GlyphMode, GlyphSet, Theme};
use crate::view;
use crate::widgets::DateInputState;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use deeptime_engine::{
    DateField, DateRange, InputEvent, Minutes, TimelineOptions, TimelineWidget, Transition,
};
use ratatui::layout::Rect;
use std::sync::mpsc;
use std::time::Instant;
use tracing::debug;

/// What keystrokes currently drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Keys map to timeline actions.
    #[default]
    Timeline,
    /// Keys edit the text for one end of the selection.
    Editing(DateField),
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Timeline => "Timeline",
            Self::Editing(DateField::Start) => "Editing start",
            Self::Editing(DateField::End) => "Editing end",
        }
    }
}

/// Main application state.
pub struct App {
    pub widget: TimelineWidget,
    /// Selections reported through the widget's change callback.
    changes: mpsc::Receiver<DateRange>,
    /// Most recent selection reported by the callback.
    pub last_change: Option<DateRange>,
    /// Number of callback notifications so far.
    pub change_count: usize,
    pub mode: Mode,
    pub input: DateInputState,
    pub show_help: bool,
    pub should_quit: bool,
    pub theme: Theme,
    pub glyphs: GlyphSet,
    /// Last known terminal area, used for mouse hit testing.
    area: Rect,
    last_tick: Option<Instant>,
}

impl App {
    pub fn new(options: &TimelineOptions, glyph_mode: GlyphMode) -> Self {
        let (tx, changes) = mpsc::channel();
        let widget = TimelineWidget::new(options).on_date_range_change(move |range| {
            // The receiver only goes away with the app itself.
            let _ = tx.send(range);
        });
        Self {
            widget,
            changes,
            last_change: None,
            change_count: 0,
            mode: Mode::default(),
            input: DateInputState::new(),
            show_help: false,
            should_quit: false,
            theme: match glyph_mode {
                // ASCII terminals rarely do true color either
                GlyphMode::Ascii => Theme::basic(),
                GlyphMode::Unicode => Theme::default(),
            },
            glyphs: GlyphSet::new(glyph_mode),
            area: Rect::default(),
            last_tick: None,
        }
    }

    /// Record the terminal area and fit the tracks to it.
    pub fn set_area(&mut self, area: Rect) {
        if area == self.area {
            return;
        }
        self.area = area;
        let width = view::layout(area).bottom_track.width;
        self.dispatch(InputEvent::Resize { width });
    }

    /// Feed an event to the widget and collect any change notifications.
    pub fn dispatch(&mut self, event: InputEvent) -> Transition {
        let transition = self.widget.dispatch(event);
        self.drain_changes();
        transition
    }

    /// Commit a selection as a host would.
    pub fn set_date_range(&mut self, start: Minutes, end: Minutes) -> DateRange {
        let range = self.widget.set_date_range(start, end);
        self.drain_changes();
        range
    }

    fn drain_changes(&mut self) {
        while let Ok(range) = self.changes.try_recv() {
            self.last_change = Some(range);
            self.change_count += 1;
        }
    }

    /// Handle a key press in the current mode.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if let Mode::Editing(field) = self.mode {
            if !key.modifiers.contains(KeyModifiers::CONTROL) {
                self.handle_edit_key(field, key);
                return;
            }
        }
        self.handle_action(key_to_action(key));
    }

    /// Handle a key action.
    pub fn handle_action(&mut self, action: Action) {
        // Help overlay swallows everything except its own dismissal
        if self.show_help {
            if matches!(action, Action::Help | Action::Back | Action::Quit) {
                self.show_help = false;
            }
            return;
        }

        let event = match action {
            Action::Quit => {
                self.should_quit = true;
                return;
            }
            Action::Help => {
                self.show_help = true;
                return;
            }
            Action::Back => {
                self.cancel_edit();
                return;
            }
            Action::EditStart => {
                self.begin_edit(DateField::Start);
                return;
            }
            Action::EditEnd => {
                self.begin_edit(DateField::End);
                return;
            }
            Action::None => return,
            Action::StepBackward => InputEvent::StepBackward,
            Action::StepForward => InputEvent::StepForward,
            Action::Finer => InputEvent::Finer,
            Action::Coarser => InputEvent::Coarser,
            Action::TogglePlayback => {
                self.last_tick = None;
                InputEvent::TogglePlayback
            }
            Action::Faster => InputEvent::Faster,
            Action::Slower => InputEvent::Slower,
            Action::ToggleEarthView => InputEvent::ToggleEarthView,
            Action::ZoomToSelection => InputEvent::ZoomToSelection,
        };
        self.dispatch(event);
    }

    fn begin_edit(&mut self, field: DateField) {
        self.input.clear();
        self.mode = Mode::Editing(field);
    }

    fn cancel_edit(&mut self) {
        if self.mode != Mode::Timeline {
            self.input.clear();
            self.mode = Mode::Timeline;
        }
    }

    fn handle_edit_key(&mut self, field: DateField, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.commit_edit(field),
            KeyCode::Esc => self.cancel_edit(),
            KeyCode::Char(c) => self.input.insert(c),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::Delete => self.input.delete(),
            KeyCode::Left => self.input.move_left(),
            KeyCode::Right => self.input.move_right(),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            KeyCode::Up => self.input.history_prev(),
            KeyCode::Down => self.input.history_next(),
            _ => {}
        }
    }

    fn commit_edit(&mut self, field: DateField) {
        let text = self.input.submit();
        match self.dispatch(InputEvent::TextCommit {
            field,
            text: text.clone(),
        }) {
            Transition::Rejected(_) => {
                // Keep editing with the text intact so it can be fixed
                self.input.insert_str(&text);
            }
            _ => self.mode = Mode::Timeline,
        }
    }

    /// Handle a mouse event against the current layout.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.show_help {
            return;
        }
        let layout = view::layout(self.area);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some((slider, x)) = layout.hit(mouse.column, mouse.row) {
                    self.dispatch(InputEvent::PointerDown { slider, x });
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let x = i32::from(mouse.column) - i32::from(layout.bottom_track.x);
                self.dispatch(InputEvent::PointerMove { x });
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.dispatch(InputEvent::PointerUp);
            }
            MouseEventKind::ScrollUp => {
                self.dispatch(InputEvent::StepForward);
            }
            MouseEventKind::ScrollDown => {
                self.dispatch(InputEvent::StepBackward);
            }
            _ => {}
        }
    }

    /// Advance playback by the wall time since the previous tick.
    pub fn tick(&mut self, now: Instant) {
        let elapsed = self
            .last_tick
            .map_or(0.0, |last| now.saturating_duration_since(last).as_secs_f64());
        self.last_tick = Some(now);
        if elapsed > 0.0 && self.widget.state().playback().is_playing() {
            self.dispatch(InputEvent::Tick { elapsed });
        }
    }

    /// Move the present to the wall clock.
    pub fn refresh_clock(&mut self, now: Minutes) {
        if self.dispatch(InputEvent::SetNow(now)) != Transition::Idle {
            debug!(now, "clock advanced");
        }
    }
}
