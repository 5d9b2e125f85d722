//! Headless mode for the deeptime TUI.
//!
//! Runs the timeline without a real terminal so it can be scripted and
//! tested. Actions are sent through a channel and the rendered screen plus
//! the committed selection are published after each frame.

use crate::app::{App, Mode};
use crate::event::Action;
use crate::theme::GlyphMode;
use crate::view;
use deeptime_engine::{DateRange, TimelineOptions};
use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Default terminal dimensions for headless mode.
pub const DEFAULT_WIDTH: u16 = 80;
pub const DEFAULT_HEIGHT: u16 = 24;

/// State captured from the headless TUI after each render.
#[derive(Debug, Clone, Default)]
pub struct HeadlessState {
    /// Text contents of the terminal buffer.
    pub screen_contents: String,
    /// The committed selection.
    pub date_range: DateRange,
    /// Callback notifications seen so far.
    pub change_count: usize,
    pub mode: Mode,
    pub should_quit: bool,
    pub show_help: bool,
}

/// Input accepted by a headless instance.
#[derive(Debug, Clone)]
pub enum HeadlessInput {
    Action(Action),
    /// Type into the active date field and press Enter.
    Text(String),
}

/// Handle to control a headless TUI instance.
pub struct HeadlessHandle {
    input_tx: mpsc::UnboundedSender<HeadlessInput>,
    state_rx: watch::Receiver<HeadlessState>,
}

impl HeadlessHandle {
    /// Send an action. Returns `true` if the loop is still running.
    pub fn send_action(&self, action: Action) -> bool {
        self.input_tx.send(HeadlessInput::Action(action)).is_ok()
    }

    /// Submit text to the date field being edited.
    pub fn send_text(&self, text: impl Into<String>) -> bool {
        self.input_tx.send(HeadlessInput::Text(text.into())).is_ok()
    }

    /// Get the current state of the TUI.
    pub fn state(&self) -> HeadlessState {
        self.state_rx.borrow().clone()
    }

    /// Wait until a condition is met on the state.
    ///
    /// Returns the state when the condition is met, or `None` if timed out.
    pub async fn wait_for<F>(&mut self, condition: F, timeout: Duration) -> Option<HeadlessState>
    where
        F: Fn(&HeadlessState) -> bool,
    {
        let deadline = tokio::time::Instant::now() + timeout;

        loop {
            let state = self.state();
            if condition(&state) {
                return Some(state);
            }

            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                return None;
            }

            if tokio::time::timeout(remaining, self.state_rx.changed())
                .await
                .is_err()
            {
                return None;
            }
        }
    }

    /// Wait for specific text to appear on screen.
    pub async fn wait_for_text(&mut self, text: &str, timeout: Duration) -> Option<HeadlessState> {
        self.wait_for(|s| s.screen_contents.contains(text), timeout)
            .await
    }

    pub fn has_quit(&self) -> bool {
        self.state().should_quit
    }
}

/// Configuration for headless mode.
#[derive(Debug, Clone)]
pub struct HeadlessConfig {
    pub width: u16,
    pub height: u16,
    /// Tick rate in milliseconds.
    pub tick_rate_ms: u64,
    pub glyphs: GlyphMode,
}

impl Default for HeadlessConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tick_rate_ms: 50, // Faster tick rate for testing
            glyphs: GlyphMode::Ascii,
        }
    }
}

/// Run the TUI in headless mode.
///
/// Returns a handle to control the TUI and a join handle for the background task.
pub fn run_tui_headless(
    options: TimelineOptions,
    config: HeadlessConfig,
) -> (HeadlessHandle, JoinHandle<Result<(), String>>) {
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(HeadlessState::default());

    let task = tokio::spawn(async move {
        run_headless_loop(&options, config, input_rx, state_tx)
            .await
            .map_err(|e| e.to_string())
    });

    (
        HeadlessHandle {
            input_tx,
            state_rx,
        },
        task,
    )
}

async fn run_headless_loop(
    options: &TimelineOptions,
    config: HeadlessConfig,
    mut input_rx: mpsc::UnboundedReceiver<HeadlessInput>,
    state_tx: watch::Sender<HeadlessState>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let backend = TestBackend::new(config.width, config.height);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(options, config.glyphs);
    app.set_area(terminal.get_frame().area());

    let tick_duration = Duration::from_millis(config.tick_rate_ms);

    loop {
        terminal.draw(|frame| view::render(&app, frame.area(), frame.buffer_mut()))?;

        let _ = state_tx.send(HeadlessState {
            screen_contents: buffer_to_string(terminal.backend().buffer()),
            date_range: app.widget.date_range(),
            change_count: app.change_count,
            mode: app.mode,
            should_quit: app.should_quit,
            show_help: app.show_help,
        });

        if app.should_quit {
            break;
        }

        let input = tokio::select! {
            input = input_rx.recv() => match input {
                Some(input) => Some(input),
                // Every handle dropped: nobody is left to drive the loop
                None => break,
            },
            () = tokio::time::sleep(tick_duration) => None,
        };

        match input {
            Some(HeadlessInput::Action(action)) => app.handle_action(action),
            Some(HeadlessInput::Text(text)) => {
                if let Mode::Editing(_) = app.mode {
                    app.input.clear();
                    app.input.insert_str(&text);
                    app.handle_key(crossterm::event::KeyEvent::from(
                        crossterm::event::KeyCode::Enter,
                    ));
                }
            }
            None => app.tick(std::time::Instant::now()),
        }
    }

    Ok(())
}

/// Convert a terminal buffer to text, one line per row.
///
/// Trailing whitespace is trimmed from each line.
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut result = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                result.push_str(cell.symbol());
            }
        }
        while result.ends_with(' ') {
            result.pop();
        }
        result.push('\n');
    }

    if result.ends_with('\n') {
        result.pop();
    }

    result
}
