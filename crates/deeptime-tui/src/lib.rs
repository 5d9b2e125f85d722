//! deeptime-tui: Terminal UI for the deep time timeline explorer
//!
//! This crate provides the terminal front end for the timeline widget, including:
//! - The dual-slider timeline view with mouse and keyboard control
//! - Typed start/end date entry
//! - Headless mode for testing and automation

mod app;
mod event;
pub mod headless;
#[cfg(test)]
pub mod test_utils;
mod theme;
mod view;
mod widgets;

pub use app::{App, Mode};
pub use deeptime_engine;
pub use event::{Action, Event, EventHandler};
pub use theme::GlyphMode;

use crossterm::{
    cursor::Show as ShowCursor,
    event::{DisableMouseCapture, EnableMouseCapture, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use deeptime_engine::{now_minutes, TimelineOptions};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, stdout};
use std::time::Instant;
use tracing::info;

/// Playback and clock refresh rate.
const TICK_RATE_MS: u64 = 100;

/// RAII guard for terminal state restoration.
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, ShowCursor);
    }
}

/// Run the TUI application.
///
/// Sets up the terminal, runs the event loop and restores the terminal on exit.
pub async fn run_tui(
    options: &TimelineOptions,
    glyphs: GlyphMode,
) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let _guard = TerminalGuard;

    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(options, glyphs);
    let mut events = EventHandler::new(TICK_RATE_MS);

    let result = run_loop(&mut terminal, &mut app, &mut events).await;
    if let Some(range) = app.last_change {
        info!(start = range.start(), end = range.end(), "final selection");
    }

    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let size = terminal.size()?;
        app.set_area(Rect::new(0, 0, size.width, size.height));

        terminal.draw(|frame| view::render(app, frame.area(), frame.buffer_mut()))?;

        let Some(event) = events.next().await else {
            break;
        };
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            Event::Tick => {
                app.tick(Instant::now());
                app.refresh_clock(now_minutes());
            }
            // Picked up by set_area on the next pass
            Event::Key(_) | Event::Resize(..) => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Returns the TUI version.
pub fn tui_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
