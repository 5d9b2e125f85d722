//! Test utilities for deeptime-tui snapshot and integration testing.
//!
//! Everything here is pinned to a fixed "now" so rendered labels are stable.

use crate::app::App;
pub use crate::headless::buffer_to_string;
use crate::theme::GlyphMode;
use crate::view;
use deeptime_engine::{Minutes, TimelineOptions};
use ratatui::{backend::TestBackend, buffer::Buffer, layout::Rect, Terminal};

/// Default terminal width for tests.
pub const TEST_WIDTH: u16 = 80;

/// Default terminal height for tests.
pub const TEST_HEIGHT: u16 = 24;

/// 2024-01-01T00:00Z.
pub const TEST_NOW: Minutes = 28_401_120;

/// Create a test terminal with the default dimensions (80x24).
pub fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(TEST_WIDTH, TEST_HEIGHT);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Timeline options with a fixed present.
pub fn test_options() -> TimelineOptions {
    TimelineOptions {
        now: TEST_NOW,
        track_width: TEST_WIDTH - 4,
        ..TimelineOptions::default()
    }
}

/// Create an ASCII test app laid out on an 80x24 screen.
pub fn create_test_app() -> App {
    let mut app = App::new(&test_options(), GlyphMode::Ascii);
    app.set_area(Rect::new(0, 0, TEST_WIDTH, TEST_HEIGHT));
    app
}

/// Render the whole app on an 80x24 buffer and return it as a string.
pub fn render_app_to_string(app: &App) -> String {
    let area = Rect::new(0, 0, TEST_WIDTH, TEST_HEIGHT);
    let mut buffer = Buffer::empty(area);
    view::render(app, area, &mut buffer);
    buffer_to_string(&buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_test_terminal() {
        let terminal = create_test_terminal();
        let size = terminal.size().unwrap();
        assert_eq!(size.width, TEST_WIDTH);
        assert_eq!(size.height, TEST_HEIGHT);
    }

    #[test]
    fn test_create_test_app() {
        let app = create_test_app();
        assert_eq!(app.widget.state().track_width(), TEST_WIDTH - 4);
        assert_eq!(app.widget.state().now(), TEST_NOW);
    }

    #[test]
    fn test_buffer_to_string() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        buffer.set_string(0, 0, "Hello", ratatui::style::Style::default());
        buffer.set_string(0, 1, "World", ratatui::style::Style::default());

        assert_eq!(buffer_to_string(&buffer), "Hello\nWorld\n");
    }
}
