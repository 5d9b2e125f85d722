//! Status bar widget for the top of the TUI.
//!
//! Format: `▶ Playing │ start → end (length) │ step hour │ 2x │ Earth view`

use deeptime_engine::{format_span, Granularity, LabelMode, TimelineState};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::{GlyphSet, Theme};

/// Status bar content.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusBarContent {
    pub playing: bool,
    /// Selection as `start → end (length)`.
    pub range: String,
    pub granularity: Granularity,
    pub speed: f64,
    pub label_mode: LabelMode,
}

impl StatusBarContent {
    pub fn from_state(state: &TimelineState, glyphs: GlyphSet) -> Self {
        let range = state.date_range();
        Self {
            playing: state.playback().is_playing(),
            range: format!(
                "{} {} {} ({})",
                state.label(range.start()),
                glyphs.arrow(),
                state.label(range.end()),
                format_span(range.len())
            ),
            granularity: state.granularity(),
            speed: state.playback().speed(),
            label_mode: state.label_mode(),
        }
    }

    /// Create a "terminal too small" warning.
    pub fn too_small() -> Self {
        Self {
            playing: false,
            range: "Terminal too small".into(),
            granularity: Granularity::default(),
            speed: 1.0,
            label_mode: LabelMode::default(),
        }
    }
}

/// Status bar widget.
pub struct StatusBar<'a> {
    content: &'a StatusBarContent,
    theme: &'a Theme,
    glyphs: GlyphSet,
}

impl<'a> StatusBar<'a> {
    pub fn new(content: &'a StatusBarContent, theme: &'a Theme, glyphs: GlyphSet) -> Self {
        Self {
            content,
            theme,
            glyphs,
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let sep = || Span::styled(self.glyphs.separator(), Style::default().fg(self.theme.muted));
        let (icon, phase, color) = if self.content.playing {
            (self.glyphs.playing(), "Playing", self.theme.success)
        } else {
            (self.glyphs.paused(), "Paused", self.theme.subtext)
        };
        let mode = match self.content.label_mode {
            LabelMode::Calendar => "Calendar",
            LabelMode::EarthView => "Earth view",
        };

        let line = Line::from(vec![
            Span::styled(format!("{icon} "), Style::default().fg(color)),
            Span::styled(phase, Style::default().fg(color)),
            sep(),
            Span::styled(&self.content.range, Style::default().fg(self.theme.text)),
            sep(),
            Span::styled(
                format!("step {}", self.content.granularity),
                Style::default().fg(self.theme.info),
            ),
            sep(),
            Span::styled(
                format!("{}x", self.content.speed),
                Style::default().fg(self.theme.secondary),
            ),
            sep(),
            Span::styled(mode, Style::default().fg(self.theme.subtext)),
        ]);
        Paragraph::new(line)
            .style(Style::default().bg(self.theme.surface))
            .render(area, buf);
    }
}
