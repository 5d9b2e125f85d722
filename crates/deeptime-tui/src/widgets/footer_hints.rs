//! Footer keybinding hints.
//!
//! Format: `Timeline            [space] play │ [s/e] edit │ [?] help`

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::app::Mode;
use crate::theme::{GlyphSet, Theme};

/// A single keybinding hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    /// The key or key combination (e.g., "space", "Ctrl+C").
    pub key: &'static str,
    /// The action description (e.g., "play", "quit").
    pub action: &'static str,
}

impl KeyHint {
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Hints shown for the current input mode.
pub fn hints_for_mode(mode: Mode) -> Vec<KeyHint> {
    match mode {
        Mode::Timeline => vec![
            KeyHint::new("←/→", "step"),
            KeyHint::new("[/]", "granularity"),
            KeyHint::new("space", "play"),
            KeyHint::new("s/e", "edit"),
            KeyHint::new("?", "help"),
        ],
        Mode::Editing(_) => vec![
            KeyHint::new("Enter", "apply"),
            KeyHint::new("↑/↓", "history"),
            KeyHint::new("Esc", "cancel"),
        ],
    }
}

/// Footer widget: mode on the left, hints right-aligned.
pub struct FooterHints<'a> {
    hints: &'a [KeyHint],
    mode: &'a str,
    theme: &'a Theme,
    glyphs: GlyphSet,
}

impl<'a> FooterHints<'a> {
    pub fn new(hints: &'a [KeyHint], mode: &'a str, theme: &'a Theme, glyphs: GlyphSet) -> Self {
        Self {
            hints,
            mode,
            theme,
            glyphs,
        }
    }
}

impl Widget for FooterHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut left_spans = vec![Span::styled(self.mode, Style::default().fg(self.theme.primary))];
        let mut right_spans = Vec::new();

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                right_spans.push(Span::styled(
                    self.glyphs.separator(),
                    Style::default().fg(self.theme.muted),
                ));
            }
            right_spans.push(Span::styled("[", Style::default().fg(self.theme.muted)));
            right_spans.push(Span::styled(hint.key, Style::default().fg(self.theme.primary)));
            right_spans.push(Span::styled("] ", Style::default().fg(self.theme.muted)));
            right_spans.push(Span::styled(hint.action, Style::default().fg(self.theme.subtext)));
        }

        let left_width: usize = left_spans.iter().map(|s| s.content.width()).sum();
        let right_width: usize = right_spans.iter().map(|s| s.content.width()).sum();
        let padding = usize::from(area.width).saturating_sub(left_width + right_width);
        if padding > 0 {
            left_spans.push(Span::raw(" ".repeat(padding)));
        }
        left_spans.extend(right_spans);

        Paragraph::new(Line::from(left_spans))
            .style(Style::default().bg(self.theme.surface))
            .render(area, buf);
    }
}
