//! Single-line text input for typed dates.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::theme::Theme;

/// Editing state for a date field. The cursor is a char index.
#[derive(Debug, Clone, Default)]
pub struct DateInputState {
    content: String,
    cursor: usize,
    /// Previously committed entries, oldest first.
    history: Vec<String>,
    /// Offset from the newest history entry while browsing.
    history_index: Option<usize>,
}

impl DateInputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
        self.history_index = None;
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.content
            .char_indices()
            .nth(cursor)
            .map_or(self.content.len(), |(i, _)| i)
    }

    fn char_len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn insert(&mut self, ch: char) {
        if ch.is_control() {
            return;
        }
        let idx = self.byte_index(self.cursor);
        self.content.insert(idx, ch);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        for ch in s.chars() {
            self.insert(ch);
        }
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let idx = self.byte_index(self.cursor);
            self.content.remove(idx);
        }
    }

    /// Delete the character at the cursor.
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let idx = self.byte_index(self.cursor);
            self.content.remove(idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Take the content for committing and remember it in history.
    pub fn submit(&mut self) -> String {
        let content = std::mem::take(&mut self.content);
        self.cursor = 0;
        self.history_index = None;
        let trimmed = content.trim();
        if !trimmed.is_empty() && self.history.last().map(String::as_str) != Some(trimmed) {
            self.history.push(trimmed.to_string());
        }
        content
    }

    /// Recall the previous history entry.
    pub fn history_prev(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let next = self
            .history_index
            .map_or(0, |i| (i + 1).min(self.history.len() - 1));
        self.recall(next);
    }

    /// Recall the next history entry, or clear past the newest one.
    pub fn history_next(&mut self) {
        match self.history_index {
            Some(0) | None => {
                self.content.clear();
                self.cursor = 0;
                self.history_index = None;
            }
            Some(i) => self.recall(i - 1),
        }
    }

    fn recall(&mut self, index: usize) {
        if let Some(entry) = self.history.iter().rev().nth(index) {
            self.content.clone_from(entry);
            self.cursor = self.char_len();
            self.history_index = Some(index);
        }
    }
}

/// Renders a [`DateInputState`] as `Label > text_`.
pub struct DateInput<'a> {
    state: &'a DateInputState,
    label: &'a str,
    placeholder: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> DateInput<'a> {
    pub fn new(state: &'a DateInputState, label: &'a str, theme: &'a Theme) -> Self {
        Self {
            state,
            label,
            placeholder: None,
            theme,
        }
    }

    #[must_use]
    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }
}

impl Widget for DateInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 1 {
            return;
        }
        let active = Style::default()
            .fg(self.theme.primary)
            .add_modifier(Modifier::BOLD);
        let text = Style::default().fg(self.theme.text);

        let mut spans = vec![
            Span::styled(format!("{} ", self.label), active),
            Span::styled("> ", active),
        ];

        if self.state.is_empty() {
            spans.push(Span::styled("_", active));
            if let Some(placeholder) = self.placeholder {
                spans.push(Span::styled(
                    format!(" {placeholder}"),
                    Style::default().fg(self.theme.muted),
                ));
            }
        } else {
            let before: String = self.state.content.chars().take(self.state.cursor).collect();
            let after: String = self.state.content.chars().skip(self.state.cursor).collect();
            spans.push(Span::styled(before, text));
            if after.is_empty() {
                spans.push(Span::styled("_", active));
            } else {
                spans.push(Span::styled("|", active));
                spans.push(Span::styled(after, text));
            }
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
