//! Full-screen timeline view and its layout.

use deeptime_engine::{DateField, Slider, TimelineState};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use crate::app::{App, Mode};
use crate::theme::Theme;
use crate::widgets::{
    hints_for_mode, DateInput, FooterHints, SliderTrack, StatusBar, StatusBarContent,
};

/// Smallest area the full view is drawn in.
pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 12;

/// Horizontal inset of the timeline rows.
const INSET: u16 = 2;

/// Rows of the timeline view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimelineLayout {
    pub status: Rect,
    pub top_labels: Rect,
    pub top_track: Rect,
    pub bottom_labels: Rect,
    pub bottom_track: Rect,
    pub fields: Rect,
    pub era: Rect,
    pub message: Rect,
    pub footer: Rect,
}

impl TimelineLayout {
    /// Slider and track-relative column under a screen cell.
    pub fn hit(&self, column: u16, row: u16) -> Option<(Slider, i32)> {
        [(Slider::Top, self.top_track), (Slider::Bottom, self.bottom_track)]
            .into_iter()
            .find(|(_, track)| {
                row == track.y && column >= track.x && column < track.x + track.width
            })
            .map(|(slider, track)| (slider, i32::from(column - track.x)))
    }
}

fn inset(area: Rect) -> Rect {
    Rect {
        x: area.x + INSET.min(area.width / 2),
        width: area.width.saturating_sub(2 * INSET),
        ..area
    }
}

/// Split the screen into timeline rows.
pub fn layout(area: Rect) -> TimelineLayout {
    let [status, _, top_labels, top_track, _, bottom_labels, bottom_track, _, fields, era, message, _, footer] =
        Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

    TimelineLayout {
        status,
        top_labels: inset(top_labels),
        top_track: inset(top_track),
        bottom_labels: inset(bottom_labels),
        bottom_track: inset(bottom_track),
        fields: inset(fields),
        era: inset(era),
        message: inset(message),
        footer,
    }
}

/// Render the whole application.
pub fn render(app: &App, area: Rect, buf: &mut Buffer) {
    let state = app.widget.state();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let content = StatusBarContent::too_small();
        StatusBar::new(&content, &app.theme, app.glyphs).render(area, buf);
        return;
    }

    let rows = layout(area);
    let content = StatusBarContent::from_state(state, app.glyphs);
    StatusBar::new(&content, &app.theme, app.glyphs).render(rows.status, buf);

    render_labels(state, Slider::Top, "domain", &app.theme, rows.top_labels, buf);
    SliderTrack::new(state, Slider::Top, &app.theme, app.glyphs).render(rows.top_track, buf);
    render_labels(state, Slider::Bottom, "context", &app.theme, rows.bottom_labels, buf);
    SliderTrack::new(state, Slider::Bottom, &app.theme, app.glyphs).render(rows.bottom_track, buf);

    render_fields(app, rows.fields, buf);
    render_era(state, &app.theme, rows.era, buf);
    render_message(app, rows.message, buf);

    let hints = hints_for_mode(app.mode);
    FooterHints::new(&hints, app.mode.label(), &app.theme, app.glyphs).render(rows.footer, buf);

    if app.show_help {
        render_help_overlay(&app.theme, area, buf);
    }
}

/// Track span labels: start on the left, end on the right, caption centered.
fn render_labels(
    state: &TimelineState,
    slider: Slider,
    caption: &str,
    theme: &Theme,
    area: Rect,
    buf: &mut Buffer,
) {
    let span = state.track_span(slider);
    let label = Style::default().fg(theme.subtext);
    Paragraph::new(Line::styled(caption, Style::default().fg(theme.muted)))
        .alignment(Alignment::Center)
        .render(area, buf);
    Paragraph::new(Line::styled(state.label(span.start()), label)).render(area, buf);
    Paragraph::new(Line::styled(state.label(span.end()), label))
        .alignment(Alignment::Right)
        .render(area, buf);
}

fn render_fields(app: &App, area: Rect, buf: &mut Buffer) {
    let state = app.widget.state();
    let range = state.date_range();
    let [start_area, end_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(area);

    for (field, value, area) in [
        (DateField::Start, range.start(), start_area),
        (DateField::End, range.end(), end_area),
    ] {
        let title = match field {
            DateField::Start => "Start",
            DateField::End => "End",
        };
        let current = state.label(value);
        if app.mode == Mode::Editing(field) {
            DateInput::new(&app.input, title, &app.theme)
                .placeholder(&current)
                .render(area, buf);
        } else {
            Paragraph::new(Line::from(vec![
                Span::styled(format!("{title} "), Style::default().fg(app.theme.muted)),
                Span::styled(current, Style::default().fg(app.theme.text)),
            ]))
            .render(area, buf);
        }
    }
}

fn render_era(state: &TimelineState, theme: &Theme, area: Rect, buf: &mut Buffer) {
    let granularity = state.granularity();
    Paragraph::new(Line::from(vec![
        Span::styled("Era ", Style::default().fg(theme.muted)),
        Span::styled(state.era_text(), Style::default().fg(theme.secondary)),
        Span::styled(
            format!("  ({} {} steps)", state.steps_between_handles(), granularity.short()),
            Style::default().fg(theme.muted),
        ),
    ]))
    .render(area, buf);
}

fn render_message(app: &App, area: Rect, buf: &mut Buffer) {
    let line = if let Some(err) = app.widget.state().last_rejection() {
        Line::styled(
            format!("{} {err}", app.glyphs.error()),
            Style::default().fg(app.theme.error),
        )
    } else if matches!(app.mode, Mode::Editing(_)) {
        Line::styled(
            "e.g. 2024-05-01 12:30, 1200 BCE, 66 Ma, 4.5 billion years ago, now-3h",
            Style::default().fg(app.theme.muted),
        )
    } else {
        return;
    };
    Paragraph::new(line).render(area, buf);
}

/// Key reference shown over the timeline.
const HELP_KEYS: &[(&str, &str)] = &[
    ("←/→  h/l", "step selection"),
    ("[ ]  - +", "finer / coarser step"),
    ("space", "play / pause"),
    ("< >", "slower / faster"),
    ("v", "toggle Earth view"),
    ("z", "zoom context to selection"),
    ("s / e", "type start / end date"),
    ("mouse", "drag handles, scroll to step"),
    ("?", "close help"),
    ("q", "quit"),
];

fn render_help_overlay(theme: &Theme, area: Rect, buf: &mut Buffer) {
    let height = (HELP_KEYS.len() as u16 + 2).min(area.height);
    let width = 44.min(area.width);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    Clear.render(popup, buf);
    let lines: Vec<Line> = HELP_KEYS
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(
                    format!("{key:<10}"),
                    Style::default().fg(theme.primary).add_modifier(Modifier::BOLD),
                ),
                Span::styled(*action, Style::default().fg(theme.text)),
            ])
        })
        .collect();
    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.primary))
                .title(" Keys "),
        )
        .style(Style::default().bg(theme.surface))
        .render(popup, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Action;
    use crate::test_utils::{create_test_app, render_app_to_string, TEST_HEIGHT, TEST_WIDTH};

    #[test]
    fn test_layout_rows() {
        let rows = layout(Rect::new(0, 0, TEST_WIDTH, TEST_HEIGHT));
        assert_eq!(rows.status, Rect::new(0, 0, 80, 1));
        assert_eq!(rows.top_track, Rect::new(2, 3, 76, 1));
        assert_eq!(rows.bottom_track, Rect::new(2, 6, 76, 1));
        assert_eq!(rows.fields.y, 8);
        assert_eq!(rows.footer, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn test_hit_testing() {
        let rows = layout(Rect::new(0, 0, TEST_WIDTH, TEST_HEIGHT));
        assert_eq!(rows.hit(2, 3), Some((Slider::Top, 0)));
        assert_eq!(rows.hit(77, 6), Some((Slider::Bottom, 75)));
        assert_eq!(rows.hit(78, 6), None);
        assert_eq!(rows.hit(10, 4), None);
    }

    #[test]
    fn test_render_main_view() {
        let app = create_test_app();
        let screen = render_app_to_string(&app);
        let lines: Vec<&str> = screen.lines().collect();

        assert!(lines[0].starts_with("= Paused | 2024-01-01 00:00 -> 2024-01-02 00:00 (1 day)"));
        assert!(lines[2].contains("domain"));
        assert!(lines[5].contains("2023-12-31 00:00"));
        assert!(lines[5].contains("2024-01-03 00:00"));
        assert_eq!(lines[6].matches('O').count(), 2);
        assert!(lines[8].contains("Start 2024-01-01 00:00"));
        assert!(lines[8].contains("End 2024-01-02 00:00"));
        assert!(lines[9].contains("Era Contemporary"));
        assert!(lines[9].contains("(1440 min steps)"));
        assert!(lines[23].starts_with("Timeline"));
    }

    #[test]
    fn test_render_editing_and_rejection() {
        let mut app = create_test_app();
        app.handle_action(Action::EditEnd);
        app.input.insert_str("soon");
        let screen = render_app_to_string(&app);
        assert!(screen.contains("End > soon_"));
        assert!(screen.contains("e.g. 2024-05-01"));

        app.handle_key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Enter,
            crossterm::event::KeyModifiers::NONE,
        ));
        let screen = render_app_to_string(&app);
        assert!(screen.contains("[X] unrecognized date: soon"));
    }

    #[test]
    fn test_render_help_overlay() {
        let mut app = create_test_app();
        app.handle_action(Action::Help);
        let screen = render_app_to_string(&app);
        assert!(screen.contains(" Keys "));
        assert!(screen.contains("zoom context to selection"));
    }

    #[test]
    fn test_render_earth_view() {
        let mut app = create_test_app();
        app.handle_action(Action::ToggleEarthView);
        let screen = render_app_to_string(&app);
        assert!(screen.contains("Start now"));
        assert!(screen.contains("End in 1 day"));
        assert!(screen.contains("Earth view"));
    }

    #[test]
    fn test_render_too_small() {
        let app = create_test_app();
        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        render(&app, area, &mut buf);
        let screen = crate::test_utils::buffer_to_string(&buf);
        assert!(screen.contains("Terminal too small"));
    }
}
