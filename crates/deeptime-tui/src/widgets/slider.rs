//! One row of a range slider: track, selected span, handles and the present.

use deeptime_engine::{Handle, Slider, TimelineState};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
};

use crate::theme::{GlyphSet, Theme};

/// Draws a slider track from [`TimelineState`] geometry.
///
/// The area should be as wide as the state's track width; extra columns are
/// left blank and missing ones are clipped.
pub struct SliderTrack<'a> {
    state: &'a TimelineState,
    slider: Slider,
    theme: &'a Theme,
    glyphs: GlyphSet,
}

impl<'a> SliderTrack<'a> {
    pub fn new(state: &'a TimelineState, slider: Slider, theme: &'a Theme, glyphs: GlyphSet) -> Self {
        Self {
            state,
            slider,
            theme,
            glyphs,
        }
    }

    /// Handle being dragged on this slider, if any.
    fn grabbed(&self) -> Option<Handle> {
        match self.state.active_drag() {
            Some((slider, handle)) if slider == self.slider => handle,
            _ => None,
        }
    }
}

impl ratatui::widgets::Widget for SliderTrack<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 1 || area.width < 1 {
            return;
        }
        let width = area.width.min(self.state.track_width());
        let (start_x, end_x) = self.state.handle_offsets(self.slider);
        let now_x = self.state.now_offset(self.slider);
        let grabbed = self.grabbed();
        let last = f64::from(width.saturating_sub(1).max(1));

        for col in 0..width {
            let is_past = self.state.is_past(self.slider, col);
            let color = self.theme.gradient(is_past, f64::from(col) / last);

            let (symbol, style) = if col == start_x || col == end_x {
                let held = (col == start_x && grabbed == Some(Handle::Start))
                    || (col == end_x && grabbed == Some(Handle::End));
                let fg = if held {
                    self.theme.warning
                } else {
                    self.theme.primary
                };
                (
                    self.glyphs.handle(),
                    Style::default().fg(fg).add_modifier(Modifier::BOLD),
                )
            } else if start_x < col && col < end_x {
                (
                    self.glyphs.selected(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )
            } else if now_x == Some(col) {
                (self.glyphs.now(), Style::default().fg(self.theme.now))
            } else {
                (
                    self.glyphs.track(),
                    Style::default().fg(color).add_modifier(Modifier::DIM),
                )
            };

            if let Some(cell) = buf.cell_mut((area.x + col, area.y)) {
                cell.set_symbol(symbol).set_style(style);
            }
        }
    }
}
