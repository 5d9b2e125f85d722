//! Catppuccin Mocha color palette for the timeline.

use ratatui::style::Color;

/// Theme color palette.
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds
    pub base: Color,
    pub surface: Color,
    pub overlay: Color,

    // Foregrounds
    pub text: Color,
    pub subtext: Color,
    pub muted: Color,

    // Accents
    pub primary: Color,
    pub secondary: Color,

    // Semantic
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub info: Color,

    // Timeline gradient, oldest first
    pub deep_past: Color,
    pub recent_past: Color,
    pub near_future: Color,
    pub far_future: Color,
    pub now: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

impl Theme {
    /// Catppuccin Mocha theme (default dark theme).
    pub fn mocha() -> Self {
        Self {
            // Backgrounds
            base: Color::Rgb(30, 30, 46),    // #1e1e2e
            surface: Color::Rgb(49, 50, 68), // #313244
            overlay: Color::Rgb(69, 71, 90), // #45475a

            // Foregrounds
            text: Color::Rgb(205, 214, 244),    // #cdd6f4
            subtext: Color::Rgb(166, 173, 200), // #a6adc8
            muted: Color::Rgb(108, 112, 134),   // #6c7086

            // Accents
            primary: Color::Rgb(180, 190, 254),   // #b4befe (lavender)
            secondary: Color::Rgb(148, 226, 213), // #94e2d5 (teal)

            // Semantic
            success: Color::Rgb(166, 227, 161), // #a6e3a1 (green)
            warning: Color::Rgb(249, 226, 175), // #f9e2af (yellow)
            error: Color::Rgb(243, 139, 168),   // #f38ba8 (red)
            info: Color::Rgb(137, 180, 250),    // #89b4fa (blue)

            // Timeline gradient
            deep_past: Color::Rgb(235, 160, 172),   // #eba0ac (maroon)
            recent_past: Color::Rgb(250, 179, 135), // #fab387 (peach)
            near_future: Color::Rgb(116, 199, 236), // #74c7ec (sapphire)
            far_future: Color::Rgb(203, 166, 247),  // #cba6f7 (mauve)
            now: Color::Rgb(249, 226, 175),         // #f9e2af (yellow)
        }
    }

    /// Plain 16-color theme for terminals without true color.
    pub fn basic() -> Self {
        Self {
            base: Color::Reset,
            surface: Color::Reset,
            overlay: Color::DarkGray,

            text: Color::White,
            subtext: Color::Gray,
            muted: Color::DarkGray,

            primary: Color::Cyan,
            secondary: Color::Magenta,

            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            info: Color::Blue,

            deep_past: Color::Red,
            recent_past: Color::LightRed,
            near_future: Color::LightBlue,
            far_future: Color::Blue,
            now: Color::Yellow,
        }
    }

    /// Track color for a column; `t` is its position along the track in `[0, 1]`.
    ///
    /// Past columns fade from deep past to recent past, future columns from
    /// near to far future.
    pub fn gradient(&self, is_past: bool, t: f64) -> Color {
        if is_past {
            lerp(self.deep_past, self.recent_past, t)
        } else {
            lerp(self.near_future, self.far_future, t)
        }
    }
}

/// Linear blend between two RGB colors. Non-RGB colors snap to the nearer end.
fn lerp(from: Color, to: Color, t: f64) -> Color {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
            Color::Rgb(mix(r1, r2), mix(g1, g2), mix(b1, b2))
        }
        _ if t < 0.5 => from,
        _ => to,
    }
}
