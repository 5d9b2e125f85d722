//! Track glyphs with Unicode and ASCII fallback.

/// Glyph mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlyphMode {
    /// Box-drawing and geometric symbols.
    #[default]
    Unicode,
    /// ASCII-only fallback (maximum compatibility, also used with `NO_COLOR`).
    Ascii,
}

/// Glyph set based on configured mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlyphSet {
    mode: GlyphMode,
}

impl GlyphSet {
    pub fn new(mode: GlyphMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> GlyphMode {
        self.mode
    }

    // === Track ===

    pub fn track(&self) -> &'static str {
        match self.mode {
            GlyphMode::Unicode => "─",
            GlyphMode::Ascii => "-",
        }
    }

    /// Track between the two handles.
    pub fn selected(&self) -> &'static str {
        match self.mode {
            GlyphMode::Unicode => "━",
            GlyphMode::Ascii => "=",
        }
    }

    pub fn handle(&self) -> &'static str {
        match self.mode {
            GlyphMode::Unicode => "●",
            GlyphMode::Ascii => "O",
        }
    }

    /// Column of the present.
    pub fn now(&self) -> &'static str {
        match self.mode {
            GlyphMode::Unicode => "┃",
            GlyphMode::Ascii => "|",
        }
    }

    // === Status ===

    pub fn playing(&self) -> &'static str {
        match self.mode {
            GlyphMode::Unicode => "▶",
            GlyphMode::Ascii => ">",
        }
    }

    pub fn paused(&self) -> &'static str {
        match self.mode {
            GlyphMode::Unicode => "⏸",
            GlyphMode::Ascii => "=",
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self.mode {
            GlyphMode::Unicode => "→",
            GlyphMode::Ascii => "->",
        }
    }

    pub fn separator(&self) -> &'static str {
        match self.mode {
            GlyphMode::Unicode => " │ ",
            GlyphMode::Ascii => " | ",
        }
    }

    pub fn error(&self) -> &'static str {
        match self.mode {
            GlyphMode::Unicode => "✗",
            GlyphMode::Ascii => "[X]",
        }
    }
}
