//! Heading level to color mapping.

/// Color used when the caller supplies no palette and no override
pub const DEFAULT_COLOR: &str = "#000000";

/// Ordered colors, one per heading level, plus the empty-palette fallback
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<String>,
    default_color: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(Vec::new(), DEFAULT_COLOR)
    }
}

impl Palette {
    pub fn new(colors: Vec<String>, default_color: impl Into<String>) -> Self {
        Self {
            colors,
            default_color: default_color.into(),
        }
    }

    /// Color for a 1-based heading level
    ///
    /// Levels past the end of the palette reuse the last color; level 0 is
    /// treated as level 1.
    pub fn color_for(&self, level: u8) -> &str {
        if self.colors.is_empty() {
            return &self.default_color;
        }

        let index = (level.max(1) as usize).min(self.colors.len()) - 1;
        &self.colors[index]
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn default_color(&self) -> &str {
        &self.default_color
    }
}
