use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// A named accent color with its RGB value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaletteColor {
    pub name: &'static str,
    pub rgb: (u8, u8, u8),
}

impl PaletteColor {
    pub fn color(&self) -> Color {
        Color::Rgb(self.rgb.0, self.rgb.1, self.rgb.2)
    }
}

/// Accent color families the click cycle walks through.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ColorScheme {
    #[default]
    Classic,
    Neon,
    Ember,
    Ocean,
    Mono,
}

impl ColorScheme {
    pub fn name(&self) -> &str {
        match self {
            ColorScheme::Classic => "Classic",
            ColorScheme::Neon => "Neon",
            ColorScheme::Ember => "Ember",
            ColorScheme::Ocean => "Ocean",
            ColorScheme::Mono => "Mono",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            ColorScheme::Classic => ColorScheme::Neon,
            ColorScheme::Neon => ColorScheme::Ember,
            ColorScheme::Ember => ColorScheme::Ocean,
            ColorScheme::Ocean => ColorScheme::Mono,
            ColorScheme::Mono => ColorScheme::Classic,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            ColorScheme::Classic => ColorScheme::Mono,
            ColorScheme::Neon => ColorScheme::Classic,
            ColorScheme::Ember => ColorScheme::Neon,
            ColorScheme::Ocean => ColorScheme::Ember,
            ColorScheme::Mono => ColorScheme::Ocean,
        }
    }

    /// Accent colors in click order. Classic keeps the CSS values,
    /// where "green" is the dark #008000 rather than full lime.
    pub fn colors(&self) -> &'static [PaletteColor] {
        match self {
            ColorScheme::Classic => &[
                PaletteColor { name: "red", rgb: (255, 0, 0) },
                PaletteColor { name: "green", rgb: (0, 128, 0) },
                PaletteColor { name: "blue", rgb: (0, 0, 255) },
            ],
            ColorScheme::Neon => &[
                PaletteColor { name: "magenta", rgb: (255, 0, 255) },
                PaletteColor { name: "cyan", rgb: (0, 255, 255) },
                PaletteColor { name: "lime", rgb: (57, 255, 20) },
            ],
            ColorScheme::Ember => &[
                PaletteColor { name: "orange", rgb: (255, 140, 0) },
                PaletteColor { name: "crimson", rgb: (220, 20, 60) },
                PaletteColor { name: "gold", rgb: (255, 215, 0) },
            ],
            ColorScheme::Ocean => &[
                PaletteColor { name: "teal", rgb: (0, 128, 128) },
                PaletteColor { name: "azure", rgb: (0, 127, 255) },
                PaletteColor { name: "indigo", rgb: (75, 0, 130) },
            ],
            ColorScheme::Mono => &[
                PaletteColor { name: "white", rgb: (255, 255, 255) },
                PaletteColor { name: "gray", rgb: (128, 128, 128) },
            ],
        }
    }
}

/// Tracks which accent color of the current scheme is active.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    scheme: ColorScheme,
    cursor: usize,
}

impl Palette {
    pub fn new(scheme: ColorScheme) -> Self {
        Self { scheme, cursor: 0 }
    }

    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn active(&self) -> PaletteColor {
        self.scheme.colors()[self.cursor]
    }

    /// Advances to the next accent color, wrapping at the end.
    pub fn cycle(&mut self) {
        self.cursor = (self.cursor + 1) % self.scheme.colors().len();
    }

    /// Switches scheme and restarts the cycle at its first color.
    pub fn set_scheme(&mut self, scheme: ColorScheme) {
        self.scheme = scheme;
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_order_is_red_green_blue() {
        let colors = ColorScheme::Classic.colors();
        assert_eq!(colors.len(), 3);
        assert_eq!(colors[0].name, "red");
        assert_eq!(colors[1].name, "green");
        assert_eq!(colors[2].name, "blue");
    }

    #[test]
    fn test_cycle_wraps_around() {
        let mut palette = Palette::new(ColorScheme::Classic);
        for _ in 0..4 {
            palette.cycle();
        }
        assert_eq!(palette.cursor(), 1);
        assert_eq!(palette.active().name, "green");
    }

    #[test]
    fn test_scheme_switch_resets_the_cursor() {
        let mut palette = Palette::new(ColorScheme::Classic);
        palette.cycle();
        palette.cycle();
        palette.set_scheme(ColorScheme::Ocean);
        assert_eq!(palette.cursor(), 0);
        assert_eq!(palette.active().name, "teal");
    }

    #[test]
    fn test_next_visits_every_scheme() {
        let mut scheme = ColorScheme::default();
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(scheme.name().to_string());
            assert!(!scheme.colors().is_empty());
            scheme = scheme.next();
        }
        assert_eq!(scheme, ColorScheme::default());
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn test_prev_inverts_next() {
        let mut scheme = ColorScheme::default();
        for _ in 0..5 {
            assert_eq!(scheme.next().prev(), scheme);
            scheme = scheme.next();
        }
    }
}
