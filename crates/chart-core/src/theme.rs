// File: crates/chart-core/src/theme.rs
// Summary: Light/Dark theming for chart rendering colors and the per-group series palette.

use std::fmt;

/// Opaque RGB color, written to SVG as `#rrggbb`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() { return None; }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self { r: channel(0)?, g: channel(2)?, b: channel(4)? })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Fixed color per group key; unknown keys get `fallback`.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub entries: Vec<(String, Color)>,
    pub fallback: Color,
}

impl Palette {
    pub fn color_for(&self, group: &str) -> Color {
        self.entries
            .iter()
            .find(|(name, _)| name == group)
            .map(|(_, c)| *c)
            .unwrap_or(self.fallback)
    }

    /// Builder-style override for one group key.
    pub fn with(mut self, group: impl Into<String>, color: Color) -> Self {
        let group = group.into();
        match self.entries.iter_mut().find(|(name, _)| *name == group) {
            Some(entry) => entry.1 = color,
            None => self.entries.push((group, color)),
        }
        self
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            entries: vec![
                ("Masculino".to_string(), Color::rgb(0x3b, 0x82, 0xf6)), // blue
                ("Feminino".to_string(), Color::rgb(0xec, 0x48, 0x99)),  // pink
                ("Ambos".to_string(), Color::rgb(0x10, 0xb9, 0x81)),     // green
            ],
            fallback: Color::rgb(0x63, 0x66, 0xf1), // indigo
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Option<Color>,
    pub grid: Color,
    pub axis_line: Color,
    pub axis_label: Color,
    pub title: Color,
    pub placeholder: Color,
    /// Outline drawn around legend dots.
    pub legend_dot_stroke: Color,
    pub palette: Palette,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: None, // transparent, inherits the host page
            grid: Color::rgb(0xe5, 0xe7, 0xeb),
            axis_line: Color::rgb(0x37, 0x41, 0x51),
            axis_label: Color::rgb(0x11, 0x18, 0x27),
            title: Color::rgb(0x11, 0x18, 0x27),
            placeholder: Color::rgb(0x6b, 0x72, 0x80),
            legend_dot_stroke: Color::rgb(0xff, 0xff, 0xff),
            palette: Palette::default(),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Some(Color::rgb(18, 18, 20)),
            grid: Color::rgb(40, 40, 45),
            axis_line: Color::rgb(180, 180, 190),
            axis_label: Color::rgb(235, 235, 245),
            title: Color::rgb(235, 235, 245),
            placeholder: Color::rgb(150, 150, 160),
            legend_dot_stroke: Color::rgb(18, 18, 20),
            palette: Palette::default(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}
