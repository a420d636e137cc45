// Theme for the TUI
//
// Two built-in palettes so the form stays legible on dark and light
// terminals. Selected by name from config ("dark", "light").

use ratatui::style::Color;

/// Colors for every UI element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub foreground: Color,
    pub border: Color,
    pub highlight: Color,
    pub muted: Color,
    pub link: Color,
    pub success: Color,
    pub error: Color,
    pub info: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::Reset,
            foreground: Color::White,
            border: Color::DarkGray,
            highlight: Color::Cyan,
            muted: Color::Gray,
            link: Color::LightBlue,
            success: Color::Green,
            error: Color::LightRed,
            info: Color::Yellow,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::Reset,
            foreground: Color::Black,
            border: Color::Gray,
            highlight: Color::Blue,
            muted: Color::DarkGray,
            link: Color::Blue,
            success: Color::Green,
            error: Color::Red,
            info: Color::Magenta,
        }
    }

    /// Look up a palette by name, falling back to dark
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "light" => Self::light(),
            "dark" => Self::dark(),
            other => {
                tracing::warn!("Unknown theme '{}', using dark", other);
                Self::dark()
            }
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
