//! Display themes for mixoss

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    /// Labels and percentages
    pub fg: Color,
    /// Separator
    pub fg_dim: Color,
    /// Gauge bars
    pub accent: Color,
    /// Error banner
    pub danger: Color,
}

impl Theme {
    /// Get style for normal text
    ///
    /// Clears bold so a row repainted after losing the selection drops it.
    pub fn normal(&self) -> Style {
        Style::default().fg(self.fg).remove_modifier(Modifier::BOLD)
    }

    /// Get style for the selected control's label and percentage
    pub fn emphasis(&self) -> Style {
        self.normal().add_modifier(Modifier::BOLD)
    }

    pub fn gauge(&self) -> Style {
        Style::default().fg(self.accent)
    }

    pub fn separator(&self) -> Style {
        Style::default().fg(self.fg_dim)
    }

    pub fn title(&self) -> Style {
        self.emphasis()
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.danger)
    }

    /// Look up a theme by name
    pub fn by_name(name: &str) -> Option<Theme> {
        match name.to_lowercase().as_str() {
            "plain" | "default" => Some(PLAIN),
            "green" | "phosphor" => Some(PHOSPHOR),
            _ => None,
        }
    }
}

/// Terminal default colors
pub const PLAIN: Theme = Theme {
    name: "plain",
    fg: Color::Reset,
    fg_dim: Color::Reset,
    accent: Color::Reset,
    danger: Color::Reset,
};

/// Green phosphor
pub const PHOSPHOR: Theme = Theme {
    name: "phosphor",
    fg: Color::Rgb(51, 255, 51),     // #33ff33
    fg_dim: Color::Rgb(25, 128, 25),
    accent: Color::Rgb(100, 255, 100),
    danger: Color::Rgb(255, 100, 100),
};

impl Default for Theme {
    fn default() -> Self {
        PLAIN
    }
}
