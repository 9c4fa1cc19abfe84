//! Theme palette for the viewer, trimmed to what the two panes need.

use ratatui::style::{Color, Modifier, Style};

#[derive(Clone, Copy)]
pub struct ThemePalette {
    pub accent: Color,
    pub accent_alt: Color,
    pub bg: Color,
    pub fg: Color,
    pub surface: Color,
    pub hint: Color,
    pub border: Color,
}

impl ThemePalette {
    /// Dark theme - default, easy on the eyes.
    pub fn dark() -> Self {
        Self {
            accent: Color::Rgb(122, 162, 247),
            accent_alt: Color::Rgb(224, 175, 104),
            bg: Color::Rgb(26, 27, 38),
            fg: Color::Rgb(192, 202, 245),
            surface: Color::Rgb(36, 40, 59),
            hint: Color::Rgb(105, 114, 158),
            border: Color::Rgb(59, 66, 97),
        }
    }

    /// Light theme - clean, minimal.
    pub fn light() -> Self {
        Self {
            accent: Color::Rgb(47, 107, 231),
            accent_alt: Color::Rgb(207, 107, 44),
            bg: Color::Rgb(250, 250, 252),
            fg: Color::Rgb(36, 41, 46),
            surface: Color::Rgb(240, 241, 245),
            hint: Color::Rgb(125, 134, 144),
            border: Color::Rgb(216, 222, 228),
        }
    }

    /// Title style - accent colored with bold modifier.
    pub fn title(self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn hint_style(self) -> Style {
        Style::default().fg(self.hint)
    }

    pub fn border_style(self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for every match span in the document pane.
    pub fn highlight_style(self) -> Style {
        Style::default()
            .fg(self.bg)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the match the cursor sits on; the terminal analog of the
    /// original's orange outline on the current hit.
    pub fn current_hit_style(self) -> Style {
        Style::default()
            .fg(self.bg)
            .bg(self.accent_alt)
            .add_modifier(Modifier::BOLD)
    }

    /// Selected-row style for the law list.
    pub fn selected_style(self) -> Style {
        Style::default()
            .bg(self.surface)
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }
}
