//! Small shared widgets.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::ui::components::theme::ThemePalette;
use crate::ui::data::InputMode;

/// The top input bar. Shows which input the keyboard currently drives and
/// its live contents.
pub fn search_bar<'a>(
    text: &'a str,
    palette: ThemePalette,
    mode: InputMode,
) -> Paragraph<'a> {
    let label = match mode {
        InputMode::TextSearch => "Search text",
        InputMode::ListFilter => "Filter list",
    };
    let line = Line::from(vec![
        Span::styled(format!("[{label}] "), palette.title()),
        Span::styled(text, Style::default().fg(palette.fg)),
        Span::styled("▏", palette.hint_style()),
    ]);
    Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(palette.border_style()),
    )
}
