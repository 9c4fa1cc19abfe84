//! Ratatui interface: law list, document viewer, in-text search.

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{ExecutableCommand, execute};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::export;
use crate::model::types::LoadedDocument;
use crate::registry::text::{FetchError, fetch_document_text};
use crate::registry::load_registry;
use crate::search::matcher::MatchSpan;
use crate::ui::components::theme::ThemePalette;
use crate::ui::components::widgets::search_bar;
use crate::ui::data::{InputMode, Session};
use crate::ui::debounce::Debouncer;

/// Quiet period between the last keystroke and a search recomputation.
const SEARCH_DEBOUNCE: Duration = Duration::from_millis(180);

pub fn footer_legend(show_help: bool) -> &'static str {
    if show_help {
        "Esc/F10 quit • Tab switch input • type to search • Enter/F8 next match • F7 previous • Up/Down pick law • PgUp/PgDn scroll • F6 export txt • F9 print html • F2 theme"
    } else {
        "F1 help | Tab input | Enter/F8 next | F7 prev | F6 export | F9 print | Esc/F10 quit"
    }
}

fn help_lines(palette: ThemePalette) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();

    let add_section = |title: &str, items: &[&str]| -> Vec<Line<'static>> {
        let mut v = Vec::new();
        v.push(Line::from(Span::styled(title.to_string(), palette.title())));
        for item in items {
            v.push(Line::from(format!("  {item}")));
        }
        v.push(Line::from(""));
        v
    };

    lines.extend(add_section(
        "Search",
        &[
            "type to search the open law's text (debounced)",
            "Enter/F8 next match, F7 previous; navigation wraps around",
            "clearing the query clears highlights (distinct from zero results)",
        ],
    ));
    lines.extend(add_section(
        "Law list",
        &[
            "Up/Down select a law; its text loads immediately",
            "Tab switches typing to the list filter (title/jurisdiction/reference)",
            "the search query survives switching laws, so one term can be",
            "chased across parts",
        ],
    ));
    lines.extend(add_section(
        "Actions",
        &[
            "F6 export the exact raw text as <reference>.txt",
            "F9 write a print-ready HTML page with the current highlights",
            "F2 theme dark/light | F1 toggle this help | Esc/F10 quit",
        ],
    ));
    lines
}

fn render_help_overlay(frame: &mut Frame, palette: ThemePalette, scroll: u16) {
    let area = frame.area();
    let popup_area = centered_rect(70, 70, area);
    let block = Block::default()
        .title(Span::styled("Help / Shortcuts", palette.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent));

    frame.render_widget(ratatui::widgets::Clear, popup_area);
    frame.render_widget(
        Paragraph::new(help_lines(palette))
            .block(block)
            .wrap(Wrap { trim: true })
            .scroll((scroll, 0)),
        popup_area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(popup_layout[1]);

    horizontal[1]
}

/// Pure span renderer for the document pane: one `Line` per text line, match
/// spans styled, the cursor's span styled distinctly. Matches that cross a
/// newline highlight on both sides of it.
fn highlight_lines(
    raw_text: &str,
    matches: &[MatchSpan],
    cursor: Option<usize>,
    palette: ThemePalette,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut line_start = 0usize;
    let mut match_idx = 0usize;

    for line_text in raw_text.split('\n') {
        let line_end = line_start + line_text.len();
        let mut spans: Vec<Span<'static>> = Vec::new();
        let mut pos = line_start;

        while match_idx < matches.len() && matches[match_idx].end <= line_start {
            match_idx += 1;
        }
        let mut i = match_idx;
        while i < matches.len() && matches[i].start < line_end {
            let m = matches[i];
            let seg_start = m.start.max(line_start);
            let seg_end = m.end.min(line_end);
            if seg_start > pos {
                spans.push(Span::raw(raw_text[pos..seg_start].to_string()));
            }
            let style = if cursor == Some(i) {
                palette.current_hit_style()
            } else {
                palette.highlight_style()
            };
            spans.push(Span::styled(raw_text[seg_start..seg_end].to_string(), style));
            pos = seg_end;
            if m.end > line_end {
                break;
            }
            i += 1;
        }
        if pos < line_end {
            spans.push(Span::raw(raw_text[pos..line_end].to_string()));
        }
        if spans.is_empty() {
            spans.push(Span::raw(String::new()));
        }
        lines.push(Line::from(spans));
        line_start = line_end + 1;
    }
    lines
}

/// Zero-based line of a byte offset (offsets come from match spans, so they
/// are always in bounds and on char boundaries).
fn line_of_offset(raw_text: &str, offset: usize) -> usize {
    raw_text[..offset].matches('\n').count()
}

/// Scroll offset that roughly centers `line` in a viewport of `rows` rows.
fn scroll_for_line(line: usize, rows: u16) -> u16 {
    line.saturating_sub(rows as usize / 2).min(u16::MAX as usize) as u16
}

/// Document-pane text rows for a terminal of `total_rows` rows: input bar
/// (3), meta line (2), footer (1), pane borders (2).
fn doc_viewport_rows(total_rows: u16) -> u16 {
    total_rows.saturating_sub(8).max(1)
}

pub fn run_tui(root: &Path, once: bool) -> Result<()> {
    if once {
        return run_once(root);
    }

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, root);
    teardown_terminal()?;
    result
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, root: &Path) -> Result<()> {
    let mut session = Session::default();
    let mut status = match load_registry(root) {
        Ok(reg) => {
            let msg = format!("Loaded registry: {} ({} entries)", reg.path.display(), reg.entries.len());
            session.set_entries(reg.entries);
            msg
        }
        Err(err) => {
            // The viewer stays up with an empty list; the status says why.
            tracing::warn!("registry load failed: {err}");
            session.fail_document(err.to_string());
            "Error loading laws registry (F1 for help).".to_string()
        }
    };

    let mut input_mode = InputMode::TextSearch;
    let mut query = String::new();
    let mut debouncer = Debouncer::new(SEARCH_DEBOUNCE);
    let mut theme_dark = true;
    let mut show_help = false;
    let mut help_scroll: u16 = 0;
    let mut doc_scroll: u16 = 0;
    let mut needs_draw = true;
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(30);

    loop {
        // Selection changed (keys or filter): fetch before the next draw so
        // stale highlights never render against the new text.
        if session.selection_needs_load() {
            load_selected(
                &mut session,
                root,
                &mut status,
                &mut doc_scroll,
                terminal.size()?.height,
                &query,
                &mut debouncer,
            );
            needs_draw = true;
        }

        if needs_draw {
            let palette = if theme_dark {
                ThemePalette::dark()
            } else {
                ThemePalette::light()
            };
            terminal.draw(|f| {
                draw(f, &session, &query, input_mode, &status, doc_scroll, palette);
                if show_help {
                    render_help_overlay(f, palette, help_scroll);
                }
            })?;
            needs_draw = false;
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_millis(0));

        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
        {
            needs_draw = true;

            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                break;
            }

            // While help is open, keys only drive the help modal.
            if show_help {
                match key.code {
                    KeyCode::Esc | KeyCode::F(1) => {
                        show_help = false;
                        help_scroll = 0;
                    }
                    KeyCode::Up => help_scroll = help_scroll.saturating_sub(1),
                    KeyCode::Down => help_scroll = help_scroll.saturating_add(1),
                    KeyCode::PageUp => help_scroll = help_scroll.saturating_sub(5),
                    KeyCode::PageDown => help_scroll = help_scroll.saturating_add(5),
                    _ => {}
                }
                continue;
            }

            match key.code {
                KeyCode::F(1) => show_help = true,
                KeyCode::F(2) => theme_dark = !theme_dark,
                KeyCode::F(10) => break,
                KeyCode::Esc => {
                    if input_mode == InputMode::ListFilter {
                        input_mode = InputMode::TextSearch;
                        status = "Typing searches the document text.".to_string();
                    } else {
                        break;
                    }
                }
                KeyCode::Tab => {
                    input_mode = match input_mode {
                        InputMode::TextSearch => InputMode::ListFilter,
                        InputMode::ListFilter => InputMode::TextSearch,
                    };
                    status = match input_mode {
                        InputMode::TextSearch => "Typing searches the document text.".to_string(),
                        InputMode::ListFilter => "Typing filters the law list.".to_string(),
                    };
                }
                KeyCode::Up => {
                    session.select_previous();
                    doc_scroll = 0;
                }
                KeyCode::Down => {
                    session.select_next();
                    doc_scroll = 0;
                }
                KeyCode::PageUp => doc_scroll = doc_scroll.saturating_sub(10),
                KeyCode::PageDown => doc_scroll = doc_scroll.saturating_add(10),
                KeyCode::Home => doc_scroll = 0,
                KeyCode::Enter | KeyCode::F(8) => {
                    if input_mode == InputMode::ListFilter {
                        input_mode = InputMode::TextSearch;
                    } else if let Some(idx) = session.search.on_next() {
                        doc_scroll = reveal_scroll(&session, idx, terminal.size()?.height);
                        status = session.search.status();
                    }
                }
                KeyCode::F(7) => {
                    if let Some(idx) = session.search.on_previous() {
                        doc_scroll = reveal_scroll(&session, idx, terminal.size()?.height);
                        status = session.search.status();
                    }
                }
                KeyCode::F(6) => {
                    status = match &session.document {
                        Some(doc) => match export::export_text(&doc.entry, &doc.raw_text, Path::new(".")) {
                            Ok(path) => format!("Exported raw text to {}", path.display()),
                            Err(err) => {
                                tracing::warn!("export failed: {err}");
                                format!("Export failed: {err}")
                            }
                        },
                        None => "Nothing to export - no document loaded.".to_string(),
                    };
                }
                KeyCode::F(9) => {
                    status = match &session.document {
                        Some(doc) => match export::write_print_html(
                            &doc.entry,
                            &doc.raw_text,
                            &session.search.matches,
                            session.search.cursor(),
                            Path::new("."),
                        ) {
                            Ok(path) => format!("Wrote print page {}", path.display()),
                            Err(err) => {
                                tracing::warn!("print export failed: {err}");
                                format!("Print export failed: {err}")
                            }
                        },
                        None => "Nothing to print - no document loaded.".to_string(),
                    };
                }
                KeyCode::Char(c) => match input_mode {
                    InputMode::TextSearch => {
                        query.push(c);
                        debouncer.mark();
                    }
                    InputMode::ListFilter => {
                        session.list_filter.push(c);
                        session.apply_filter();
                        doc_scroll = 0;
                    }
                },
                KeyCode::Backspace => match input_mode {
                    InputMode::TextSearch => {
                        query.pop();
                        debouncer.mark();
                    }
                    InputMode::ListFilter => {
                        session.list_filter.pop();
                        session.apply_filter();
                        doc_scroll = 0;
                    }
                },
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if debouncer.ready() {
                if let Some(doc) = &session.document {
                    let reveal = session.search.on_query_change(&query, &doc.raw_text);
                    status = session.search.status();
                    if let Some(idx) = reveal {
                        doc_scroll = reveal_scroll(&session, idx, terminal.size()?.height);
                    }
                } else if !query.trim().is_empty() {
                    status = "Load a document to search.".to_string();
                }
                needs_draw = true;
            }
            last_tick = Instant::now();
        }
    }

    Ok(())
}

fn draw(
    f: &mut Frame,
    session: &Session,
    query: &str,
    input_mode: InputMode,
    status: &str,
    doc_scroll: u16,
    palette: ThemePalette,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(3), // input bar
                Constraint::Min(0),    // list + document
                Constraint::Length(1), // footer
            ]
            .as_ref(),
        )
        .split(f.area());

    let bar_text = match input_mode {
        InputMode::TextSearch => query,
        InputMode::ListFilter => session.list_filter.as_str(),
    };
    f.render_widget(search_bar(bar_text, palette, input_mode), chunks[0]);

    let main_split = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(chunks[1]);

    draw_list(f, session, palette, main_split[0]);
    draw_document(f, session, palette, doc_scroll, main_split[1]);

    let footer = Line::from(vec![
        Span::styled(status.to_string(), Style::default().fg(palette.fg)),
        Span::styled(
            format!("  |  {}", footer_legend(false)),
            palette.hint_style(),
        ),
    ]);
    f.render_widget(Paragraph::new(footer), chunks[2]);
}

fn draw_list(f: &mut Frame, session: &Session, palette: ThemePalette, area: Rect) {
    let items: Vec<ListItem> = session
        .filtered
        .iter()
        .map(|entry| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    entry.title.clone(),
                    Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    entry.jurisdiction_display().to_string(),
                    palette.hint_style(),
                )),
            ])
        })
        .collect();

    let title = format!(
        "Laws ({}/{})",
        session.filtered.len(),
        session.entries().len()
    );
    let list = List::new(items)
        .block(
            Block::default()
                .title(Span::styled(title, palette.title()))
                .borders(Borders::ALL)
                .border_style(palette.border_style()),
        )
        .highlight_style(palette.selected_style());

    let mut state = ListState::default();
    state.select(session.selected);
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_document(
    f: &mut Frame,
    session: &Session,
    palette: ThemePalette,
    doc_scroll: u16,
    area: Rect,
) {
    let Some(doc) = &session.document else {
        let message = session
            .document_error
            .clone()
            .unwrap_or_else(|| "Select a law to view its text".to_string());
        f.render_widget(
            Paragraph::new(message).style(palette.hint_style()).block(
                Block::default()
                    .title("Document")
                    .borders(Borders::ALL)
                    .border_style(palette.border_style()),
            ),
            area,
        );
        return;
    };

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(3)].as_ref())
        .split(area);

    let meta = Line::from(vec![
        Span::styled("Jurisdiction: ", palette.hint_style()),
        Span::raw(doc.entry.jurisdiction_display().to_string()),
        Span::styled("  Reference: ", palette.hint_style()),
        Span::raw(doc.entry.reference_display().to_string()),
        Span::styled("  Source: ", palette.hint_style()),
        Span::raw(doc.entry.source_display().to_string()),
    ]);
    f.render_widget(Paragraph::new(meta), layout[0]);

    let lines = highlight_lines(
        &doc.raw_text,
        &session.search.matches,
        session.search.cursor(),
        palette,
    );
    f.render_widget(
        Paragraph::new(lines)
            .block(
                Block::default()
                    .title(Span::styled(doc.entry.title.clone(), palette.title()))
                    .borders(Borders::ALL)
                    .border_style(palette.border_style()),
            )
            .wrap(Wrap { trim: false })
            .scroll((doc_scroll, 0)),
        layout[1],
    );
}

fn load_selected(
    session: &mut Session,
    root: &Path,
    status: &mut String,
    doc_scroll: &mut u16,
    total_rows: u16,
    query: &str,
    debouncer: &mut Debouncer,
) {
    let Some(entry) = session.selected_entry().cloned() else {
        return;
    };
    let Some(locator) = entry.text_file.clone() else {
        tracing::warn!(title = %entry.title, "entry has no text locator");
        session.fail_document(format!("{}: {}", entry.title, FetchError::MissingLocator));
        *status = "Load error.".to_string();
        return;
    };

    match fetch_document_text(root, &locator) {
        Ok(raw_text) => {
            let reveal = session.install_document(LoadedDocument { entry, raw_text });
            *doc_scroll = 0;
            if let Some(idx) = reveal {
                *doc_scroll = reveal_scroll(session, idx, total_rows);
                *status = session.search.status();
            } else if session.search.query().is_empty() {
                *status = format!("Loaded: {locator}");
            } else {
                *status = session.search.status();
            }
            // Text typed before any document was loaded is still only in the
            // input buffer; run it against the new text right away.
            let live = query.trim();
            if !live.is_empty() && live != session.search.query() {
                debouncer.force();
            }
        }
        Err(err) => {
            tracing::warn!(locator, "document fetch failed: {err}");
            session.fail_document(format!("Error loading {locator}\n{err}"));
            *status = "Load error.".to_string();
        }
    }
}

/// Scroll offset that brings match `idx` into view.
fn reveal_scroll(session: &Session, idx: usize, total_rows: u16) -> u16 {
    let Some(doc) = &session.document else {
        return 0;
    };
    let Some(span) = session.search.matches.get(idx) else {
        return 0;
    };
    let line = line_of_offset(&doc.raw_text, span.start);
    scroll_for_line(line, doc_viewport_rows(total_rows))
}

fn run_once(root: &Path) -> Result<()> {
    let reg = load_registry(root)?;
    let mut session = Session::default();
    let path = reg.path.clone();
    session.set_entries(reg.entries);
    println!(
        "registry: {} entries ({})",
        session.entries().len(),
        path.display()
    );

    if let Some(entry) = session.selected_entry().cloned() {
        match entry.text_file.as_deref() {
            Some(locator) => match fetch_document_text(root, locator) {
                Ok(raw_text) => println!("loaded: {} ({} bytes)", entry.title, raw_text.len()),
                Err(err) => println!("load error: {err}"),
            },
            None => println!("load error: {}", FetchError::MissingLocator),
        }
    }
    Ok(())
}

fn teardown_terminal() -> Result<()> {
    let mut stdout = io::stdout();
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen)?;
    Ok(())
}
