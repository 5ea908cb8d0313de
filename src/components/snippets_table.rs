//! Snippet listing table
//!
//! Fixed two-column layout (Snippet ID, File Name) with a scroll offset and a
//! scrollbar when rows overflow. Only the visible window of rows is turned
//! into lines, and the header stays in place while scrolling.

use crate::action::Action;
use crate::component::Component;
use crate::model::SnippetListItem;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const HEADERS: [&str; 2] = ["Snippet ID", "File Name"];
const MAX_COLUMN_WIDTH: usize = 60;
const PAGE_ROWS: usize = 10;

/// Rows of the current listing
#[derive(Default)]
pub struct SnippetsTable {
    rows: Vec<SnippetListItem>,
    /// Index of the first visible row
    scroll: usize,
    widths: [usize; 2],
}

impl SnippetsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_rows(&mut self, rows: Vec<SnippetListItem>) {
        self.widths = column_widths(&rows);
        self.rows = rows;
        self.scroll = 0;
    }

    pub fn rows(&self) -> &[SnippetListItem] {
        &self.rows
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    fn max_scroll(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }

    /// Header, separator and up to `height` rows starting at the scroll offset
    pub fn build_lines(&self, height: usize) -> Vec<Line<'static>> {
        if self.rows.is_empty() {
            return vec![Line::from(Span::styled(
                "No data available",
                Style::default().fg(Color::DarkGray),
            ))];
        }

        let widths = self.widths;
        let end = (self.scroll + height).min(self.rows.len());
        let window = &self.rows[self.scroll.min(end)..end];

        let header_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        let mut lines = Vec::with_capacity(window.len() + 2);
        lines.push(Line::from(vec![
            Span::styled(pad(HEADERS[0], widths[0]), header_style),
            Span::raw(" │ "),
            Span::styled(pad(HEADERS[1], widths[1]), header_style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("{}─┼─{}", "─".repeat(widths[0]), "─".repeat(widths[1])),
            Style::default().fg(Color::DarkGray),
        )));

        for row in window {
            lines.push(Line::from(vec![
                Span::styled(pad(&row.snippet_id, widths[0]), Style::default().fg(Color::White)),
                Span::raw(" │ "),
                Span::styled(pad(&row.file_name, widths[1]), Style::default().fg(Color::Gray)),
            ]));
        }

        lines
    }
}

fn column_widths(rows: &[SnippetListItem]) -> [usize; 2] {
    let mut widths = HEADERS.map(|h| h.width());
    for row in rows {
        widths[0] = widths[0].max(row.snippet_id.width());
        widths[1] = widths[1].max(row.file_name.width());
    }
    widths.map(|w| w.min(MAX_COLUMN_WIDTH))
}

/// Truncate to `width` display columns (with "..." when cut) and pad
fn pad(text: &str, width: usize) -> String {
    let shown = if text.width() > width {
        let budget = width.saturating_sub(3);
        let mut used = 0;
        let mut out = String::new();
        for c in text.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > budget {
                break;
            }
            used += w;
            out.push(c);
        }
        out.push_str("...");
        out
    } else {
        text.to_string()
    };
    let fill = width.saturating_sub(shown.width());
    format!("{}{}", shown, " ".repeat(fill))
}

impl Component for SnippetsTable {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp),
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageDown)
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::PageUp)
            }
            KeyCode::PageDown => Some(Action::PageDown),
            KeyCode::PageUp => Some(Action::PageUp),
            KeyCode::Char('g') | KeyCode::Home => Some(Action::FirstItem),
            KeyCode::Char('G') | KeyCode::End => Some(Action::LastItem),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            Action::ScrollDown => {
                if self.scroll < self.max_scroll() {
                    self.scroll += 1;
                }
            }
            Action::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(1);
            }
            Action::PageDown => {
                self.scroll = (self.scroll + PAGE_ROWS).min(self.max_scroll());
            }
            Action::PageUp => {
                self.scroll = self.scroll.saturating_sub(PAGE_ROWS);
            }
            Action::FirstItem => self.scroll = 0,
            Action::LastItem => self.scroll = self.max_scroll(),
            _ => {}
        }
        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        // Borders, header and separator
        let body_height = area.height.saturating_sub(4) as usize;
        let content = self.build_lines(body_height);

        let paragraph = Paragraph::new(content).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Snippets ")
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(paragraph, area);

        if self.rows.len() > body_height {
            let mut scrollbar_state = ScrollbarState::new(self.rows.len()).position(self.scroll);
            frame.render_stateful_widget(
                Scrollbar::new(ScrollbarOrientation::VerticalRight)
                    .begin_symbol(Some("↑"))
                    .end_symbol(Some("↓")),
                area.inner(Margin {
                    vertical: 1,
                    horizontal: 0,
                }),
                &mut scrollbar_state,
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, file: &str) -> SnippetListItem {
        SnippetListItem {
            snippet_id: id.to_string(),
            file_name: file.to_string(),
        }
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_empty_listing_placeholder() {
        let lines = SnippetsTable::new().build_lines(10);
        assert_eq!(lines.len(), 1);
        assert_eq!(line_text(&lines[0]), "No data available");
    }

    #[test]
    fn test_header_and_rows() {
        let mut table = SnippetsTable::new();
        table.set_rows(vec![item("a1", "main.cpp"), item("b22", "util.cpp")]);
        let lines = table.build_lines(10);
        assert_eq!(lines.len(), 4);
        assert!(line_text(&lines[0]).starts_with("Snippet ID │ File Name"));
        assert!(line_text(&lines[2]).starts_with("a1         │ main.cpp"));
    }

    #[test]
    fn test_long_cells_are_truncated() {
        let long = "x".repeat(100);
        let mut table = SnippetsTable::new();
        table.set_rows(vec![item("id", &long)]);
        let lines = table.build_lines(10);
        let row = line_text(&lines[2]);
        assert!(row.ends_with("..."));
        assert!(row.width() <= 10 + 3 + MAX_COLUMN_WIDTH);
    }

    #[test]
    fn test_pad_respects_display_width() {
        assert_eq!(pad("日本", 6), "日本  ");
        assert_eq!(pad("日本語ファイル", 7).width(), 7);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut table = SnippetsTable::new();
        table.set_rows((0..5).map(|i| item(&i.to_string(), "f")).collect());

        table.update(Action::ScrollUp).unwrap();
        assert_eq!(table.scroll(), 0);
        table.update(Action::PageDown).unwrap();
        assert_eq!(table.scroll(), 4);
        table.update(Action::FirstItem).unwrap();
        assert_eq!(table.scroll(), 0);
        table.update(Action::LastItem).unwrap();
        assert_eq!(table.scroll(), 4);

        table.set_rows(Vec::new());
        assert_eq!(table.scroll(), 0);
    }

    #[test]
    fn test_window_follows_scroll_offset() {
        let mut table = SnippetsTable::new();
        table.set_rows((0..20).map(|i| item(&format!("id-{}", i), "f")).collect());
        table.update(Action::PageDown).unwrap();

        let lines = table.build_lines(3);
        assert_eq!(lines.len(), 5);
        assert!(line_text(&lines[0]).starts_with("Snippet ID"));
        assert!(line_text(&lines[2]).starts_with("id-10"));
        assert!(line_text(&lines[4]).starts_with("id-12"));
    }

    #[test]
    fn test_last_row_visible_in_very_long_listing() {
        use ratatui::{backend::TestBackend, Terminal};

        let mut table = SnippetsTable::new();
        table.set_rows((0..70_000).map(|i| item(&format!("id-{}", i), "f")).collect());
        table.update(Action::LastItem).unwrap();
        assert_eq!(table.scroll(), 69_999);

        let mut terminal = Terminal::new(TestBackend::new(60, 6)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                table.draw(frame, area).unwrap();
            })
            .unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Snippet ID"));
        assert!(screen.contains("id-69999"));
        assert!(!screen.contains("id-4461"));
    }
}
