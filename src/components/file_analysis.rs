//! Results screen
//!
//! Shows the snippet listing fetched on entry and offers the export.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::{error_line, help_line, split_help_bar};
use crate::components::snippets_table::SnippetsTable;
use crate::model::{PaginatedResponse, SnippetListItem};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ListingState {
    Loading,
    /// Count of rows received, regardless of the envelope's `total`
    Loaded { rows: usize },
    Failed(String),
}

pub struct FileAnalysisComponent {
    pub listing: ListingState,
    pub table: SnippetsTable,
    /// An export is outstanding
    pub exporting: bool,
    /// Outcome of the last export, shown under the table
    pub export_status: Option<String>,
}

impl Default for FileAnalysisComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl FileAnalysisComponent {
    pub fn new() -> Self {
        Self {
            listing: ListingState::Loading,
            table: SnippetsTable::new(),
            exporting: false,
            export_status: None,
        }
    }

    pub fn set_listing(&mut self, page: PaginatedResponse<SnippetListItem>) {
        self.listing = ListingState::Loaded {
            rows: page.items.len(),
        };
        self.table.set_rows(page.items);
    }

    pub fn listing_failed(&mut self, message: impl Into<String>) {
        self.listing = ListingState::Failed(message.into());
        self.table.set_rows(Vec::new());
    }

    pub fn export_finished(&mut self, status: impl Into<String>) {
        self.exporting = false;
        self.export_status = Some(status.into());
    }

    fn status_line(&self) -> Line<'static> {
        match &self.listing {
            ListingState::Loading => Line::from(Span::styled(
                "Loading...",
                Style::default().fg(Color::Yellow),
            )),
            ListingState::Loaded { rows } => Line::from(Span::styled(
                format!("Total items: {}", rows),
                Style::default().fg(Color::Yellow),
            )),
            ListingState::Failed(message) => error_line(message),
        }
    }
}

impl Component for FileAnalysisComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('b') | KeyCode::Esc => Some(Action::BackToDatabaseSetup),
            KeyCode::Char('e') => {
                if self.exporting {
                    None
                } else {
                    self.exporting = true;
                    self.export_status = None;
                    Some(Action::ExportResults)
                }
            }
            KeyCode::Char('q') => Some(Action::OpenQuitDialog),
            KeyCode::Char('?') => Some(Action::OpenHelp),
            _ => self.table.handle_key_event(key)?,
        };
        Ok(action)
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        self.table.update(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let (content_area, help_area) = split_help_bar(area);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(1)])
            .split(content_area);

        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                "Analysis Results",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            self.status_line(),
        ]);
        frame.render_widget(title, chunks[0]);

        match &self.listing {
            ListingState::Loading => {
                let waiting = Paragraph::new("Fetching snippet list from server...")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray))
                    .block(Block::default().borders(Borders::ALL).title(" Snippets "));
                frame.render_widget(waiting, chunks[1]);
            }
            _ => self.table.draw(frame, chunks[1])?,
        }

        let footer = if self.exporting {
            Line::from(Span::styled("Exporting...", Style::default().fg(Color::Yellow)))
        } else if let Some(ref status) = self.export_status {
            Line::from(Span::styled(status.clone(), Style::default().fg(Color::Green)))
        } else {
            Line::from("")
        };
        frame.render_widget(Paragraph::new(footer), chunks[2]);

        let help = Paragraph::new(help_line(&[
            ("j/k", "Scroll"),
            ("e", "Export"),
            ("b", "Back"),
            ("?", "Help"),
            ("q", "Quit"),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, help_area);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PaginationParams;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn listing(count: usize) -> PaginatedResponse<SnippetListItem> {
        let items = (0..count)
            .map(|i| SnippetListItem {
                snippet_id: format!("s{}", i),
                file_name: format!("f{}.cpp", i),
            })
            .collect();
        PaginatedResponse::from_items(items, PaginationParams::default())
    }

    #[test]
    fn test_listing_lifecycle() {
        let mut screen = FileAnalysisComponent::new();
        assert_eq!(screen.listing, ListingState::Loading);

        screen.set_listing(listing(3));
        assert_eq!(screen.listing, ListingState::Loaded { rows: 3 });
        assert_eq!(screen.table.rows().len(), 3);

        screen.listing_failed("HTTP error! status: 500");
        assert!(matches!(screen.listing, ListingState::Failed(_)));
        assert!(screen.table.rows().is_empty());
    }

    fn rendered(screen: &mut FileAnalysisComponent) -> String {
        use ratatui::{backend::TestBackend, Terminal};

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                screen.draw(frame, area).unwrap();
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_count_shows_received_rows_not_envelope_total() {
        let mut screen = FileAnalysisComponent::new();
        assert!(rendered(&mut screen).contains("Loading..."));

        let mut page = listing(1);
        page.total = 42;
        screen.set_listing(page);

        assert_eq!(screen.listing, ListingState::Loaded { rows: 1 });
        let text = rendered(&mut screen);
        assert!(text.contains("Total items: 1"));
        assert!(!text.contains("Total items: 42"));
    }

    #[test]
    fn test_export_key_is_single_flight() {
        let mut screen = FileAnalysisComponent::new();
        assert_eq!(
            screen.handle_key_event(key(KeyCode::Char('e'))).unwrap(),
            Some(Action::ExportResults)
        );
        assert_eq!(screen.handle_key_event(key(KeyCode::Char('e'))).unwrap(), None);

        screen.export_finished("Saved");
        assert!(!screen.exporting);
        assert_eq!(
            screen.handle_key_event(key(KeyCode::Char('e'))).unwrap(),
            Some(Action::ExportResults)
        );
    }

    #[test]
    fn test_navigation_keys() {
        let mut screen = FileAnalysisComponent::new();
        assert_eq!(
            screen.handle_key_event(key(KeyCode::Char('b'))).unwrap(),
            Some(Action::BackToDatabaseSetup)
        );
        assert_eq!(
            screen.handle_key_event(key(KeyCode::Char('j'))).unwrap(),
            Some(Action::ScrollDown)
        );
        assert_eq!(
            screen.handle_key_event(key(KeyCode::Char('G'))).unwrap(),
            Some(Action::LastItem)
        );
    }
}
