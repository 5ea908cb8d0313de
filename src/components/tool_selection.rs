//! Tool picker
//!
//! Pure local state. Only available tools can be chosen; the others carry
//! a "Coming Soon" marker and ignore Enter.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::{help_line, split_help_bar};
use crate::model::AnalysisTool;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Default)]
pub struct ToolSelectionComponent {
    pub selected_index: usize,
}

impl ToolSelectionComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_tool(&self) -> AnalysisTool {
        AnalysisTool::ALL[self.selected_index.min(AnalysisTool::ALL.len() - 1)]
    }

    fn next(&mut self) {
        if self.selected_index + 1 < AnalysisTool::ALL.len() {
            self.selected_index += 1;
        }
    }

    fn previous(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    fn tool_card(tool: AnalysisTool, selected: bool) -> Paragraph<'static> {
        let (title_color, text_color) = if tool.is_available() {
            (Color::White, Color::Gray)
        } else {
            (Color::DarkGray, Color::DarkGray)
        };

        let mut title = vec![Span::styled(
            tool.name(),
            Style::default()
                .fg(title_color)
                .add_modifier(Modifier::BOLD),
        )];
        if !tool.is_available() {
            title.push(Span::styled(
                "  [Coming Soon]",
                Style::default().fg(Color::DarkGray),
            ));
        }

        let border_color = if selected {
            if tool.is_available() {
                Color::Cyan
            } else {
                Color::Gray
            }
        } else {
            Color::DarkGray
        };

        Paragraph::new(vec![
            Line::from(title),
            Line::from(Span::styled(tool.description(), Style::default().fg(text_color))),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color)),
        )
    }
}

impl Component for ToolSelectionComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.next();
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.previous();
                None
            }
            KeyCode::Enter => {
                let tool = self.selected_tool();
                tool.is_available().then_some(Action::SelectTool(tool))
            }
            KeyCode::Char('?') => Some(Action::OpenHelp),
            KeyCode::Char('q') | KeyCode::Esc => Some(Action::OpenQuitDialog),
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let (content_area, help_area) = split_help_bar(area);

        let outer = Block::default()
            .borders(Borders::ALL)
            .title(" Select Analysis Tool ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .border_style(Style::default().fg(Color::Cyan));
        let inner = outer.inner(content_area);
        frame.render_widget(outer, content_area);

        let mut constraints = vec![Constraint::Length(2)];
        constraints.extend(AnalysisTool::ALL.iter().map(|_| Constraint::Length(4)));
        constraints.push(Constraint::Min(0));
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Choose the type of analysis you want to perform",
                Style::default().fg(Color::DarkGray),
            ))),
            rows[0],
        );

        for (i, tool) in AnalysisTool::ALL.into_iter().enumerate() {
            let card = Self::tool_card(tool, i == self.selected_index);
            frame.render_widget(card, rows[i + 1]);
        }

        let help = Paragraph::new(help_line(&[
            ("j/k", "Move"),
            ("Enter", "Select"),
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
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_enter_on_available_tool_selects_it() {
        let mut picker = ToolSelectionComponent::new();
        let action = picker.handle_key_event(key(KeyCode::Enter)).unwrap();
        assert_eq!(action, Some(Action::SelectTool(AnalysisTool::EscalationAnalysis)));
    }

    #[test]
    fn test_unavailable_tools_are_inert() {
        let mut picker = ToolSelectionComponent::new();
        for _ in 1..AnalysisTool::ALL.len() {
            picker.handle_key_event(key(KeyCode::Down)).unwrap();
            assert_eq!(picker.handle_key_event(key(KeyCode::Enter)).unwrap(), None);
        }
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut picker = ToolSelectionComponent::new();
        picker.handle_key_event(key(KeyCode::Up)).unwrap();
        assert_eq!(picker.selected_index, 0);
        for _ in 0..10 {
            picker.handle_key_event(key(KeyCode::Char('j'))).unwrap();
        }
        assert_eq!(picker.selected_tool(), AnalysisTool::BehaviorAnalysis);
    }
}
