//! Database configuration screen
//!
//! Two mutually exclusive modes share one path field. Create mode also takes
//! a minimum instruction count; its recommended range is displayed but not
//! enforced.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::{centered_popup, error_line, field_line, help_line, split_help_bar};
use crate::model::{CreateDatabaseConfig, DatabaseRequest, LoadDatabaseConfig, ValidationError};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::ops::RangeInclusive;

/// Suggested bounds for the instruction threshold
pub const RECOMMENDED_INSTRUCTIONS: RangeInclusive<u32> = 25..=1000;

const MAX_THRESHOLD_DIGITS: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatabaseMode {
    #[default]
    Create,
    Load,
}

impl DatabaseMode {
    fn toggle(self) -> Self {
        match self {
            DatabaseMode::Create => DatabaseMode::Load,
            DatabaseMode::Load => DatabaseMode::Create,
        }
    }

    fn path_label(&self) -> &'static str {
        match self {
            DatabaseMode::Create => "Source dir",
            DatabaseMode::Load => "Database",
        }
    }

    fn path_hint(&self) -> &'static str {
        match self {
            DatabaseMode::Create => "The directory containing your source code files to analyze",
            DatabaseMode::Load => "The path to your existing database file",
        }
    }

    fn submit_label(&self) -> &'static str {
        match self {
            DatabaseMode::Create => "Create Database",
            DatabaseMode::Load => "Load Database",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseField {
    Mode,
    Path,
    MinInstructions,
}

pub struct DatabaseSetupComponent {
    pub mode: DatabaseMode,
    pub path: String,
    /// Digits only; empty counts as zero
    pub min_instructions: String,
    pub focus: DatabaseField,
    pub error: Option<String>,
    /// A submission is outstanding
    pub submitting: bool,
}

impl Default for DatabaseSetupComponent {
    fn default() -> Self {
        Self::new(30)
    }
}

impl DatabaseSetupComponent {
    pub fn new(default_min_instructions: u32) -> Self {
        Self {
            mode: DatabaseMode::Create,
            path: String::new(),
            min_instructions: default_min_instructions.to_string(),
            focus: DatabaseField::Path,
            error: None,
            submitting: false,
        }
    }

    pub fn min_amount_instructions(&self) -> u32 {
        self.min_instructions.parse().unwrap_or(0)
    }

    /// Build the request for the current mode. Each mode produces exactly
    /// its own shape, so create/load fields can never be mixed.
    pub fn build_request(&self) -> Result<DatabaseRequest, ValidationError> {
        if self.path.is_empty() {
            return Err(ValidationError::MissingPath);
        }
        let request = match self.mode {
            DatabaseMode::Create => DatabaseRequest::Create(CreateDatabaseConfig {
                source_directory_path: self.path.clone(),
                min_amount_instructions: self.min_amount_instructions(),
            }),
            DatabaseMode::Load => DatabaseRequest::Load(LoadDatabaseConfig {
                database_path: self.path.clone(),
            }),
        };
        Ok(request)
    }

    pub fn submit_finished(&mut self) {
        self.submitting = false;
    }

    fn fields(&self) -> &'static [DatabaseField] {
        match self.mode {
            DatabaseMode::Create => &[
                DatabaseField::Mode,
                DatabaseField::Path,
                DatabaseField::MinInstructions,
            ],
            DatabaseMode::Load => &[DatabaseField::Mode, DatabaseField::Path],
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let fields = self.fields();
        let current = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (current + 1) % fields.len()
        } else {
            (current + fields.len() - 1) % fields.len()
        };
        self.focus = fields[next];
    }

    fn toggle_mode(&mut self) {
        self.mode = self.mode.toggle();
        self.error = None;
        if !self.fields().contains(&self.focus) {
            self.focus = DatabaseField::Path;
        }
    }

    fn submit(&mut self) -> Option<Action> {
        match self.build_request() {
            Ok(request) => {
                self.error = None;
                self.submitting = true;
                Some(Action::SubmitDatabase(request))
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    fn handle_char(&mut self, c: char) {
        match self.focus {
            DatabaseField::Mode => {
                if c == ' ' {
                    self.toggle_mode();
                }
            }
            DatabaseField::Path => {
                self.path.push(c);
                self.error = None;
            }
            DatabaseField::MinInstructions => {
                if c.is_ascii_digit() && self.min_instructions.len() < MAX_THRESHOLD_DIGITS {
                    self.min_instructions.push(c);
                }
            }
        }
    }

    fn mode_line(&self) -> Line<'static> {
        let focused = self.focus == DatabaseField::Mode;
        let option = |mode: DatabaseMode, label: &str| {
            let selected = self.mode == mode;
            let marker = if selected { "(•) " } else { "( ) " };
            let style = if selected {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Span::styled(format!("{}{}    ", marker, label), style)
        };

        Line::from(vec![
            Span::styled(
                if focused { "> " } else { "  " },
                Style::default().fg(Color::Cyan),
            ),
            option(DatabaseMode::Create, "Create New Database"),
            option(DatabaseMode::Load, "Load Existing Database"),
        ])
    }
}

impl Component for DatabaseSetupComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Esc {
            return Ok(Some(Action::OpenQuitDialog));
        }
        if self.submitting {
            return Ok(None);
        }

        let action = match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::Down => {
                self.cycle_focus(true);
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.cycle_focus(false);
                None
            }
            KeyCode::Left | KeyCode::Right if self.focus == DatabaseField::Mode => {
                self.toggle_mode();
                None
            }
            KeyCode::Backspace => {
                match self.focus {
                    DatabaseField::Path => {
                        self.path.pop();
                    }
                    DatabaseField::MinInstructions => {
                        self.min_instructions.pop();
                    }
                    DatabaseField::Mode => {}
                }
                None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.handle_char(c);
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let (content_area, help_area) = split_help_bar(area);
        let form_area = centered_popup(content_area, 84, 18);

        let mut lines = vec![
            Line::from(Span::styled(
                "Configure your database settings to start analyzing code",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            self.mode_line(),
            Line::from(""),
            field_line(
                self.mode.path_label(),
                &self.path,
                self.focus == DatabaseField::Path,
            ),
            Line::from(Span::styled(
                format!("              {}", self.mode.path_hint()),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        if self.mode == DatabaseMode::Create {
            lines.push(Line::from(""));
            lines.push(field_line(
                "Min instr.",
                &self.min_instructions,
                self.focus == DatabaseField::MinInstructions,
            ));
            let in_range = RECOMMENDED_INSTRUCTIONS.contains(&self.min_amount_instructions());
            lines.push(Line::from(Span::styled(
                format!(
                    "              Enter a value between {} and {} (default: 30)",
                    RECOMMENDED_INSTRUCTIONS.start(),
                    RECOMMENDED_INSTRUCTIONS.end()
                ),
                Style::default().fg(if in_range { Color::DarkGray } else { Color::Yellow }),
            )));
        }

        lines.push(Line::from(""));
        if self.submitting {
            lines.push(Line::from(Span::styled(
                "Submitting...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
        } else if let Some(ref error) = self.error {
            lines.push(error_line(error));
        } else {
            let style = if self.path.is_empty() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            };
            lines.push(Line::from(Span::styled(
                format!("[ Enter: {} ]", self.mode.submit_label()),
                style,
            )));
        }

        let form = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Database Setup ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(form, form_area);

        let help = Paragraph::new(help_line(&[
            ("Enter", "Submit"),
            ("Tab", "Next field"),
            ("←/→", "Switch mode"),
            ("F1", "Help"),
            ("Esc", "Quit"),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, help_area);

        Ok(())
    }
}
