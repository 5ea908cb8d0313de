//! Connection screen
//!
//! Collects host and port, validates them locally and asks the App to
//! probe the server. Validation failures never reach the network.

use crate::action::Action;
use crate::component::Component;
use crate::components::layout::{centered_popup, error_line, field_line, help_line, split_help_bar};
use crate::model::ServerConfig;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerField {
    Host,
    Port,
}

pub struct ServerSetupComponent {
    pub host: String,
    pub port: String,
    pub focus: ServerField,
    /// Inline validation or probe error
    pub error: Option<String>,
    /// A probe is outstanding; input is locked
    pub connecting: bool,
}

impl Default for ServerSetupComponent {
    fn default() -> Self {
        Self::new("localhost", 5000)
    }
}

impl ServerSetupComponent {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port: port.to_string(),
            focus: ServerField::Host,
            error: None,
            connecting: false,
        }
    }

    fn input_mut(&mut self) -> &mut String {
        match self.focus {
            ServerField::Host => &mut self.host,
            ServerField::Port => &mut self.port,
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            ServerField::Host => ServerField::Port,
            ServerField::Port => ServerField::Host,
        };
    }

    fn submit(&mut self) -> Option<Action> {
        match ServerConfig::parse(&self.host, &self.port) {
            Ok(server) => {
                self.error = None;
                self.connecting = true;
                Some(Action::Connect(server))
            }
            Err(e) => {
                self.error = Some(e.to_string());
                None
            }
        }
    }

    /// The probe failed; unlock the form and show why
    pub fn connect_failed(&mut self, message: impl Into<String>) {
        self.connecting = false;
        self.error = Some(message.into());
    }

    pub fn reset_busy(&mut self) {
        self.connecting = false;
    }
}

impl Component for ServerSetupComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.code == KeyCode::Esc {
            return Ok(Some(Action::OpenQuitDialog));
        }
        if self.connecting {
            return Ok(None);
        }

        let action = match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.toggle_focus();
                None
            }
            KeyCode::Backspace => {
                self.input_mut().pop();
                self.error = None;
                None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input_mut().push(c);
                self.error = None;
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let (content_area, help_area) = split_help_bar(area);
        let form_area = centered_popup(content_area, 64, 14);

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Enter the analysis server details",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            field_line("Host", &self.host, self.focus == ServerField::Host),
            field_line("Port", &self.port, self.focus == ServerField::Port),
            Line::from(""),
        ];

        if self.connecting {
            lines.push(Line::from(Span::styled(
                "Connecting...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
        } else if let Some(ref error) = self.error {
            lines.push(error_line(error));
        }

        let form = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Connect to Server ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(form, form_area);

        let help = Paragraph::new(help_line(&[
            ("Enter", "Connect"),
            ("Tab", "Next field"),
            ("F1", "Help"),
            ("Esc", "Quit"),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, help_area);

        Ok(())
    }
}
