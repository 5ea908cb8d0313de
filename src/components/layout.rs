//! Layout calculations and small shared widgets

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Areas of the full-screen frame
pub struct ScreenLayout {
    pub header: Rect,
    pub body: Rect,
    pub notice: Option<Rect>,
}

/// Calculate centered popup area
pub fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let popup_x = area.x + (area.width.saturating_sub(width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect::new(
        popup_x,
        popup_y,
        width.min(area.width),
        height.min(area.height),
    )
}

/// Header on top, optional notice banner at the bottom, body in between
pub fn calculate_screen_layout(area: Rect, has_notice: bool) -> ScreenLayout {
    if has_notice {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(area);
        ScreenLayout {
            header: chunks[0],
            body: chunks[1],
            notice: Some(chunks[2]),
        }
    } else {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);
        ScreenLayout {
            header: chunks[0],
            body: chunks[1],
            notice: None,
        }
    }
}

/// Split a screen body into content and a 3-line help bar
pub fn split_help_bar(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);
    (chunks[0], chunks[1])
}

/// `label: value_` line for a text field; the cursor is drawn when focused
pub fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let marker = if focused { "> " } else { "  " };
    let value_style = if focused {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let cursor = if focused { "_" } else { "" };

    Line::from(vec![
        Span::styled(marker.to_string(), Style::default().fg(Color::Cyan)),
        Span::styled(format!("{:<12}", label), Style::default().fg(Color::Cyan)),
        Span::styled(format!("{}{}", value, cursor), value_style),
    ])
}

pub fn error_line(message: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("Error: {}", message),
        Style::default().fg(Color::Red),
    ))
}

/// Key hints rendered as `key description` pairs
pub fn help_line(entries: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(entries.len() * 2);
    for (key, description) in entries {
        spans.push(Span::styled(
            format!(" {} ", key),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!("{}  ", description),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}
