//! Step header and notice banner drawn around every screen

use crate::model::{AnalysisTool, AppState, Notice, ServerConfig, Severity};
use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Everything the header shows, borrowed from the App
pub struct HeaderContext<'a> {
    pub state: AppState,
    pub server: Option<&'a ServerConfig>,
    pub tool: Option<AnalysisTool>,
    pub last_health_check: Option<DateTime<Local>>,
}

pub fn header_line(ctx: &HeaderContext) -> Line<'static> {
    let mut spans = Vec::new();

    for (i, step) in AppState::all().into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
        }
        let label = format!("{}. {}", step.step_number(), step.title());
        let style = if step == ctx.state {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else if step.step_number() < ctx.state.step_number() {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(label, style));
    }

    if let Some(server) = ctx.server {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            server.address(),
            Style::default().fg(Color::White),
        ));
    }
    if let Some(tool) = ctx.tool {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("[{}]", tool.name()),
            Style::default().fg(Color::Magenta),
        ));
    }
    if let Some(checked) = ctx.last_health_check {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("● {}", checked.format("%H:%M:%S")),
            Style::default().fg(Color::Green),
        ));
    }

    Line::from(spans)
}

pub fn draw_step_header(frame: &mut Frame, area: Rect, ctx: &HeaderContext) {
    let header = Paragraph::new(header_line(ctx)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Cheat Finder ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Error => Color::Red,
    }
}

pub fn draw_notice(frame: &mut Frame, area: Rect, notice: &Notice) {
    let color = severity_color(notice.severity);
    let line = Line::from(vec![
        Span::styled(
            format!("[{}] ", notice.formatted_time()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(notice.message.clone(), Style::default().fg(color)),
        Span::styled("  (Esc to dismiss)", Style::default().fg(Color::DarkGray)),
    ]);
    let banner = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    frame.render_widget(banner, area);
}
