//! Field rendering utilities for the step views

use crate::state::FieldName;
use crate::ui::components::ACCENT;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

/// Placeholder shown in an empty field
fn placeholder(field: FieldName) -> &'static str {
    match field {
        FieldName::Name => "Your name",
        FieldName::Email => "you@example.com",
        FieldName::Message => "Say hi...",
    }
}

/// Draw one input box
pub fn draw_field(frame: &mut Frame, area: Rect, field: FieldName, value: &str, is_active: bool) {
    let border_style = if is_active {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let cursor = if is_active { "▌" } else { "" };
    let cursor_span = Span::styled(cursor, Style::default().fg(ACCENT));

    let content = if value.is_empty() {
        Paragraph::new(Line::from(vec![
            cursor_span,
            Span::styled(placeholder(field), Style::default().fg(Color::DarkGray)),
        ]))
    } else if field.is_multiline() {
        let mut lines: Vec<Line> = value.split('\n').map(|l| Line::from(l.to_string())).collect();
        if let Some(last) = lines.last_mut() {
            last.spans.push(cursor_span);
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![Span::raw(value), cursor_span]))
    };

    let block = Block::default()
        .title(format!(" {} ", field.label()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

/// Draw a dimmed line of key hints
pub fn draw_help_text(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(help, area);
}
