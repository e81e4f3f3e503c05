//! The three step views: name, email, message

use super::field_renderer::{draw_field, draw_help_text};
use crate::platform::SEND_SHORTCUT;
use crate::state::{ContactWizard, FieldName, Stage};
use crate::ui::components::{button_width, render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Height of the message box, borders included
const MESSAGE_HEIGHT: u16 = 8;

fn prompt(field: FieldName) -> &'static str {
    match field {
        FieldName::Name => "What's your name?",
        FieldName::Email => "How can I reach you?",
        FieldName::Message => "What would you like to tell me?",
    }
}

fn help(field: FieldName) -> String {
    match field {
        FieldName::Name | FieldName::Email => "Enter: next".to_string(),
        FieldName::Message => format!("Enter: new line  Tab: focus Send  {SEND_SHORTCUT}: send"),
    }
}

/// Rows a step view needs
pub fn step_height(stage: Stage) -> u16 {
    match stage.field() {
        Some(FieldName::Message) => 2 + MESSAGE_HEIGHT + 1 + BUTTON_HEIGHT,
        Some(_) => 2 + 3 + 1,
        None => 0,
    }
}

/// Draw the view for `stage`. `dimmed` is set while the view fades.
pub fn draw_step(
    frame: &mut Frame,
    area: Rect,
    stage: Stage,
    wizard: &ContactWizard,
    send_focused: bool,
    dimmed: bool,
) {
    let Some(field) = stage.field() else {
        return;
    };
    let is_message = field == FieldName::Message;
    let field_height = if is_message { MESSAGE_HEIGHT } else { 3 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // Prompt
            Constraint::Length(1),            // Spacer
            Constraint::Length(field_height), // Input
            Constraint::Length(1),            // Help
            Constraint::Length(if is_message { BUTTON_HEIGHT } else { 0 }),
            Constraint::Min(0),
        ])
        .split(area);

    let prompt_style = if dimmed {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let step_label = Span::styled(
        format!("{}/3 ", stage.step()),
        Style::default().fg(Color::DarkGray),
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            step_label,
            Span::styled(prompt(field), prompt_style),
        ])),
        chunks[0],
    );

    let typing = !dimmed && !wizard.submitting() && !(is_message && send_focused);
    draw_field(frame, chunks[2], field, wizard.field(field), typing);
    draw_help_text(frame, chunks[3], &help(field));

    if is_message {
        let label = if wizard.submitting() {
            "Sending..."
        } else {
            "Send"
        };
        let [button_area] = Layout::horizontal([Constraint::Length(button_width("Sending..."))])
            .flex(Flex::End)
            .areas(chunks[4]);
        render_button(
            frame,
            button_area,
            label,
            send_focused && !dimmed,
            !wizard.submitting(),
        );
    }
}
