//! UI module for rendering the TUI

mod components;
mod forms;
mod landing;
mod progress;

use crate::app::{App, StatusKind};
use components::ACCENT;
use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Widest the form column gets
const MAX_COLUMN_WIDTH: u16 = 64;

/// Below this opacity a fading view is not drawn at all
const MIN_VISIBLE_OPACITY: f32 = 0.1;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_header(frame, chunks[0]);

    let column = centered_column(chunks[1]);
    if app.wizard.started() {
        draw_form(frame, column, app);
    } else {
        landing::draw(frame, column);
    }

    draw_status_bar(frame, chunks[2], app);
}

fn draw_header(frame: &mut Frame, area: Rect) {
    let header = Line::from(vec![
        Span::raw(" Contact "),
        Span::styled("/>", Style::default().fg(ACCENT)),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Horizontally centered column no wider than [`MAX_COLUMN_WIDTH`]
fn centered_column(area: Rect) -> Rect {
    let width = area.width.saturating_sub(4).min(MAX_COLUMN_WIDTH);
    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    column
}

/// Move `rect` down by `offset` rows (up if negative), clipped to `bounds`
fn shift_vertical(rect: Rect, offset: i32, bounds: Rect) -> Rect {
    let y = (i32::from(rect.y) + offset).max(i32::from(bounds.y)) as u16;
    Rect { y, ..rect }.intersection(bounds)
}

fn draw_form(frame: &mut Frame, area: Rect, app: &App) {
    let stage = app.visible_stage();
    let content_height = 2 + forms::step_height(stage);

    let [content] = Layout::vertical([Constraint::Length(content_height)])
        .flex(Flex::Center)
        .areas(area);
    let [bar_area, _, step_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(content);

    progress::draw(frame, bar_area, app.progress.current());

    let (offset, opacity) = app
        .transition
        .as_ref()
        .map(|t| (t.row_offset(), t.opacity))
        .unwrap_or((0, 1.0));
    if opacity < MIN_VISIBLE_OPACITY {
        return;
    }

    let step_area = shift_vertical(step_area, offset, area);
    forms::draw_step(
        frame,
        step_area,
        stage,
        &app.wizard,
        app.send_focused,
        opacity < 0.5,
    );
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.status_message {
        Some(status) => {
            let color = match status.kind {
                StatusKind::Hint => Color::Yellow,
                StatusKind::Error => Color::Red,
                StatusKind::Success => Color::Green,
            };
            Line::from(Span::styled(
                format!(" {}", status.text),
                Style::default().fg(color),
            ))
        }
        None => {
            let hint = if app.wizard.started() {
                " Ctrl+C: quit"
            } else {
                " Enter: start  q: quit"
            };
            Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray)))
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mailer::MockMailer;
    use crate::state::FieldName;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_landing_shows_start_button() {
        let app = App::new(Arc::new(MockMailer::new()));
        let screen = render(&app);
        assert!(screen.contains(landing::START_LABEL));
        assert!(screen.contains("Contact"));
    }

    #[test]
    fn test_first_step_shows_name_prompt() {
        let mut app = App::new(Arc::new(MockMailer::new()));
        press(&mut app, KeyCode::Enter);
        app.transition = None;

        let screen = render(&app);
        assert!(screen.contains("What's your name?"));
        assert!(!screen.contains(landing::START_LABEL));
    }

    #[test]
    fn test_message_step_shows_send_button() {
        let mut app = App::new(Arc::new(MockMailer::new()));
        press(&mut app, KeyCode::Enter);
        app.wizard.update_field(FieldName::Name, "Ada");
        press(&mut app, KeyCode::Enter);
        app.wizard.update_field(FieldName::Email, "a@b.co");
        press(&mut app, KeyCode::Enter);
        app.transition = None;

        let screen = render(&app);
        assert!(screen.contains("3/3"));
        assert!(screen.contains("Send"));
    }

    #[test]
    fn test_shift_vertical_clips_to_bounds() {
        let bounds = Rect::new(0, 0, 10, 10);
        let rect = Rect::new(0, 2, 10, 6);

        assert_eq!(shift_vertical(rect, -1, bounds).y, 1);
        assert_eq!(shift_vertical(rect, -5, bounds).y, 0);
        assert_eq!(shift_vertical(rect, 6, bounds).height, 2);
    }
}
