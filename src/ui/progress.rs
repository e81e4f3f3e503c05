//! Progress bar above the step views

use super::components::ACCENT;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const FILLED: &str = "█";
const EMPTY: &str = "░";

/// Number of filled cells for `ratio` across `width` cells
pub fn filled_cells(ratio: f32, width: u16) -> u16 {
    let ratio = ratio.clamp(0.0, 1.0);
    (ratio * f32::from(width)).round() as u16
}

/// Draw a one-row bar filled to `ratio` (0.0 to 1.0)
pub fn draw(frame: &mut Frame, area: Rect, ratio: f32) {
    let filled = filled_cells(ratio, area.width);
    let empty = area.width.saturating_sub(filled);

    let line = Line::from(vec![
        Span::styled(FILLED.repeat(filled as usize), Style::default().fg(ACCENT)),
        Span::styled(EMPTY.repeat(empty as usize), Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
