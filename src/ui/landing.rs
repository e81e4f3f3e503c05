//! Landing screen: the button that opens the form

use super::components::{button_width, render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    Frame,
};

pub const START_LABEL: &str = "Wanna tell me something?";

/// Draw the start button centered in `area`
pub fn draw(frame: &mut Frame, area: Rect) {
    let [row] = Layout::vertical([Constraint::Length(BUTTON_HEIGHT)])
        .flex(Flex::Center)
        .areas(area);
    let [button_area] = Layout::horizontal([Constraint::Length(button_width(START_LABEL))])
        .flex(Flex::Center)
        .areas(row);

    render_button(frame, button_area, START_LABEL, true, true);
}
