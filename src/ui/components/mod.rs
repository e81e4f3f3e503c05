//! Reusable UI components

mod button;

pub use button::{button_width, render_button, ACCENT, BUTTON_HEIGHT};
