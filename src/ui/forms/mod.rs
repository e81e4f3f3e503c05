//! Step view rendering
//!
//! - `field_renderer`: input box and help line
//! - `steps`: the three step views

mod field_renderer;
mod steps;

pub use steps::{draw_step, step_height};
