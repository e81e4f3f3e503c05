//! Application state module

mod fields;
mod transition;
mod validation;
mod wizard;

pub use fields::*;
pub use transition::*;
pub use wizard::*;
