//! Schematic document model and pin placement.

pub mod pins;
pub mod types;

pub use pins::{abs_pins, pin_position, AbsPin};
pub use types::*;
