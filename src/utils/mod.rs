//! Console output helpers

pub mod display;

pub use display::{format_grid_with_coords, ColorOutput, GridRenderer};
