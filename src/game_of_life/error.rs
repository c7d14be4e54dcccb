//! Error types for engine construction

use thiserror::Error;

/// Errors raised while constructing a grid or engine.
///
/// Advancing a validly constructed engine cannot fail, so these only ever
/// surface from constructors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid grid dimensions {width}x{height}: width and height must be positive")]
    InvalidDimension { width: usize, height: usize },

    #[error("Seed grid is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        actual_width: usize,
        actual_height: usize,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
