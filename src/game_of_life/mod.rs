//! Game of Life core functionality

pub mod engine;
pub mod error;
pub mod grid;
pub mod io;
pub mod rules;

pub use engine::{LifeEngine, SeedPolicy};
pub use error::EngineError;
pub use grid::{Cell, Grid};
pub use io::{create_example_patterns, load_grid_from_file, save_grid_as_json, save_grid_to_file};
pub use rules::GameOfLifeRules;
