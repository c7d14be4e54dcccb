//! Conway's Game of Life on a torus
//!
//! The core is [`game_of_life::LifeEngine`], a double-buffered engine for the
//! B3/S23 rule on a fixed-size grid whose edges wrap around. The [`driver`]
//! renders it to a console at a fixed cadence.

pub mod config;
pub mod driver;
pub mod game_of_life;
pub mod utils;

pub use config::Settings;
pub use driver::{Driver, RunSummary};
pub use game_of_life::{Cell, EngineError, Grid, LifeEngine, SeedPolicy};
