//! Configuration management for the simulation driver

pub mod settings;

pub use settings::{
    Settings, GridConfig, SeedConfig, SimulationConfig, DisplayConfig, OutputConfig,
    SeedMode, ClearMode, OutputFormat, CliOverrides
};
