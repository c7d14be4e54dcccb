//! Configuration settings for the simulation driver

use crate::game_of_life::{load_grid_from_file, Grid, LifeEngine, SeedPolicy};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    pub seed: SeedConfig,
    pub simulation: SimulationConfig,
    pub display: DisplayConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    pub mode: SeedMode,
    /// Fixed seed for random mode; a fresh one is drawn when absent
    #[serde(default)]
    pub random_seed: Option<u64>,
    #[serde(default)]
    pub pattern_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedMode {
    Random,
    Pattern,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub tick_interval_ms: u64,
    /// Stop after this many generations; run until interrupted when absent
    #[serde(default)]
    pub max_generations: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub alive_glyph: char,
    pub dead_glyph: char,
    pub clear_mode: ClearMode,
    pub show_status: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClearMode {
    /// Scroll the previous frame away with blank lines
    Newlines,
    /// ANSI clear-screen and cursor-home
    Ansi,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid: GridConfig {
                width: 150,
                height: 50,
            },
            seed: SeedConfig {
                mode: SeedMode::Random,
                random_seed: None,
                pattern_file: None,
            },
            simulation: SimulationConfig {
                tick_interval_ms: 1000,
                max_generations: None,
            },
            display: DisplayConfig {
                alive_glyph: '0',
                dead_glyph: ' ',
                clear_mode: ClearMode::Newlines,
                show_status: true,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(settings)
    }

    /// Load settings from `path`, falling back to defaults when the file is absent
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::from_file(path)
        } else {
            info!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.grid.width == 0 || self.grid.height == 0 {
            anyhow::bail!(
                "Grid dimensions must be positive, got {}x{}",
                self.grid.width, self.grid.height
            );
        }

        if self.display.alive_glyph == self.display.dead_glyph {
            anyhow::bail!("Alive and dead glyphs must differ");
        }

        if self.seed.mode == SeedMode::Pattern {
            match &self.seed.pattern_file {
                None => anyhow::bail!("Seed mode is 'pattern' but no pattern_file is set"),
                Some(path) if !path.exists() => {
                    anyhow::bail!("Pattern file does not exist: {}", path.display())
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(width) = cli_overrides.width {
            self.grid.width = width;
        }
        if let Some(height) = cli_overrides.height {
            self.grid.height = height;
        }
        if let Some(seed) = cli_overrides.seed {
            self.seed.mode = SeedMode::Random;
            self.seed.random_seed = Some(seed);
        }
        if let Some(ref pattern) = cli_overrides.pattern {
            self.seed.mode = SeedMode::Pattern;
            self.seed.pattern_file = Some(pattern.clone());
        }
        if let Some(interval) = cli_overrides.tick_interval_ms {
            self.simulation.tick_interval_ms = interval;
        }
        if let Some(generations) = cli_overrides.max_generations {
            self.simulation.max_generations = Some(generations);
        }
    }

    /// Build an engine from the grid and seed sections
    pub fn build_engine(&self) -> Result<LifeEngine> {
        self.build_engine_with(None)
    }

    /// Build an engine, using `preloaded` instead of reading `pattern_file`
    /// again when the caller has already parsed it
    pub fn build_engine_with(&self, preloaded: Option<Grid>) -> Result<LifeEngine> {
        let policy = match self.seed.mode {
            SeedMode::Random => {
                let seed = self.seed.random_seed.unwrap_or_else(rand::random);
                info!(seed, "Using random seed");
                SeedPolicy::Random { seed }
            }
            SeedMode::Pattern => match preloaded {
                Some(grid) => SeedPolicy::Pattern(grid),
                None => {
                    let path = self.seed.pattern_file.as_ref()
                        .context("Seed mode is 'pattern' but no pattern_file is set")?;
                    SeedPolicy::Pattern(load_grid_from_file(path)?)
                }
            },
        };

        let engine = LifeEngine::new(self.grid.width, self.grid.height, policy)
            .context("Failed to initialize engine")?;
        Ok(engine)
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub seed: Option<u64>,
    pub pattern: Option<PathBuf>,
    pub tick_interval_ms: Option<u64>,
    pub max_generations: Option<u64>,
}
