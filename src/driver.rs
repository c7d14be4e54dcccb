//! Tick loop that renders and advances an engine until stopped

use crate::config::{Settings, SimulationConfig};
use crate::game_of_life::{GameOfLifeRules, LifeEngine};
use crate::utils::GridRenderer;
use anyhow::{Context, Result};
use std::future::Future;
use std::io::Write;
use std::time::Duration;
use tracing::{debug, info};

/// Outcome of a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub generations: u64,
    pub final_population: usize,
    pub interrupted: bool,
}

/// Drives a [`LifeEngine`] at a fixed cadence, writing one frame per generation
pub struct Driver {
    engine: LifeEngine,
    renderer: GridRenderer,
    simulation: SimulationConfig,
    show_status: bool,
}

impl Driver {
    pub fn new(engine: LifeEngine, renderer: GridRenderer, simulation: SimulationConfig, show_status: bool) -> Self {
        Self {
            engine,
            renderer,
            simulation,
            show_status,
        }
    }

    /// Build the engine and renderer described by `settings`
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Ok(Self::with_engine(settings.build_engine()?, settings))
    }

    /// Drive an already built engine with the display and cadence of `settings`
    pub fn with_engine(engine: LifeEngine, settings: &Settings) -> Self {
        Self::new(
            engine,
            GridRenderer::from_config(&settings.display),
            settings.simulation.clone(),
            settings.display.show_status,
        )
    }

    pub fn engine(&self) -> &LifeEngine {
        &self.engine
    }

    fn status_line(&self) -> String {
        let state = self.engine.current_state();
        format!(
            "Generation {} | Population {} | {} | Press Ctrl-C to quit",
            self.engine.generation(),
            state.population(),
            GameOfLifeRules::notation()
        )
    }

    /// Render one frame of the current generation to `out`
    pub fn render_frame<W: Write>(&self, out: &mut W) -> Result<()> {
        let status = self.show_status.then(|| self.status_line());
        let frame = self.renderer.frame(self.engine.current_state(), status.as_deref());
        out.write_all(frame.as_bytes()).context("Failed to write frame")?;
        out.flush().context("Failed to flush output")?;
        Ok(())
    }

    /// Render, wait and advance in a loop until `shutdown` resolves or the
    /// generation limit is reached.
    ///
    /// The frame for generation `n` is always written before generation
    /// `n + 1` is computed, and shutdown is checked before advancing, so the
    /// returned generation is always the last one rendered.
    pub async fn run_until<W, F>(&mut self, out: &mut W, shutdown: F) -> Result<RunSummary>
    where
        W: Write,
        F: Future,
    {
        let interval = Duration::from_millis(self.simulation.tick_interval_ms);
        tokio::pin!(shutdown);

        info!(
            width = self.engine.width(),
            height = self.engine.height(),
            interval_ms = self.simulation.tick_interval_ms,
            max_generations = ?self.simulation.max_generations,
            "Starting simulation"
        );

        let mut interrupted = false;
        loop {
            self.render_frame(out)?;

            if let Some(limit) = self.simulation.max_generations {
                if self.engine.generation() >= limit {
                    debug!(limit, "Generation limit reached");
                    break;
                }
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    interrupted = true;
                    break;
                }
                _ = tokio::time::sleep(interval) => {}
            }

            self.engine.advance();
        }

        let summary = RunSummary {
            generations: self.engine.generation(),
            final_population: self.engine.current_state().population(),
            interrupted,
        };
        info!(?summary, "Simulation stopped");
        Ok(summary)
    }
}
