//! Double-buffered simulation engine
//!
//! The engine owns two grids of identical dimensions. Each call to
//! [`LifeEngine::advance`] fills the inactive buffer from the active one and
//! then swaps them, so no generation is ever computed from partially updated
//! state and no storage is allocated per tick.

use super::error::{EngineError, Result};
use super::grid::check_dimensions;
use super::{GameOfLifeRules, Grid};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, instrument, trace};

/// How the first generation is populated
#[derive(Debug, Clone)]
pub enum SeedPolicy {
    /// Each cell alive with probability 0.5, drawn from a ChaCha8 stream seeded with `seed`
    Random { seed: u64 },
    /// Start from an explicit grid, which must match the engine dimensions
    Pattern(Grid),
}

/// Game of Life engine over a fixed-size torus
#[derive(Debug, Clone)]
pub struct LifeEngine {
    current: Grid,
    next: Grid,
    generation: u64,
}

impl LifeEngine {
    /// Create an engine of the given dimensions seeded by `seed`
    #[instrument(skip(seed))]
    pub fn new(width: usize, height: usize, seed: SeedPolicy) -> Result<Self> {
        let current = match seed {
            SeedPolicy::Random { seed } => {
                debug!(seed, "Seeding grid randomly");
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                Grid::random(width, height, &mut rng)?
            }
            SeedPolicy::Pattern(grid) => {
                // A zero size is reported as such, not as a mismatch
                check_dimensions(width, height)?;
                if grid.width() != width || grid.height() != height {
                    return Err(EngineError::DimensionMismatch {
                        expected_width: width,
                        expected_height: height,
                        actual_width: grid.width(),
                        actual_height: grid.height(),
                    });
                }
                grid
            }
        };

        Ok(Self::from_grid(current))
    }

    /// Create an engine seeded from a caller-supplied random source
    pub fn with_rng<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Self> {
        let current = Grid::random(width, height, rng)?;
        Ok(Self::from_grid(current))
    }

    /// Create an engine whose first generation is `grid`
    pub fn from_grid(grid: Grid) -> Self {
        debug!(
            width = grid.width(),
            height = grid.height(),
            population = grid.population(),
            "Engine initialized"
        );
        Self {
            next: grid.clone(),
            current: grid,
            generation: 0,
        }
    }

    /// The current generation
    #[inline]
    pub fn current_state(&self) -> &Grid {
        &self.current
    }

    /// An owned copy of the current generation, safe to hold across [`advance`](Self::advance)
    pub fn snapshot(&self) -> Grid {
        self.current.clone()
    }

    /// Compute and commit the next generation
    pub fn advance(&mut self) {
        GameOfLifeRules::evolve_into(&self.current, &mut self.next);
        std::mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;

        trace!(
            generation = self.generation,
            population = self.current.population(),
            "Advanced"
        );
    }

    /// Advance `generations` times
    pub fn advance_by(&mut self, generations: u64) {
        for _ in 0..generations {
            self.advance();
        }
    }

    /// Number of advances since construction
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.current.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.current.height()
    }
}
