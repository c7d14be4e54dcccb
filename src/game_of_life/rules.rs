//! Game of Life rules implementation (B3/S23)

use super::{Cell, Grid};
use rayon::prelude::*;

/// Game of Life rules engine
pub struct GameOfLifeRules;

impl GameOfLifeRules {
    /// Next state of a cell given its current state and living neighbor count
    #[inline]
    pub fn next_state(current: Cell, neighbor_count: u8) -> Cell {
        match (current, neighbor_count) {
            (Cell::Alive, 2) | (Cell::Alive, 3) | (Cell::Dead, 3) => Cell::Alive, // Survive or birth
            _ => Cell::Dead,
        }
    }

    /// Write the generation after `current` into `next`.
    ///
    /// Rows of `next` are filled in parallel; every read goes to `current`.
    /// Both grids must share dimensions.
    pub fn evolve_into(current: &Grid, next: &mut Grid) {
        debug_assert!(current.same_dimensions(next));
        let width = current.width();

        next.cells_mut()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, cell) in row.iter_mut().enumerate() {
                    let neighbors = current.count_neighbors(x, y);
                    let state = current.row(y)[x];
                    *cell = Self::next_state(state, neighbors);
                }
            });
    }

    /// Apply the rules to produce a fresh grid one generation forward
    pub fn evolve(current: &Grid) -> Grid {
        let mut next = current.clone();
        Self::evolve_into(current, &mut next);
        next
    }

    /// Evolve the grid for multiple generations
    pub fn evolve_generations(mut grid: Grid, generations: usize) -> Grid {
        let mut scratch = grid.clone();
        for _ in 0..generations {
            Self::evolve_into(&grid, &mut scratch);
            std::mem::swap(&mut grid, &mut scratch);
        }
        grid
    }

    /// Neighbor counts at which a dead cell is born
    pub fn birth_neighbor_counts() -> &'static [u8] {
        &[3]
    }

    /// Neighbor counts at which a live cell survives
    pub fn survival_neighbor_counts() -> &'static [u8] {
        &[2, 3]
    }

    /// Rule in B/S notation, e.g. `B3/S23`
    pub fn notation() -> String {
        let digits = |counts: &[u8]| counts.iter().map(u8::to_string).collect::<String>();
        format!(
            "B{}/S{}",
            digits(Self::birth_neighbor_counts()),
            digits(Self::survival_neighbor_counts())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_logic() {
        assert_eq!(GameOfLifeRules::next_state(Cell::Alive, 2), Cell::Alive); // Survival with 2 neighbors
        assert_eq!(GameOfLifeRules::next_state(Cell::Alive, 3), Cell::Alive);
        assert_eq!(GameOfLifeRules::next_state(Cell::Dead, 3), Cell::Alive); // Birth
        assert_eq!(GameOfLifeRules::next_state(Cell::Dead, 2), Cell::Dead); // No birth with 2
        assert_eq!(GameOfLifeRules::next_state(Cell::Alive, 1), Cell::Dead);
        assert_eq!(GameOfLifeRules::next_state(Cell::Alive, 4), Cell::Dead);
    }

    #[test]
    fn test_every_neighbor_count() {
        for n in 0..=8u8 {
            let from_alive = GameOfLifeRules::next_state(Cell::Alive, n);
            let from_dead = GameOfLifeRules::next_state(Cell::Dead, n);
            match n {
                3 => {
                    assert_eq!(from_alive, Cell::Alive);
                    assert_eq!(from_dead, Cell::Alive);
                }
                2 => {
                    assert_eq!(from_alive, Cell::Alive);
                    assert_eq!(from_dead, Cell::Dead);
                }
                _ => {
                    assert_eq!(from_alive, Cell::Dead);
                    assert_eq!(from_dead, Cell::Dead);
                }
            }
        }
    }

    #[test]
    fn test_still_life_block() {
        let grid = Grid::with_alive(4, 4, &[(1, 1), (2, 1), (1, 2), (2, 2)]).unwrap();
        let evolved = GameOfLifeRules::evolve(&grid);
        assert_eq!(grid, evolved);
    }

    #[test]
    fn test_oscillator_blinker() {
        // Horizontal blinker on a 5x5 torus, far enough from itself to behave as on a plane
        let grid = Grid::with_alive(5, 5, &[(1, 2), (2, 2), (3, 2)]).unwrap();
        let evolved = GameOfLifeRules::evolve(&grid);

        let expected = Grid::with_alive(5, 5, &[(2, 1), (2, 2), (2, 3)]).unwrap();
        assert_eq!(evolved, expected);

        let evolved_twice = GameOfLifeRules::evolve(&evolved);
        assert_eq!(grid, evolved_twice);
    }

    #[test]
    fn test_glider_wraps_around() {
        // A glider moves one cell diagonally every 4 generations; on a 6x6 torus
        // it returns to its starting position after 24.
        let glider = Grid::with_alive(6, 6, &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]).unwrap();

        let shifted = GameOfLifeRules::evolve_generations(glider.clone(), 4);
        let expected = Grid::with_alive(6, 6, &[(2, 1), (3, 2), (1, 3), (2, 3), (3, 3)]).unwrap();
        assert_eq!(shifted, expected);

        let home = GameOfLifeRules::evolve_generations(glider.clone(), 24);
        assert_eq!(home, glider);
    }

    #[test]
    fn test_neighbor_count_constants() {
        assert_eq!(GameOfLifeRules::birth_neighbor_counts(), &[3]);
        assert_eq!(GameOfLifeRules::survival_neighbor_counts(), &[2, 3]);
        assert_eq!(GameOfLifeRules::notation(), "B3/S23");
    }
}
