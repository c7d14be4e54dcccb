//! Dense toroidal grid of cells

use super::error::{EngineError, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// State of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    Alive,
    #[default]
    Dead,
}

impl Cell {
    #[inline]
    pub fn is_alive(self) -> bool {
        matches!(self, Cell::Alive)
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }
}

/// A fixed-size Game of Life grid whose edges wrap around.
///
/// Cells are stored row-major in a flat vector indexed by `y * width + x`,
/// so every coordinate inside the dimensions always has a state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

#[derive(Deserialize)]
struct RawGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = String;

    fn try_from(raw: RawGrid) -> std::result::Result<Self, Self::Error> {
        let len = check_dimensions(raw.width, raw.height).map_err(|e| e.to_string())?;
        if raw.cells.len() != len {
            return Err(format!(
                "Grid has {} cells, expected {} for {}x{}",
                raw.cells.len(),
                len,
                raw.width,
                raw.height
            ));
        }
        Ok(Self {
            width: raw.width,
            height: raw.height,
            cells: raw.cells,
        })
    }
}

/// Number of cells in a `width` x `height` grid, if that size is representable
pub(crate) fn check_dimensions(width: usize, height: usize) -> Result<usize> {
    match width.checked_mul(height) {
        Some(len) if len > 0 && len <= isize::MAX as usize => Ok(len),
        _ => Err(EngineError::InvalidDimension { width, height }),
    }
}

impl Grid {
    /// Create a grid with every cell dead
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let len = check_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Dead; len],
        })
    }

    /// Create a grid where each cell is independently alive with probability 0.5
    pub fn random<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Result<Self> {
        let len = check_dimensions(width, height)?;
        let cells = (0..len)
            .map(|_| Cell::from(rng.gen_bool(0.5)))
            .collect();
        Ok(Self { width, height, cells })
    }

    /// Create a grid from rows of booleans (`rows[y][x]`)
    pub fn from_rows(rows: Vec<Vec<bool>>) -> anyhow::Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        check_dimensions(width, height)?;

        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                anyhow::bail!("Row {} has length {}, expected {}", y, row.len(), width);
            }
        }

        let cells = rows.into_iter().flatten().map(Cell::from).collect();
        Ok(Self { width, height, cells })
    }

    /// Create a dead grid with the given coordinates set alive
    pub fn with_alive(width: usize, height: usize, alive: &[(usize, usize)]) -> anyhow::Result<Self> {
        let mut grid = Self::new(width, height)?;
        for &(x, y) in alive {
            grid.set(x, y, Cell::Alive)?;
        }
        Ok(grid)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false: dimensions are positive by construction
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Cell state at `(x, y)`, or `None` outside the grid
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if x < self.width && y < self.height {
            Some(self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    /// Whether `(x, y)` is inside the grid and alive
    #[inline]
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some_and(Cell::is_alive)
    }

    /// Set cell state at `(x, y)`
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> anyhow::Result<()> {
        if x >= self.width || y >= self.height {
            anyhow::bail!(
                "Coordinates ({}, {}) out of bounds for {}x{} grid",
                x, y, self.width, self.height
            );
        }
        let idx = self.index(x, y);
        self.cells[idx] = cell;
        Ok(())
    }

    /// Row `y` as a slice, `x` ascending
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * self.width;
        &self.cells[start..start + self.width]
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// The eight wrapped neighbor coordinates of `(x, y)`.
    ///
    /// Offsets are applied by adding `dimension - 1` rather than subtracting,
    /// so the result never underflows and always lands in range.
    pub fn neighbors(&self, x: usize, y: usize) -> [(usize, usize); 8] {
        let left = (x + self.width - 1) % self.width;
        let right = (x + 1) % self.width;
        let above = (y + self.height - 1) % self.height;
        let below = (y + 1) % self.height;

        [
            (left, above),
            (x, above),
            (right, above),
            (left, y),
            (right, y),
            (left, below),
            (x, below),
            (right, below),
        ]
    }

    /// Count living neighbors of `(x, y)` with toroidal wraparound
    pub fn count_neighbors(&self, x: usize, y: usize) -> u8 {
        self.neighbors(x, y)
            .iter()
            .filter(|&&(nx, ny)| self.cells[self.index(nx, ny)].is_alive())
            .count() as u8
    }

    /// Coordinates of every living cell, row by row
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_alive())
            .map(|(idx, _)| (idx % self.width, idx / self.width))
            .collect()
    }

    /// Count total living cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Fraction of cells alive
    pub fn density(&self) -> f64 {
        self.population() as f64 / self.cells.len() as f64
    }

    /// Whether no cell is alive
    pub fn is_extinct(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_alive())
    }

    /// Same dimensions as `other`
    pub fn same_dimensions(&self, other: &Grid) -> bool {
        self.width == other.width && self.height == other.height
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for cell in self.row(y) {
                let symbol = if cell.is_alive() { '█' } else { '·' };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(4, 3).unwrap();
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.len(), 12);
        assert!(grid.is_extinct());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert_eq!(
            Grid::new(0, 5),
            Err(EngineError::InvalidDimension { width: 0, height: 5 })
        );
        assert!(Grid::new(5, 0).is_err());
        assert!(Grid::from_rows(vec![]).is_err());
        assert!(Grid::from_rows(vec![vec![]]).is_err());
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        let side = 1usize << (usize::BITS / 2);
        assert_eq!(
            Grid::new(side, side),
            Err(EngineError::InvalidDimension { width: side, height: side })
        );
        assert!(Grid::random(usize::MAX, 2, &mut ChaCha8Rng::seed_from_u64(1)).is_err());

        let json = format!(r#"{{"width":{},"height":{},"cells":[]}}"#, side, side);
        assert!(serde_json::from_str::<Grid>(&json).is_err());
    }

    #[test]
    fn test_grid_from_rows() {
        let rows = vec![
            vec![true, false, true],
            vec![false, true, false],
        ];
        let grid = Grid::from_rows(rows).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.population(), 3);
        assert!(grid.is_alive(2, 0));
        assert!(grid.is_alive(1, 1));
        assert!(!grid.is_alive(1, 0));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let rows = vec![vec![true, false], vec![true]];
        assert!(Grid::from_rows(rows).is_err());
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut grid = Grid::new(3, 3).unwrap();
        assert!(grid.set(3, 0, Cell::Alive).is_err());
        assert!(grid.set(0, 3, Cell::Alive).is_err());
        assert_eq!(grid.get(3, 0), None);
    }

    #[test]
    fn test_neighbor_counting() {
        let rows = vec![
            vec![true, true, true, false],
            vec![true, false, true, false],
            vec![true, true, true, false],
            vec![false, false, false, false],
        ];
        let grid = Grid::from_rows(rows).unwrap();

        assert_eq!(grid.count_neighbors(1, 1), 8);
        // (3, 3) wraps to touch (0, 0), (2, 2), (0, 2) and (2, 0)
        assert_eq!(grid.count_neighbors(3, 3), 4);
    }

    #[test]
    fn test_corners_are_neighbors() {
        let mut grid = Grid::new(5, 4).unwrap();
        grid.set(4, 3, Cell::Alive).unwrap();
        assert_eq!(grid.count_neighbors(0, 0), 1);

        let mut grid = Grid::new(5, 4).unwrap();
        grid.set(0, 0, Cell::Alive).unwrap();
        assert_eq!(grid.count_neighbors(4, 3), 1);
    }

    #[test]
    fn test_repeated_neighbors_count_each_time() {
        // On a 1x1 torus all eight neighbors are the cell itself
        let single = Grid::with_alive(1, 1, &[(0, 0)]).unwrap();
        assert_eq!(single.count_neighbors(0, 0), 8);

        // On 2x2, left and right of (0, 0) are both column 1
        let square = Grid::with_alive(2, 2, &[(1, 0)]).unwrap();
        assert_eq!(square.count_neighbors(0, 0), 2);
        assert_eq!(square.count_neighbors(1, 1), 2);
        // (0, 1) sees (1, 0) through all four diagonals
        assert_eq!(square.count_neighbors(0, 1), 4);

        // A 1x3 column: above and below are distinct rows, left and right are the column itself
        let column = Grid::with_alive(1, 3, &[(0, 0)]).unwrap();
        assert_eq!(column.count_neighbors(0, 0), 2);
        assert_eq!(column.count_neighbors(0, 1), 3);
        assert_eq!(column.count_neighbors(0, 2), 3);
    }

    #[test]
    fn test_neighbors_stay_in_range() {
        let grid = Grid::new(7, 2).unwrap();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                for (nx, ny) in grid.neighbors(x, y) {
                    assert!(nx < 7 && ny < 2);
                }
            }
        }
    }

    #[test]
    fn test_random_is_reproducible() {
        let a = Grid::random(20, 10, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
        let b = Grid::random(20, 10, &mut ChaCha8Rng::seed_from_u64(7)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 200);
        // A fair coin over 200 cells should land well inside these bounds
        assert!(a.population() > 50 && a.population() < 150);
    }

    #[test]
    fn test_living_cells_use_xy() {
        let grid = Grid::with_alive(4, 3, &[(3, 0), (1, 2)]).unwrap();
        assert_eq!(grid.living_cells(), vec![(3, 0), (1, 2)]);
    }

    #[test]
    fn test_deserialize_validates_shape() {
        let bad = r#"{"width":2,"height":2,"cells":["alive"]}"#;
        assert!(serde_json::from_str::<Grid>(bad).is_err());

        let zero = r#"{"width":0,"height":2,"cells":[]}"#;
        assert!(serde_json::from_str::<Grid>(zero).is_err());

        let grid = Grid::with_alive(2, 1, &[(1, 0)]).unwrap();
        let json = serde_json::to_string(&grid).unwrap();
        assert_eq!(serde_json::from_str::<Grid>(&json).unwrap(), grid);
    }
}
