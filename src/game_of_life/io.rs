//! File I/O operations for Game of Life patterns

use super::Grid;
use anyhow::{Context, Result};
use std::path::Path;

/// Load a grid from a text file
/// Format: each line is a row; `1`, `#` or `O` mark living cells and `0` or `.` dead ones
pub fn load_grid_from_file<P: AsRef<Path>>(path: P) -> Result<Grid> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read pattern file: {}", path.as_ref().display()))?;

    parse_grid_from_string(&content)
        .with_context(|| format!("Failed to parse pattern from file: {}", path.as_ref().display()))
}

/// Parse a grid from its text representation
pub fn parse_grid_from_string(content: &str) -> Result<Grid> {
    let lines: Vec<&str> = content.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('!'))
        .collect();

    if lines.is_empty() {
        anyhow::bail!("Pattern is empty or contains no valid rows");
    }

    let width = lines[0].chars().count();
    let mut rows = Vec::with_capacity(lines.len());

    for (y, line) in lines.iter().enumerate() {
        let row = line.chars()
            .enumerate()
            .map(|(x, ch)| match ch {
                '1' | '#' | 'O' => Ok(true),
                '0' | '.' => Ok(false),
                _ => anyhow::bail!(
                    "Invalid character '{}' at position ({}, {}). Use '1', '#' or 'O' for alive and '0' or '.' for dead",
                    ch, x, y
                ),
            })
            .collect::<Result<Vec<bool>>>()?;

        if row.len() != width {
            anyhow::bail!("Row {} has length {}, expected {} (all rows must have the same length)",
                         y, row.len(), width);
        }
        rows.push(row);
    }

    Grid::from_rows(rows)
}

/// Convert a grid to its text representation
pub fn grid_to_string(grid: &Grid) -> String {
    let mut result = String::with_capacity(grid.height() * (grid.width() + 1));

    for y in 0..grid.height() {
        for cell in grid.row(y) {
            result.push(if cell.is_alive() { '1' } else { '0' });
        }
        result.push('\n');
    }

    result
}

/// Save a grid to a text file
pub fn save_grid_to_file<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    write_creating_parent(path.as_ref(), grid_to_string(grid))
}

/// Save a grid as JSON
pub fn save_grid_as_json<P: AsRef<Path>>(grid: &Grid, path: P) -> Result<()> {
    let content = serde_json::to_string_pretty(grid)
        .context("Failed to serialize grid")?;
    write_creating_parent(path.as_ref(), content)
}

fn write_creating_parent(path: &Path, content: String) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write grid to file: {}", path.display()))?;

    Ok(())
}

/// Write the stock example patterns into `output_dir`
pub fn create_example_patterns<P: AsRef<Path>>(output_dir: P) -> Result<()> {
    let dir = output_dir.as_ref();
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

    let patterns = [
        // Leaves through the bottom-right edge and re-enters top-left
        ("glider.txt", "00100000\n10100000\n01100000\n00000000\n00000000\n00000000\n00000000\n00000000\n"),
        // Period 2 oscillator
        ("blinker.txt", "00000\n00000\n01110\n00000\n00000\n"),
        // Still life
        ("block.txt", "0000\n0110\n0110\n0000\n"),
        // Period 2 oscillator
        ("beacon.txt", "000000\n011000\n011000\n000110\n000110\n000000\n"),
    ];

    for (name, content) in patterns {
        std::fs::write(dir.join(name), content)
            .with_context(|| format!("Failed to write {}", name))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_of_life::GameOfLifeRules;
    use tempfile::tempdir;

    #[test]
    fn test_parse_grid_from_string() {
        let content = "010\n101\n010\n";
        let grid = parse_grid_from_string(content).unwrap();

        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);

        assert_eq!(grid.population(), 4);
        assert!(grid.is_alive(1, 0));
        assert!(grid.is_alive(0, 1));
        assert!(grid.is_alive(2, 1));
        assert!(grid.is_alive(1, 2));
    }

    #[test]
    fn test_alternate_glyphs_and_comments() {
        let content = "!Name: Blinker\n.....\n.OOO.\n..#..\n";
        let grid = parse_grid_from_string(content).unwrap();
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.living_cells(), vec![(1, 1), (2, 1), (3, 1), (2, 2)]);
    }

    #[test]
    fn test_grid_to_string() {
        let grid = Grid::with_alive(3, 2, &[(1, 0), (0, 1), (2, 1)]).unwrap();
        assert_eq!(grid_to_string(&grid), "010\n101\n");
    }

    #[test]
    fn test_file_operations() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("nested/test_grid.txt");

        let original_grid = Grid::with_alive(3, 2, &[(0, 0), (2, 0), (1, 1)]).unwrap();
        save_grid_to_file(&original_grid, &file_path).unwrap();

        let loaded_grid = load_grid_from_file(&file_path).unwrap();
        assert_eq!(original_grid, loaded_grid);
    }

    #[test]
    fn test_json_snapshot() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("snapshot.json");

        let grid = Grid::with_alive(4, 4, &[(1, 1), (2, 2)]).unwrap();
        save_grid_as_json(&grid, &file_path).unwrap();

        let content = std::fs::read_to_string(&file_path).unwrap();
        let loaded: Grid = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded, grid);
    }

    #[test]
    fn test_invalid_input() {
        assert!(parse_grid_from_string("010\n1X1\n010\n").is_err());
        assert!(parse_grid_from_string("010\n11\n010\n").is_err());
        assert!(parse_grid_from_string("").is_err());
        assert!(parse_grid_from_string("!only a comment\n").is_err());
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = tempdir().unwrap();
        let err = load_grid_from_file(temp_dir.path().join("absent.txt")).unwrap_err();
        assert!(err.to_string().contains("absent.txt"));
    }

    #[test]
    fn test_create_example_patterns() {
        let temp_dir = tempdir().unwrap();
        create_example_patterns(temp_dir.path()).unwrap();

        for name in ["glider.txt", "blinker.txt", "block.txt", "beacon.txt"] {
            assert!(temp_dir.path().join(name).exists(), "{} missing", name);
        }

        let glider = load_grid_from_file(temp_dir.path().join("glider.txt")).unwrap();
        assert_eq!(glider.width(), 8);
        assert_eq!(glider.height(), 8);
        assert_eq!(glider.population(), 5);

        let block = load_grid_from_file(temp_dir.path().join("block.txt")).unwrap();
        assert_eq!(GameOfLifeRules::evolve(&block), block);

        let beacon = load_grid_from_file(temp_dir.path().join("beacon.txt")).unwrap();
        assert_eq!(GameOfLifeRules::evolve_generations(beacon.clone(), 2), beacon);
        assert_ne!(GameOfLifeRules::evolve(&beacon), beacon);
    }
}
