//! Display and output formatting utilities

use crate::config::{ClearMode, DisplayConfig};
use crate::game_of_life::Grid;
use itertools::Itertools;

/// Blank lines printed between frames in [`ClearMode::Newlines`]
const CLEAR_NEWLINES: usize = 50;

const ANSI_CLEAR: &str = "\x1b[2J\x1b[H";

/// Renders grid snapshots as console frames
#[derive(Debug, Clone)]
pub struct GridRenderer {
    alive_glyph: char,
    dead_glyph: char,
    clear_mode: ClearMode,
}

impl GridRenderer {
    pub fn new(alive_glyph: char, dead_glyph: char, clear_mode: ClearMode) -> Self {
        Self {
            alive_glyph,
            dead_glyph,
            clear_mode,
        }
    }

    pub fn from_config(config: &DisplayConfig) -> Self {
        Self::new(config.alive_glyph, config.dead_glyph, config.clear_mode)
    }

    /// Rows of glyphs joined by newlines, with a trailing newline
    pub fn render(&self, grid: &Grid) -> String {
        let mut output = (0..grid.height())
            .map(|y| {
                grid.row(y)
                    .iter()
                    .map(|cell| if cell.is_alive() { self.alive_glyph } else { self.dead_glyph })
                    .collect::<String>()
            })
            .join("\n");
        output.push('\n');
        output
    }

    /// Sequence that wipes the previous frame
    pub fn clear_sequence(&self) -> String {
        match self.clear_mode {
            ClearMode::Newlines => "\n".repeat(CLEAR_NEWLINES),
            ClearMode::Ansi => ANSI_CLEAR.to_string(),
            ClearMode::None => String::new(),
        }
    }

    /// A complete frame: clear sequence, grid, and an optional status line
    pub fn frame(&self, grid: &Grid, status: Option<&str>) -> String {
        let mut output = self.clear_sequence();
        output.push_str(&self.render(grid));
        if let Some(status) = status {
            output.push_str(status);
            output.push('\n');
        }
        output
    }
}

impl Default for GridRenderer {
    fn default() -> Self {
        Self::new('0', ' ', ClearMode::Newlines)
    }
}

/// Format a grid with column and row numbers
pub fn format_grid_with_coords(grid: &Grid) -> String {
    let mut output = String::new();

    // Header with column numbers
    output.push_str("   ");
    for x in 0..grid.width() {
        output.push_str(&format!("{:2}", x % 10));
    }
    output.push('\n');

    for y in 0..grid.height() {
        output.push_str(&format!("{:2} ", y));
        for cell in grid.row(y) {
            output.push_str(if cell.is_alive() { "██" } else { "··" });
        }
        output.push('\n');
    }

    output
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() &&
        (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
