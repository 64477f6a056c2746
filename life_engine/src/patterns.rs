// patterns.rs - Plaintext patterns and the built-in pattern library

use std::fs;
use std::path::Path;

use log::info;

use crate::error::{Error, Result};
use crate::grid::Grid;

/// Patterns offered by the pattern picker, in plaintext `.cells` form.
pub const BUILTIN: &[(&str, &str)] = &[
    ("Glider", "\
.O.
..O
OOO"),
    ("Blinker", "OOO"),
    ("Toad", "\
.OOO
OOO."),
    ("Beacon", "\
OO..
OO..
..OO
..OO"),
    ("Pulsar", "\
..OOO...OOO..
.............
O....O.O....O
O....O.O....O
O....O.O....O
..OOO...OOO..
.............
..OOO...OOO..
O....O.O....O
O....O.O....O
O....O.O....O
.............
..OOO...OOO.."),
    ("R-pentomino", "\
.OO
OO.
.O."),
    ("Gosper Glider Gun", "\
........................O...........
......................O.O...........
............OO......OO............OO
...........O...O....OO............OO
OO........O.....O...OO..............
OO........O...O.OO....O.O...........
..........O.....O.......O...........
...........O...O....................
............OO......................"),
];

/// A finite arrangement of live cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub name: String,
    /// Text of the `!` header lines, one entry per line.
    pub description: Vec<String>,
    pub width: usize,
    pub height: usize,
    /// Live cells as `(x, y)` offsets from the top-left corner.
    pub cells: Vec<(usize, usize)>,
}

impl Pattern {
    /// Parses plaintext: lines starting with `!` are description, every other
    /// line is a row where `O` marks a live cell.
    pub fn parse(name: impl Into<String>, text: &str) -> Self {
        let mut description = Vec::new();
        let mut rows = Vec::new();
        for line in text.lines() {
            match line.strip_prefix('!') {
                Some(header) => description.push(header.trim().to_owned()),
                None => rows.push(line.trim_end()),
            }
        }
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }

        let cells = rows
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.chars()
                    .enumerate()
                    .filter(|&(_, c)| c == 'O')
                    .map(move |(x, _)| (x, y))
            })
            .collect();

        Self {
            name: name.into(),
            description,
            width: rows.iter().map(|row| row.chars().count()).max().unwrap_or(0),
            height: rows.len(),
            cells,
        }
    }

    /// Reads a plaintext pattern file, named after its file stem.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        let pattern = Self::parse(name, &text);
        for line in &pattern.description {
            info!("{}: {line}", pattern.name);
        }
        Ok(pattern)
    }

    pub fn builtin() -> Vec<Self> {
        BUILTIN
            .iter()
            .map(|&(name, text)| Self::parse(name, text))
            .collect()
    }

    /// `Err(PatternTooLarge)` unless the pattern fits inside the walls of `grid`.
    pub fn check_fits(&self, grid: &Grid) -> Result<()> {
        if self.width <= grid.interior_width() && self.height <= grid.interior_height() {
            return Ok(());
        }
        Err(Error::PatternTooLarge {
            pattern_width: self.width,
            pattern_height: self.height,
            board_width: grid.interior_width(),
            board_height: grid.interior_height(),
        })
    }

    /// Brings the pattern's cells to life around the centre of `grid`, leaving
    /// every other cell as it was.
    pub fn place_centered(&self, grid: &mut Grid) -> Result<()> {
        self.check_fits(grid)?;

        let left = grid.width() / 2 - self.width / 2;
        let top = grid.height() / 2 - self.height / 2;
        for &(x, y) in &self.cells {
            let placed = grid.set_alive(left + x, top + y, true);
            debug_assert!(placed, "centred pattern reached the wall");
        }

        info!(
            "placed {} ({}x{}, {} cells) at ({left}, {top})",
            self.name,
            self.width,
            self.height,
            self.cells.len()
        );
        Ok(())
    }
}
