//! Fixed-size bingo board backed by a 2D array
//!
//! Cells are stored as `Array2<Option<BingoTile>>` with shape `(height, width)`
//! and addressed as `(x, y)` through the accessors. The size is fixed at
//! construction; populating replaces every cell at once.

use crate::analysis::statistics::mean;
use crate::content::{config::ConfigModel, metadata::BoardMetadata};
use crate::io::error::{BingoError, Result, invalid_parameter};
use crate::spatial::tiles::BingoTile;
use ndarray::Array2;
use std::collections::BTreeMap;
use std::fmt;

/// A width × height grid of tiles plus board-level summary data
#[derive(Debug, Clone, PartialEq)]
pub struct BingoBoard {
    cells: Array2<Option<BingoTile>>,

    /// Descriptive information copied from the configuration
    pub metadata: Option<BoardMetadata>,

    /// Tiles per category name, every known category included
    pub category_counts: BTreeMap<String, usize>,

    /// Mean difficulty of the placed tiles
    pub difficulty: f64,
}

impl BingoBoard {
    /// Create an empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: Array2::from_elem((height, width), None),
            metadata: None,
            category_counts: BTreeMap::new(),
            difficulty: 0.0,
        }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Tile at column `x`, row `y`; `None` when empty or out of range
    pub fn get(&self, x: usize, y: usize) -> Option<&BingoTile> {
        self.cells.get([y, x]).and_then(Option::as_ref)
    }

    /// Place a single tile
    ///
    /// # Errors
    ///
    /// Returns an error if `(x, y)` lies outside the board
    pub fn set(&mut self, x: usize, y: usize, tile: BingoTile) -> Result<()> {
        let (width, height) = (self.width(), self.height());
        let cell = self.cells.get_mut([y, x]).ok_or_else(|| {
            invalid_parameter(
                "cell",
                &format!("({x}, {y})"),
                &format!("outside a {width}x{height} board"),
            )
        })?;
        *cell = Some(tile);
        Ok(())
    }

    /// Fill every cell from a grid of shape `(height, width)`
    ///
    /// # Errors
    ///
    /// Returns an error if the grid's shape differs from the board's
    pub fn populate(&mut self, grid: &Array2<BingoTile>) -> Result<()> {
        if grid.dim() != self.cells.dim() {
            return Err(BingoError::BoardShape {
                expected: (self.width(), self.height()),
                actual: grid.len(),
            });
        }
        self.cells = grid.map(|tile| Some(tile.clone()));
        Ok(())
    }

    /// Whether every cell holds a tile
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Placed tiles in row-major order
    pub fn tiles(&self) -> impl Iterator<Item = &BingoTile> + '_ {
        self.cells.iter().flatten()
    }

    /// Recompute category counts and mean difficulty from the placed tiles
    ///
    /// Every category of `config` gets an entry, zero counts included.
    pub fn summarize(&mut self, config: &ConfigModel) {
        let mut counts: BTreeMap<String, usize> = config
            .categories()
            .iter()
            .map(|category| (category.name.clone(), 0))
            .collect();
        for tile in self.cells.iter().flatten() {
            for id in tile.categories.iter() {
                *counts
                    .entry(config.category_name(id).to_string())
                    .or_insert(0) += 1;
            }
        }
        self.category_counts = counts;

        let placed: Vec<f64> = self.tiles().map(|tile| tile.difficulty).collect();
        self.difficulty = mean(&placed);
    }
}

impl fmt::Display for BingoBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            let line: Vec<&str> = row
                .iter()
                .map(|cell| cell.as_ref().map_or("", |tile| tile.text.as_str()))
                .collect();
            writeln!(f, "{}", line.join(",  "))?;
        }
        Ok(())
    }
}
