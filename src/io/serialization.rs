//! JSON board export and import
//!
//! The document stores the grid column-major: `board[x][y]`, matching the
//! format the board viewers consume. Categories are written by name and
//! resolved against a configuration when a board is read back.

use crate::content::{bitset::CategorySet, config::ConfigModel, metadata::BoardMetadata};
use crate::io::error::{BingoError, ErrorContext, Result, WithContext};
use crate::spatial::{grid::BingoBoard, tiles::BingoTile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Serialized form of one tile
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileDocument {
    /// Tile text
    pub text: String,
    /// Newline-joined tooltip, empty when absent
    #[serde(default)]
    pub tooltip: String,
    /// Tile difficulty
    pub difficulty: f64,
    /// Category names
    #[serde(default)]
    pub categories: Vec<String>,
}

/// Serialized form of a board
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardDocument {
    /// Board columns
    pub width: usize,
    /// Board rows
    pub height: usize,
    /// Descriptive information
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BoardMetadata>,
    /// Tiles per category name
    #[serde(default)]
    pub categories: BTreeMap<String, usize>,
    /// Mean tile difficulty
    pub difficulty: f64,
    /// Tiles indexed as `board[x][y]`
    pub board: Vec<Vec<TileDocument>>,
}

impl BoardDocument {
    /// Describe a board, naming categories through `config`
    pub fn from_board(board: &BingoBoard, config: &ConfigModel) -> Self {
        let columns = (0..board.width())
            .map(|x| {
                (0..board.height())
                    .filter_map(|y| board.get(x, y))
                    .map(|tile| TileDocument {
                        text: tile.text.clone(),
                        tooltip: tile.tooltip.clone(),
                        difficulty: tile.difficulty,
                        categories: tile
                            .categories
                            .iter()
                            .map(|id| config.category_name(id).to_string())
                            .collect(),
                    })
                    .collect()
            })
            .collect();

        Self {
            width: board.width(),
            height: board.height(),
            metadata: board.metadata.clone(),
            categories: board.category_counts.clone(),
            difficulty: board.difficulty,
            board: columns,
        }
    }

    /// Rebuild the board, resolving category names against `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the grid doesn't match the declared size or a tile
    /// names a category `config` doesn't know
    pub fn into_board(self, config: &ConfigModel) -> Result<BingoBoard> {
        let cells: usize = self.board.iter().map(Vec::len).sum();
        if self.board.len() != self.width
            || self.board.iter().any(|column| column.len() != self.height)
        {
            return Err(BingoError::BoardShape {
                expected: (self.width, self.height),
                actual: cells,
            });
        }

        let mut board = BingoBoard::new(self.width, self.height);
        for (x, column) in self.board.into_iter().enumerate() {
            for (y, tile) in column.into_iter().enumerate() {
                let categories = tile
                    .categories
                    .iter()
                    .map(|name| {
                        config
                            .category_id_by_name(name)
                            .ok_or_else(|| BingoError::UnknownCategory { name: name.clone() })
                    })
                    .collect::<Result<CategorySet>>()?;
                board.set(
                    x,
                    y,
                    BingoTile::new(tile.text, tile.tooltip, tile.difficulty, categories),
                )?;
            }
        }

        board.metadata = self.metadata;
        board.category_counts = self.categories;
        board.difficulty = self.difficulty;
        Ok(board)
    }

    /// Pretty-printed JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a board document
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }
}

/// Write a board as JSON
///
/// # Errors
///
/// Returns an error if serialization or writing the file fails
pub fn write_board(board: &BingoBoard, config: &ConfigModel, path: &Path) -> Result<()> {
    let json = BoardDocument::from_board(board, config).to_json()?;
    std::fs::write(path, json).map_err(|source| BingoError::FileSystem {
        path: path.to_path_buf(),
        operation: "write board",
        source,
    })
}

/// Read a JSON board back, resolving categories against `config`
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a board document, or
/// doesn't match `config`
pub fn read_board(path: &Path, config: &ConfigModel) -> Result<BingoBoard> {
    let source = std::fs::read_to_string(path).with_context(ErrorContext {
        path: Some(path.to_path_buf()),
        operation: Some("read board"),
    })?;
    BoardDocument::from_json(&source)?.into_board(config)
}
