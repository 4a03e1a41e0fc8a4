//! Resolved tiles placed on a board
//!
//! A tile is built once by the generation engine and never revised: its text,
//! tooltip, difficulty and categories are final.

use crate::content::{bitset::CategorySet, category::CategoryId};
use std::fmt;

/// One textual goal occupying a board cell
#[derive(Clone, Debug, PartialEq)]
pub struct BingoTile {
    /// Fully expanded text
    pub text: String,
    /// Tooltip lines joined by newlines, empty when there are none
    pub tooltip: String,
    /// Generator base difficulty plus every contribution from expansion
    pub difficulty: f64,
    /// Generator categories united with those of the chosen snippets
    pub categories: CategorySet,
}

impl BingoTile {
    /// Create a tile from its resolved parts
    pub fn new(
        text: impl Into<String>,
        tooltip: impl Into<String>,
        difficulty: f64,
        categories: CategorySet,
    ) -> Self {
        Self {
            text: text.into(),
            tooltip: tooltip.into(),
            difficulty,
            categories,
        }
    }

    /// Whether the tile carries a category
    pub fn has_category(&self, category: CategoryId) -> bool {
        self.categories.contains(category)
    }
}

impl fmt::Display for BingoTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
