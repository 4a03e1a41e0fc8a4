//! Spatial data structures
//!
//! This module contains the board grid and the tiles placed on it.

/// Fixed-size board grid
pub mod grid;
/// Resolved board tiles
pub mod tiles;

pub use grid::BingoBoard;
pub use tiles::BingoTile;
