//! Constraint-guided bingo board generation from declarative goal templates
//!
//! Tiles are synthesized from weighted templates whose placeholders draw on
//! snippet pools, value ranges and category quotas. A pool of tiles is refined
//! toward a target mean difficulty and then arranged on the grid by a
//! random-restart search over category synergies and a difficulty gradient.

#![forbid(unsafe_code)]

/// Tile synthesis, refinement and layout search
pub mod algorithm;
/// Category counting, quota constraints and difficulty statistics
pub mod analysis;
/// Content model: categories, generators, snippets, levels and value providers
pub mod content;
/// Input/output operations and error handling
pub mod io;
/// Board grid and tile data structures
pub mod spatial;

pub use io::error::{BingoError, Result};
