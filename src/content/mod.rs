//! Content configuration model
//!
//! Everything here is built once when a configuration is loaded and read-only
//! afterward, so one model can serve any number of generation runs.

/// Growable category bitset
pub mod bitset;
/// Categories, ids and quota bounds
pub mod category;
/// Immutable configuration model and its builder
pub mod config;
/// Difficulty levels and generation targets
pub mod difficulty;
/// Tile generators
pub mod generator;
/// Board metadata
pub mod metadata;
/// Snippets and placeholder conditions
pub mod snippet;
/// Level-dependent numeric value providers
pub mod value;
