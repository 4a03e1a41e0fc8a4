//! Difficulty statistics over tile pools

use crate::spatial::tiles::BingoTile;

/// Arithmetic mean, 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean difficulty of a tile pool, 0 for an empty pool
pub fn mean_difficulty(tiles: &[BingoTile]) -> f64 {
    let difficulties: Vec<f64> = tiles.iter().map(|tile| tile.difficulty).collect();
    mean(&difficulties)
}

/// Absolute distance between a pool's mean difficulty and a target
pub fn distance_to_target(tiles: &[BingoTile], target: f64) -> f64 {
    (mean_difficulty(tiles) - target).abs()
}
