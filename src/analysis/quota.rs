//! Category quota tracking
//!
//! Quotas are soft: the sets computed here steer candidate filtering during
//! generation but never cause it to fail.

use crate::content::{bitset::CategorySet, category::CategoryId, config::ConfigModel};
use crate::spatial::tiles::BingoTile;

/// Number of tiles carrying each category, indexed by [`CategoryId`]
///
/// The result has one entry per category of `config`.
pub fn count_categories(config: &ConfigModel, tiles: &[BingoTile]) -> Vec<usize> {
    let mut counts = vec![0; config.categories().len()];
    for tile in tiles {
        for id in tile.categories.iter() {
            if let Some(count) = counts.get_mut(id.index()) {
                *count += 1;
            }
        }
    }
    counts
}

/// Categories a generation step should prefer or avoid
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuotaConstraints {
    /// Categories below their minimum
    pub must_include: CategorySet,
    /// Categories at or above their maximum
    pub forbid: CategorySet,
}

impl QuotaConstraints {
    /// No preference either way
    pub fn none() -> Self {
        Self::default()
    }

    /// Derive constraints from the tiles generated so far
    ///
    /// A category is must-include while its count is below its minimum for
    /// `destination_count` tiles, and forbidden once its count reaches the
    /// maximum. A category is never in both sets.
    pub fn from_tiles(config: &ConfigModel, tiles: &[BingoTile], destination_count: usize) -> Self {
        let counts = count_categories(config, tiles);
        let mut constraints = Self::none();

        for (index, category) in config.categories().iter().enumerate() {
            let count = counts.get(index).copied().unwrap_or(0) as f64;
            let id = CategoryId::new(index);
            if count < category.quota.min_for(destination_count) {
                constraints.must_include.insert(id);
            } else if count >= category.quota.max_for(destination_count) {
                constraints.forbid.insert(id);
            }
        }

        constraints
    }

    /// Whether neither set holds a category
    pub fn is_unconstrained(&self) -> bool {
        self.must_include.is_empty() && self.forbid.is_empty()
    }
}
