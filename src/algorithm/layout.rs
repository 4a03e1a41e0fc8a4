//! Random-restart search for a board arrangement
//!
//! A fixed pool of tiles is shuffled and dealt row-major into the grid many
//! times. Each arrangement is scored by the category relations of tiles that
//! share a line (rows, columns and diagonals) plus a bonus for difficulty
//! changing monotonically between concentric layers. The best arrangement wins.

use crate::{
    content::{
        category::CategoryId,
        config::{ConfigModel, RelationPair},
    },
    io::configuration::{
        ANTISYNERGY_PENALTY, LAYER_GRADIENT_BONUS, LAYER_GRADIENT_PENALTY, LAYOUT_TRIALS,
        SYNERGY_BONUS,
    },
    io::error::{BingoError, Result},
    spatial::tiles::BingoTile,
};
use log::debug;
use ndarray::Array2;
use rand::{Rng, seq::SliceRandom};
use std::collections::HashMap;

/// Direction in which layer difficulty should grow
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayerGradient {
    /// Harder tiles towards the edges
    #[default]
    OutwardIncreasing,
    /// Harder tiles towards the center
    InwardIncreasing,
}

impl LayerGradient {
    /// Whether the step from an inner layer mean to the next outer one follows the gradient
    pub const fn follows(self, inner: f64, outer: f64) -> bool {
        match self {
            Self::OutwardIncreasing => inner <= outer,
            Self::InwardIncreasing => inner >= outer,
        }
    }
}

/// Parameters of the layout search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutSettings {
    /// Independent shuffles to score
    pub trials: usize,
    /// Preferred layer difficulty direction
    pub gradient: LayerGradient,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            trials: LAYOUT_TRIALS,
            gradient: LayerGradient::default(),
        }
    }
}

/// Every scored line of a `width` × `height` board as row-major cell indices
///
/// Lines are all rows, all columns, then every diagonal of length
/// `min(width, height)` slid along the longer axis, in both directions.
pub fn board_lines(width: usize, height: usize) -> Vec<Vec<usize>> {
    let mut lines = Vec::new();
    if width == 0 || height == 0 {
        return lines;
    }
    let cell = |x: usize, y: usize| y * width + x;

    for y in 0..height {
        lines.push((0..width).map(|x| cell(x, y)).collect());
    }
    for x in 0..width {
        lines.push((0..height).map(|y| cell(x, y)).collect());
    }

    let length = width.min(height);
    if width >= height {
        for offset in 0..=width - length {
            lines.push((0..length).map(|i| cell(offset + i, i)).collect());
            lines.push(
                (0..length)
                    .map(|i| cell(offset + i, length - 1 - i))
                    .collect(),
            );
        }
    } else {
        for offset in 0..=height - length {
            lines.push((0..length).map(|i| cell(i, offset + i)).collect());
            lines.push(
                (0..length)
                    .map(|i| cell(i, offset + length - 1 - i))
                    .collect(),
            );
        }
    }

    lines
}

/// Concentric layer of every cell, row-major
///
/// The layer is the floored Chebyshev distance from the board's continuous
/// center, so layer 0 is the innermost ring.
pub fn layer_indices(width: usize, height: usize) -> Vec<usize> {
    let center_x = (width as f64 - 1.0) / 2.0;
    let center_y = (height as f64 - 1.0) / 2.0;
    let mut layers = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let distance = (x as f64 - center_x)
                .abs()
                .max((y as f64 - center_y).abs());
            layers.push(distance.floor() as usize);
        }
    }
    layers
}

/// Relation score of the tiles sharing one line
///
/// Each related category pair is counted once if two different tiles of the
/// line carry its two categories: antisynergies cost [`ANTISYNERGY_PENALTY`],
/// synergies earn [`SYNERGY_BONUS`]. The result doesn't depend on tile order.
pub fn score_row(row: &[&BingoTile], pairs: &[RelationPair]) -> i64 {
    // Per category: tiles carrying it and the first such tile
    let mut presence: HashMap<CategoryId, (usize, usize)> = HashMap::new();
    for (position, tile) in row.iter().enumerate() {
        for id in tile.categories.iter() {
            presence
                .entry(id)
                .and_modify(|(count, _)| *count += 1)
                .or_insert((1, position));
        }
    }

    let mut score = 0;
    for pair in pairs {
        let (Some(&(first_count, first_tile)), Some(&(second_count, second_tile))) =
            (presence.get(&pair.first), presence.get(&pair.second))
        else {
            continue;
        };
        let on_distinct_tiles = if pair.first == pair.second {
            first_count >= 2
        } else {
            first_count > 1 || second_count > 1 || first_tile != second_tile
        };
        if !on_distinct_tiles {
            continue;
        }
        if pair.antisynergy {
            score -= ANTISYNERGY_PENALTY;
        }
        if pair.synergy {
            score += SYNERGY_BONUS;
        }
    }
    score
}

/// Bonus for layer mean difficulties following the gradient
///
/// `cells` and `layers` are row-major and equally long. Layers without tiles
/// are skipped.
pub fn layer_bonus(cells: &[&BingoTile], layers: &[usize], gradient: LayerGradient) -> i64 {
    let layer_count = layers.iter().max().map_or(0, |&max| max + 1);
    let mut totals = vec![(0.0, 0_usize); layer_count];
    for (tile, &layer) in cells.iter().zip(layers) {
        if let Some((total, count)) = totals.get_mut(layer) {
            *total += tile.difficulty;
            *count += 1;
        }
    }

    let means: Vec<f64> = totals
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(total, count)| total / *count as f64)
        .collect();

    means
        .windows(2)
        .map(|window| match window {
            [inner, outer] if gradient.follows(*inner, *outer) => LAYER_GRADIENT_BONUS,
            _ => -LAYER_GRADIENT_PENALTY,
        })
        .sum()
}

/// Scores arrangements of one board size against one configuration
pub struct BoardScorer<'a> {
    pairs: &'a [RelationPair],
    lines: Vec<Vec<usize>>,
    layers: Vec<usize>,
    gradient: LayerGradient,
}

impl<'a> BoardScorer<'a> {
    /// Precompute lines and layers for a board size
    pub fn new(config: &'a ConfigModel, width: usize, height: usize, gradient: LayerGradient) -> Self {
        Self {
            pairs: config.relation_pairs(),
            lines: board_lines(width, height),
            layers: layer_indices(width, height),
            gradient,
        }
    }

    /// Score row-major cells; higher is better
    pub fn score(&self, cells: &[&BingoTile]) -> i64 {
        let mut score = 0;
        let mut row: Vec<&BingoTile> = Vec::new();
        for line in &self.lines {
            row.clear();
            row.extend(line.iter().filter_map(|&index| cells.get(index).copied()));
            score += score_row(&row, self.pairs);
        }
        score + layer_bonus(cells, &self.layers, self.gradient)
    }
}

/// Score a populated grid of shape `(height, width)`
pub fn score_board(grid: &Array2<BingoTile>, config: &ConfigModel, gradient: LayerGradient) -> i64 {
    let (height, width) = grid.dim();
    let cells: Vec<&BingoTile> = grid.iter().collect();
    BoardScorer::new(config, width, height, gradient).score(&cells)
}

/// Arrange exactly `width * height` tiles into the best-scoring grid found
///
/// Every trial is an independent shuffle; a later trial replaces the incumbent
/// only with a strictly higher score. The result holds the same tiles as
/// `tiles`, reordered.
///
/// # Errors
///
/// Returns an error if the number of tiles doesn't match the board size
pub fn populate<R: Rng>(
    tiles: &[BingoTile],
    width: usize,
    height: usize,
    config: &ConfigModel,
    settings: LayoutSettings,
    rng: &mut R,
) -> Result<Array2<BingoTile>> {
    let shape_error = || BingoError::BoardShape {
        expected: (width, height),
        actual: tiles.len(),
    };
    if tiles.len() != width * height {
        return Err(shape_error());
    }

    let scorer = BoardScorer::new(config, width, height, settings.gradient);
    let mut order: Vec<usize> = (0..tiles.len()).collect();
    let mut best: Option<(i64, Vec<usize>)> = None;

    for trial in 0..settings.trials.max(1) {
        order.shuffle(rng);
        let cells: Vec<&BingoTile> = order.iter().filter_map(|&index| tiles.get(index)).collect();
        let score = scorer.score(&cells);
        if best.as_ref().is_none_or(|(best_score, _)| score > *best_score) {
            debug!("Layout trial {trial} improved the board score to {score}");
            best = Some((score, order.clone()));
        }
    }

    let arranged: Vec<BingoTile> = best
        .map(|(_, order)| order)
        .unwrap_or_default()
        .iter()
        .filter_map(|&index| tiles.get(index).cloned())
        .collect();
    Array2::from_shape_vec((height, width), arranged).map_err(|error| {
        debug!("Arranged tiles don't form the board: {error}");
        shape_error()
    })
}
