//! Constraint- and difficulty-aware synthesis of single tiles
//!
//! Every "no candidate" branch widens to a fallback, so a tile is produced
//! whenever the configuration has at least one generator.

use crate::{
    algorithm::{
        expansion::{Expansion, SnippetExpander},
        sampler::pick,
    },
    analysis::quota::QuotaConstraints,
    content::{config::ConfigModel, generator::TileGenerator},
    io::configuration::{ANTISYNERGY_RETRIES, EXPANSION_ATTEMPTS},
    spatial::tiles::BingoTile,
};
use log::debug;
use rand::Rng;

/// Bounds on the work spent expanding one generator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExpansionLimits {
    /// Accepted expansions compared against the difficulty target
    pub attempts: usize,
    /// Re-rolls shared by all attempts when an expansion clashes with its generator
    pub antisynergy_retries: usize,
}

impl Default for ExpansionLimits {
    fn default() -> Self {
        Self {
            attempts: EXPANSION_ATTEMPTS,
            antisynergy_retries: ANTISYNERGY_RETRIES,
        }
    }
}

/// Generate one tile given the tiles generated so far
///
/// The generator is drawn from those applicable at the level closest to
/// `destination_difficulty`, narrowed by the category quotas for a pool of
/// `destination_count` tiles. Of the accepted expansions, the one whose total
/// difficulty lands closest to `destination_difficulty` becomes the tile.
///
/// Returns `None` only when the configuration has no generators.
pub fn generate_tile<R: Rng>(
    config: &ConfigModel,
    existing: &[BingoTile],
    destination_count: usize,
    destination_difficulty: f64,
    limits: ExpansionLimits,
    rng: &mut R,
) -> Option<BingoTile> {
    let level = config.level_for_score(destination_difficulty);
    let constraints = QuotaConstraints::from_tiles(config, existing, destination_count);

    let mut level_pool = config.generators_for_level(level.map(|(index, _)| index));
    if level_pool.is_empty() {
        debug!("No generator applies at the target level, using all generators");
        level_pool = config.generators_for_level(None);
    }

    let candidates = narrow_generators(&level_pool, &constraints);
    let generator = *pick(&candidates, rng)?;

    let expansion = best_expansion(
        config,
        generator,
        &constraints,
        level.map(|(_, level)| level.name.as_str()),
        destination_difficulty,
        limits,
        rng,
    );

    let categories = generator.categories.union(&expansion.categories);
    let tooltip = generator
        .tooltip
        .iter()
        .chain(expansion.tooltips.iter())
        .filter(|line| !line.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("\n");

    Some(BingoTile::new(
        expansion.text,
        tooltip,
        generator.difficulty + expansion.difficulty,
        categories,
    ))
}

/// Drop generators that can't help with, or would break, the quotas
///
/// Falls back to the unnarrowed pool when nothing survives.
fn narrow_generators<'a>(
    pool: &[&'a TileGenerator],
    constraints: &QuotaConstraints,
) -> Vec<&'a TileGenerator> {
    let mut narrowed: Vec<&TileGenerator> = pool.to_vec();

    if !constraints.must_include.is_empty() {
        narrowed.retain(|generator| {
            generator
                .reachable_categories()
                .intersects(&constraints.must_include)
        });
    }
    if !constraints.forbid.is_empty() {
        narrowed.retain(|generator| !generator.categories.intersects(&constraints.forbid));
    }

    if narrowed.is_empty() {
        debug!(
            "Quotas exclude every generator ({} categories short, {} full), ignoring them",
            constraints.must_include.len(),
            constraints.forbid.len()
        );
        return pool.to_vec();
    }
    narrowed
}

fn best_expansion<R: Rng>(
    config: &ConfigModel,
    generator: &TileGenerator,
    constraints: &QuotaConstraints,
    level_name: Option<&str>,
    destination_difficulty: f64,
    limits: ExpansionLimits,
    rng: &mut R,
) -> Expansion {
    let expander = SnippetExpander::new(config);
    let mut best = Expansion::default();
    let mut best_distance = f64::INFINITY;
    let mut retries_left = limits.antisynergy_retries;
    let mut accepted = 0;

    while accepted < limits.attempts.max(1) {
        let attempt = expander.expand(&generator.text, constraints, level_name, rng);

        // Clashes with the generator's own categories are re-rolled while retries last
        if retries_left > 0 && config.sets_clash(&generator.categories, &attempt.categories) {
            retries_left -= 1;
            continue;
        }
        accepted += 1;

        let distance = (generator.difficulty + attempt.difficulty - destination_difficulty).abs();
        if accepted == 1 || distance < best_distance {
            best_distance = distance;
            best = attempt;
        }
    }

    best
}
