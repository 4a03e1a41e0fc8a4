//! Named difficulty levels and how a generation target maps onto them

use crate::io::configuration::DEFAULT_LEVEL_SCORE;

/// A named difficulty bucket with its numeric score
#[derive(Clone, Debug, PartialEq)]
pub struct DifficultyLevel {
    /// Level name, matched case-insensitively
    pub name: String,
    /// Numeric score representing the level
    pub score: f64,
}

impl DifficultyLevel {
    /// Create a level
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Level whose score is closest to `score`
///
/// Ties go to the level declared first. Returns `None` only when no levels exist.
pub fn level_for_score(levels: &[DifficultyLevel], score: f64) -> Option<(usize, &DifficultyLevel)> {
    let mut closest: Option<(usize, &DifficultyLevel)> = None;
    let mut closest_distance = f64::INFINITY;
    for (index, level) in levels.iter().enumerate() {
        let distance = (level.score - score).abs();
        if closest.is_none() || distance < closest_distance {
            closest_distance = distance;
            closest = Some((index, level));
        }
    }
    closest
}

/// Level with the given name, compared case-insensitively
pub fn level_for_name<'a>(
    levels: &'a [DifficultyLevel],
    name: &str,
) -> Option<(usize, &'a DifficultyLevel)> {
    levels
        .iter()
        .enumerate()
        .find(|(_, level)| level.name.to_lowercase() == name.to_lowercase())
}

/// How the caller expresses the board's target mean difficulty
#[derive(Clone, Debug, PartialEq)]
pub enum DifficultyTarget {
    /// Raw difficulty score
    Score(f64),
    /// 1-based level index, clamped to the declared levels
    Level(usize),
    /// Level name, compared case-insensitively
    Named(String),
}

impl DifficultyTarget {
    /// Resolve the target to a numeric score
    ///
    /// Falls back to [`DEFAULT_LEVEL_SCORE`] when no levels are declared or a
    /// named level doesn't exist.
    pub fn resolve(&self, levels: &[DifficultyLevel]) -> f64 {
        match self {
            Self::Score(score) => *score,
            Self::Level(index) => {
                if levels.is_empty() {
                    return DEFAULT_LEVEL_SCORE;
                }
                let clamped = (*index).clamp(1, levels.len());
                levels
                    .get(clamped - 1)
                    .map_or(DEFAULT_LEVEL_SCORE, |level| level.score)
            }
            Self::Named(name) => {
                level_for_name(levels, name).map_or(DEFAULT_LEVEL_SCORE, |(_, level)| level.score)
            }
        }
    }
}
