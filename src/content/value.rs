//! Numeric placeholders whose range depends on the difficulty level

use rand::Rng;

/// Inclusive integer range plus the difficulty it contributes
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueRange {
    /// Smallest value
    pub min: i64,
    /// Largest value
    pub max: i64,
    /// Difficulty added whenever a value is drawn from this range
    pub score: f64,
}

impl ValueRange {
    /// Create a range, swapping bounds given in the wrong order
    pub const fn new(min: i64, max: i64, score: f64) -> Self {
        if min <= max {
            Self { min, max, score }
        } else {
            Self {
                min: max,
                max: min,
                score,
            }
        }
    }

    /// Draw a value uniformly from the range
    pub fn sample<R: Rng>(&self, rng: &mut R) -> i64 {
        rng.random_range(self.min..=self.max)
    }
}

/// Per-level numeric ranges for one named placeholder
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValueProvider {
    ranges: Vec<(String, ValueRange)>,
}

impl ValueProvider {
    /// Create a provider without any ranges
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the range used at the named level
    #[must_use]
    pub fn with_range(mut self, level: impl Into<String>, range: ValueRange) -> Self {
        self.ranges.push((level.into(), range));
        self
    }

    /// Range configured for a level, matched case-insensitively
    pub fn range_for(&self, level: &str) -> Option<&ValueRange> {
        let level = level.to_lowercase();
        self.ranges
            .iter()
            .find(|(name, _)| name.to_lowercase() == level)
            .map(|(_, range)| range)
    }

    /// Level names this provider has ranges for
    pub fn levels(&self) -> impl Iterator<Item = &str> + '_ {
        self.ranges.iter().map(|(name, _)| name.as_str())
    }
}
