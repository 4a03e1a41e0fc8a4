//! Thematic categories with quota bounds and pairwise relations

use crate::content::bitset::CategorySet;
use std::fmt;

/// Index of a category inside a [`ConfigModel`](crate::content::config::ConfigModel)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CategoryId(usize);

impl CategoryId {
    /// Wrap a raw category index
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw index into the category table
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Soft bounds on how many tiles of a board may carry a category
///
/// Relative bounds are percentages of the destination tile count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuotaBounds {
    /// Minimum tile count
    pub min_absolute: f64,
    /// Minimum share of tiles in percent
    pub min_relative: f64,
    /// Maximum tile count
    pub max_absolute: f64,
    /// Maximum share of tiles in percent
    pub max_relative: f64,
}

impl Default for QuotaBounds {
    fn default() -> Self {
        Self {
            min_absolute: 0.0,
            min_relative: 0.0,
            max_absolute: f64::INFINITY,
            max_relative: f64::INFINITY,
        }
    }
}

impl QuotaBounds {
    /// Lowest tile count satisfying the quota for `destination_count` tiles
    pub fn min_for(&self, destination_count: usize) -> f64 {
        self.min_absolute
            .max(self.min_relative * 0.01 * destination_count as f64)
    }

    /// Tile count at which the category becomes forbidden
    pub fn max_for(&self, destination_count: usize) -> f64 {
        self.max_absolute
            .min(self.max_relative * 0.01 * destination_count as f64)
            .ceil()
    }
}

/// A named thematic tag
///
/// Relations are stored symmetrically: if either side declared a synergy or
/// antisynergy, both categories list each other.
#[derive(Clone, Debug)]
pub struct Category {
    /// Unique key generators, snippets and relations refer to
    pub key: String,
    /// Display name used on exported boards
    pub name: String,
    /// Quota bounds
    pub quota: QuotaBounds,
    /// Categories this one pairs well with
    pub synergies: CategorySet,
    /// Categories this one clashes with
    pub antisynergies: CategorySet,
    /// False for categories only referenced, never declared
    pub declared: bool,
}

impl Category {
    /// Create a declared category whose display name is its key
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            name: key.clone(),
            key,
            quota: QuotaBounds::default(),
            synergies: CategorySet::new(),
            antisynergies: CategorySet::new(),
            declared: true,
        }
    }

    /// Create a placeholder for a key that was referenced but never declared
    pub fn implicit(key: impl Into<String>) -> Self {
        Self {
            declared: false,
            ..Self::new(key)
        }
    }

    /// Replace the display name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
