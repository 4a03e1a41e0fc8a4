use crate::algorithm::sampler::Weighted;
use crate::content::bitset::CategorySet;

/// Difficulty levels a generator may be used at
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LevelFilter {
    /// Usable at every level
    #[default]
    Any,
    /// Usable only at the listed level indices
    Only(Vec<usize>),
}

impl LevelFilter {
    /// Whether a generator with this filter applies at the level index
    pub fn allows(&self, level: usize) -> bool {
        match self {
            Self::Any => true,
            Self::Only(levels) => levels.contains(&level),
        }
    }
}

/// A weighted template that produces tiles
#[derive(Clone, Debug)]
pub struct TileGenerator {
    /// Template text with `[identifier]` placeholders
    pub text: String,
    /// Optional tooltip, first line of the tile tooltip
    pub tooltip: Option<String>,
    /// Base difficulty of every tile produced
    pub difficulty: f64,
    /// Relative selection weight
    pub weight: f64,
    /// Declared categories
    pub categories: CategorySet,
    /// Levels this generator applies to
    pub levels: LevelFilter,
    /// Categories reachable through placeholders in `text`
    pub derived_categories: CategorySet,
}

impl Weighted for TileGenerator {
    fn weight(&self) -> f64 {
        self.weight
    }
}

impl TileGenerator {
    /// Create a generator with default difficulty 1 and weight 1
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tooltip: None,
            difficulty: 1.0,
            weight: 1.0,
            categories: CategorySet::new(),
            levels: LevelFilter::Any,
            derived_categories: CategorySet::new(),
        }
    }

    /// Declared plus derived categories
    pub fn reachable_categories(&self) -> CategorySet {
        self.categories.union(&self.derived_categories)
    }
}
