use crate::content::category::CategoryId;
use bitvec::prelude::*;
use std::fmt;

/// Growable bitset of category ids
///
/// Membership is O(1) and union/intersection work word-at-a-time. Two sets
/// compare equal when they hold the same ids, whatever their capacity.
#[derive(Clone, Debug, Default)]
pub struct CategorySet {
    bits: BitVec,
}

impl CategorySet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set with room for `capacity` categories
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
        }
    }

    /// Insert a category, returning whether it was newly added
    pub fn insert(&mut self, category: CategoryId) -> bool {
        let index = category.index();
        if index >= self.bits.len() {
            self.bits.resize(index + 1, false);
        }
        let was_present = self.contains(category);
        self.bits.set(index, true);
        !was_present
    }

    /// Test category membership
    pub fn contains(&self, category: CategoryId) -> bool {
        self.bits.get(category.index()).as_deref() == Some(&true)
    }

    /// Add every category of `other` to this set
    pub fn union_with(&mut self, other: &Self) {
        if other.bits.len() > self.bits.len() {
            self.bits.resize(other.bits.len(), false);
        }
        for index in other.bits.iter_ones() {
            self.bits.set(index, true);
        }
    }

    /// Create a new set containing both sets' categories
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.union_with(other);
        result
    }

    /// Test whether the sets share at least one category
    pub fn intersects(&self, other: &Self) -> bool {
        self.bits
            .iter_ones()
            .any(|index| other.bits.get(index).as_deref() == Some(&true))
    }

    /// Test if no categories are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count categories in the set
    pub fn len(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate over contained categories in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = CategoryId> + '_ {
        self.bits.iter_ones().map(CategoryId::new)
    }
}

impl PartialEq for CategorySet {
    fn eq(&self, other: &Self) -> bool {
        self.bits.iter_ones().eq(other.bits.iter_ones())
    }
}

impl Eq for CategorySet {}

impl FromIterator<CategoryId> for CategorySet {
    fn from_iter<I: IntoIterator<Item = CategoryId>>(iter: I) -> Self {
        let mut set = Self::new();
        for category in iter {
            set.insert(category);
        }
        set
    }
}

impl fmt::Display for CategorySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<usize> = self.iter().map(CategoryId::index).collect();
        write!(f, "CategorySet({} categories: {ids:?})", self.len())
    }
}
