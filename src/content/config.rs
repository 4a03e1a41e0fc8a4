//! Immutable content model and the two-pass builder that produces it
//!
//! Category keys are declared first and references resolved second, so a
//! generator or snippet can mention a category declared anywhere in the
//! document. Keys that were never declared become implicit categories with
//! default quotas and leave a diagnostic behind instead of failing the load.

use crate::algorithm::derivation::derive_categories;
use crate::content::{
    bitset::CategorySet,
    category::{Category, CategoryId, QuotaBounds},
    difficulty::{DifficultyLevel, level_for_name, level_for_score},
    generator::{LevelFilter, TileGenerator},
    metadata::BoardMetadata,
    snippet::TextSnippet,
    value::ValueProvider,
};
use crate::io::error::{Result, invalid_config};
use log::{info, warn};
use std::collections::HashMap;

/// Synergy and antisynergy flags for one unordered category pair
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RelationPair {
    /// Lower category id
    pub first: CategoryId,
    /// Higher (or equal) category id
    pub second: CategoryId,
    /// Either side declared a synergy
    pub synergy: bool,
    /// Either side declared an antisynergy
    pub antisynergy: bool,
}

/// Validated, read-only content configuration
///
/// Safe to share between concurrent generation runs; every run brings its own
/// random source and tile pool.
#[derive(Clone, Debug, Default)]
pub struct ConfigModel {
    categories: Vec<Category>,
    category_index: HashMap<String, CategoryId>,
    generators: Vec<TileGenerator>,
    pools: Vec<(String, Vec<TextSnippet>)>,
    pool_index: HashMap<String, usize>,
    levels: Vec<DifficultyLevel>,
    value_providers: HashMap<String, ValueProvider>,
    metadata: Option<BoardMetadata>,
    relation_pairs: Vec<RelationPair>,
    diagnostics: Vec<String>,
}

impl ConfigModel {
    /// Start building a configuration
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// All categories, declared and implicit, indexed by [`CategoryId`]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a category by id
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(id.index())
    }

    /// Look up a category id by its exact key
    pub fn category_id(&self, key: &str) -> Option<CategoryId> {
        self.category_index.get(key).copied()
    }

    /// Look up a category id by display name, falling back to the key
    pub fn category_id_by_name(&self, name: &str) -> Option<CategoryId> {
        self.categories
            .iter()
            .position(|category| category.name == name)
            .map(CategoryId::new)
            .or_else(|| self.category_id(name))
    }

    /// Display name of a category, empty for unknown ids
    pub fn category_name(&self, id: CategoryId) -> &str {
        self.category(id).map_or("", |category| category.name.as_str())
    }

    /// All tile generators in declaration order
    pub fn generators(&self) -> &[TileGenerator] {
        &self.generators
    }

    /// Generators usable at a level; all generators when no level is given
    pub fn generators_for_level(&self, level: Option<usize>) -> Vec<&TileGenerator> {
        match level {
            Some(level) => self
                .generators
                .iter()
                .filter(|generator| generator.levels.allows(level))
                .collect(),
            None => self.generators.iter().collect(),
        }
    }

    /// Snippets of a named pool
    pub fn pool(&self, name: &str) -> Option<&[TextSnippet]> {
        self.pool_index
            .get(name)
            .and_then(|&index| self.pools.get(index))
            .map(|(_, snippets)| snippets.as_slice())
    }

    /// Iterate over `(pool name, snippets)`
    pub fn pools(&self) -> impl Iterator<Item = (&str, &[TextSnippet])> + '_ {
        self.pools
            .iter()
            .map(|(name, snippets)| (name.as_str(), snippets.as_slice()))
    }

    /// Difficulty levels in declaration order
    pub fn levels(&self) -> &[DifficultyLevel] {
        &self.levels
    }

    /// Level closest to a score, with its index
    pub fn level_for_score(&self, score: f64) -> Option<(usize, &DifficultyLevel)> {
        level_for_score(&self.levels, score)
    }

    /// Level with a name, compared case-insensitively
    pub fn level_for_name(&self, name: &str) -> Option<(usize, &DifficultyLevel)> {
        level_for_name(&self.levels, name)
    }

    /// Look up a value provider by name
    pub fn value_provider(&self, name: &str) -> Option<&ValueProvider> {
        self.value_providers.get(name)
    }

    /// Board metadata, if the configuration declared any
    pub const fn metadata(&self) -> Option<&BoardMetadata> {
        self.metadata.as_ref()
    }

    /// Unordered category pairs carrying at least one relation
    pub fn relation_pairs(&self) -> &[RelationPair] {
        &self.relation_pairs
    }

    /// Problems found while building that did not stop the load
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    /// Whether any category of `left` clashes with any category of `right`
    pub fn sets_clash(&self, left: &CategorySet, right: &CategorySet) -> bool {
        left.iter().any(|id| {
            self.category(id)
                .is_some_and(|category| category.antisynergies.intersects(right))
        })
    }
}

/// Category declaration referencing other categories by key
#[derive(Clone, Debug)]
pub struct CategorySpec {
    /// Unique key other declarations refer to
    pub key: String,
    /// Display name, the key when absent
    pub name: Option<String>,
    /// Quota bounds
    pub quota: QuotaBounds,
    /// Names of synergistic categories
    pub synergies: Vec<String>,
    /// Names of antisynergistic categories
    pub antisynergies: Vec<String>,
}

impl CategorySpec {
    /// Declare a category with default quotas
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: None,
            quota: QuotaBounds::default(),
            synergies: Vec::new(),
            antisynergies: Vec::new(),
        }
    }

    /// Set the display name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the quota bounds
    #[must_use]
    pub const fn with_quota(mut self, quota: QuotaBounds) -> Self {
        self.quota = quota;
        self
    }

    /// Add a synergy
    #[must_use]
    pub fn with_synergy(mut self, name: impl Into<String>) -> Self {
        self.synergies.push(name.into());
        self
    }

    /// Add an antisynergy
    #[must_use]
    pub fn with_antisynergy(mut self, name: impl Into<String>) -> Self {
        self.antisynergies.push(name.into());
        self
    }
}

/// Snippet declaration referencing categories by name
#[derive(Clone, Debug)]
pub struct SnippetSpec {
    /// Template text
    pub text: String,
    /// Optional tooltip
    pub tooltip: Option<String>,
    /// Difficulty delta
    pub difficulty: f64,
    /// Selection weight
    pub weight: f64,
    /// Category names
    pub categories: Vec<String>,
    /// Free-form tags
    pub tags: Vec<String>,
}

impl SnippetSpec {
    /// Declare a snippet with difficulty 0 and weight 1
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tooltip: None,
            difficulty: 0.0,
            weight: 1.0,
            categories: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Set the difficulty delta
    #[must_use]
    pub const fn with_difficulty(mut self, difficulty: f64) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the selection weight
    #[must_use]
    pub const fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Set the tooltip
    #[must_use]
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Add a category
    #[must_use]
    pub fn with_category(mut self, name: impl Into<String>) -> Self {
        self.categories.push(name.into());
        self
    }

    /// Add a tag
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// Generator declaration referencing categories and levels by name
#[derive(Clone, Debug)]
pub struct GeneratorSpec {
    /// Template text
    pub text: String,
    /// Optional tooltip
    pub tooltip: Option<String>,
    /// Base difficulty
    pub difficulty: f64,
    /// Selection weight
    pub weight: f64,
    /// Category names
    pub categories: Vec<String>,
    /// Level names, empty for all levels
    pub levels: Vec<String>,
}

impl GeneratorSpec {
    /// Declare a generator with difficulty 1 and weight 1
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tooltip: None,
            difficulty: 1.0,
            weight: 1.0,
            categories: Vec::new(),
            levels: Vec::new(),
        }
    }

    /// Set the base difficulty
    #[must_use]
    pub const fn with_difficulty(mut self, difficulty: f64) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Set the selection weight
    #[must_use]
    pub const fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Set the tooltip
    #[must_use]
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// Add a category
    #[must_use]
    pub fn with_category(mut self, name: impl Into<String>) -> Self {
        self.categories.push(name.into());
        self
    }

    /// Restrict the generator to a level
    #[must_use]
    pub fn with_level(mut self, name: impl Into<String>) -> Self {
        self.levels.push(name.into());
        self
    }
}

/// Collects named declarations and resolves them into a [`ConfigModel`]
#[derive(Clone, Debug, Default)]
pub struct ConfigBuilder {
    categories: Vec<CategorySpec>,
    generators: Vec<GeneratorSpec>,
    pools: Vec<(String, Vec<SnippetSpec>)>,
    levels: Vec<DifficultyLevel>,
    value_providers: Vec<(String, ValueProvider)>,
    metadata: Option<BoardMetadata>,
}

impl ConfigBuilder {
    /// Declare a category
    #[must_use]
    pub fn category(mut self, spec: CategorySpec) -> Self {
        self.categories.push(spec);
        self
    }

    /// Add a snippet to a pool, creating the pool on first use
    #[must_use]
    pub fn snippet(mut self, pool: impl Into<String>, spec: SnippetSpec) -> Self {
        let pool = pool.into();
        if let Some((_, snippets)) = self.pools.iter_mut().find(|(name, _)| *name == pool) {
            snippets.push(spec);
        } else {
            self.pools.push((pool, vec![spec]));
        }
        self
    }

    /// Add a tile generator
    #[must_use]
    pub fn generator(mut self, spec: GeneratorSpec) -> Self {
        self.generators.push(spec);
        self
    }

    /// Append a difficulty level
    #[must_use]
    pub fn level(mut self, name: impl Into<String>, score: f64) -> Self {
        self.levels.push(DifficultyLevel::new(name, score));
        self
    }

    /// Register a value provider
    #[must_use]
    pub fn value_provider(mut self, name: impl Into<String>, provider: ValueProvider) -> Self {
        self.value_providers.push((name.into(), provider));
        self
    }

    /// Attach board metadata
    #[must_use]
    pub fn metadata(mut self, metadata: BoardMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Resolve all references and derive reachable categories
    ///
    /// # Errors
    ///
    /// Returns an error if a category is declared twice or a weight is
    /// negative or not finite.
    pub fn build(self) -> Result<ConfigModel> {
        let mut model = ConfigModel {
            levels: self.levels,
            metadata: self.metadata,
            ..ConfigModel::default()
        };

        // Pass 1: every declared key gets an id before any reference is resolved
        for spec in &self.categories {
            if model.category_index.contains_key(&spec.key) {
                return Err(invalid_config(&format!(
                    "category '{}' is declared twice",
                    spec.key
                )));
            }
            let id = CategoryId::new(model.categories.len());
            let mut category = Category::new(spec.key.clone());
            if let Some(name) = &spec.name {
                category = category.with_name(name.clone());
            }
            category.quota = spec.quota;
            model.categories.push(category);
            model.category_index.insert(spec.key.clone(), id);
        }

        // Pass 2: relations, stored on both sides
        for spec in &self.categories {
            let Some(id) = model.category_id(&spec.key) else {
                continue;
            };
            let owner = format!("category '{}'", spec.key);
            for name in &spec.synergies {
                let other = model.resolve_category(name, &owner);
                model.relate(id, other, false);
            }
            for name in &spec.antisynergies {
                let other = model.resolve_category(name, &owner);
                model.relate(id, other, true);
            }
        }

        for (pool_name, specs) in self.pools {
            let mut snippets = Vec::with_capacity(specs.len());
            for spec in specs {
                check_weight(spec.weight, &spec.text)?;
                let owner = format!("snippet '{}'", spec.text);
                let categories = model.resolve_categories(&spec.categories, &owner);
                let mut snippet = TextSnippet::new(spec.text);
                snippet.tooltip = spec.tooltip;
                snippet.difficulty = spec.difficulty;
                snippet.weight = spec.weight;
                snippet.categories = categories;
                snippet.tags = spec.tags;
                snippets.push(snippet);
            }
            model
                .pool_index
                .insert(pool_name.clone(), model.pools.len());
            model.pools.push((pool_name, snippets));
        }

        for spec in self.generators {
            check_weight(spec.weight, &spec.text)?;
            let owner = format!("generator '{}'", spec.text);
            let categories = model.resolve_categories(&spec.categories, &owner);
            let levels = model.resolve_levels(&spec.levels, &owner);
            let mut generator = TileGenerator::new(spec.text);
            generator.tooltip = spec.tooltip;
            generator.difficulty = spec.difficulty;
            generator.weight = spec.weight;
            generator.categories = categories;
            generator.levels = levels;
            model.generators.push(generator);
        }

        model.value_providers = self.value_providers.into_iter().collect();

        model.derive_all_categories();
        model.collect_relation_pairs();

        info!("Loaded [{}] tile generators", model.generators.len());
        info!(
            "Loaded [{}] snippet pools with a total of [{}] snippets",
            model.pools.len(),
            model
                .pools
                .iter()
                .map(|(_, snippets)| snippets.len())
                .sum::<usize>()
        );
        info!("Loaded [{}] value providers", model.value_providers.len());
        info!("Loaded [{}] categories", model.categories.len());
        info!("Loaded [{}] difficulty levels", model.levels.len());

        Ok(model)
    }
}

fn check_weight(weight: f64, text: &str) -> Result<()> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(invalid_config(&format!(
            "weight {weight} of '{text}' must be a finite number >= 0"
        )))
    }
}

impl ConfigModel {
    fn resolve_category(&mut self, name: &str, owner: &str) -> CategoryId {
        if let Some(id) = self.category_id(name) {
            return id;
        }
        let id = CategoryId::new(self.categories.len());
        let message = format!("Category [{name}] on {owner} is not declared, treating it as implicit");
        warn!("{message}");
        self.diagnostics.push(message);
        self.categories.push(Category::implicit(name));
        self.category_index.insert(name.to_string(), id);
        id
    }

    fn resolve_categories(&mut self, names: &[String], owner: &str) -> CategorySet {
        names
            .iter()
            .map(|name| self.resolve_category(name, owner))
            .collect()
    }

    fn resolve_levels(&mut self, names: &[String], owner: &str) -> LevelFilter {
        if names.is_empty() {
            return LevelFilter::Any;
        }
        let mut indices = Vec::with_capacity(names.len());
        for name in names {
            if let Some((index, _)) = self.level_for_name(name) {
                indices.push(index);
            } else {
                let message = format!("Difficulty level [{name}] on {owner} is not declared");
                warn!("{message}");
                self.diagnostics.push(message);
            }
        }
        LevelFilter::Only(indices)
    }

    fn relate(&mut self, left: CategoryId, right: CategoryId, antisynergy: bool) {
        for (from, to) in [(left, right), (right, left)] {
            if let Some(category) = self.categories.get_mut(from.index()) {
                if antisynergy {
                    category.antisynergies.insert(to);
                } else {
                    category.synergies.insert(to);
                }
            }
        }
    }

    fn derive_all_categories(&mut self) {
        let mut snippet_derived = Vec::with_capacity(self.pools.len());
        for (_, snippets) in &self.pools {
            let derived: Vec<CategorySet> = snippets
                .iter()
                .map(|snippet| derive_categories(&snippet.text, |pool| self.pool(pool)))
                .collect();
            snippet_derived.push(derived);
        }
        for ((_, snippets), derived) in self.pools.iter_mut().zip(snippet_derived) {
            for (snippet, categories) in snippets.iter_mut().zip(derived) {
                snippet.derived_categories = categories;
            }
        }

        let generator_derived: Vec<CategorySet> = self
            .generators
            .iter()
            .map(|generator| derive_categories(&generator.text, |pool| self.pool(pool)))
            .collect();
        for (generator, categories) in self.generators.iter_mut().zip(generator_derived) {
            generator.derived_categories = categories;
        }
    }

    fn collect_relation_pairs(&mut self) {
        let mut pairs = Vec::new();
        for (index, category) in self.categories.iter().enumerate() {
            let first = CategoryId::new(index);
            let related = category.synergies.union(&category.antisynergies);
            for second in related.iter().filter(|&second| second >= first) {
                pairs.push(RelationPair {
                    first,
                    second,
                    synergy: category.synergies.contains(second),
                    antisynergy: category.antisynergies.contains(second),
                });
            }
        }
        self.relation_pairs = pairs;
    }
}
