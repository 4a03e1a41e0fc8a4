//! Weighted text fragments substituted into template placeholders

use crate::algorithm::sampler::Weighted;
use crate::content::bitset::CategorySet;
use log::warn;
use regex::Regex;
use std::sync::LazyLock;

/// A text fragment belonging to a named snippet pool
#[derive(Clone, Debug)]
pub struct TextSnippet {
    /// Template text, may itself contain placeholders
    pub text: String,
    /// Optional tooltip line
    pub tooltip: Option<String>,
    /// Difficulty added when the snippet is chosen
    pub difficulty: f64,
    /// Relative selection weight
    pub weight: f64,
    /// Declared categories
    pub categories: CategorySet,
    /// Categories reachable through placeholders in `text`
    pub derived_categories: CategorySet,
    /// Free-form tags for placeholder conditions
    pub tags: Vec<String>,
}

impl Weighted for TextSnippet {
    fn weight(&self) -> f64 {
        self.weight
    }
}

static CONDITION_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([a-zA-Z0-9!]+)(?:\((.*)\))?$").ok());

/// Candidate filter attached to a placeholder as `[pool|condition]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SnippetCondition {
    /// Snippet text must not already appear in the text expanded so far
    AvoidDuplicates,
    /// Snippet must (or must not, when negated) carry the tag
    Tag {
        /// Tag name
        name: String,
        /// Invert the test
        negated: bool,
    },
    /// Snippet must (or must not) declare the category
    Category {
        /// Category name
        name: String,
        /// Invert the test
        negated: bool,
    },
    /// Snippet must (or must not) reach the category through its placeholders
    DerivedCategory {
        /// Category name
        name: String,
        /// Invert the test
        negated: bool,
    },
    /// Unparseable condition, accepts every snippet
    Unknown(String),
}

impl SnippetCondition {
    /// Parse a condition such as `tag(loud)` or `!category(Travel)`
    pub fn parse(condition: &str) -> Self {
        if condition == "avoid_duplicates" {
            return Self::AvoidDuplicates;
        }

        let Some(captures) = CONDITION_PATTERN
            .as_ref()
            .and_then(|pattern| pattern.captures(condition))
        else {
            warn!("Invalid snippet condition [{condition}]");
            return Self::Unknown(condition.to_string());
        };

        let function = captures.get(1).map_or("", |m| m.as_str());
        let argument = captures
            .get(2)
            .map_or_else(String::new, |m| m.as_str().to_string());
        let (negated, function) = function
            .strip_prefix('!')
            .map_or((false, function), |stripped| (true, stripped));

        match function {
            "tag" => Self::Tag {
                name: argument,
                negated,
            },
            "category" => Self::Category {
                name: argument,
                negated,
            },
            "derivedCategory" => Self::DerivedCategory {
                name: argument,
                negated,
            },
            _ => {
                warn!("Unknown snippet condition function [{function}] in [{condition}]");
                Self::Unknown(condition.to_string())
            }
        }
    }
}

impl TextSnippet {
    /// Create a snippet with default difficulty 0 and weight 1
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tooltip: None,
            difficulty: 0.0,
            weight: 1.0,
            categories: CategorySet::new(),
            derived_categories: CategorySet::new(),
            tags: Vec::new(),
        }
    }

    /// Whether the snippet satisfies a placeholder condition
    ///
    /// `category_named` resolves a category name against the configuration,
    /// `text_so_far` is the partially expanded template.
    pub fn matches_condition(
        &self,
        condition: &SnippetCondition,
        text_so_far: &str,
        category_named: impl Fn(&str) -> Option<crate::content::category::CategoryId>,
    ) -> bool {
        match condition {
            SnippetCondition::AvoidDuplicates => !text_so_far.contains(&self.text),
            SnippetCondition::Tag { name, negated } => self.tags.contains(name) != *negated,
            SnippetCondition::Category { name, negated } => {
                let present =
                    category_named(name).is_some_and(|id| self.categories.contains(id));
                present != *negated
            }
            SnippetCondition::DerivedCategory { name, negated } => {
                let present =
                    category_named(name).is_some_and(|id| self.derived_categories.contains(id));
                present != *negated
            }
            SnippetCondition::Unknown(_) => true,
        }
    }
}
