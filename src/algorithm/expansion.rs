use crate::{
    algorithm::sampler::pick,
    analysis::quota::QuotaConstraints,
    content::{
        bitset::CategorySet,
        config::ConfigModel,
        snippet::{SnippetCondition, TextSnippet},
    },
    io::configuration::MAX_SUBSTITUTIONS,
};
use log::{debug, warn};
use rand::Rng;
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

// Innermost brackets first, so "[[pool]]" resolves the inner placeholder
static PLACEHOLDER_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\[([^\[\]]*)\]").ok());

static RANGE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(-?\d+)-(-?\d+)$").ok());

/// A placeholder identifier split into pool name and optional condition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placeholder<'a> {
    /// Pool, value provider or range text
    pub name: &'a str,
    /// Condition following a `|`
    pub condition: Option<&'a str>,
}

impl<'a> Placeholder<'a> {
    /// Split `pool|condition` identifiers, trimming both parts
    pub fn parse(identifier: &'a str) -> Self {
        match identifier.split_once('|') {
            Some((name, condition)) => Self {
                name: name.trim(),
                condition: Some(condition.trim()),
            },
            None => Self {
                name: identifier.trim(),
                condition: None,
            },
        }
    }
}

/// Identifiers of every `[identifier]` placeholder in `text`, in order
pub fn placeholder_identifiers(text: &str) -> Vec<&str> {
    PLACEHOLDER_PATTERN.as_ref().map_or_else(Vec::new, |pattern| {
        pattern
            .captures_iter(text)
            .filter_map(|captures| captures.get(1).map(|m| m.as_str()))
            .collect()
    })
}

/// Parse a literal `min-max` range, swapping reversed bounds
pub fn parse_numeric_range(identifier: &str) -> Option<(i64, i64)> {
    let captures = RANGE_PATTERN.as_ref()?.captures(identifier)?;
    let first: i64 = captures.get(1)?.as_str().parse().ok()?;
    let second: i64 = captures.get(2)?.as_str().parse().ok()?;
    Some((first.min(second), first.max(second)))
}

/// Result of expanding one template
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Expansion {
    /// Text with every resolvable placeholder substituted
    pub text: String,
    /// Summed difficulty of chosen snippets and drawn values
    pub difficulty: f64,
    /// Union of chosen snippets' categories
    pub categories: CategorySet,
    /// Tooltips of chosen snippets, in substitution order
    pub tooltips: Vec<String>,
}

/// Resolves template placeholders against snippet pools, value providers and ranges
///
/// Quota constraints steer snippet choice but never starve it: a filter that
/// would leave no candidate is skipped.
pub struct SnippetExpander<'a> {
    config: &'a ConfigModel,
    max_substitutions: usize,
}

impl<'a> SnippetExpander<'a> {
    /// Create an expander over a configuration
    pub const fn new(config: &'a ConfigModel) -> Self {
        Self {
            config,
            max_substitutions: MAX_SUBSTITUTIONS,
        }
    }

    /// Override the substitution safety cap
    #[must_use]
    pub const fn with_max_substitutions(mut self, max_substitutions: usize) -> Self {
        self.max_substitutions = max_substitutions;
        self
    }

    /// Expand `text` until no resolvable placeholder remains
    ///
    /// `level` names the difficulty level used to pick value provider ranges.
    /// Unresolvable placeholders stay verbatim in the output.
    pub fn expand<R: Rng>(
        &self,
        text: &str,
        constraints: &QuotaConstraints,
        level: Option<&str>,
        rng: &mut R,
    ) -> Expansion {
        let mut expansion = Expansion {
            text: text.to_string(),
            ..Expansion::default()
        };
        let Some(pattern) = PLACEHOLDER_PATTERN.as_ref() else {
            return expansion;
        };

        let mut cursor = 0;
        let mut substitutions = 0;
        loop {
            let Some((range, identifier)) = pattern
                .captures_at(&expansion.text, cursor)
                .and_then(|captures| {
                    let whole = captures.get(0)?;
                    let identifier = captures.get(1)?;
                    Some((whole.range(), identifier.as_str().to_string()))
                })
            else {
                break;
            };

            if substitutions >= self.max_substitutions {
                warn!(
                    "Stopped expanding [{text}] after {substitutions} substitutions, placeholders may be self-referencing"
                );
                break;
            }

            match self.resolve(&identifier, &range, constraints, level, &mut expansion, rng) {
                Some(replacement) => {
                    expansion.text.replace_range(range.clone(), &replacement);
                    // Substituted text may contain placeholders of its own
                    cursor = range.start;
                    substitutions += 1;
                }
                None => cursor = range.end,
            }
        }

        expansion
    }

    fn resolve<R: Rng>(
        &self,
        identifier: &str,
        span: &Range<usize>,
        constraints: &QuotaConstraints,
        level: Option<&str>,
        expansion: &mut Expansion,
        rng: &mut R,
    ) -> Option<String> {
        let placeholder = Placeholder::parse(identifier);

        if let Some(pool) = self.config.pool(placeholder.name) {
            let candidates = self.candidates(
                pool,
                placeholder.condition,
                &expansion.text,
                span,
                constraints,
            );
            let snippet = pick(&candidates, rng)?;
            expansion.difficulty += snippet.difficulty;
            expansion.categories.union_with(&snippet.categories);
            if let Some(tooltip) = &snippet.tooltip {
                expansion.tooltips.push(tooltip.clone());
            }
            return Some(snippet.text.clone());
        }

        if let Some(provider) = self.config.value_provider(placeholder.name) {
            let range = provider.range_for(level?)?;
            let value = range.sample(rng);
            expansion.difficulty += range.score;
            return Some(value.to_string());
        }

        let (min, max) = parse_numeric_range(placeholder.name)?;
        Some(rng.random_range(min..=max).to_string())
    }

    fn candidates<'p>(
        &self,
        pool: &'p [TextSnippet],
        condition: Option<&str>,
        text: &str,
        span: &Range<usize>,
        constraints: &QuotaConstraints,
    ) -> Vec<&'p TextSnippet> {
        let mut candidates: Vec<&TextSnippet> = pool.iter().collect();

        if let Some(condition) = condition {
            let condition = SnippetCondition::parse(condition);
            // Conditions see the text around the placeholder, never the placeholder itself
            let text_so_far = [
                text.get(..span.start).unwrap_or_default(),
                text.get(span.end..).unwrap_or_default(),
            ]
            .concat();
            let matching: Vec<&TextSnippet> = candidates
                .iter()
                .copied()
                .filter(|snippet| {
                    snippet.matches_condition(&condition, &text_so_far, |name| {
                        self.config.category_id(name)
                    })
                })
                .collect();
            if matching.is_empty() {
                debug!("No snippet satisfies {condition:?}, ignoring the condition");
            } else {
                candidates = matching;
            }
        }

        if !constraints.must_include.is_empty() {
            let preferred: Vec<&TextSnippet> = candidates
                .iter()
                .copied()
                .filter(|snippet| snippet.categories.intersects(&constraints.must_include))
                .collect();
            if !preferred.is_empty() {
                candidates = preferred;
            }
        }

        if !constraints.forbid.is_empty() {
            let allowed: Vec<&TextSnippet> = candidates
                .iter()
                .copied()
                .filter(|snippet| !snippet.categories.intersects(&constraints.forbid))
                .collect();
            if allowed.is_empty() {
                debug!("Every snippet candidate touches a forbidden category, ignoring quotas");
            } else {
                candidates = allowed;
            }
        }

        candidates
    }
}
