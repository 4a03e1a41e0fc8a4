//! YAML content configuration loading
//!
//! The document is deserialized into raw structs mirroring the file format and
//! then handed to [`ConfigBuilder`](crate::content::config::ConfigBuilder),
//! which resolves category keys in two passes.
//! Missing required fields and wrongly typed values are parse errors.

use crate::content::{
    category::QuotaBounds,
    config::{CategorySpec, ConfigModel, GeneratorSpec, SnippetSpec},
    metadata::BoardMetadata,
    value::{ValueProvider, ValueRange},
};
use crate::io::error::{BingoError, Result, WithContext};
use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::Path;

const fn one() -> f64 {
    1.0
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDocument {
    #[serde(alias = "tilte")]
    title: Option<String>,
    description: Option<String>,
    game: Option<String>,
    version: Option<Value>,
    authors: Vec<String>,
    categories: BTreeMap<String, RawCategory>,
    snippets: BTreeMap<String, Vec<RawSnippet>>,
    #[serde(rename = "tile generators")]
    tile_generators: Vec<RawGenerator>,
    difficulty: Vec<RawLevel>,
    #[serde(rename = "value providers")]
    value_providers: BTreeMap<String, BTreeMap<String, RawRange>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCategory {
    name: Option<String>,
    min: RawBound,
    max: RawBound,
    synergy: Vec<String>,
    antisynergy: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawBound {
    absolute: Option<f64>,
    relative: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawSnippet {
    text: String,
    #[serde(default)]
    tooltip: Option<String>,
    #[serde(default)]
    difficulty: f64,
    #[serde(default = "one")]
    weight: f64,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    tags: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawGenerator {
    text: String,
    #[serde(default)]
    tooltip: Option<String>,
    #[serde(default = "one")]
    difficulty: f64,
    #[serde(default)]
    difficulties: Vec<String>,
    #[serde(default = "one")]
    weight: f64,
    #[serde(default)]
    categories: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawLevel {
    name: String,
    score: f64,
}

#[derive(Debug, Deserialize)]
struct RawRange {
    min: i64,
    max: i64,
    #[serde(default = "one")]
    score: f64,
}

/// Load a content configuration file
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a valid configuration
/// document, or breaks a content rule such as a negative weight
pub fn load_config(path: &Path) -> Result<ConfigModel> {
    let source = std::fs::read_to_string(path).map_err(|source| BingoError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&source).with_path(path)
}

/// Parse a content configuration from YAML text
///
/// # Errors
///
/// Returns an error if the text is not a valid configuration document or
/// breaks a content rule
pub fn parse_config(source: &str) -> Result<ConfigModel> {
    let raw: RawDocument = serde_yaml::from_str(source)?;
    build(raw)
}

fn build(raw: RawDocument) -> Result<ConfigModel> {
    let mut builder = ConfigModel::builder();

    let metadata = BoardMetadata {
        title: raw.title,
        game: raw.game,
        description: raw.description,
        version: raw.version.as_ref().and_then(version_text),
        authors: raw.authors,
    };
    if !metadata.is_empty() {
        builder = builder.metadata(metadata);
    }

    for (key, category) in raw.categories {
        builder = builder.category(category_spec(key, category));
    }

    for (pool, snippets) in raw.snippets {
        for snippet in snippets {
            let mut spec = SnippetSpec::new(snippet.text)
                .with_difficulty(snippet.difficulty)
                .with_weight(snippet.weight);
            spec.tooltip = snippet.tooltip;
            spec.categories = snippet.categories;
            spec.tags = snippet.tags;
            builder = builder.snippet(pool.clone(), spec);
        }
    }

    for generator in raw.tile_generators {
        let mut spec = GeneratorSpec::new(generator.text)
            .with_difficulty(generator.difficulty)
            .with_weight(generator.weight);
        spec.tooltip = generator.tooltip;
        spec.categories = generator.categories;
        spec.levels = generator.difficulties;
        builder = builder.generator(spec);
    }

    for level in raw.difficulty {
        builder = builder.level(level.name, level.score);
    }

    for (name, ranges) in raw.value_providers {
        let provider = ranges
            .into_iter()
            .fold(ValueProvider::new(), |provider, (level, range)| {
                provider.with_range(level, ValueRange::new(range.min, range.max, range.score))
            });
        builder = builder.value_provider(name, provider);
    }

    builder.build()
}

fn category_spec(key: String, raw: RawCategory) -> CategorySpec {
    let defaults = QuotaBounds::default();
    let quota = QuotaBounds {
        min_absolute: raw.min.absolute.unwrap_or(defaults.min_absolute),
        min_relative: raw.min.relative.unwrap_or(defaults.min_relative),
        max_absolute: raw.max.absolute.unwrap_or(defaults.max_absolute),
        max_relative: raw.max.relative.unwrap_or(defaults.max_relative),
    };
    // References use the map key, `name` is only displayed
    let mut spec = CategorySpec::new(key).with_quota(quota);
    spec.name = raw.name;
    spec.synergies = raw.synergy;
    spec.antisynergies = raw.antisynergy;
    spec
}

// Versions are free-form: "1.2" and 3 are both accepted
fn version_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}
