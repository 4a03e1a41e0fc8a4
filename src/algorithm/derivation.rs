use crate::{
    algorithm::expansion::{Placeholder, placeholder_identifiers},
    content::{bitset::CategorySet, snippet::TextSnippet},
    io::configuration::MAX_DERIVATION_STEPS,
};
use log::warn;
use std::collections::{HashSet, VecDeque};

/// Categories reachable from a template through nested snippet placeholders
///
/// Walks pools breadth-first: every pool referenced by `text` (or by any member
/// of an already visited pool) contributes the declared categories of all its
/// snippets. Each pool is visited once, so mutually referencing pools terminate.
/// The template's own declared categories are not included.
pub fn derive_categories<'a>(
    text: &str,
    pool: impl Fn(&str) -> Option<&'a [TextSnippet]>,
) -> CategorySet {
    let mut derived = CategorySet::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut pending: VecDeque<String> = referenced_pools(text).collect();

    let mut steps = 0;
    while let Some(name) = pending.pop_front() {
        if !visited.insert(name.clone()) {
            continue;
        }
        let Some(snippets) = pool(&name) else {
            continue;
        };

        steps += 1;
        if steps > MAX_DERIVATION_STEPS {
            warn!("Category derivation for [{text}] stopped after {MAX_DERIVATION_STEPS} pools");
            break;
        }

        for snippet in snippets {
            derived.union_with(&snippet.categories);
            pending.extend(referenced_pools(&snippet.text).filter(|next| !visited.contains(next)));
        }
    }

    derived
}

fn referenced_pools(text: &str) -> impl Iterator<Item = String> + '_ {
    placeholder_identifiers(text)
        .into_iter()
        .map(|identifier| Placeholder::parse(identifier).name.to_string())
}
