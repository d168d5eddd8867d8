//! Tag vocabulary and autocomplete suggestions.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::catalog::Catalog;

/// Number of suggestions offered when the caller has no preference.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 10;

/// Every distinct tag of a catalog, sorted by codepoint.
///
/// A pure projection of the catalog it was built from; rebuild it whenever
/// the catalog is replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Vocabulary {
    tags: Vec<String>,
}

impl Vocabulary {
    pub fn build(catalog: &Catalog) -> Self {
        let distinct: BTreeSet<&str> = catalog
            .iter()
            .filter_map(|recipe| recipe.tags.as_ref())
            .flat_map(|tags| tags.iter())
            .collect();

        Self {
            tags: distinct.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Tags containing `query`, compared case-insensitively, in vocabulary
    /// order and capped at `limit`.
    ///
    /// A blank query matches everything, so the first `limit` tags come back.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<&str> {
        let needle = query.trim().to_lowercase();

        self.tags
            .iter()
            .map(String::as_str)
            .filter(|tag| needle.is_empty() || tag.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }
}
