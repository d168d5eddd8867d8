//! Query parsing and matching.

use regex::Regex;

use crate::catalog::Recipe;

#[derive(Debug, Clone, Default)]
pub struct Query {
    tags: Vec<String>,
    name_patterns: Vec<Regex>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query for a single tag, trimmed of surrounding whitespace.
    pub fn for_tag(tag: &str) -> Self {
        Self::new().with_tags(vec![tag.trim().to_string()])
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_name_patterns(mut self, patterns: Vec<Regex>) -> Self {
        self.name_patterns = patterns;
        self
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Check whether the recipe satisfies every filter.
    ///
    /// Tags are exact-membership tests and all of them must be present.
    /// Name patterns pass when any one of them matches.
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if !self.tags.iter().all(|tag| recipe.has_tag(tag)) {
            return false;
        }

        if !self.name_patterns.is_empty()
            && !self.name_patterns.iter().any(|re| re.is_match(&recipe.name))
        {
            return false;
        }

        true
    }

    /// A query that names a blank tag can never match anything.
    pub fn is_unsatisfiable(&self) -> bool {
        self.tags.iter().any(|tag| tag.is_empty())
    }
}

/// Clean up user-supplied tags: trim, drop blanks, drop repeats (first
/// occurrence wins).
pub fn parse_tag_list(raw: &[String]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(raw.len());
    for tag in raw {
        let trimmed = tag.trim();
        if !trimmed.is_empty() && !tags.iter().any(|seen| seen == trimmed) {
            tags.push(trimmed.to_string());
        }
    }
    tags
}
