//! Tag normalization.
//!
//! Recipe files describe tags either as one delimiter-joined string
//! (`"辣,下饭"`, `"spicy / quick"`) or as a list (`["下饭", "家常"]`).
//! Both shapes collapse here into a [`TagSet`], so nothing past ingestion
//! has to care which one the file used.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{json_kind, RecordError};

/// Normalized tags of one recipe: trimmed, non-empty, deduplicated and
/// iterated in codepoint order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
    /// Split a delimiter-joined string on every run of non-word characters.
    ///
    /// Any punctuation or whitespace delimits, ASCII or full-width alike,
    /// so `"辣，下饭 家常"` yields three tags.
    pub fn from_text(raw: &str) -> Self {
        Self::from_items(delimiter().split(raw))
    }

    /// Collect already-separated items, trimming each and dropping blanks.
    /// Items are never split further.
    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = items
            .into_iter()
            .filter_map(|item| {
                let trimmed = item.as_ref().trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .collect();
        Self(set)
    }

    /// Coerce the raw `tags` field of a record.
    ///
    /// `null` means "no tag field" and yields `Ok(None)`. Strings are split,
    /// arrays of scalars are stringified element by element (null elements
    /// dropped). Anything else is rejected.
    pub fn from_json(value: &Value) -> Result<Option<Self>, RecordError> {
        match value {
            Value::Null => Ok(None),
            Value::String(text) => Ok(Some(Self::from_text(text))),
            Value::Array(items) => {
                let mut rendered = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::Null => {}
                        Value::String(s) => rendered.push(s.clone()),
                        Value::Number(n) => rendered.push(n.to_string()),
                        Value::Bool(b) => rendered.push(b.to_string()),
                        other => return Err(RecordError::InvalidTags(json_kind(other))),
                    }
                }
                Ok(Some(Self::from_items(rendered)))
            }
            other => Err(RecordError::InvalidTags(json_kind(other))),
        }
    }

    /// Exact membership test; no trimming or case folding.
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        f.write_str(&joined.join(", "))
    }
}

impl Serialize for TagSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl<'a> FromIterator<&'a str> for TagSet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Self::from_items(iter)
    }
}

fn delimiter() -> &'static Regex {
    static DELIMITER: OnceLock<Regex> = OnceLock::new();
    DELIMITER.get_or_init(|| Regex::new(r"\W+").expect("static delimiter pattern"))
}
