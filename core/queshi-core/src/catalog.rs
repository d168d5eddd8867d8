//! Recipe records and the in-memory catalog.

use std::io::Read;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{json_kind, DocumentError, RecordError};
use crate::tags::TagSet;

/// One dish. Fields other than `name` and `tags` are carried through
/// untouched, in the order the source file listed them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Recipe {
    pub name: String,
    pub tags: Option<TagSet>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Recipe {
    pub fn new(name: impl Into<String>, tags: Option<TagSet>) -> Self {
        Self {
            name: name.into(),
            tags,
            extra: Map::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Build a record from one element of the source array.
    ///
    /// A missing or `null` `tags` field keeps the record with no tags; a
    /// `tags` value that cannot be coerced rejects it.
    pub fn from_value(value: Value) -> Result<Self, RecordError> {
        let fields = match value {
            Value::Object(map) => map,
            other => return Err(RecordError::NotAnObject(json_kind(&other))),
        };

        // Drain in order so the pass-through fields keep their source order.
        let mut name = None;
        let mut raw_tags = None;
        let mut extra = Map::new();
        for (key, value) in fields {
            match key.as_str() {
                "name" => name = Some(value),
                "tags" => raw_tags = Some(value),
                _ => {
                    extra.insert(key, value);
                }
            }
        }

        let name = match name {
            Some(Value::String(name)) => name,
            _ => return Err(RecordError::MissingName),
        };

        let tags = match raw_tags {
            Some(raw) => TagSet::from_json(&raw)?,
            None => None,
        };

        Ok(Self { name, tags, extra })
    }

    /// True when the record carries `tag` exactly. Records without a tag
    /// field never match.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.as_ref().is_some_and(|tags| tags.contains(tag))
    }

    /// The `price` field rendered for display, if present.
    pub fn price(&self) -> Option<String> {
        self.extra.get("price").map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

impl TryFrom<Value> for Recipe {
    type Error = RecordError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

/// A record left out of the catalog, with its position in the source array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub index: usize,
    pub reason: RecordError,
}

/// Ordered, immutable collection of recipes.
///
/// A reload builds a fresh `Catalog`; nothing mutates one after construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Convert a parsed source array, keeping well-formed records in order
    /// and reporting the rest.
    pub fn from_values(values: Vec<Value>) -> (Self, Vec<SkippedRecord>) {
        let mut recipes = Vec::with_capacity(values.len());
        let mut skipped = Vec::new();

        for (index, value) in values.into_iter().enumerate() {
            match Recipe::from_value(value) {
                Ok(recipe) => recipes.push(recipe),
                Err(reason) => skipped.push(SkippedRecord { index, reason }),
            }
        }

        (Self { recipes }, skipped)
    }

    /// Parse a JSON document whose top level is an array of records.
    pub fn from_json_str(text: &str) -> Result<(Self, Vec<SkippedRecord>), DocumentError> {
        let document: Value = serde_json::from_str(text).map_err(DocumentError::Syntax)?;
        Self::from_document(document)
    }

    pub fn from_reader(reader: impl Read) -> Result<(Self, Vec<SkippedRecord>), DocumentError> {
        let document: Value = serde_json::from_reader(reader).map_err(DocumentError::Syntax)?;
        Self::from_document(document)
    }

    fn from_document(document: Value) -> Result<(Self, Vec<SkippedRecord>), DocumentError> {
        match document {
            Value::Array(values) => Ok(Self::from_values(values)),
            other => Err(DocumentError::NotASequence(json_kind(&other))),
        }
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recipe> {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Recipe;
    type IntoIter = std::slice::Iter<'a, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.recipes.iter()
    }
}
