//! Error taxonomy for catalog loading.
//!
//! A missing data file is not an error: the loader reports it through
//! [`LoadedCatalog::source`](crate::load::LoadedCatalog) being `None`.
//! [`LoadError`] covers a file that exists but cannot be turned into a
//! catalog, and [`RecordError`] describes a single record that was skipped.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal failure while loading a catalog file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read catalog {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog {} must contain a JSON array of records, found {found}", path.display())]
    NotASequence { path: PathBuf, found: &'static str },
}

impl LoadError {
    /// Path of the resource that failed to load.
    pub fn path(&self) -> &PathBuf {
        match self {
            LoadError::Read { path, .. }
            | LoadError::Parse { path, .. }
            | LoadError::NotASequence { path, .. } => path,
        }
    }
}

/// Why a single record was left out of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("record is {0}, expected an object")]
    NotAnObject(&'static str),

    #[error("record has no string `name` field")]
    MissingName,

    #[error("`tags` must be a string or a list of scalars, found {0}")]
    InvalidTags(&'static str),
}

/// Document-level parse failure, before a path is attached.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error(transparent)]
    Syntax(#[from] serde_json::Error),

    #[error("expected a JSON array of records, found {0}")]
    NotASequence(&'static str),
}

/// Name of a JSON value's kind, for error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn load_error_exposes_path() {
        let err = LoadError::NotASequence {
            path: PathBuf::from("/data/dishes.json"),
            found: "an object",
        };
        assert_eq!(err.path(), &PathBuf::from("/data/dishes.json"));
        assert!(err.to_string().contains("found an object"));
    }

    #[test]
    fn json_kind_names_every_variant() {
        assert_eq!(json_kind(&json!(null)), "null");
        assert_eq!(json_kind(&json!(3)), "a number");
        assert_eq!(json_kind(&json!({"a": 1})), "an object");
        assert_eq!(json_kind(&json!([1])), "an array");
    }
}
