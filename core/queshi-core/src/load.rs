//! Catalog loading (resolve, read, parse).

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::catalog::{Catalog, SkippedRecord};
use crate::discovery::{CatalogDiscovery, SearchPathDiscovery, DEFAULT_RESOURCE_NAME};
use crate::error::{DocumentError, LoadError};

/// Result of a load: the catalog plus where it came from and what was left out.
#[derive(Debug, Clone, Default)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    /// `None` when no candidate location held the resource.
    pub source: Option<PathBuf>,
    pub skipped: Vec<SkippedRecord>,
}

impl LoadedCatalog {
    /// True when no resource was found and the catalog is the empty fallback.
    pub fn is_missing(&self) -> bool {
        self.source.is_none()
    }
}

/// Load the catalog using the default search order.
///
/// `locator` points straight at the resource (absolute), or names it
/// relative to the working directory. A relative locator that is not there
/// falls back to the search directories, as does [`DEFAULT_RESOURCE_NAME`]
/// when no locator is given.
pub fn load(locator: Option<&Path>) -> Result<LoadedCatalog, LoadError> {
    load_with(&SearchPathDiscovery::from_env(), locator)
}

/// Load the catalog through a caller-supplied discovery strategy.
pub fn load_with(
    discovery: &impl CatalogDiscovery,
    locator: Option<&Path>,
) -> Result<LoadedCatalog, LoadError> {
    let name = locator.unwrap_or_else(|| Path::new(DEFAULT_RESOURCE_NAME));

    let found = match locator {
        Some(path) if path.is_relative() && path.is_file() => {
            debug!(path = %path.display(), "catalog resource found in working directory");
            Some(path.to_path_buf())
        }
        _ => discovery.locate(name),
    };

    match found {
        Some(path) => load_file(&path),
        None => {
            warn!(resource = %name.display(), "catalog resource not found, using empty catalog");
            Ok(LoadedCatalog::default())
        }
    }
}

/// Read and parse one catalog file that is known to exist.
pub fn load_file(path: &Path) -> Result<LoadedCatalog, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let (catalog, skipped) = Catalog::from_json_str(&text).map_err(|err| match err {
        DocumentError::Syntax(source) => LoadError::Parse {
            path: path.to_path_buf(),
            source,
        },
        DocumentError::NotASequence(found) => LoadError::NotASequence {
            path: path.to_path_buf(),
            found,
        },
    })?;

    if !skipped.is_empty() {
        let first = &skipped[0];
        warn!(
            path = %path.display(),
            skipped = skipped.len(),
            first_index = first.index,
            first_reason = %first.reason,
            "skipped invalid recipe records"
        );
    }
    info!(path = %path.display(), recipes = catalog.len(), "catalog loaded");

    Ok(LoadedCatalog {
        catalog,
        source: Some(path.to_path_buf()),
        skipped,
    })
}
