//! Locating the catalog file on disk.
//!
//! The same binary runs from a source checkout, from an unpacked release
//! archive, and from a bundle with a `resources/` directory next to the
//! executable. Rather than hardcoding one of those, the loader walks a short
//! list of candidate directories and takes the first one holding the file.

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

/// File looked up when no explicit locator is given.
pub const DEFAULT_RESOURCE_NAME: &str = "dishes.json";

/// Environment variable naming a directory checked before all others.
pub const DATA_DIR_ENV: &str = "QUESHI_DATA_DIR";

/// Subdirectory of the executable's directory used for bundled resources.
pub const BUNDLED_RESOURCE_DIR: &str = "resources";

/// Trait for resolving a resource name to an existing file.
pub trait CatalogDiscovery {
    fn locate(&self, name: &Path) -> Option<PathBuf>;
}

/// Checks an ordered list of directories, first hit wins.
#[derive(Debug, Clone, Default)]
pub struct SearchPathDiscovery {
    dirs: Vec<PathBuf>,
}

impl SearchPathDiscovery {
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// The default order: `$QUESHI_DATA_DIR`, `<exe dir>/resources`,
    /// `<exe dir>`, then the current working directory.
    pub fn from_env() -> Self {
        let override_dir = env::var_os(DATA_DIR_ENV)
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);
        let exe_dir = env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        let cwd = env::current_dir().ok();

        Self::new(default_search_dirs(override_dir, exe_dir, cwd))
    }
}

impl CatalogDiscovery for SearchPathDiscovery {
    fn locate(&self, name: &Path) -> Option<PathBuf> {
        if name.is_absolute() {
            return name.is_file().then(|| name.to_path_buf());
        }

        for dir in &self.dirs {
            let candidate = dir.join(name);
            if candidate.is_file() {
                debug!(path = %candidate.display(), "catalog resource found");
                return Some(candidate);
            }
            debug!(path = %candidate.display(), "catalog resource not present");
        }

        None
    }
}

/// Assemble the candidate list, dropping unknown entries and repeats while
/// keeping priority order.
fn default_search_dirs(
    override_dir: Option<PathBuf>,
    exe_dir: Option<PathBuf>,
    cwd: Option<PathBuf>,
) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::with_capacity(4);
    let bundled = exe_dir.as_ref().map(|dir| dir.join(BUNDLED_RESOURCE_DIR));

    for dir in [override_dir, bundled, exe_dir, cwd].into_iter().flatten() {
        if !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }

    dirs
}
