//! Search pipeline over a loaded catalog.

use anyhow::Result;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

use crate::catalog::{Catalog, Recipe};
use crate::query::Query;

#[derive(Debug, Default, Clone)]
pub struct SearchOptions {
    /// Size of a dedicated worker pool; `None` uses rayon's global pool.
    pub jobs: Option<usize>,
}

/// Recipes carrying `tag` exactly, in catalog order.
///
/// The tag is trimmed first. A blank tag, an empty catalog or no match all
/// give an empty result.
pub fn search_by_tag<'a>(catalog: &'a Catalog, tag: &str) -> Vec<&'a Recipe> {
    filter_cached(catalog, &Query::for_tag(tag))
}

/// Run a query over the catalog on the current thread.
pub fn filter_cached<'a>(catalog: &'a Catalog, query: &Query) -> Vec<&'a Recipe> {
    if query.is_unsatisfiable() {
        return Vec::new();
    }
    catalog.iter().filter(|recipe| query.matches(recipe)).collect()
}

/// Run a query over the catalog in parallel. Results keep catalog order.
pub fn filter_catalog<'a>(
    catalog: &'a Catalog,
    query: &Query,
    opts: &SearchOptions,
) -> Result<Vec<&'a Recipe>> {
    if query.is_unsatisfiable() {
        return Ok(Vec::new());
    }

    let run_search = || -> Vec<&'a Recipe> {
        catalog
            .recipes()
            .par_iter()
            .filter(|recipe| query.matches(recipe))
            .collect()
    };

    if let Some(jobs) = opts.jobs {
        let pool = ThreadPoolBuilder::new().num_threads(jobs).build()?;
        Ok(pool.install(run_search))
    } else {
        Ok(run_search())
    }
}
