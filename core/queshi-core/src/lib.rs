//! queshi-core: recipe catalog loading and tag search.
//!
//! A catalog is a JSON array of recipe records. Each record has a `name`, a
//! `tags` field written either as one delimiter-joined string or as a list,
//! and any number of extra fields (price, notes) that are carried through for
//! display.
//!
//! ## Pieces
//!
//! - [`load`] finds the data file (an explicit path, or `dishes.json` in the
//!   first of `$QUESHI_DATA_DIR`, `<exe>/resources`, `<exe dir>`, the working
//!   directory) and parses it. A missing file gives an empty catalog; a
//!   malformed one gives a [`LoadError`]; individual bad records are skipped
//!   and reported.
//! - [`TagSet`] is the normalized form of a record's tags.
//! - [`Vocabulary`] lists every distinct tag and drives autocomplete through
//!   [`Vocabulary::suggest`].
//! - [`search_by_tag`] answers "which recipes carry this tag" by exact
//!   membership; [`Query`] composes tag and name filters.
//!
//! ```rust,no_run
//! use queshi_core::{load, search_by_tag, Vocabulary, DEFAULT_SUGGESTION_LIMIT};
//!
//! let loaded = load(None)?;
//! let vocabulary = Vocabulary::build(&loaded.catalog);
//!
//! for tag in vocabulary.suggest("下", DEFAULT_SUGGESTION_LIMIT) {
//!     println!("suggest: {tag}");
//! }
//! for recipe in search_by_tag(&loaded.catalog, "下饭") {
//!     println!("{}", recipe.name);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod catalog;
pub mod discovery;
pub mod error;
pub mod load;
pub mod output;
pub mod query;
pub mod search;
pub mod tags;
pub mod vocabulary;

pub use catalog::{Catalog, Recipe, SkippedRecord};
pub use discovery::{CatalogDiscovery, SearchPathDiscovery, DEFAULT_RESOURCE_NAME};
pub use error::{LoadError, RecordError};
pub use load::{load, load_file, load_with, LoadedCatalog};
pub use query::Query;
pub use search::{filter_catalog, search_by_tag, SearchOptions};
pub use tags::TagSet;
pub use vocabulary::{Vocabulary, DEFAULT_SUGGESTION_LIMIT};
