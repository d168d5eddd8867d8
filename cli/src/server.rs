//! HTTP front for a loaded catalog.
//!
//! A desktop UI can drive the whole workflow through four calls: list tags,
//! suggest while typing, search on submit, and reload when the user picks
//! another data file. Reload builds a complete new snapshot off the async
//! threads and swaps it in one pointer write, so concurrent requests see
//! either the old catalog or the new one.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::{Query as UrlQuery, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::task;
use tracing::{info, warn};

use queshi_core::{load, search_by_tag, Catalog, LoadedCatalog, Recipe, Vocabulary};

/// Catalog plus the vocabulary derived from it, replaced as a unit.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub catalog: Catalog,
    pub vocabulary: Vocabulary,
    pub source: Option<PathBuf>,
}

impl Snapshot {
    pub fn new(loaded: LoadedCatalog) -> Self {
        let vocabulary = Vocabulary::build(&loaded.catalog);
        Self {
            catalog: loaded.catalog,
            vocabulary,
            source: loaded.source,
        }
    }
}

/// Shared server state: the current snapshot and the locator used when a
/// reload request names no file.
#[derive(Clone)]
pub struct AppState {
    current: Arc<RwLock<Arc<Snapshot>>>,
    default_locator: Option<PathBuf>,
}

impl AppState {
    pub fn new(loaded: LoadedCatalog, default_locator: Option<PathBuf>) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(Snapshot::new(loaded)))),
            default_locator,
        }
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.read().clone()
    }

    fn replace(&self, next: Snapshot) {
        *self.current.write() = Arc::new(next);
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TagsResponse {
    pub tags: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub tag: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub count: usize,
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SuggestParams {
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SuggestResponse {
    pub suggestions: Vec<String>,
}

/// Optional body of `POST /reload`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReloadRequest {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReloadResponse {
    pub loaded: usize,
    pub skipped: usize,
    pub source: Option<PathBuf>,
}

/// Bind and serve until the process is stopped.
pub async fn serve(bind: &str, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(bind)
        .await
        .with_context(|| format!("binding HTTP server to {bind}"))?;
    info!(%bind, "serving recipe catalog");

    axum::serve(listener, router(state))
        .await
        .context("serving HTTP")?;
    Ok(())
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/tags", get(tags_handler))
        .route("/search", get(search_handler))
        .route("/suggest", get(suggest_handler))
        .route("/reload", post(reload_handler))
        .with_state(state)
}

async fn tags_handler(State(state): State<AppState>) -> Json<TagsResponse> {
    let snapshot = state.snapshot();
    Json(TagsResponse {
        tags: snapshot.vocabulary.tags().to_vec(),
    })
}

async fn search_handler(
    State(state): State<AppState>,
    UrlQuery(params): UrlQuery<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    if params.tag.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "tag must not be blank".to_string()));
    }

    let snapshot = state.snapshot();
    let recipes: Vec<Recipe> = search_by_tag(&snapshot.catalog, &params.tag)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(SearchResponse {
        count: recipes.len(),
        recipes,
    }))
}

async fn suggest_handler(
    State(state): State<AppState>,
    UrlQuery(params): UrlQuery<SuggestParams>,
) -> Result<Json<SuggestResponse>, (StatusCode, String)> {
    let limit = params
        .limit
        .unwrap_or(queshi_core::DEFAULT_SUGGESTION_LIMIT);
    if limit == 0 {
        return Err((
            StatusCode::BAD_REQUEST,
            "limit must be at least 1 when provided".to_string(),
        ));
    }

    let snapshot = state.snapshot();
    let suggestions = snapshot
        .vocabulary
        .suggest(&params.q, limit)
        .into_iter()
        .map(str::to_string)
        .collect();

    Ok(Json(SuggestResponse { suggestions }))
}

async fn reload_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ReloadResponse>, (StatusCode, String)> {
    let request: ReloadRequest = if body.is_empty() {
        ReloadRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(to_bad_request)?
    };
    let locator = request.path.or_else(|| state.default_locator.clone());

    let loaded = task::spawn_blocking(move || load(locator.as_deref()))
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("task join error: {e}"),
            )
        })?
        .map_err(|e| {
            warn!(error = %e, "reload failed, keeping current catalog");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("{:#}", anyhow::Error::from(e)),
            )
        })?;

    let response = ReloadResponse {
        loaded: loaded.catalog.len(),
        skipped: loaded.skipped.len(),
        source: loaded.source.clone(),
    };
    state.replace(Snapshot::new(loaded));
    info!(recipes = response.loaded, "catalog reloaded");

    Ok(Json(response))
}

fn to_bad_request(err: impl std::fmt::Display) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, err.to_string())
}
