//! Compiled route cache persistence.
//!
//! # Data Flow
//! ```text
//! First start (no cache file):
//!     build(&mut RouteTable) → compile() → save_routes() → cache.json
//!
//! Later starts:
//!     cache.json → load_routes() → RouteTable::from_compiled()
//!     (pattern compiler is not run)
//! ```
//!
//! # Design Decisions
//! - Pretty-printed JSON so cache files diff cleanly
//! - A loaded cache is trusted as-is; delete the file to rebuild it

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::routing::{CompiledRoute, RouteError, RouteTable};

/// Errors while reading, writing or producing a route cache.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache format error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Route(#[from] RouteError),
}

/// Write compiled routes to `path`.
pub fn save_routes<T: Serialize>(path: &Path, routes: &[CompiledRoute<T>]) -> Result<(), CacheError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, routes)?;
    writer.flush()?;

    tracing::info!(path = %path.display(), routes = routes.len(), "Saved compiled route cache");
    Ok(())
}

/// Read compiled routes from `path`.
pub fn load_routes<T: DeserializeOwned>(path: &Path) -> Result<Vec<CompiledRoute<T>>, CacheError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let routes: Vec<CompiledRoute<T>> = serde_json::from_reader(reader)?;

    tracing::info!(path = %path.display(), routes = routes.len(), "Loaded compiled route cache");
    Ok(routes)
}

/// Produce a ready route table, going through the cache file when given.
///
/// If `cache` names an existing file the table is loaded from it and `build`
/// is not called. Otherwise `build` registers routes on a fresh table,
/// which is compiled and, when `cache` is set, written out.
pub fn create_matcher<T, F>(cache: Option<&Path>, build: F) -> Result<RouteTable<T>, CacheError>
where
    T: Clone + Serialize + DeserializeOwned,
    F: FnOnce(&mut RouteTable<T>),
{
    if let Some(path) = cache.filter(|p| p.is_file()) {
        return Ok(RouteTable::from_compiled(load_routes(path)?));
    }

    let mut table = RouteTable::new();
    build(&mut table);
    let routes = table.compile()?;

    if let Some(path) = cache {
        save_routes(path, routes)?;
    }
    Ok(table)
}
