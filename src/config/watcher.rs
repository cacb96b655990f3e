//! Route file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;

use crate::cache::{self, CacheError};
use crate::config::loader::{load_config, ConfigError};
use crate::routing::{Matcher, RouteTable};

/// A frozen matcher that readers load lock-free and reloads replace atomically.
pub type SharedMatcher = Arc<ArcSwap<Matcher<String>>>;

/// Error while rebuilding the matcher from a changed route file.
#[derive(Debug, Error)]
pub enum ReloadError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

/// Load the route file at `path` and compile it from scratch.
///
/// Any cache file named in the route file is rewritten, since the routes it
/// held may be stale.
pub fn rebuild_matcher(path: &Path) -> Result<Matcher<String>, ReloadError> {
    let config = load_config(path)?;
    let mut table = RouteTable::from_config(&config);
    let routes = table.compile().map_err(CacheError::from)?;

    if let Some(cache_path) = &config.cache.path {
        cache::save_routes(Path::new(cache_path), routes)?;
    }
    Ok(table.freeze().map_err(CacheError::from)?)
}

/// A watcher that monitors the route file and swaps in a rebuilt matcher.
pub struct ConfigWatcher {
    path: PathBuf,
    shared: SharedMatcher,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher publishing into `shared`.
    pub fn new(path: &Path, shared: SharedMatcher) -> Self {
        Self {
            path: path.to_path_buf(),
            shared,
        }
    }

    /// Start watching the file in a background thread.
    ///
    /// Watching stops when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let shared = self.shared.clone();
        let path = self.path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Route file change detected, reloading...");
                        match rebuild_matcher(&path) {
                            Ok(matcher) => {
                                tracing::info!(routes = matcher.routes().len(), "Route table reloaded");
                                shared.store(Arc::new(matcher));
                            }
                            Err(e) => {
                                tracing::error!("Failed to reload routes: {}. Keeping current table.", e);
                            }
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Route file watcher started");
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rebuild_writes_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache_path = dir.path().join("cache.json");
        let config_path = dir.path().join("routes.toml");
        std::fs::write(
            &config_path,
            format!(
                "[cache]\npath = {:?}\n\n[[routes]]\npath = \"/users/{{id:i}}\"\ntarget = \"user\"\n",
                cache_path.to_string_lossy()
            ),
        )
        .unwrap();

        let matcher = rebuild_matcher(&config_path).unwrap();
        assert!(matcher.match_route("/users/5", "GET").is_found());

        let cached: Vec<crate::routing::CompiledRoute<String>> = cache::load_routes(&cache_path).unwrap();
        assert_eq!(cached.as_slice(), matcher.routes());
    }

    #[test]
    fn test_rebuild_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("routes.toml");
        std::fs::write(&config_path, "[[routes]]\npath = \"/{x:bad}\"\ntarget = \"x\"\n").unwrap();

        assert!(matches!(
            rebuild_matcher(&config_path),
            Err(ReloadError::Config(ConfigError::Validation(_)))
        ));
    }
}
