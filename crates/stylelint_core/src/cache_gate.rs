//! Content-hash gate in front of the engine.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use stylelint_cache::{CacheEntry, CacheManager};
use stylelint_types::LintResult;
use tracing::{debug, warn};

/// Outcome of a cache lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheCheck {
    Hit(LintResult),
    Miss,
}

/// Run-scoped view of the persistent cache.
///
/// Opened (loaded) once before linting, shared by the workers, and
/// flushed once after. Store failures are logged and treated as misses.
pub struct CacheGate {
    manager: Mutex<CacheManager>,
    config_hash: String,
    fix: bool,
}

impl CacheGate {
    /// A gate that always misses and never writes.
    pub fn disabled() -> Self {
        Self {
            manager: Mutex::new(CacheManager::disabled()),
            config_hash: String::new(),
            fix: false,
        }
    }

    /// Loads the cache file. A corrupt or unreadable file starts empty.
    pub fn open(cache_file: impl Into<PathBuf>, config_hash: impl Into<String>, fix: bool) -> Self {
        let mut manager = CacheManager::new(cache_file);
        if let Err(e) = manager.load() {
            warn!(
                "Failed to load cache {}: {}",
                manager.cache_file().display(),
                e
            );
            manager.clear();
        }

        Self {
            manager: Mutex::new(manager),
            config_hash: config_hash.into(),
            fix,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.manager.lock().is_enabled()
    }

    /// Looks up `path`. Fix mode always misses.
    pub fn check(&self, path: &Path, content_hash: &str) -> CacheCheck {
        if self.fix {
            return CacheCheck::Miss;
        }

        let manager = self.manager.lock();
        match manager.get_valid(path, content_hash, &self.config_hash) {
            Some(entry) => {
                debug!("Cache hit: {}", path.display());
                CacheCheck::Hit(entry.result.clone())
            }
            None => CacheCheck::Miss,
        }
    }

    /// Records a fresh result, replacing any previous entry for `path`.
    pub fn record(&self, path: &Path, content_hash: &str, result: &LintResult) {
        let entry = CacheEntry::new(
            content_hash.to_string(),
            self.config_hash.clone(),
            result.clone(),
        );
        self.manager.lock().set(path, entry);
    }

    /// Writes the store back to disk.
    pub fn flush(&self) {
        let manager = self.manager.lock();
        if !manager.is_enabled() {
            return;
        }
        if let Err(e) = manager.save() {
            warn!("Failed to save cache: {}", e);
        }
    }

    pub fn len(&self) -> usize {
        self.manager.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
