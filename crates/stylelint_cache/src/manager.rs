//! Cache manager for file-level caching.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{CacheEntry, CacheError};

/// File name used when the cache location is a directory.
pub const DEFAULT_CACHE_FILE: &str = ".stylelintcache";

/// Manages the lint cache for all files.
pub struct CacheManager {
    /// File the cache is persisted to.
    cache_file: PathBuf,
    /// In-memory cache entries, keyed by absolute path.
    entries: HashMap<String, CacheEntry>,
    /// Whether cache is enabled.
    enabled: bool,
}

impl CacheManager {
    /// Creates a new cache manager.
    ///
    /// # Arguments
    ///
    /// * `cache_file` - File to persist the cache to
    pub fn new(cache_file: impl Into<PathBuf>) -> Self {
        Self {
            cache_file: cache_file.into(),
            entries: HashMap::new(),
            enabled: true,
        }
    }

    /// Creates a cache manager that never stores or returns entries.
    pub fn disabled() -> Self {
        let mut manager = Self::new(PathBuf::new());
        manager.disable();
        manager
    }

    /// Resolves a user-supplied cache location to the cache file.
    ///
    /// Relative locations are resolved against `base_dir`. An existing
    /// directory gets [`DEFAULT_CACHE_FILE`] appended.
    pub fn resolve_location(location: &Path, base_dir: &Path) -> PathBuf {
        let absolute = if location.is_absolute() {
            location.to_path_buf()
        } else {
            base_dir.join(location)
        };

        if absolute.is_dir() {
            absolute.join(DEFAULT_CACHE_FILE)
        } else {
            absolute
        }
    }

    /// Disables caching.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Returns whether caching is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the file the cache is persisted to.
    pub fn cache_file(&self) -> &Path {
        &self.cache_file
    }

    /// Computes the BLAKE3 hash of content.
    pub fn hash_content(content: &str) -> String {
        blake3::hash(content.as_bytes()).to_hex().to_string()
    }

    /// Gets a cached entry for a file.
    pub fn get(&self, path: &Path) -> Option<&CacheEntry> {
        if !self.enabled {
            return None;
        }
        let key = path.to_string_lossy().to_string();
        self.entries.get(&key)
    }

    /// Returns the cached entry for a file if it matches both hashes.
    pub fn get_valid(
        &self,
        path: &Path,
        content_hash: &str,
        config_hash: &str,
    ) -> Option<&CacheEntry> {
        self.get(path)
            .filter(|entry| entry.is_valid(content_hash, config_hash))
    }

    /// Checks if a file's cache is valid.
    ///
    /// # Arguments
    ///
    /// * `path` - File path
    /// * `content_hash` - Hash of current file content
    /// * `config_hash` - Hash of current engine options
    pub fn is_valid(&self, path: &Path, content_hash: &str, config_hash: &str) -> bool {
        self.get_valid(path, content_hash, config_hash).is_some()
    }

    /// Stores a cache entry for a file, replacing any previous entry.
    pub fn set(&mut self, path: &Path, entry: CacheEntry) {
        if self.enabled {
            let key = path.to_string_lossy().to_string();
            self.entries.insert(key, entry);
        }
    }

    /// Removes a cache entry.
    pub fn remove(&mut self, path: &Path) {
        let key = path.to_string_lossy().to_string();
        self.entries.remove(&key);
    }

    /// Clears all cache entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Loads cache from disk.
    pub fn load(&mut self) -> Result<(), CacheError> {
        if !self.enabled {
            return Ok(());
        }

        if !self.cache_file.exists() {
            debug!("No cache file found at {}", self.cache_file.display());
            return Ok(());
        }

        let content = fs::read(&self.cache_file)?;
        let entries: HashMap<String, CacheEntry> =
            rkyv::from_bytes::<_, rkyv::rancor::Error>(&content)
                .map_err(|e| CacheError::corrupted(e.to_string()))?;

        info!("Loaded {} cache entries", entries.len());
        self.entries = entries;

        Ok(())
    }

    /// Saves cache to disk.
    pub fn save(&self) -> Result<(), CacheError> {
        if !self.enabled {
            return Ok(());
        }

        if let Some(parent) = self.cache_file.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let bytes = rkyv::to_bytes::<rkyv::rancor::Error>(&self.entries)
            .map_err(|e| CacheError::serialization(e.to_string()))?;

        fs::write(&self.cache_file, bytes)?;

        info!(
            "Saved {} cache entries to {}",
            self.entries.len(),
            self.cache_file.display()
        );

        Ok(())
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
