//! # stylelint_cache
//!
//! Caching system for the stylelint standalone runner.
//!
//! This crate provides efficient caching to avoid re-linting unchanged files.
//!
//! ## Cache Strategy
//!
//! 1. **File-level cache**: Skip files whose content hash hasn't changed
//! 2. **Config-aware**: Invalidate when the engine options change
//! 3. **Retained entries**: Entries for files not visited in a run are kept
//!
//! ## Storage
//!
//! Cache is stored in a single file using `rkyv` for zero-copy
//! deserialization, providing fast cache reads without parsing overhead.

mod entry;
mod error;
mod manager;

pub use entry::CacheEntry;
pub use error::CacheError;
pub use manager::{CacheManager, DEFAULT_CACHE_FILE};
