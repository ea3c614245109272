//! Parallel file linting.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use stylelint_cache::CacheManager;
use stylelint_types::LintResult;
use tracing::debug;

use crate::cache_gate::{CacheCheck, CacheGate};
use crate::engine::{LintEngine, Source};
use crate::normalize::normalize_outcome;
use crate::{EngineOptions, StandaloneError};

/// Lints every path on the rayon pool.
///
/// Results come back in `paths` order. The first fatal error aborts the
/// run; the cache is flushed either way.
pub fn lint_files<E: LintEngine>(
    engine: &E,
    paths: &[PathBuf],
    options: &EngineOptions,
    cache: &CacheGate,
) -> Result<Vec<LintResult>, StandaloneError> {
    let results = paths
        .par_iter()
        .map(|path| lint_file(engine, path, options, cache))
        .collect::<Result<Vec<_>, _>>();

    cache.flush();

    results
}

/// Lints one file, consulting the cache first.
pub fn lint_file<E: LintEngine>(
    engine: &E,
    path: &Path,
    options: &EngineOptions,
    cache: &CacheGate,
) -> Result<LintResult, StandaloneError> {
    let code = fs::read_to_string(path).map_err(|source| StandaloneError::File {
        path: path.to_path_buf(),
        source,
    })?;

    let content_hash = CacheManager::hash_content(&code);
    if let CacheCheck::Hit(result) = cache.check(path, &content_hash) {
        return Ok(result);
    }

    let label = path.to_string_lossy();
    debug!("Linting {}", label);

    let outcome = engine.lint_source(&Source::new(&code, Some(label.as_ref())), options);
    let result = normalize_outcome(label.as_ref(), outcome)?;

    cache.record(path, &content_hash, &result);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{EngineFailure, EngineOutcome, EngineReport};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    /// Fails fatally on sources containing `boom`.
    #[derive(Default)]
    struct CountingEngine {
        calls: AtomicUsize,
    }

    impl LintEngine for CountingEngine {
        fn lint_source(&self, source: &Source<'_>, _: &EngineOptions) -> EngineOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if source.code.contains("boom") {
                return Err(EngineFailure::fatal("Error", "boom"));
            }
            Ok(EngineReport::default())
        }
    }

    #[test]
    fn test_lint_files_empty() {
        let engine = CountingEngine::default();
        let results =
            lint_files(&engine, &[], &EngineOptions::default(), &CacheGate::disabled()).unwrap();

        assert!(results.is_empty());
        assert_eq!(engine.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_lint_file_records_and_hits_cache() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.css");
        fs::write(&path, "a {}").unwrap();

        let engine = CountingEngine::default();
        let cache = CacheGate::open(dir.path().join(".stylelintcache"), "config", false);

        let first = lint_file(&engine, &path, &EngineOptions::default(), &cache).unwrap();
        let second = lint_file(&engine, &path, &EngineOptions::default(), &cache).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.source, path.to_string_lossy());
        assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unreadable_file_is_fatal() {
        let dir = tempdir().unwrap();
        let engine = CountingEngine::default();

        let err = lint_file(
            &engine,
            &dir.path().join("missing.css"),
            &EngineOptions::default(),
            &CacheGate::disabled(),
        )
        .unwrap_err();

        assert!(matches!(err, StandaloneError::File { .. }));
    }

    #[test]
    fn test_fatal_failure_still_flushes_cache() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("a.css");
        let bad = dir.path().join("b.css");
        fs::write(&good, "a {}").unwrap();
        fs::write(&bad, "boom").unwrap();

        let cache_file = dir.path().join(".stylelintcache");
        let cache = CacheGate::open(&cache_file, "config", false);
        let engine = CountingEngine::default();

        let err = lint_files(&engine, &[good, bad], &EngineOptions::default(), &cache).unwrap_err();

        assert!(matches!(err, StandaloneError::Engine(_)));
        assert!(cache_file.exists());
    }
}
