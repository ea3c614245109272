//! Cache entry types.

use serde::{Deserialize, Serialize};
use stylelint_types::LintResult;

/// A cache entry for a single file.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    rkyv::Archive,
    rkyv::Serialize,
    rkyv::Deserialize,
)]
pub struct CacheEntry {
    /// Hash of the file content.
    pub content_hash: String,

    /// Hash of the engine options used.
    pub config_hash: String,

    /// Result of the last lint of this content.
    pub result: LintResult,

    /// Timestamp when this entry was created.
    pub created_at: u64,
}

impl CacheEntry {
    /// Creates a new cache entry.
    pub fn new(content_hash: String, config_hash: String, result: LintResult) -> Self {
        Self {
            content_hash,
            config_hash,
            result,
            created_at: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    /// Checks if this cache entry is valid for the given hashes.
    pub fn is_valid(&self, content_hash: &str, config_hash: &str) -> bool {
        self.content_hash == content_hash && self.config_hash == config_hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use stylelint_types::Warning;

    fn entry(content_hash: &str, config_hash: &str) -> CacheEntry {
        CacheEntry::new(
            content_hash.to_string(),
            config_hash.to_string(),
            LintResult::new("/project/a.css", vec![]),
        )
    }

    #[rstest]
    #[case::both_match("abc123", "config456", true)]
    #[case::content_differs("different", "config456", false)]
    #[case::config_differs("abc123", "different", false)]
    #[case::content_case_differs("ABC123", "config456", false)]
    #[case::config_case_differs("abc123", "CONFIG456", false)]
    fn test_cache_entry_validity(
        #[case] content_hash: &str,
        #[case] config_hash: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(
            entry("abc123", "config456").is_valid(content_hash, config_hash),
            expected
        );
    }

    #[test]
    fn test_cache_entry_keeps_result() {
        let result = LintResult::new(
            "/project/a.css",
            vec![Warning::new(2, 3, "block-no-empty", "Unexpected empty block")],
        );
        let entry = CacheEntry::new("hash".to_string(), "config".to_string(), result.clone());

        assert_eq!(entry.result, result);
        assert!(entry.result.errored);
    }

    #[test]
    fn test_cache_entry_timestamp_is_recent() {
        let entry = entry("hash", "config");

        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();

        assert!(entry.created_at <= now);
        assert!(entry.created_at >= now - 60);
    }
}
