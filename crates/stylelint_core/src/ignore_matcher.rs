//! Ignore-file handling.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use tracing::debug;

use crate::StandaloneError;

/// Ignore file looked up under the base directory when no path is given.
pub const DEFAULT_IGNORE_FILENAME: &str = ".stylelintignore";

/// Decides whether a path is excluded by ignore patterns.
///
/// Patterns use gitignore syntax: one glob per line, `!` negates and `#`
/// starts a comment. They are matched against paths relative to the base
/// directory; paths outside it are never ignored.
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    base_dir: PathBuf,
    gitignore: Gitignore,
}

impl IgnoreMatcher {
    /// Builds a matcher from explicit patterns followed by the ignore file.
    ///
    /// A missing ignore file yields no patterns. Any other read failure is
    /// returned as [`StandaloneError::IgnoreFile`].
    pub fn load(
        base_dir: &Path,
        ignore_path: Option<&Path>,
        explicit: &[String],
    ) -> Result<Self, StandaloneError> {
        let ignore_file = match ignore_path {
            Some(path) => base_dir.join(path),
            None => base_dir.join(DEFAULT_IGNORE_FILENAME),
        };

        let content = match fs::read_to_string(&ignore_file) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No ignore file at {}", ignore_file.display());
                String::new()
            }
            Err(source) => {
                return Err(StandaloneError::IgnoreFile {
                    path: ignore_file,
                    source,
                });
            }
        };

        Self::from_patterns(
            base_dir,
            explicit.iter().map(String::as_str).chain(content.lines()),
        )
    }

    /// Builds a matcher from in-memory patterns.
    pub fn from_patterns<'a>(
        base_dir: &Path,
        patterns: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, StandaloneError> {
        let mut builder = GitignoreBuilder::new(base_dir);
        for pattern in patterns {
            builder.add_line(None, pattern).map_err(|e| {
                StandaloneError::config(format!("Invalid ignore pattern '{}': {}", pattern, e))
            })?;
        }

        let gitignore = builder
            .build()
            .map_err(|e| StandaloneError::config(format!("Failed to build ignore rules: {}", e)))?;

        Ok(Self {
            base_dir: base_dir.to_path_buf(),
            gitignore,
        })
    }

    /// A matcher that ignores nothing.
    pub fn empty(base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            gitignore: Gitignore::empty(),
        }
    }

    /// Returns true if the file at `path` is ignored.
    pub fn is_ignored(&self, path: &Path) -> bool {
        let relative = if path.is_absolute() {
            match path.strip_prefix(&self.base_dir) {
                Ok(relative) => relative,
                Err(_) => return false,
            }
        } else {
            path
        };

        if relative.as_os_str().is_empty() {
            return false;
        }

        self.gitignore
            .matched_path_or_any_parents(relative, false)
            .is_ignore()
    }

    /// Number of ignore (non-whitelist) patterns.
    pub fn len(&self) -> usize {
        self.gitignore.num_ignores() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
