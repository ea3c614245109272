//! Input resolution: expands `files` globs into concrete paths.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::StandaloneError;
use crate::ignore_matcher::IgnoreMatcher;

/// Excluded from every run unless default ignores are disabled.
pub const ALWAYS_IGNORED_GLOBS: [&str; 2] = ["**/node_modules/**", "**/bower_components/**"];

/// Expands glob patterns relative to a base directory.
///
/// Patterns starting with `!` exclude. Output keeps first-seen order:
/// files are listed per positive pattern, each walk sorted by file name,
/// and later duplicates are dropped.
pub struct InputResolver {
    base_dir: PathBuf,
    disable_default_ignores: bool,
}

impl InputResolver {
    pub fn new(base_dir: impl Into<PathBuf>, disable_default_ignores: bool) -> Self {
        Self {
            base_dir: base_dir.into(),
            disable_default_ignores,
        }
    }

    /// The caller's patterns followed by the negated default excludes.
    pub fn patterns(&self, patterns: &[String]) -> Vec<String> {
        let mut all = patterns.to_vec();
        if !self.disable_default_ignores {
            all.extend(ALWAYS_IGNORED_GLOBS.iter().map(|glob| format!("!{}", glob)));
        }
        all
    }

    /// Resolves patterns to absolute paths, dropping those the ignorer excludes.
    pub fn resolve(
        &self,
        patterns: &[String],
        ignorer: &IgnoreMatcher,
    ) -> Result<Vec<PathBuf>, StandaloneError> {
        let mut positives = Vec::new();
        let mut negatives = Vec::new();
        for pattern in self.patterns(patterns) {
            match pattern.strip_prefix('!') {
                Some(negated) => negatives.push(InputPattern::parse(negated, &self.base_dir)),
                None => positives.push(InputPattern::parse(&pattern, &self.base_dir)),
            }
        }

        let exclusions = Exclusions::new(&negatives)?;
        let mut seen = HashSet::new();
        let mut files = Vec::new();

        for pattern in &positives {
            for path in pattern.expand(&exclusions)? {
                if ignorer.is_ignored(&path) {
                    continue;
                }
                if seen.insert(path.clone()) {
                    files.push(path);
                }
            }
        }

        info!("Discovered {} files to lint", files.len());
        Ok(files)
    }
}

/// One pattern split into the directory to walk and an absolute glob.
#[derive(Debug, Clone, PartialEq, Eq)]
struct InputPattern {
    root: PathBuf,
    glob: String,
    /// No glob syntax: names exactly one path.
    literal: bool,
    /// The glob part names dot-prefixed entries itself.
    dot: bool,
}

impl InputPattern {
    fn parse(pattern: &str, base_dir: &Path) -> Self {
        let mut literal_prefix = PathBuf::new();
        let mut rest: Vec<String> = Vec::new();

        for component in Path::new(pattern).components() {
            let text = component.as_os_str().to_string_lossy();
            if rest.is_empty() && !has_glob_syntax(&text) {
                literal_prefix.push(component);
            } else {
                rest.push(text.into_owned());
            }
        }

        let root = normalize(&base_dir.join(literal_prefix));
        let escaped_root = globset::escape(root.to_string_lossy().trim_end_matches('/'));

        if rest.is_empty() {
            Self {
                glob: escaped_root,
                root,
                literal: true,
                dot: false,
            }
        } else {
            Self {
                glob: format!("{}/{}", escaped_root, rest.join("/")),
                dot: rest.iter().any(|part| part.starts_with('.')),
                root,
                literal: false,
            }
        }
    }

    fn matcher(&self) -> Result<GlobMatcher, StandaloneError> {
        Ok(build_glob(&self.glob)?.compile_matcher())
    }

    fn expand(&self, exclusions: &Exclusions) -> Result<Vec<PathBuf>, StandaloneError> {
        if self.literal {
            let is_file = self.root.symlink_metadata().is_ok_and(|m| !m.is_dir());
            if is_file && !exclusions.excludes_file(&self.root) {
                return Ok(vec![self.root.clone()]);
            }
            return Ok(Vec::new());
        }

        let matcher = self.matcher()?;
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 {
                    return true;
                }
                if !self.dot && is_hidden(entry.file_name()) {
                    return false;
                }
                !entry.file_type().is_dir() || !exclusions.excludes_dir(entry.path())
            });

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    if e.depth() > 0 {
                        warn!("Skipping unreadable path: {}", e);
                    }
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if matcher.is_match(path) && !exclusions.excludes_file(path) {
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }
}

/// Compiled negative patterns.
struct Exclusions {
    files: GlobSet,
    /// Negatives ending in `/**`, used to prune whole directories.
    dirs: GlobSet,
}

impl Exclusions {
    fn new(negatives: &[InputPattern]) -> Result<Self, StandaloneError> {
        let mut files = GlobSetBuilder::new();
        let mut dirs = GlobSetBuilder::new();

        for pattern in negatives {
            files.add(build_glob(&pattern.glob)?);
            if let Some(dir) = pattern.glob.strip_suffix("/**") {
                dirs.add(build_glob(dir)?);
            }
        }

        Ok(Self {
            files: files.build().map_err(globset_error)?,
            dirs: dirs.build().map_err(globset_error)?,
        })
    }

    fn excludes_file(&self, path: &Path) -> bool {
        self.files.is_match(path)
    }

    fn excludes_dir(&self, path: &Path) -> bool {
        self.dirs.is_match(path)
    }
}

fn build_glob(glob: &str) -> Result<globset::Glob, StandaloneError> {
    GlobBuilder::new(glob)
        .literal_separator(true)
        .build()
        .map_err(|e| StandaloneError::config(format!("Invalid pattern '{}': {}", glob, e)))
}

fn globset_error(e: globset::Error) -> StandaloneError {
    StandaloneError::config(format!("Failed to build globset: {}", e))
}

/// Wildcards skip dot-prefixed names unless the pattern spells the dot out.
fn is_hidden(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

fn has_glob_syntax(text: &str) -> bool {
    text.contains(['*', '?', '[', ']', '{', '}'])
}

/// Resolves `.` and `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    fn tree(files: &[&str]) -> TempDir {
        let dir = tempdir().unwrap();
        for file in files {
            let path = dir.path().join(file);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "a {}").unwrap();
        }
        dir
    }

    fn resolve(dir: &TempDir, patterns: &[&str], disable_default_ignores: bool) -> Vec<String> {
        let patterns: Vec<String> = patterns.iter().map(|p| p.to_string()).collect();
        let resolver = InputResolver::new(dir.path(), disable_default_ignores);
        let ignorer = IgnoreMatcher::empty(dir.path());

        resolver
            .resolve(&patterns, &ignorer)
            .unwrap()
            .iter()
            .map(|p| {
                p.strip_prefix(dir.path())
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()
    }

    #[test]
    fn test_default_excludes_are_appended_as_negations() {
        let resolver = InputResolver::new("/project", false);
        assert_eq!(
            resolver.patterns(&["**/*.css".to_string()]),
            vec![
                "**/*.css".to_string(),
                "!**/node_modules/**".to_string(),
                "!**/bower_components/**".to_string(),
            ]
        );

        let resolver = InputResolver::new("/project", true);
        assert_eq!(resolver.patterns(&["**/*.css".to_string()]), vec!["**/*.css".to_string()]);
    }

    #[test]
    fn test_glob_expansion_skips_default_ignores() {
        let dir = tree(&[
            "b.css",
            "a.css",
            "src/c.css",
            "node_modules/pkg/d.css",
            "bower_components/e.css",
            "notes.txt",
        ]);

        assert_eq!(
            resolve(&dir, &["**/*.css"], false),
            vec!["a.css", "b.css", "src/c.css"]
        );
    }

    #[test]
    fn test_disable_default_ignores() {
        let dir = tree(&["a.css", "node_modules/pkg/d.css"]);

        assert_eq!(
            resolve(&dir, &["**/*.css"], true),
            vec!["a.css", "node_modules/pkg/d.css"]
        );
    }

    #[test]
    fn test_single_star_does_not_cross_directories() {
        let dir = tree(&["a.css", "src/b.css"]);
        assert_eq!(resolve(&dir, &["*.css"], false), vec!["a.css"]);
    }

    #[test]
    fn test_pattern_order_and_dedup() {
        let dir = tree(&["a.css", "src/b.css", "src/c.scss"]);

        assert_eq!(
            resolve(&dir, &["src/*.scss", "**/*.css", "src/b.css"], false),
            vec!["src/c.scss", "a.css", "src/b.css"]
        );
    }

    #[test]
    fn test_wildcards_skip_hidden_entries() {
        let dir = tree(&["a.css", ".hidden.css", ".cache/x.css", "src/.git/y.css"]);

        assert_eq!(resolve(&dir, &["**/*.css"], false), vec!["a.css"]);
        assert_eq!(resolve(&dir, &["*.css"], false), vec!["a.css"]);
    }

    #[test]
    fn test_hidden_entries_when_named_explicitly() {
        let dir = tree(&["a.css", ".hidden.css", ".cache/x.css"]);

        assert_eq!(resolve(&dir, &[".*.css"], false), vec![".hidden.css"]);
        assert_eq!(resolve(&dir, &[".cache/*.css"], false), vec![".cache/x.css"]);
        assert_eq!(resolve(&dir, &[".hidden.css"], false), vec![".hidden.css"]);
    }

    #[test]
    fn test_literal_file_and_explicit_negation() {
        let dir = tree(&["a.css", "b.css", "c.css"]);

        assert_eq!(resolve(&dir, &["c.css", "missing.css"], false), vec!["c.css"]);
        assert_eq!(resolve(&dir, &["*.css", "!b.css"], false), vec!["a.css", "c.css"]);
    }

    #[test]
    fn test_ignorer_filters_results() {
        let dir = tree(&["a.css", "a.min.css"]);
        let resolver = InputResolver::new(dir.path(), false);
        let ignorer = IgnoreMatcher::from_patterns(dir.path(), ["**/*.min.css"]).unwrap();

        let files = resolver.resolve(&["*.css".to_string()], &ignorer).unwrap();
        assert_eq!(files, vec![dir.path().join("a.css")]);
    }

    #[test]
    fn test_invalid_glob_is_config_error() {
        let dir = tree(&[]);
        let resolver = InputResolver::new(dir.path(), false);
        let ignorer = IgnoreMatcher::empty(dir.path());

        let err = resolver
            .resolve(&["src/[".to_string()], &ignorer)
            .unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_normalize() {
        assert_eq!(
            normalize(Path::new("/project/./src/../lib/a.css")),
            PathBuf::from("/project/lib/a.css")
        );
    }
}
