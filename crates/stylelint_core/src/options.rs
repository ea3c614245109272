//! Standalone options.
//!
//! [`StandaloneOptions`] mirrors the option record accepted by the
//! standalone entry point. It can be built in code or loaded from a
//! JSON/JSONC file whose keys use the same camelCase names.

use std::fs;
use std::path::{Path, PathBuf};

use jsonc_parser::ParseOptions;
use serde::{Deserialize, Serialize};

use crate::StandaloneError;
use crate::formatters::FormatterOption;

/// `files` accepts either a single glob or a list of globs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilesOption {
    One(String),
    Many(Vec<String>),
}

impl FilesOption {
    /// Returns the glob patterns as a list.
    pub fn patterns(&self) -> Vec<String> {
        match self {
            FilesOption::One(pattern) => vec![pattern.clone()],
            FilesOption::Many(patterns) => patterns.clone(),
        }
    }
}

impl From<&str> for FilesOption {
    fn from(pattern: &str) -> Self {
        FilesOption::One(pattern.to_string())
    }
}

impl From<Vec<String>> for FilesOption {
    fn from(patterns: Vec<String>) -> Self {
        FilesOption::Many(patterns)
    }
}

/// Options for a standalone run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StandaloneOptions {
    /// Where the persistent cache lives. Defaults to `.stylelintcache` under `cwd`.
    pub cache_location: Option<PathBuf>,
    /// Inline source to lint. Mutually exclusive with `files`.
    pub code: Option<String>,
    /// Label for `code` results.
    pub code_filename: Option<String>,
    pub config: Option<serde_json::Value>,
    pub config_basedir: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub config_overrides: Option<serde_json::Value>,
    pub custom_syntax: Option<String>,
    /// Glob patterns to lint. Mutually exclusive with `code`.
    pub files: Option<FilesOption>,
    pub fix: bool,
    pub formatter: Option<FormatterOption>,
    pub ignore_disables: bool,
    /// Ignore file path. Defaults to `.stylelintignore` under `cwd`.
    pub ignore_path: Option<PathBuf>,
    /// Extra ignore globs, applied before the ignore file's patterns.
    pub ignore_pattern: Vec<String>,
    pub disable_default_ignores: bool,
    pub report_needless_disables: bool,
    pub syntax: Option<String>,
    pub cache: bool,
    /// Base directory for globs, the ignore file and the cache location.
    pub cwd: Option<PathBuf>,
}

/// The validated input of a run: exactly one mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Code {
        code: String,
        filename: Option<String>,
    },
    Files(Vec<String>),
}

/// Options forwarded to the lint engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineOptions {
    pub config: Option<serde_json::Value>,
    pub config_basedir: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub config_overrides: Option<serde_json::Value>,
    pub syntax: Option<String>,
    pub custom_syntax: Option<String>,
    pub ignore_disables: bool,
    pub report_needless_disables: bool,
    pub fix: bool,
}

impl EngineOptions {
    /// Hashes everything that can change the engine's output.
    ///
    /// `fix` is left out: fix runs bypass the cache anyway, and the result of
    /// a fix run is a valid cache entry for later runs.
    pub fn hash(&self) -> String {
        let mut keyed = self.clone();
        keyed.fix = false;
        let json = serde_json::to_string(&keyed).unwrap_or_default();
        let input = format!("{}:{}", env!("CARGO_PKG_VERSION"), json);
        blake3::hash(input.as_bytes()).to_hex().to_string()
    }
}

impl StandaloneOptions {
    /// Creates options that lint an inline source string.
    pub fn from_code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Self::default()
        }
    }

    /// Creates options that lint files matching the given globs.
    pub fn from_files(files: impl Into<FilesOption>) -> Self {
        Self {
            files: Some(files.into()),
            ..Self::default()
        }
    }

    /// Loads options from a JSON or JSONC file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StandaloneError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            StandaloneError::config(format!(
                "Failed to read options file {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_json(&content)
    }

    /// Parses options from a JSON or JSONC string.
    pub fn from_json(json: &str) -> Result<Self, StandaloneError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| StandaloneError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or(serde_json::Value::Object(serde_json::Map::new()));

        serde_json::from_value(value)
            .map_err(|e| StandaloneError::config(format!("Invalid options: {}", e)))
    }

    /// Returns the input mode, failing unless exactly one of `code` and
    /// `files` is set. Performs no I/O.
    pub fn input_mode(&self) -> Result<InputMode, StandaloneError> {
        let files = self
            .files
            .as_ref()
            .filter(|files| !matches!(files, FilesOption::One(pattern) if pattern.is_empty()));

        match (files, &self.code) {
            (Some(files), None) => Ok(InputMode::Files(files.patterns())),
            (None, Some(code)) => Ok(InputMode::Code {
                code: code.clone(),
                filename: self.code_filename.clone(),
            }),
            _ => Err(StandaloneError::config(
                "You must pass stylelint a `files` glob or a `code` string, though not both",
            )),
        }
    }

    /// Returns the options the engine needs.
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            config: self.config.clone(),
            config_basedir: self.config_basedir.clone(),
            config_file: self.config_file.clone(),
            config_overrides: self.config_overrides.clone(),
            syntax: self.syntax.clone(),
            custom_syntax: self.custom_syntax.clone(),
            ignore_disables: self.ignore_disables,
            report_needless_disables: self.report_needless_disables,
            fix: self.fix,
        }
    }

    /// Returns the absolute base directory for this run.
    pub fn base_dir(&self) -> Result<PathBuf, StandaloneError> {
        match &self.cwd {
            Some(dir) if dir.is_absolute() => Ok(dir.clone()),
            Some(dir) => Ok(std::env::current_dir()?.join(dir)),
            None => Ok(std::env::current_dir()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_input_mode_code() {
        let mut options = StandaloneOptions::from_code("a {}");
        options.code_filename = Some("inline.css".to_string());

        assert_eq!(
            options.input_mode().unwrap(),
            InputMode::Code {
                code: "a {}".to_string(),
                filename: Some("inline.css".to_string()),
            }
        );
    }

    #[test]
    fn test_input_mode_empty_code_is_valid() {
        let options = StandaloneOptions::from_code("");
        assert!(options.input_mode().is_ok());
    }

    #[test]
    fn test_input_mode_single_file_string() {
        let options = StandaloneOptions::from_files("src/**/*.css");
        assert_eq!(
            options.input_mode().unwrap(),
            InputMode::Files(vec!["src/**/*.css".to_string()])
        );
    }

    #[test]
    fn test_input_mode_neither() {
        let err = StandaloneOptions::default().input_mode().unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_input_mode_both() {
        let mut options = StandaloneOptions::from_files("*.css");
        options.code = Some("a {}".to_string());

        let err = options.input_mode().unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("though not both"));
    }

    #[test]
    fn test_from_json_camel_case_keys() {
        let json = r#"{
            // lint everything under src
            "files": ["src/**/*.css", "lib/**/*.scss"],
            "cache": true,
            "cacheLocation": ".cache/stylelint",
            "reportNeedlessDisables": true,
            "disableDefaultIgnores": true,
            "ignorePattern": ["**/*.min.css"],
            "formatter": "verbose",
        }"#;

        let options = StandaloneOptions::from_json(json).unwrap();

        assert_eq!(
            options.files,
            Some(FilesOption::Many(vec![
                "src/**/*.css".to_string(),
                "lib/**/*.scss".to_string()
            ]))
        );
        assert!(options.cache);
        assert_eq!(options.cache_location, Some(PathBuf::from(".cache/stylelint")));
        assert!(options.report_needless_disables);
        assert!(options.disable_default_ignores);
        assert_eq!(options.ignore_pattern, vec!["**/*.min.css".to_string()]);
        assert!(matches!(options.formatter, Some(FormatterOption::Name(ref n)) if n == "verbose"));
    }

    #[test]
    fn test_from_json_empty_document() {
        let options = StandaloneOptions::from_json("").unwrap();
        assert!(options.files.is_none());
        assert!(!options.cache);
    }

    #[test]
    fn test_empty_files_string_counts_as_missing() {
        let err = StandaloneOptions::from_files("").input_mode().unwrap_err();
        assert!(err.is_config());

        let mut options = StandaloneOptions::from_files("");
        options.code = Some("a {}".to_string());
        assert!(matches!(options.input_mode(), Ok(InputMode::Code { .. })));
    }

    #[test]
    fn test_from_json_rejects_wrong_types() {
        let err = StandaloneOptions::from_json(r#"{"cache": "yes"}"#).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_engine_options_hash_ignores_fix() {
        let mut options = StandaloneOptions::from_files("*.css");
        let plain = options.engine_options().hash();

        options.fix = true;
        assert_eq!(options.engine_options().hash(), plain);

        options.syntax = Some("scss".to_string());
        assert_ne!(options.engine_options().hash(), plain);
    }

    #[test]
    fn test_base_dir_absolute_cwd() {
        let mut options = StandaloneOptions::from_files("*.css");
        let dir = std::env::temp_dir();
        options.cwd = Some(dir.clone());

        assert_eq!(options.base_dir().unwrap(), dir);
    }
}
