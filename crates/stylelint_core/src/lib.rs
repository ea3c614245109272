//! # stylelint_core
//!
//! Standalone lint orchestration.
//!
//! This crate provides:
//! - Option loading and validation
//! - Input resolution (globs, default excludes, ignore files)
//! - A content-hash cache gate in front of the engine
//! - Parallel dispatch to a [`LintEngine`]
//! - Syntax-failure normalization and needless-disable detection
//! - Output formatters
//!
//! ## Example
//!
//! ```rust,ignore
//! use stylelint_core::{StandaloneOptions, standalone};
//!
//! let mut options = StandaloneOptions::from_files("src/**/*.css");
//! options.cache = true;
//! options.formatter = Some("string".into());
//!
//! let outcome = standalone(&options)?;
//! print!("{}", outcome.output);
//! ```

pub mod cache_gate;
pub mod engine;
mod error;
pub mod file_finder;
pub mod formatters;
pub mod ignore_matcher;
pub mod needless_disables;
pub mod normalize;
mod options;
mod parallel_linter;
mod standalone;

pub use cache_gate::{CacheCheck, CacheGate};
pub use engine::{
    BuiltinEngine, EngineFailure, EngineOutcome, EngineReport, LintEngine, SYNTAX_ERROR_NAME,
    Source,
};
pub use error::StandaloneError;
pub use file_finder::{ALWAYS_IGNORED_GLOBS, InputResolver};
pub use formatters::{BuiltinFormatter, Formatter, FormatterOption};
pub use ignore_matcher::{DEFAULT_IGNORE_FILENAME, IgnoreMatcher};
pub use needless_disables::{NeedlessDisableRange, NeedlessDisableReport, needless_disables};
pub use options::{EngineOptions, FilesOption, InputMode, StandaloneOptions};
pub use parallel_linter::{lint_file, lint_files};
pub use standalone::{Standalone, StandaloneOutcome, standalone};

pub use stylelint_types::{
    Deprecation, DisableRange, InvalidOptionWarning, LintResult, PLACEHOLDER_SOURCE, ParseError,
    Severity, Warning,
};
