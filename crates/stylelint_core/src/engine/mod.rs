//! Lint engine boundary.
//!
//! Parsing and rule evaluation live behind [`LintEngine`]. The runner only
//! dispatches sources to it and handles the two possible outcomes: a report,
//! or a failure carrying a discriminator.

mod builtin;

use thiserror::Error;

use stylelint_types::{Deprecation, DisableRange, InvalidOptionWarning, ParseError, Warning};

use crate::EngineOptions;

pub use builtin::BuiltinEngine;

/// Discriminator of recoverable parse failures.
pub const SYNTAX_ERROR_NAME: &str = "CssSyntaxError";

/// A source handed to the engine.
#[derive(Debug, Clone, Copy)]
pub struct Source<'a> {
    /// Source text.
    pub code: &'a str,
    /// File path or `codeFilename`, if any.
    pub filename: Option<&'a str>,
}

impl<'a> Source<'a> {
    pub fn new(code: &'a str, filename: Option<&'a str>) -> Self {
        Self { code, filename }
    }
}

/// What the engine reports for a source it could parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineReport {
    pub warnings: Vec<Warning>,
    pub parse_errors: Vec<ParseError>,
    pub deprecations: Vec<Deprecation>,
    pub invalid_option_warnings: Vec<InvalidOptionWarning>,
    /// Disable-comment ranges found in the source.
    pub disabled_ranges: Vec<DisableRange>,
    /// Warnings dropped because a disable range covered them.
    pub disabled_warnings: Vec<Warning>,
}

/// A failure raised by the engine.
///
/// `discriminator` names the failure category. Only
/// [`SYNTAX_ERROR_NAME`] is recoverable; everything else aborts the run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{discriminator}: {reason}")]
pub struct EngineFailure {
    pub discriminator: String,
    pub reason: String,
    pub line: u32,
    pub column: u32,
    pub file: Option<String>,
}

impl EngineFailure {
    /// Creates a syntax failure at a 1-based position.
    pub fn syntax(reason: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            discriminator: SYNTAX_ERROR_NAME.to_string(),
            reason: reason.into(),
            line,
            column,
            file: None,
        }
    }

    /// Creates a failure that is not a syntax error.
    pub fn fatal(discriminator: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            discriminator: discriminator.into(),
            reason: reason.into(),
            line: 0,
            column: 0,
            file: None,
        }
    }

    /// Attaches the file label.
    pub fn with_file(mut self, file: Option<impl Into<String>>) -> Self {
        self.file = file.map(Into::into);
        self
    }

    pub fn is_syntax_error(&self) -> bool {
        self.discriminator == SYNTAX_ERROR_NAME
    }
}

pub type EngineOutcome = Result<EngineReport, EngineFailure>;

/// Lints one source.
///
/// Implementations are shared across worker threads.
pub trait LintEngine: Send + Sync {
    fn lint_source(&self, source: &Source<'_>, options: &EngineOptions) -> EngineOutcome;
}

impl<T: LintEngine + ?Sized> LintEngine for &T {
    fn lint_source(&self, source: &Source<'_>, options: &EngineOptions) -> EngineOutcome {
        (**self).lint_source(source, options)
    }
}

impl<T: LintEngine + ?Sized> LintEngine for std::sync::Arc<T> {
    fn lint_source(&self, source: &Source<'_>, options: &EngineOptions) -> EngineOutcome {
        (**self).lint_source(source, options)
    }
}
