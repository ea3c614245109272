//! Lint result types.

use serde::{Deserialize, Serialize};

use crate::{Deprecation, DisableRange, InvalidOptionWarning, ParseError, Warning};

/// Result of linting a single source.
///
/// `errored` is true iff any warning has error severity or `parse_errors`
/// is non-empty. The constructors and `with_*` builders keep it in sync;
/// code that mutates the public fields directly must call
/// [`LintResult::refresh_errored`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(
    feature = "rkyv",
    derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)
)]
#[serde(rename_all = "camelCase")]
pub struct LintResult {
    /// Source label: file path, `codeFilename`, or a placeholder.
    pub source: String,

    #[serde(default)]
    pub deprecations: Vec<Deprecation>,

    #[serde(default)]
    pub invalid_option_warnings: Vec<InvalidOptionWarning>,

    #[serde(default)]
    pub parse_errors: Vec<ParseError>,

    pub errored: bool,

    /// Warnings in the order the engine produced them.
    #[serde(default)]
    pub warnings: Vec<Warning>,

    /// Disable-comment ranges discovered in the source.
    #[serde(skip)]
    pub disabled_ranges: Vec<DisableRange>,

    /// Warnings the engine dropped because a disable range covered them.
    #[serde(skip)]
    pub disabled_warnings: Vec<Warning>,
}

impl LintResult {
    /// Creates a new lint result.
    pub fn new(source: impl Into<String>, warnings: Vec<Warning>) -> Self {
        let mut result = Self {
            source: source.into(),
            deprecations: Vec::new(),
            invalid_option_warnings: Vec::new(),
            parse_errors: Vec::new(),
            errored: false,
            warnings,
            disabled_ranges: Vec::new(),
            disabled_warnings: Vec::new(),
        };
        result.refresh_errored();
        result
    }

    pub fn with_parse_errors(mut self, parse_errors: Vec<ParseError>) -> Self {
        self.parse_errors = parse_errors;
        self.refresh_errored();
        self
    }

    pub fn with_deprecations(mut self, deprecations: Vec<Deprecation>) -> Self {
        self.deprecations = deprecations;
        self
    }

    pub fn with_invalid_option_warnings(mut self, warnings: Vec<InvalidOptionWarning>) -> Self {
        self.invalid_option_warnings = warnings;
        self
    }

    pub fn with_disabled_ranges(mut self, ranges: Vec<DisableRange>) -> Self {
        self.disabled_ranges = ranges;
        self
    }

    pub fn with_disabled_warnings(mut self, warnings: Vec<Warning>) -> Self {
        self.disabled_warnings = warnings;
        self
    }

    /// Recomputes `errored` from the warnings and parse errors.
    pub fn refresh_errored(&mut self) {
        self.errored =
            !self.parse_errors.is_empty() || self.warnings.iter().any(Warning::is_error);
    }

    /// Returns the number of error-severity warnings.
    pub fn error_count(&self) -> usize {
        self.warnings.iter().filter(|w| w.is_error()).count()
    }

    /// Returns the number of warning-severity warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len() - self.error_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Severity;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lint_result_new_without_warnings() {
        let result = LintResult::new("a.css", vec![]);
        assert!(!result.errored);
        assert_eq!(result.error_count(), 0);
    }

    #[test]
    fn test_lint_result_errored_on_error_warning() {
        let result = LintResult::new("a.css", vec![Warning::new(1, 1, "rule", "msg")]);
        assert!(result.errored);
    }

    #[test]
    fn test_lint_result_not_errored_on_plain_warning() {
        let result = LintResult::new(
            "a.css",
            vec![Warning::new(1, 1, "rule", "msg").with_severity(Severity::Warning)],
        );
        assert!(!result.errored);
        assert_eq!(result.warning_count(), 1);
    }

    #[test]
    fn test_lint_result_errored_on_parse_error() {
        let result = LintResult::new("a.css", vec![]).with_parse_errors(vec![ParseError {
            line: 1,
            column: 2,
            text: "Unknown word".to_string(),
        }]);
        assert!(result.errored);
    }

    #[test]
    fn test_refresh_errored_after_mutation() {
        let mut result = LintResult::new("a.css", vec![Warning::new(1, 1, "rule", "msg")]);
        result.warnings.clear();
        result.refresh_errored();
        assert!(!result.errored);
    }

    #[test]
    fn test_lint_result_json_shape() {
        let result = LintResult::new("a.css", vec![])
            .with_disabled_ranges(vec![DisableRange::new("all", 1, 2)]);
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "source": "a.css",
                "deprecations": [],
                "invalidOptionWarnings": [],
                "parseErrors": [],
                "errored": false,
                "warnings": []
            })
        );
    }
}
