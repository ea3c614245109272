//! Warning types produced by the lint engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity level for warnings.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[cfg_attr(
    feature = "rkyv",
    derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - marks the result as errored.
    #[default]
    Error,
    /// Warning - reported but does not fail the run.
    Warning,
}

impl Severity {
    /// Returns the lowercase name used in rendered output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single warning attached to a source.
///
/// Lines and columns are 1-based, exactly as the engine reports them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(
    feature = "rkyv",
    derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)
)]
pub struct Warning {
    /// Line number (1-indexed).
    pub line: u32,

    /// Column number (1-indexed).
    pub column: u32,

    /// Identifier of the rule that produced the warning.
    pub rule: String,

    /// Severity level.
    #[serde(default)]
    pub severity: Severity,

    /// Human readable message.
    pub text: String,
}

impl Warning {
    /// Creates a new error-level warning.
    pub fn new(line: u32, column: u32, rule: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            line,
            column,
            rule: rule.into(),
            severity: Severity::Error,
            text: text.into(),
        }
    }

    /// Sets the severity level.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Returns true if this warning has error severity.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// A non-fatal problem the parser reported while building the syntax tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(
    feature = "rkyv",
    derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)
)]
pub struct ParseError {
    pub line: u32,
    pub column: u32,
    pub text: String,
}

/// A deprecated rule or option that was used by the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(
    feature = "rkyv",
    derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)
)]
pub struct Deprecation {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// A rule option that the engine rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(
    feature = "rkyv",
    derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)
)]
pub struct InvalidOptionWarning {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_new_defaults_to_error() {
        let warning = Warning::new(3, 5, "color-no-invalid-hex", "Unexpected invalid hex color");

        assert_eq!(warning.line, 3);
        assert_eq!(warning.column, 5);
        assert_eq!(warning.severity, Severity::Error);
        assert!(warning.is_error());
    }

    #[test]
    fn test_warning_with_severity() {
        let warning = Warning::new(1, 1, "rule", "msg").with_severity(Severity::Warning);
        assert!(!warning.is_error());
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Warning).unwrap();
        assert_eq!(json, "\"warning\"");

        let parsed: Severity = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(parsed, Severity::Error);
    }

    #[test]
    fn test_warning_deserialize_without_severity() {
        let json = r#"{"line": 2, "column": 4, "rule": "block-no-empty", "text": "Unexpected empty block"}"#;
        let warning: Warning = serde_json::from_str(json).unwrap();

        assert_eq!(warning.severity, Severity::Error);
        assert_eq!(warning.rule, "block-no-empty");
    }

    #[test]
    fn test_deprecation_omits_missing_reference() {
        let deprecation = Deprecation {
            text: "'foo' has been deprecated".to_string(),
            reference: None,
        };
        let json = serde_json::to_string(&deprecation).unwrap();
        assert!(!json.contains("reference"));
    }
}
