//! JSON output formatter

use stylelint_types::LintResult;

/// Renders results as a compact JSON array.
pub fn format_json(results: &[LintResult]) -> String {
    serde_json::to_string(results).unwrap_or_else(|_| "[]".to_string())
}
