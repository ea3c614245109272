//! Human readable table formatter.

use std::collections::HashSet;

use stylelint_types::{LintResult, Severity, Warning};

use super::strip_rule_suffix;

/// Renders invalid-option warnings and deprecations once each, then one
/// table per source that has warnings.
pub fn format_string(results: &[LintResult]) -> String {
    let mut output = String::new();

    let mut seen = HashSet::new();
    for warning in results.iter().flat_map(|r| &r.invalid_option_warnings) {
        if seen.insert(warning.text.as_str()) {
            output.push_str(&format!("Invalid Option: {}\n", warning.text));
        }
    }

    let mut seen = HashSet::new();
    for deprecation in results.iter().flat_map(|r| &r.deprecations) {
        if !seen.insert(deprecation.text.as_str()) {
            continue;
        }
        match &deprecation.reference {
            Some(reference) => output.push_str(&format!(
                "Deprecation Warning: {} See: {}\n",
                deprecation.text, reference
            )),
            None => output.push_str(&format!("Deprecation Warning: {}\n", deprecation.text)),
        }
    }

    for result in results {
        output.push_str(&format_source(result));
    }

    output
}

fn format_source(result: &LintResult) -> String {
    if result.warnings.is_empty() {
        return String::new();
    }

    let mut warnings: Vec<&Warning> = result.warnings.iter().collect();
    warnings.sort_by_key(|w| (w.line, w.column));

    let positions: Vec<String> = warnings
        .iter()
        .map(|w| format!("{}:{}", w.line, w.column))
        .collect();
    let width = positions.iter().map(String::len).max().unwrap_or(0);

    let mut output = format!("\n{}\n", result.source);
    for (warning, position) in warnings.iter().zip(&positions) {
        let symbol = match warning.severity {
            Severity::Error => "✖",
            Severity::Warning => "⚠",
        };
        output.push_str(&format!(
            " {:>width$}  {}  {}  {}\n",
            position,
            symbol,
            strip_rule_suffix(&warning.text, &warning.rule),
            warning.rule,
            width = width
        ));
    }

    output
}
