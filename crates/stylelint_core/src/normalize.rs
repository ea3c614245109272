//! Conversion of engine outcomes into [`LintResult`]s.

use stylelint_types::{LintResult, PLACEHOLDER_SOURCE, Warning};

use crate::StandaloneError;
use crate::engine::{EngineFailure, EngineOutcome, EngineReport};

/// Builds the result for a source the engine could parse.
pub fn result_from_report(source: impl Into<String>, report: EngineReport) -> LintResult {
    LintResult::new(source, report.warnings)
        .with_parse_errors(report.parse_errors)
        .with_deprecations(report.deprecations)
        .with_invalid_option_warnings(report.invalid_option_warnings)
        .with_disabled_ranges(report.disabled_ranges)
        .with_disabled_warnings(report.disabled_warnings)
}

/// Turns a syntax failure into an errored result with a single warning.
///
/// Any other failure is handed back unchanged as a fatal error.
pub fn normalize_failure(failure: EngineFailure) -> Result<LintResult, StandaloneError> {
    if !failure.is_syntax_error() {
        return Err(StandaloneError::Engine(failure));
    }

    let text = format!("{} ({})", failure.reason, failure.discriminator);
    let warning = Warning::new(failure.line, failure.column, failure.discriminator, text);
    let source = failure
        .file
        .unwrap_or_else(|| PLACEHOLDER_SOURCE.to_string());

    Ok(LintResult::new(source, vec![warning]))
}

/// Normalizes either engine outcome. `label` names successful results.
pub fn normalize_outcome(
    label: impl Into<String>,
    outcome: EngineOutcome,
) -> Result<LintResult, StandaloneError> {
    match outcome {
        Ok(report) => Ok(result_from_report(label, report)),
        Err(failure) => normalize_failure(failure),
    }
}
