//! SARIF (Static Analysis Results Interchange Format) output formatter.
//!
//! Implements SARIF 2.1.0 format for integration with GitHub Advanced Security
//! and other CI/CD tools.

use serde::Serialize;
use std::collections::HashSet;

use stylelint_types::{LintResult, Severity, Warning};

use super::strip_rule_suffix;

/// SARIF version constant
const SARIF_VERSION: &str = "2.1.0";

/// Tool information for SARIF
const TOOL_NAME: &str = "stylelint";

/// Generates SARIF output from lint results
pub fn format_sarif(results: &[LintResult]) -> String {
    let sarif_log = SarifLog::from_results(results);
    serde_json::to_string_pretty(&sarif_log).unwrap_or_default()
}

/// Root SARIF log structure
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLog {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<Run>,
}

impl SarifLog {
    fn from_results(results: &[LintResult]) -> Self {
        Self {
            schema: "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json".to_string(),
            version: SARIF_VERSION.to_string(),
            runs: vec![Run::from_results(results)],
        }
    }
}

/// A single run of the tool
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Run {
    tool: Tool,
    results: Vec<SarifResult>,
}

impl Run {
    fn from_results(lint_results: &[LintResult]) -> Self {
        let mut results = Vec::new();
        let mut rules = Vec::new();
        let mut seen_rules = HashSet::new();

        for lint_result in lint_results {
            for warning in &lint_result.warnings {
                results.push(SarifResult::from_warning(warning, &lint_result.source));

                // Rules are listed in first-seen order
                if seen_rules.insert(warning.rule.as_str()) {
                    rules.push(ReportingDescriptor::new(&warning.rule));
                }
            }
        }

        Self {
            tool: Tool {
                driver: ToolComponent {
                    name: TOOL_NAME.to_string(),
                    version: option_env!("CARGO_PKG_VERSION").map(|s| s.to_string()),
                    rules,
                },
            },
            results,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Tool {
    driver: ToolComponent,
}

/// Tool component (driver)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolComponent {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    rules: Vec<ReportingDescriptor>,
}

/// Rule descriptor
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportingDescriptor {
    id: String,
    name: String,
}

impl ReportingDescriptor {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Message {
    text: String,
}

/// A single result (warning)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult {
    rule_id: String,
    level: String,
    message: Message,
    locations: Vec<Location>,
}

impl SarifResult {
    fn from_warning(warning: &Warning, source: &str) -> Self {
        let level = match warning.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };

        Self {
            rule_id: warning.rule.clone(),
            level: level.to_string(),
            message: Message {
                text: strip_rule_suffix(&warning.text, &warning.rule).to_string(),
            },
            locations: vec![Location {
                physical_location: PhysicalLocation {
                    artifact_location: ArtifactLocation {
                        uri: source.to_string(),
                    },
                    region: Region {
                        start_line: warning.line,
                        start_column: warning.column,
                    },
                },
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Location {
    physical_location: PhysicalLocation,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct PhysicalLocation {
    artifact_location: ArtifactLocation,
    region: Region,
}

/// Artifact location (file path)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ArtifactLocation {
    uri: String,
}

/// Region (line/column information, both 1-based as in SARIF)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct Region {
    start_line: u32,
    start_column: u32,
}
