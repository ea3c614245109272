//! Detection of disable comments that suppressed nothing.

use serde::Serialize;
use stylelint_types::{DisableRange, LintResult, Warning};

/// A disable range and whether it was needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeedlessDisableRange {
    pub rule: String,
    pub start: u32,
    /// `None` when the range runs to the end of the source.
    pub end: Option<u32>,
    /// True when no warning for the rule fell inside the range.
    pub unused: bool,
}

/// All disable ranges of one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NeedlessDisableReport {
    pub source: String,
    pub ranges: Vec<NeedlessDisableRange>,
}

/// Cross-references each source's disable ranges against its warnings.
///
/// Both reported warnings and the ones the engine suppressed count. Sources
/// without disable ranges are left out.
pub fn needless_disables(results: &[LintResult]) -> Vec<NeedlessDisableReport> {
    results
        .iter()
        .filter(|result| !result.disabled_ranges.is_empty())
        .map(|result| {
            let warnings: Vec<&Warning> = result
                .warnings
                .iter()
                .chain(&result.disabled_warnings)
                .collect();

            NeedlessDisableReport {
                source: result.source.clone(),
                ranges: result
                    .disabled_ranges
                    .iter()
                    .map(|range| check_range(range, &warnings))
                    .collect(),
            }
        })
        .collect()
}

fn check_range(range: &DisableRange, warnings: &[&Warning]) -> NeedlessDisableRange {
    NeedlessDisableRange {
        rule: range.rule.clone(),
        start: range.start,
        end: range.end,
        unused: !warnings.iter().any(|warning| range.covers(warning)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn result_with(ranges: Vec<DisableRange>, warnings: Vec<Warning>) -> LintResult {
        LintResult::new("a.css", Vec::new())
            .with_disabled_ranges(ranges)
            .with_disabled_warnings(warnings)
    }

    #[test]
    fn test_sources_without_ranges_are_omitted() {
        let results = vec![LintResult::new("a.css", vec![Warning::new(1, 1, "x", "y")])];
        assert!(needless_disables(&results).is_empty());
    }

    #[test]
    fn test_unmatched_range_is_unused() {
        let results = vec![result_with(
            vec![
                DisableRange::new("color-named", 2, 4),
                DisableRange::open("block-no-empty", 6),
            ],
            vec![Warning::new(3, 10, "color-named", "Named")],
        )];

        assert_eq!(
            needless_disables(&results),
            vec![NeedlessDisableReport {
                source: "a.css".to_string(),
                ranges: vec![
                    NeedlessDisableRange {
                        rule: "color-named".to_string(),
                        start: 2,
                        end: Some(4),
                        unused: false,
                    },
                    NeedlessDisableRange {
                        rule: "block-no-empty".to_string(),
                        start: 6,
                        end: None,
                        unused: true,
                    },
                ],
            }]
        );
    }

    #[rstest]
    #[case::inside("color-named", 3, false)]
    #[case::first_line("color-named", 2, false)]
    #[case::last_line("color-named", 4, false)]
    #[case::before("color-named", 1, true)]
    #[case::after("color-named", 5, true)]
    #[case::other_rule("block-no-empty", 3, true)]
    #[case::different_case("Color-Named", 3, true)]
    fn test_range_matching(#[case] rule: &str, #[case] line: u32, #[case] unused: bool) {
        let results = vec![result_with(
            vec![DisableRange::new("color-named", 2, 4)],
            vec![Warning::new(line, 1, rule, "text")],
        )];

        assert_eq!(needless_disables(&results)[0].ranges[0].unused, unused);
    }

    #[test]
    fn test_columns_do_not_matter() {
        // Same line as a disable-line comment that starts at column 40
        let results = vec![result_with(
            vec![DisableRange::new("color-named", 7, 7)],
            vec![Warning::new(7, 1, "color-named", "Named")],
        )];

        assert!(!needless_disables(&results)[0].ranges[0].unused);
    }

    #[test]
    fn test_all_matches_any_rule() {
        let results = vec![result_with(
            vec![DisableRange::open("all", 1)],
            vec![Warning::new(9, 1, "anything", "text")],
        )];

        assert!(!needless_disables(&results)[0].ranges[0].unused);
    }

    #[test]
    fn test_reported_warnings_count_too() {
        let results = vec![
            LintResult::new("a.css", vec![Warning::new(2, 1, "color-named", "Named")])
                .with_disabled_ranges(vec![DisableRange::new("color-named", 2, 2)]),
        ];

        assert!(!needless_disables(&results)[0].ranges[0].unused);
    }

    #[test]
    fn test_report_json_shape() {
        let report = NeedlessDisableReport {
            source: "a.css".to_string(),
            ranges: vec![NeedlessDisableRange {
                rule: "all".to_string(),
                start: 1,
                end: None,
                unused: true,
            }],
        };

        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({
                "source": "a.css",
                "ranges": [{ "rule": "all", "start": 1, "end": null, "unused": true }]
            })
        );
    }
}
