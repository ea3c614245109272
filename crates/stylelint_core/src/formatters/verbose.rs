//! Verbose formatter: the string table plus a summary.

use stylelint_types::{LintResult, Severity};

use super::format_string;

pub fn format_verbose(results: &[LintResult]) -> String {
    let mut output = format_string(results);

    output.push_str(&format!(
        "\n{} {} checked\n",
        results.len(),
        pluralize("source", results.len())
    ));
    for result in results {
        output.push_str(&format!(" {}\n", result.source));
    }

    let warnings: Vec<_> = results.iter().flat_map(|r| &r.warnings).collect();
    output.push_str(&format!(
        "\n{} {} found\n",
        warnings.len(),
        pluralize("problem", warnings.len())
    ));

    for severity in [Severity::Error, Severity::Warning] {
        let rules = count_in_order(
            warnings
                .iter()
                .filter(|w| w.severity == severity)
                .map(|w| w.rule.as_str()),
        );
        if rules.is_empty() {
            continue;
        }

        let total: usize = rules.iter().map(|(_, count)| count).sum();
        output.push_str(&format!(" severity level \"{}\": {}\n", severity, total));
        for (rule, count) in rules {
            output.push_str(&format!("  {}: {}\n", rule, count));
        }
    }

    output
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

/// Counts occurrences, keeping first-seen order.
fn count_in_order<'a>(items: impl Iterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(name, _)| *name == item) {
            Some((_, count)) => *count += 1,
            None => counts.push((item, 1)),
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use stylelint_types::Warning;

    #[test]
    fn test_verbose_clean() {
        let results = vec![LintResult::new("a.css", vec![])];

        assert_eq!(
            format_verbose(&results),
            "\n1 source checked\n a.css\n\n0 problems found\n"
        );
    }

    #[test]
    fn test_verbose_summary_groups_by_severity_and_rule() {
        let results = vec![
            LintResult::new(
                "a.css",
                vec![
                    Warning::new(1, 1, "block-no-empty", "Unexpected empty block"),
                    Warning::new(2, 1, "color-named", "Unexpected named color")
                        .with_severity(Severity::Warning),
                ],
            ),
            LintResult::new(
                "b.css",
                vec![Warning::new(4, 2, "block-no-empty", "Unexpected empty block")],
            ),
        ];

        let output = format_verbose(&results);

        assert!(output.contains("\n2 sources checked\n a.css\n b.css\n"));
        assert!(output.ends_with(
            "\n3 problems found\n severity level \"error\": 2\n  block-no-empty: 2\n severity level \"warning\": 1\n  color-named: 1\n"
        ));
    }
}
