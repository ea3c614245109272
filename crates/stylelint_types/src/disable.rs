//! Disable-comment ranges.

use serde::{Deserialize, Serialize};

use crate::Warning;

/// A span of lines over which a rule was disabled by an inline comment.
///
/// `end` is `None` when the range runs to the end of the source
/// (a `stylelint-disable` without a matching `stylelint-enable`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(
    feature = "rkyv",
    derive(rkyv::Archive, rkyv::Serialize, rkyv::Deserialize)
)]
pub struct DisableRange {
    /// Rule name, or [`DisableRange::ALL_RULES`] when every rule is disabled.
    pub rule: String,

    /// First disabled line (1-indexed, inclusive).
    pub start: u32,

    /// Last disabled line (1-indexed, inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<u32>,
}

impl DisableRange {
    /// Rule name used by directives that list no rules.
    pub const ALL_RULES: &'static str = "all";

    /// Creates a closed range.
    pub fn new(rule: impl Into<String>, start: u32, end: u32) -> Self {
        Self {
            rule: rule.into(),
            start,
            end: Some(end),
        }
    }

    /// Creates a range that runs to the end of the source.
    pub fn open(rule: impl Into<String>, start: u32) -> Self {
        Self {
            rule: rule.into(),
            start,
            end: None,
        }
    }

    /// Returns true if `line` falls inside the range.
    pub fn contains_line(&self, line: u32) -> bool {
        line >= self.start && self.end.is_none_or(|end| line <= end)
    }

    /// Returns true if this range targets the given rule.
    ///
    /// Rule names compare exactly; `all` matches every rule.
    pub fn targets(&self, rule: &str) -> bool {
        self.rule == Self::ALL_RULES || self.rule == rule
    }

    /// Returns true if the warning would be suppressed by this range.
    pub fn covers(&self, warning: &Warning) -> bool {
        self.targets(&warning.rule) && self.contains_line(warning.line)
    }
}
