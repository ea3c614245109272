//! Output formatters.
//!
//! A formatter is a pure function from the ordered result list to text.
//! Callers select one by name from a closed set of built-ins, or pass their
//! own function.

mod json;
mod sarif;
mod string;
mod verbose;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer};
use stylelint_types::LintResult;

use crate::StandaloneError;

pub use json::format_json;
pub use sarif::format_sarif;
pub use string::format_string;
pub use verbose::format_verbose;

/// Signature of a caller-supplied formatter.
pub type FormatterFn = dyn Fn(&[LintResult]) -> String + Send + Sync;

/// The `formatter` option: a registry name or a function.
#[derive(Clone)]
pub enum FormatterOption {
    Name(String),
    Custom(Arc<FormatterFn>),
}

impl FormatterOption {
    /// Wraps a function as a custom formatter.
    pub fn custom(render: impl Fn(&[LintResult]) -> String + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(render))
    }
}

impl fmt::Debug for FormatterOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatterOption::Name(name) => f.debug_tuple("Name").field(name).finish(),
            FormatterOption::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<&str> for FormatterOption {
    fn from(name: &str) -> Self {
        FormatterOption::Name(name.to_string())
    }
}

// Only names can come from a file; functions are set in code.
impl<'de> Deserialize<'de> for FormatterOption {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(FormatterOption::Name)
    }
}

/// Formatters shipped with the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinFormatter {
    Json,
    String,
    Verbose,
    Sarif,
}

impl BuiltinFormatter {
    pub const ALL: [BuiltinFormatter; 4] = [
        BuiltinFormatter::Json,
        BuiltinFormatter::String,
        BuiltinFormatter::Verbose,
        BuiltinFormatter::Sarif,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BuiltinFormatter::Json => "json",
            BuiltinFormatter::String => "string",
            BuiltinFormatter::Verbose => "verbose",
            BuiltinFormatter::Sarif => "sarif",
        }
    }

    /// Looks up a formatter by its registry name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|formatter| formatter.name() == name)
    }

    pub fn render(&self, results: &[LintResult]) -> String {
        match self {
            BuiltinFormatter::Json => format_json(results),
            BuiltinFormatter::String => format_string(results),
            BuiltinFormatter::Verbose => format_verbose(results),
            BuiltinFormatter::Sarif => format_sarif(results),
        }
    }
}

/// A resolved formatter, ready to render.
#[derive(Clone)]
pub enum Formatter {
    Builtin(BuiltinFormatter),
    Custom(Arc<FormatterFn>),
}

impl Formatter {
    /// Resolves the `formatter` option. No option means `json`.
    pub fn resolve(option: Option<&FormatterOption>) -> Result<Self, StandaloneError> {
        match option {
            None => Ok(Formatter::Builtin(BuiltinFormatter::Json)),
            Some(FormatterOption::Custom(render)) => Ok(Formatter::Custom(Arc::clone(render))),
            Some(FormatterOption::Name(name)) => BuiltinFormatter::from_name(name)
                .map(Formatter::Builtin)
                .ok_or_else(|| {
                    let names: Vec<String> = BuiltinFormatter::ALL
                        .iter()
                        .map(|formatter| format!("'{}'", formatter.name()))
                        .collect();
                    StandaloneError::config(format!(
                        "You must use a valid formatter option: {}, or a function",
                        names.join(", ")
                    ))
                }),
        }
    }

    pub fn render(&self, results: &[LintResult]) -> String {
        match self {
            Formatter::Builtin(builtin) => builtin.render(results),
            Formatter::Custom(render) => render(results),
        }
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formatter::Builtin(builtin) => f.debug_tuple("Builtin").field(builtin).finish(),
            Formatter::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Removes a trailing ` (rule)` from a warning text.
pub(crate) fn strip_rule_suffix<'a>(text: &'a str, rule: &str) -> &'a str {
    text.strip_suffix(')')
        .and_then(|rest| rest.strip_suffix(rule))
        .and_then(|rest| rest.strip_suffix(" ("))
        .unwrap_or(text)
}
