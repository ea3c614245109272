//! # stylelint_types
//!
//! Value types shared between the cache and the standalone orchestrator.
//!
//! Everything here is plain data: warnings produced by the lint engine,
//! per-source results, and the disable-comment ranges the engine discovered.
//! Enable the `rkyv` feature to store these types in the persistent cache.

mod disable;
mod result;
mod warning;

pub use disable::DisableRange;
pub use result::LintResult;
pub use warning::{Deprecation, InvalidOptionWarning, ParseError, Severity, Warning};

/// Source label used when a syntax failure carries no file name.
pub const PLACEHOLDER_SOURCE: &str = "<input css 1>";
