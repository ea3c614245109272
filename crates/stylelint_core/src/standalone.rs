//! The standalone entry point.

use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use stylelint_cache::{CacheManager, DEFAULT_CACHE_FILE};
use stylelint_types::{LintResult, PLACEHOLDER_SOURCE};
use tracing::{debug, info};

use crate::cache_gate::CacheGate;
use crate::engine::{BuiltinEngine, LintEngine, Source};
use crate::file_finder::InputResolver;
use crate::formatters::Formatter;
use crate::ignore_matcher::IgnoreMatcher;
use crate::needless_disables::{NeedlessDisableReport, needless_disables};
use crate::normalize::normalize_outcome;
use crate::options::{InputMode, StandaloneOptions};
use crate::parallel_linter::lint_files;
use crate::{EngineOptions, StandaloneError};

/// Everything a run produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandaloneOutcome {
    /// True if any result is errored.
    pub errored: bool,
    /// Formatter output.
    pub output: String,
    /// One result per input, in input order.
    pub results: Vec<LintResult>,
    /// Present only when `reportNeedlessDisables` was set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub needless_disables: Option<Vec<NeedlessDisableReport>>,
}

impl StandaloneOutcome {
    fn aggregate(results: Vec<LintResult>, formatter: &Formatter, report_needless: bool) -> Self {
        let errored = results
            .iter()
            .any(|result| result.errored || !result.parse_errors.is_empty());
        let needless_disables = report_needless.then(|| needless_disables(&results));

        Self {
            errored,
            output: formatter.render(&results),
            results,
            needless_disables,
        }
    }
}

/// Runs lints through an engine.
///
/// ```rust,ignore
/// use stylelint_core::{BuiltinEngine, Standalone, StandaloneOptions};
///
/// let outcome = Standalone::new(BuiltinEngine::new())
///     .run(&StandaloneOptions::from_files("src/**/*.css"))?;
/// println!("{}", outcome.output);
/// ```
pub struct Standalone<E> {
    engine: E,
}

impl<E: LintEngine> Standalone<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Lints `code` or `files`, whichever the options carry.
    ///
    /// Options and the formatter are validated before anything is read.
    pub fn run(&self, options: &StandaloneOptions) -> Result<StandaloneOutcome, StandaloneError> {
        let start = Instant::now();

        let input = options.input_mode()?;
        let formatter = Formatter::resolve(options.formatter.as_ref())?;
        let engine_options = options.engine_options();

        let results = match input {
            InputMode::Code { code, filename } => {
                vec![self.lint_code(&code, filename.as_deref(), &engine_options)?]
            }
            InputMode::Files(patterns) => self.lint_patterns(&patterns, options, &engine_options)?,
        };

        let outcome =
            StandaloneOutcome::aggregate(results, &formatter, options.report_needless_disables);

        debug!("Linting complete in {}ms", start.elapsed().as_millis());
        Ok(outcome)
    }

    /// Lints an inline source. Never cached.
    fn lint_code(
        &self,
        code: &str,
        filename: Option<&str>,
        options: &EngineOptions,
    ) -> Result<LintResult, StandaloneError> {
        let outcome = self.engine.lint_source(&Source::new(code, filename), options);
        normalize_outcome(filename.unwrap_or(PLACEHOLDER_SOURCE), outcome)
    }

    fn lint_patterns(
        &self,
        patterns: &[String],
        options: &StandaloneOptions,
        engine_options: &EngineOptions,
    ) -> Result<Vec<LintResult>, StandaloneError> {
        let base_dir = options.base_dir()?;

        let ignorer = IgnoreMatcher::load(
            &base_dir,
            options.ignore_path.as_deref(),
            &options.ignore_pattern,
        )?;
        let paths = InputResolver::new(&base_dir, options.disable_default_ignores)
            .resolve(patterns, &ignorer)?;

        let cache = if options.cache {
            let location = options
                .cache_location
                .as_deref()
                .unwrap_or(Path::new(DEFAULT_CACHE_FILE));
            let cache_file = CacheManager::resolve_location(location, &base_dir);
            info!("Using cache {}", cache_file.display());
            CacheGate::open(cache_file, engine_options.hash(), options.fix)
        } else {
            CacheGate::disabled()
        };

        lint_files(&self.engine, &paths, engine_options, &cache)
    }
}

/// Runs with the built-in engine.
pub fn standalone(options: &StandaloneOptions) -> Result<StandaloneOutcome, StandaloneError> {
    Standalone::new(BuiltinEngine::new()).run(options)
}
