//! CLI argument definitions

use std::path::PathBuf;

use clap::Parser;
use stylelint_core::{FilesOption, StandaloneError, StandaloneOptions};

/// stylelint - lint stylesheets
///
/// Reads from stdin when neither files nor --code are given.
#[derive(Parser, Debug)]
#[command(name = "stylelint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// File globs to lint
    pub files: Vec<String>,

    /// Lint this source string instead of files
    #[arg(long, conflicts_with = "files")]
    pub code: Option<String>,

    /// Label for --code or stdin input
    #[arg(long, value_name = "NAME")]
    pub stdin_filename: Option<String>,

    /// Options file (JSON or JSONC, camelCase keys); flags override it
    #[arg(long, value_name = "PATH")]
    pub options: Option<PathBuf>,

    /// Engine configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base directory for resolving engine configuration
    #[arg(long, value_name = "DIR")]
    pub config_basedir: Option<PathBuf>,

    /// Ignore file (default: .stylelintignore)
    #[arg(short = 'i', long, value_name = "PATH")]
    pub ignore_path: Option<PathBuf>,

    /// Extra ignore pattern, may be repeated
    #[arg(short = 'p', long, value_name = "GLOB")]
    pub ignore_pattern: Vec<String>,

    /// Source syntax (css, scss, less, sass)
    #[arg(short, long)]
    pub syntax: Option<String>,

    /// Custom syntax module
    #[arg(long)]
    pub custom_syntax: Option<String>,

    /// Ignore disable comments
    #[arg(long)]
    pub ignore_disables: bool,

    /// Also lint node_modules and bower_components
    #[arg(long)]
    pub disable_default_ignores: bool,

    /// Skip unchanged files
    #[arg(long)]
    pub cache: bool,

    /// Cache file or directory (default: .stylelintcache)
    #[arg(long, value_name = "PATH")]
    pub cache_location: Option<PathBuf>,

    /// Output format (json, string, verbose, sarif)
    #[arg(short, long)]
    pub formatter: Option<String>,

    /// Report disable comments that suppressed nothing
    #[arg(long)]
    pub report_needless_disables: bool,

    /// Auto-fix problems where possible
    #[arg(long)]
    pub fix: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Builds run options: the options file first, then flags on top.
    pub fn to_options(&self) -> Result<StandaloneOptions, StandaloneError> {
        let mut options = match &self.options {
            Some(path) => StandaloneOptions::from_file(path)?,
            None => StandaloneOptions::default(),
        };

        if !self.files.is_empty() {
            options.files = Some(FilesOption::Many(self.files.clone()));
            options.code = None;
        }
        if let Some(code) = &self.code {
            options.code = Some(code.clone());
            options.files = None;
        }

        set_if_some(&mut options.code_filename, &self.stdin_filename);
        set_if_some(&mut options.config_file, &self.config);
        set_if_some(&mut options.config_basedir, &self.config_basedir);
        set_if_some(&mut options.ignore_path, &self.ignore_path);
        set_if_some(&mut options.syntax, &self.syntax);
        set_if_some(&mut options.custom_syntax, &self.custom_syntax);
        set_if_some(&mut options.cache_location, &self.cache_location);
        if let Some(formatter) = &self.formatter {
            options.formatter = Some(formatter.as_str().into());
        }

        options.ignore_pattern.extend(self.ignore_pattern.iter().cloned());
        options.ignore_disables |= self.ignore_disables;
        options.disable_default_ignores |= self.disable_default_ignores;
        options.cache |= self.cache;
        options.report_needless_disables |= self.report_needless_disables;
        options.fix |= self.fix;

        Ok(options)
    }
}

fn set_if_some<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
    if value.is_some() {
        target.clone_from(value);
    }
}
