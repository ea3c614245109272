//! Lint command implementation

use std::io::{self, Read};

use miette::{IntoDiagnostic, Result};
use stylelint_core::{StandaloneOutcome, standalone};
use tracing::debug;

use crate::cli::Cli;

/// Runs one lint. Returns true if any result is errored.
pub fn run_lint(cli: &Cli) -> Result<bool> {
    let mut options = cli.to_options().into_diagnostic()?;

    if options.files.is_none() && options.code.is_none() {
        debug!("Reading source from stdin");
        let mut code = String::new();
        io::stdin().read_to_string(&mut code).into_diagnostic()?;
        options.code = Some(code);
    }

    let outcome = standalone(&options).into_diagnostic()?;
    print_outcome(&outcome)?;

    Ok(outcome.errored)
}

fn print_outcome(outcome: &StandaloneOutcome) -> Result<()> {
    if !outcome.output.is_empty() {
        print!("{}", outcome.output);
        if !outcome.output.ends_with('\n') {
            println!();
        }
    }

    if let Some(reports) = &outcome.needless_disables {
        println!("{}", serde_json::to_string_pretty(reports).into_diagnostic()?);
    }

    Ok(())
}
