//! nbdefs - Extract definitions from notebooks
//!
//! Copies the top-level functions and classes of notebooks (or Python files)
//! into standalone Python source files.

use anyhow::Result;
use nbdefs::cli::{print_summary, run, Cli};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let summary = run(&cli)?;

    if !cli.quiet {
        print_summary(&summary);
    }

    Ok(())
}
