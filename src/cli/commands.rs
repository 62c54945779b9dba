//! Command implementations

use super::Cli;
use crate::collect::CollectOptions;
use crate::export::{export, ExportOptions, ExportSummary};
use crate::source::ExportConfig;
use anyhow::{Context, Result};
use std::path::Path;

/// Resolve the configuration file and flags into export options
pub fn export_options(cli: &Cli, cwd: &Path) -> Result<ExportOptions> {
    let config = match cli.config {
        Some(ref path) => ExportConfig::load(path)?,
        None => ExportConfig::load_or_default(cwd)?,
    };

    let collect = CollectOptions::new(
        cli.ignore.clone().or(config.ignore),
        cli.include.clone(),
        cli.exclude.clone(),
    )?;

    Ok(ExportOptions {
        policy: cli.policy().or(config.policy).unwrap_or_default(),
        exist_ok: config.exist_ok && !cli.fail_if_exists,
        check_pathnames: config.check_pathnames && !cli.no_check_pathnames,
        collect,
    })
}

/// Export definitions as requested on the command line
pub fn run(cli: &Cli) -> Result<ExportSummary> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let options = export_options(cli, &cwd)?;

    tracing::debug!(
        src = %cli.source.display(),
        dest = %cli.destination.display(),
        policy = %options.policy,
        "exporting"
    );

    let summary = export(&cli.source, &cli.destination, &options)?;
    Ok(summary)
}

/// Print a one-line summary of an export
pub fn print_summary(summary: &ExportSummary) {
    println!(
        "✓ Exported {} definition(s) to {} file(s)",
        summary.definitions,
        summary.written.len()
    );
}
