//! CLI interface using clap
//!
//! Provides the command-line interface for nbdefs

mod commands;

pub use commands::*;

use crate::merge::MergePolicy;
use clap::Parser;
use std::path::PathBuf;

/// Extract definitions from notebooks.
#[derive(Parser, Debug)]
#[command(name = "nbdefs")]
#[command(author, version, about = "Extract definitions from notebooks.", long_about = None)]
pub struct Cli {
    /// Source file or directory
    #[arg(value_name = "SRC")]
    pub source: PathBuf,

    /// Target file or directory
    #[arg(value_name = "DST")]
    pub destination: PathBuf,

    /// Glob expression of files to ignore
    #[arg(short, long, value_name = "GLOB")]
    pub ignore: Option<String>,

    /// Update only existing definitions
    #[arg(long, conflicts_with = "no_update")]
    pub update: bool,

    /// Overwrite destination file
    #[arg(long)]
    pub no_update: bool,

    /// Names of definitions to include
    #[arg(long, num_args = 1.., value_name = "NAME")]
    pub include: Option<Vec<String>>,

    /// Names of definitions to ignore
    #[arg(long, num_args = 1.., value_name = "NAME")]
    pub exclude: Option<Vec<String>>,

    /// Fail if the destination already exists
    #[arg(long)]
    pub fail_if_exists: bool,

    /// Skip checking that files map to files and directories to directories
    #[arg(long)]
    pub no_check_pathnames: bool,

    /// Configuration file (defaults to ./nbdefs.toml when present)
    #[arg(short, long, env = "NBDEFS_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress the summary line
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Merge policy requested by flags, if any
    pub fn policy(&self) -> Option<MergePolicy> {
        match (self.update, self.no_update) {
            (true, _) => Some(MergePolicy::from_update_flag(Some(true))),
            (_, true) => Some(MergePolicy::from_update_flag(Some(false))),
            _ => None,
        }
    }
}
