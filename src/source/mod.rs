//! Source location resolution
//!
//! This module handles the filesystem side of extraction:
//! - Classifying files as Python source or notebooks
//! - Resolving a location (file or directory) to the files beneath it
//! - Filtering walked files with an ignore glob

mod config;

pub use config::ExportConfig;

use crate::error::{Error, Result};
use globset::{GlobBuilder, GlobMatcher};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

pub const PY_SUFFIX: &str = "py";
pub const NB_SUFFIX: &str = "ipynb";

/// Kind of file definitions can be read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceKind {
    /// Plain Python source
    Python,
    /// Jupyter notebook
    Notebook,
}

impl SourceKind {
    /// Detect source kind from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(PY_SUFFIX) => Some(SourceKind::Python),
            Some(NB_SUFFIX) => Some(SourceKind::Notebook),
            _ => None,
        }
    }

    /// Get file extension for this kind
    pub fn extension(&self) -> &'static str {
        match self {
            SourceKind::Python => PY_SUFFIX,
            SourceKind::Notebook => NB_SUFFIX,
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, ".{}", self.extension())
    }
}

/// A file to read definitions from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub kind: SourceKind,
}

/// Resolve `location` to the source files it holds
///
/// A single file must be `.py` or `.ipynb`. A directory is walked recursively
/// and must hold only one of the two kinds; files matching `ignore` (relative
/// to the directory) are skipped. Files come back in sorted path order.
pub fn resolve(location: &Path, ignore: Option<&str>) -> Result<Vec<SourceFile>> {
    if !location.exists() {
        return Err(Error::NotFound {
            path: location.to_path_buf(),
        });
    }

    if !location.is_dir() {
        let kind = SourceKind::from_path(location).ok_or_else(|| Error::FileSuffix {
            path: location.to_path_buf(),
            suffix: suffix_of(location),
        })?;
        return Ok(vec![SourceFile {
            path: location.to_path_buf(),
            kind,
        }]);
    }

    let matcher = ignore.map(compile_ignore).transpose()?;
    let files = list_files(location, matcher.as_ref())?;

    let kinds: BTreeSet<SourceKind> = files.iter().map(|f| f.kind).collect();
    if kinds.len() > 1 {
        return Err(Error::MixedSuffix {
            root: location.to_path_buf(),
            suffixes: kinds.iter().map(|k| k.to_string()).collect(),
        });
    }

    Ok(files)
}

/// Compile an ignore glob; `*` stops at `/`, nested files need `**`
pub fn compile_ignore(pattern: &str) -> Result<GlobMatcher> {
    let glob = GlobBuilder::new(pattern).literal_separator(true).build()?;
    Ok(glob.compile_matcher())
}

/// Walk `root` for recognized files not matched by `ignore`
fn list_files(root: &Path, ignore: Option<&GlobMatcher>) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();

    for entry in walkdir::WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(kind) = SourceKind::from_path(entry.path()) else {
            continue;
        };

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        if ignore.is_some_and(|m| m.is_match(relative)) {
            tracing::debug!(path = %entry.path().display(), "ignored");
            continue;
        }

        files.push(SourceFile {
            path: entry.path().to_path_buf(),
            kind,
        });
    }

    Ok(files)
}

/// Suffix of a path as written, with its leading dot
fn suffix_of(path: &Path) -> String {
    path.extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}
