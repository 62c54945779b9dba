//! Exporting extracted definitions to Python files
//!
//! Runs the collector on the source and on the existing destination, merges
//! the two sets and rewrites every destination file that has definitions.

use crate::collect::{CollectOptions, Collector};
use crate::error::{Error, Result};
use crate::extract::Definition;
use crate::merge::{merge, MergePolicy};
use crate::source::PY_SUFFIX;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Options for one export
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub policy: MergePolicy,
    /// Allow an existing destination
    pub exist_ok: bool,
    /// Require file → `.py` file and directory → directory
    pub check_pathnames: bool,
    /// Applied to the source only; the destination is always read whole
    pub collect: CollectOptions,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            policy: MergePolicy::default(),
            exist_ok: true,
            check_pathnames: true,
            collect: CollectOptions::default(),
        }
    }
}

/// Outcome of an export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Files written, in path order
    pub written: Vec<PathBuf>,
    /// Definitions persisted across all files
    pub definitions: usize,
}

/// Export definitions found at `src` into `dest`
pub fn export(src: &Path, dest: &Path, options: &ExportOptions) -> Result<ExportSummary> {
    let src_is_file = src.is_file();

    if options.check_pathnames && src_is_file != dest.extension().is_some() {
        return Err(Error::PathName {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
            kind: if src_is_file { "file" } else { "directory" },
            suffix: dest
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_default(),
        });
    }

    if dest.exists() && !options.exist_ok {
        return Err(Error::Exists {
            path: dest.to_path_buf(),
        });
    }

    let mut collector = Collector::new()?;
    // Extract before touching anything so a bad source leaves no trace
    let src_defs = collector.collect(src, &options.collect)?;

    prepare_destination(dest, src_is_file)?;
    let dest_defs = collector.collect(dest, &CollectOptions::default())?;

    let src_defs = src_defs
        .into_iter()
        .map(|def| {
            let target = target_path(src, dest, &def.path);
            def.with_path(&target)
        })
        .collect();

    let merged = merge(src_defs, dest_defs, options.policy);
    tracing::debug!(policy = %options.policy, count = merged.len(), "merged definitions");

    write_grouped(merged)
}

/// Touch the destination file or create the destination directory tree
fn prepare_destination(dest: &Path, src_is_file: bool) -> Result<()> {
    if !src_is_file {
        return std::fs::create_dir_all(dest).map_err(|e| Error::io(dest, e));
    }

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dest)
        .map(drop)
        .map_err(|e| Error::io(dest, e))
}

/// Destination file mirroring `path` under `src`
///
/// A single source file maps to `dest` itself; a file inside a source
/// directory maps to the same relative path under `dest` with a `.py` suffix.
fn target_path(src: &Path, dest: &Path, path: &Path) -> PathBuf {
    match path.strip_prefix(src) {
        Ok(relative) if !relative.as_os_str().is_empty() => {
            dest.join(relative).with_extension(PY_SUFFIX)
        }
        _ => dest.to_path_buf(),
    }
}

/// Write each file's definitions sorted by text, separated by a blank line
fn write_grouped(definitions: Vec<Definition>) -> Result<ExportSummary> {
    let mut by_path: BTreeMap<PathBuf, Vec<String>> = BTreeMap::new();
    for def in definitions {
        by_path.entry(def.path).or_default().push(def.src);
    }

    let mut summary = ExportSummary::default();
    for (path, mut sources) in by_path {
        sources.sort();
        sources.dedup();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        std::fs::write(&path, sources.join("\n\n")).map_err(|e| Error::io(&path, e))?;

        tracing::info!(path = %path.display(), count = sources.len(), "wrote definitions");
        summary.definitions += sources.len();
        summary.written.push(path);
    }

    Ok(summary)
}
