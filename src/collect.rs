//! Collecting definitions from a source location

use crate::error::{Error, Result};
use crate::extract::{Definition, DefinitionExtractor, Notebook};
use crate::source::{self, SourceFile, SourceKind};
use std::collections::HashSet;
use std::path::Path;

/// Which definitions to keep, by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NameFilter {
    #[default]
    All,
    /// Keep only these names; unknown names are ignored
    Include(HashSet<String>),
    /// Keep everything except these names
    Exclude(HashSet<String>),
}

impl NameFilter {
    /// Build a filter from optional include/exclude lists
    pub fn new(include: Option<Vec<String>>, exclude: Option<Vec<String>>) -> Result<Self> {
        match (include, exclude) {
            (Some(_), Some(_)) => Err(Error::InvalidArgument(
                "must specify at most one of `include` or `exclude`".to_string(),
            )),
            (Some(names), None) => Ok(NameFilter::Include(names.into_iter().collect())),
            (None, Some(names)) => Ok(NameFilter::Exclude(names.into_iter().collect())),
            (None, None) => Ok(NameFilter::All),
        }
    }

    pub fn keeps(&self, name: &str) -> bool {
        match self {
            NameFilter::All => true,
            NameFilter::Include(names) => names.contains(name),
            NameFilter::Exclude(names) => !names.contains(name),
        }
    }
}

/// Options for a collection pass
#[derive(Debug, Clone, Default)]
pub struct CollectOptions {
    /// Glob of files to skip inside a directory
    pub ignore: Option<String>,
    pub filter: NameFilter,
}

impl CollectOptions {
    /// Options from raw include/exclude lists
    pub fn new(
        ignore: Option<String>,
        include: Option<Vec<String>>,
        exclude: Option<Vec<String>>,
    ) -> Result<Self> {
        Ok(Self {
            ignore,
            filter: NameFilter::new(include, exclude)?,
        })
    }
}

/// Reads source locations into definitions
pub struct Collector {
    extractor: DefinitionExtractor,
}

impl Collector {
    pub fn new() -> Result<Self> {
        Ok(Self {
            extractor: DefinitionExtractor::new()?,
        })
    }

    /// Collect the definitions visible at `location`
    ///
    /// Any unreadable or malformed file aborts the whole pass.
    pub fn collect(&mut self, location: &Path, options: &CollectOptions) -> Result<Vec<Definition>> {
        let files = source::resolve(location, options.ignore.as_deref())?;
        if files.is_empty() {
            tracing::warn!(location = %location.display(), "no source files found");
        }

        let mut definitions = Vec::new();
        for file in &files {
            let found = self.collect_file(file)?;
            tracing::debug!(
                path = %file.path.display(),
                count = found.len(),
                "collected definitions"
            );
            definitions.extend(found.into_iter().filter(|d| options.filter.keeps(&d.name)));
        }

        Ok(definitions)
    }

    /// Definitions of one file; a later definition replaces an earlier one of the same name
    fn collect_file(&mut self, file: &SourceFile) -> Result<Vec<Definition>> {
        let blobs = match file.kind {
            SourceKind::Python => vec![std::fs::read_to_string(&file.path)
                .map_err(|e| Error::io(&file.path, e))?],
            SourceKind::Notebook => Notebook::read(&file.path)?
                .code_cells()
                .map(str::to_string)
                .collect(),
        };

        let mut definitions: Vec<Definition> = Vec::new();
        for blob in &blobs {
            let extracted = self.extractor.extract(blob).map_err(|e| Error::Parse {
                path: file.path.clone(),
                line: e.line,
                column: e.column,
            })?;

            for (located, src) in extracted {
                tracing::trace!(
                    path = %file.path.display(),
                    name = %located.name,
                    kind = %located.kind,
                    line = located.span.start_line,
                    "found definition"
                );
                let def = Definition::new(located.name, &file.path, src);
                match definitions.iter_mut().find(|d| d.name == def.name) {
                    Some(existing) => *existing = def,
                    None => definitions.push(def),
                }
            }
        }

        Ok(definitions)
    }
}
