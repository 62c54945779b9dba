//! Merging freshly extracted definitions into existing ones
//!
//! Definitions are joined on name only; the file they live in never decides
//! a collision.

use crate::extract::Definition;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// How extracted definitions combine with those already at the destination
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Discard the destination, keep only extracted definitions
    Overwrite,
    /// Keep the destination unchanged, add nothing
    UpdateOnly,
    /// Keep the destination on a name collision, add everything else
    #[default]
    Upsert,
}

impl MergePolicy {
    /// Policy from the `--update` / `--no-update` tri-state
    pub fn from_update_flag(update: Option<bool>) -> Self {
        match update {
            Some(true) => MergePolicy::UpdateOnly,
            Some(false) => MergePolicy::Overwrite,
            None => MergePolicy::Upsert,
        }
    }
}

impl std::fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergePolicy::Overwrite => write!(f, "overwrite"),
            MergePolicy::UpdateOnly => write!(f, "update_only"),
            MergePolicy::Upsert => write!(f, "upsert"),
        }
    }
}

impl std::str::FromStr for MergePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "overwrite" => Ok(MergePolicy::Overwrite),
            "update_only" | "update" => Ok(MergePolicy::UpdateOnly),
            "upsert" => Ok(MergePolicy::Upsert),
            _ => Err(format!(
                "unknown merge policy `{s}` (expected overwrite, update_only or upsert)"
            )),
        }
    }
}

/// Compute the definitions to persist
///
/// `update_only` keeps the destination verbatim: matching source definitions
/// do not replace destination text.
pub fn merge(src: Vec<Definition>, dest: Vec<Definition>, policy: MergePolicy) -> Vec<Definition> {
    match policy {
        MergePolicy::Overwrite => src,
        MergePolicy::UpdateOnly => dest,
        MergePolicy::Upsert => upsert(src, dest),
    }
}

/// Destination first, then source definitions whose name is not yet taken
fn upsert(src: Vec<Definition>, dest: Vec<Definition>) -> Vec<Definition> {
    let mut by_name: BTreeMap<String, Vec<Definition>> = BTreeMap::new();
    for def in dest {
        by_name.entry(def.name.clone()).or_default().push(def);
    }

    let taken: HashSet<String> = by_name.keys().cloned().collect();
    for def in src {
        if taken.contains(&def.name) {
            tracing::debug!(name = %def.name, "kept existing definition");
            continue;
        }
        let entry = by_name.entry(def.name.clone()).or_default();
        if !entry.contains(&def) {
            entry.push(def);
        }
    }

    by_name.into_values().flatten().collect()
}
