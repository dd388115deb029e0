//! Diff status aggregation
//!
//! The result of a diff run: per-path change states plus the load errors
//! collected along the way. Orderings are irrelevant to correctness; the
//! maps are sorted only so output is stable.

use crate::artifacts::core::relative_path::RelativePath;
use derive_new::new;
use std::collections::BTreeMap;

/// Per-path change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// Present only in the new tree.
    Added,
    /// Present only in the old tree. Reported even when ignore rules
    /// match: the path was tracked before.
    Removed,
    /// Present in both trees with different kind or contents.
    Modified,
    /// Would be `Added`, but an ignore rule hides it.
    Ignored,
}

/// A single path/state pairing, as accumulated in [`Status::entries`].
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct StatusEntry {
    pub path: RelativePath,
    pub status: FileStatus,
}

/// Aggregated outcome of a diff run.
///
/// `errors` maps the subtree path at which a tree load failed to the
/// loader's message. A run with errors still carries every entry that
/// could be diffed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    pub entries: BTreeMap<String, FileStatus>,
    pub errors: BTreeMap<String, String>,
}

impl Status {
    /// True when the diff found no changes and hit no load errors.
    pub fn is_clean(&self) -> bool {
        self.entries.is_empty() && self.errors.is_empty()
    }

    /// The entries as owned path/state pairs.
    pub fn status_entries(&self) -> impl Iterator<Item = StatusEntry> + '_ {
        self.entries
            .iter()
            .map(|(path, status)| StatusEntry::new(RelativePath::from(path.as_str()), *status))
    }
}
