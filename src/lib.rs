//! Source-control status diff over content-addressed trees
//!
//! `sift` compares two snapshots of an immutable, content-addressed
//! directory tree and reports, per path, whether a file was added, removed,
//! or modified, and whether an untracked addition is hidden by gitignore
//! rules. It is the comparison engine behind a virtual filesystem that
//! presents a working-copy view over lazily materialized tree objects:
//! trees are fetched on demand through an async [`ObjectSource`], many
//! fetches are kept in flight at once, and a load failure inside one
//! subtree never aborts the rest of the diff.
//!
//! The main entry point is [`diff_commits`], which resolves two commit ids
//! to their root trees and walks both trees concurrently:
//!
//! ```ignore
//! let status = diff_commits(&source, &old_commit, &new_commit, DiffOptions::default()).await?;
//! for (path, state) in &status.entries {
//!     println!("{state:?} {path}");
//! }
//! ```

pub mod areas;
pub mod artifacts;

pub use areas::callback::{DiffCallback, StatusCollector};
pub use areas::context::{DiffContext, GitignoreLoader};
pub use areas::source::{LoadError, MemoryObjectSource, ObjectSource};
pub use artifacts::core::relative_path::RelativePath;
pub use artifacts::diff::{
    diff_added_tree, diff_commits, diff_removed_tree, diff_trees, DiffError, DiffOptions,
};
pub use artifacts::ignore::{IgnoreMatcher, IgnoreStack, MatchResult};
pub use artifacts::objects::object_id::ObjectId;
pub use artifacts::objects::tree::{EntryKind, Tree, TreeEntry};
pub use artifacts::status::{FileStatus, Status, StatusEntry};
