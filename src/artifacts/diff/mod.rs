//! Tree diffing
//!
//! This module implements the status diff between two snapshots of a
//! content-addressed tree:
//!
//! - `engine`: the recursive two-tree walk (`diff_trees`,
//!   `diff_added_tree`, `diff_removed_tree`)
//! - [`diff_commits`]: the top-level driver resolving commit ids and
//!   collecting the result into a [`Status`]
//!
//! The engine compares entries by `(kind, id)` only; blob contents are
//! never fetched.

pub mod engine;

pub use engine::{diff_added_tree, diff_removed_tree, diff_trees};

use crate::areas::callback::StatusCollector;
use crate::areas::context::{DiffContext, GitignoreLoader};
use crate::areas::source::ObjectSource;
use crate::artifacts::core::relative_path::RelativePath;
use crate::artifacts::ignore::IgnoreStack;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::Status;
use bytes::Bytes;
use futures::future;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

/// Fatal failure of a [`diff_commits`] run.
///
/// Everything that can go wrong below the commit roots is localized
/// instead and ends up in [`Status::errors`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiffError {
    #[error("commit {0} not found")]
    CommitNotFound(ObjectId),
}

/// Configuration for a [`diff_commits`] run.
///
/// The defaults list ignored paths, carry no user or system ignore
/// rules, treat every directory as having no ignore file, and suppress
/// the usual administrative directory names.
pub struct DiffOptions {
    list_ignored: bool,
    user_ignore_contents: Bytes,
    system_ignore_contents: Bytes,
    load_gitignore: Option<GitignoreLoader>,
    suppressed_admin_names: BTreeSet<String>,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            list_ignored: true,
            user_ignore_contents: Bytes::new(),
            system_ignore_contents: Bytes::new(),
            load_gitignore: None,
            suppressed_admin_names: [".hg", ".eden"].iter().map(ToString::to_string).collect(),
        }
    }
}

impl DiffOptions {
    /// Suppress IGNORED events entirely when `false`.
    pub fn with_list_ignored(mut self, list_ignored: bool) -> Self {
        self.list_ignored = list_ignored;
        self
    }

    /// Raw contents of the user-level ignore file.
    pub fn with_user_ignore(mut self, contents: impl Into<Bytes>) -> Self {
        self.user_ignore_contents = contents.into();
        self
    }

    /// Raw contents of the system-level ignore file.
    pub fn with_system_ignore(mut self, contents: impl Into<Bytes>) -> Self {
        self.system_ignore_contents = contents.into();
        self
    }

    /// Hook returning per-directory ignore-file contents.
    pub fn with_gitignore_loader(mut self, loader: GitignoreLoader) -> Self {
        self.load_gitignore = Some(loader);
        self
    }

    /// Directory names to omit from ADDED/IGNORED reporting.
    pub fn with_suppressed_admin_names(mut self, names: BTreeSet<String>) -> Self {
        self.suppressed_admin_names = names;
        self
    }
}

/// Diff the trees of two commits and collect the resulting status.
///
/// Both commit ids are resolved to root trees up front; failure of either
/// resolution aborts the run with [`DiffError::CommitNotFound`] and no
/// partial status. Tree load failures below the roots never abort: they
/// are recorded in [`Status::errors`] under the failing subtree's path
/// while sibling subtrees continue diffing.
pub async fn diff_commits(
    source: &dyn ObjectSource,
    old_commit: &ObjectId,
    new_commit: &ObjectId,
    options: DiffOptions,
) -> Result<Status, DiffError> {
    let DiffOptions {
        list_ignored,
        user_ignore_contents,
        system_ignore_contents,
        load_gitignore,
        suppressed_admin_names,
    } = options;

    let (old_root, new_root) = future::join(
        source.get_commit_root(old_commit),
        source.get_commit_root(new_commit),
    )
    .await;
    let old_root = old_root.map_err(|error| {
        debug!(commit = %old_commit, %error, "commit resolution failed");
        DiffError::CommitNotFound(*old_commit)
    })?;
    let new_root = new_root.map_err(|error| {
        debug!(commit = %new_commit, %error, "commit resolution failed");
        DiffError::CommitNotFound(*new_commit)
    })?;

    let collector = StatusCollector::new();
    let root_stack = IgnoreStack::top_level(&user_ignore_contents, &system_ignore_contents);

    let mut context = DiffContext::new(&collector, source)
        .with_root_ignore(root_stack)
        .with_list_ignored(list_ignored)
        .with_suppressed_admin_names(suppressed_admin_names);
    if let Some(loader) = load_gitignore {
        context = context.with_gitignore_loader(loader);
    }

    diff_trees(
        &context,
        RelativePath::root(),
        old_root,
        new_root,
        context.root_ignore().clone(),
        false,
    )
    .await;

    Ok(collector.into_status())
}
