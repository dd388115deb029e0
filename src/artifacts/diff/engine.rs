//! Recursive two-tree diff engine
//!
//! ## Algorithm
//!
//! Each call pairs two trees at one directory path:
//!
//! 1. Load both trees concurrently; a load failure is reported at this
//!    path and ends only this subtree pair.
//! 2. If either tree carries a `.gitignore` file, push a matcher for it
//!    onto the ignore stack (the new side's contents govern).
//! 3. Merge-walk the two sorted entry lists. Entries present on one side
//!    only become removals or additions; same-name entries dispatch on
//!    their kind pair.
//! 4. Await every recursion spawned by the walk.
//!
//! Removals are reported unconditionally: the path was tracked in the old
//! tree, so no ignore rule can hide it. Additions consult the ignore
//! stack, with one twist: once a directory is excluded, everything
//! beneath it stays excluded, carried by the sticky `is_ignored` flag
//! rather than by re-matching — a deeper `!` rule cannot re-include a
//! path whose ancestor directory was excluded.
//!
//! Recursions for independent subtrees are collected eagerly and awaited
//! together, so one slow tree load never serializes its siblings.

use crate::areas::context::DiffContext;
use crate::artifacts::core::relative_path::RelativePath;
use crate::artifacts::ignore::{IgnoreMatcher, IgnoreStack, MatchResult};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use futures::future::{self, BoxFuture};
use futures::FutureExt;
use std::cmp::Ordering;
use tracing::{debug, trace};

/// Name of the per-directory ignore file.
const GITIGNORE_NAME: &str = ".gitignore";

/// Diff two trees rooted at the same directory path.
///
/// Resolves when every transitively spawned recursion has resolved.
/// Identical tree ids short-circuit immediately: content addressing
/// guarantees identical subtrees produce no events.
pub fn diff_trees<'a>(
    ctx: &'a DiffContext<'a>,
    path: RelativePath,
    old_id: ObjectId,
    new_id: ObjectId,
    ignore_stack: IgnoreStack,
    is_ignored: bool,
) -> BoxFuture<'a, ()> {
    async move {
        if old_id == new_id {
            return;
        }
        trace!(path = %path, %old_id, %new_id, "diffing trees");

        let loads = future::join(ctx.source().get_tree(&old_id), ctx.source().get_tree(&new_id));
        let (old_tree, new_tree) = match loads.await {
            (Ok(old_tree), Ok(new_tree)) => (old_tree, new_tree),
            (old_result, new_result) => {
                for error in [old_result.err(), new_result.err()].into_iter().flatten() {
                    debug!(path = %path, %error, "tree load failed");
                    ctx.callback().error(&path, error.message());
                }
                return;
            }
        };

        let has_ignore_file = carries_ignore_file(&old_tree) || carries_ignore_file(&new_tree);
        let ignore_stack = if is_ignored {
            ignore_stack
        } else {
            with_directory_ignores(ctx, &path, ignore_stack, has_ignore_file).await
        };

        let mut children: Vec<BoxFuture<'a, ()>> = Vec::new();
        let old_entries = old_tree.entries();
        let new_entries = new_tree.entries();
        let (mut old_index, mut new_index) = (0, 0);

        loop {
            match (old_entries.get(old_index), new_entries.get(new_index)) {
                (None, None) => break,
                (Some(old), None) => {
                    removed_entry(ctx, &path, old, &mut children);
                    old_index += 1;
                }
                (None, Some(new)) => {
                    added_entry(ctx, &path, new, &ignore_stack, is_ignored, false, &mut children);
                    new_index += 1;
                }
                (Some(old), Some(new)) => match old.name().as_bytes().cmp(new.name().as_bytes()) {
                    Ordering::Less => {
                        removed_entry(ctx, &path, old, &mut children);
                        old_index += 1;
                    }
                    Ordering::Greater => {
                        added_entry(ctx, &path, new, &ignore_stack, is_ignored, false, &mut children);
                        new_index += 1;
                    }
                    Ordering::Equal => {
                        matched_entry(ctx, &path, old, new, &ignore_stack, is_ignored, &mut children);
                        old_index += 1;
                        new_index += 1;
                    }
                },
            }
        }

        future::join_all(children).await;
    }
    .boxed()
}

/// Report every leaf of a subtree that exists only in the new tree.
///
/// Each leaf becomes ADDED, or IGNORED when hidden by ignore rules.
pub fn diff_added_tree<'a>(
    ctx: &'a DiffContext<'a>,
    path: RelativePath,
    id: ObjectId,
    ignore_stack: IgnoreStack,
    is_ignored: bool,
) -> BoxFuture<'a, ()> {
    async move {
        let tree = match ctx.source().get_tree(&id).await {
            Ok(tree) => tree,
            Err(error) => {
                debug!(path = %path, %error, "tree load failed");
                ctx.callback().error(&path, error.message());
                return;
            }
        };

        let ignore_stack = if is_ignored {
            ignore_stack
        } else {
            with_directory_ignores(ctx, &path, ignore_stack, carries_ignore_file(&tree)).await
        };

        let mut children: Vec<BoxFuture<'a, ()>> = Vec::new();
        for entry in tree.entries() {
            added_entry(ctx, &path, entry, &ignore_stack, is_ignored, false, &mut children);
        }

        future::join_all(children).await;
    }
    .boxed()
}

/// Report every leaf of a subtree that exists only in the old tree.
///
/// Ignore state plays no part: every path here was tracked.
pub fn diff_removed_tree<'a>(
    ctx: &'a DiffContext<'a>,
    path: RelativePath,
    id: ObjectId,
) -> BoxFuture<'a, ()> {
    async move {
        let tree = match ctx.source().get_tree(&id).await {
            Ok(tree) => tree,
            Err(error) => {
                debug!(path = %path, %error, "tree load failed");
                ctx.callback().error(&path, error.message());
                return;
            }
        };

        let mut children: Vec<BoxFuture<'a, ()>> = Vec::new();
        for entry in tree.entries() {
            removed_entry(ctx, &path, entry, &mut children);
        }

        future::join_all(children).await;
    }
    .boxed()
}

/// Handle a name present in both trees.
fn matched_entry<'a>(
    ctx: &'a DiffContext<'a>,
    parent: &RelativePath,
    old: &TreeEntry,
    new: &TreeEntry,
    ignore_stack: &IgnoreStack,
    is_ignored: bool,
    children: &mut Vec<BoxFuture<'a, ()>>,
) {
    match (old.is_tree(), new.is_tree()) {
        (true, true) => {
            if old.id() != new.id() {
                children.push(diff_trees(
                    ctx,
                    parent.join(old.name()),
                    old.id(),
                    new.id(),
                    ignore_stack.clone(),
                    is_ignored,
                ));
            }
        }
        (false, false) => {
            // leaves compare by (kind, id); id equality implies byte equality
            if old.kind() != new.kind() || old.id() != new.id() {
                ctx.callback().modified(&parent.join(old.name()));
            }
        }
        // a file became a directory or vice versa: the old shape is removed
        // and the new shape added under the same name
        _ => {
            removed_entry(ctx, parent, old, children);
            added_entry(ctx, parent, new, ignore_stack, is_ignored, true, children);
        }
    }
}

/// Handle an entry that exists only on the new side (or the new shape of
/// a kind-changed entry, in which case `existed_in_old` is true).
fn added_entry<'a>(
    ctx: &'a DiffContext<'a>,
    parent: &RelativePath,
    entry: &TreeEntry,
    ignore_stack: &IgnoreStack,
    is_ignored: bool,
    existed_in_old: bool,
    children: &mut Vec<BoxFuture<'a, ()>>,
) {
    let path = parent.join(entry.name());
    // an excluded ancestor is sticky; a fresh INCLUDE cannot undo it
    let entry_ignored =
        is_ignored || ignore_stack.matches(&path, entry.is_tree()) == MatchResult::Exclude;

    if entry.is_tree() {
        if !existed_in_old && !entry_ignored && ctx.is_suppressed_admin_name(entry.name()) {
            trace!(path = %path, "suppressing administrative directory");
            return;
        }
        children.push(diff_added_tree(ctx, path, entry.id(), ignore_stack.clone(), entry_ignored));
    } else if entry_ignored {
        if ctx.list_ignored() {
            ctx.callback().ignored(&path);
        }
    } else {
        ctx.callback().added(&path);
    }
}

/// Handle an entry that exists only on the old side.
fn removed_entry<'a>(
    ctx: &'a DiffContext<'a>,
    parent: &RelativePath,
    entry: &TreeEntry,
    children: &mut Vec<BoxFuture<'a, ()>>,
) {
    let path = parent.join(entry.name());
    if entry.is_tree() {
        children.push(diff_removed_tree(ctx, path, entry.id()));
    } else {
        ctx.callback().removed(&path);
    }
}

fn carries_ignore_file(tree: &Tree) -> bool {
    tree.get(GITIGNORE_NAME)
        .is_some_and(|entry| entry.kind().is_regular_file())
}

/// Push a frame for this directory's ignore file, if it has a usable one.
async fn with_directory_ignores(
    ctx: &DiffContext<'_>,
    path: &RelativePath,
    ignore_stack: IgnoreStack,
    has_ignore_file: bool,
) -> IgnoreStack {
    if !has_ignore_file {
        return ignore_stack;
    }

    let contents = ctx.gitignore_contents(path).await;
    if contents.is_empty() {
        return ignore_stack;
    }

    let matcher = IgnoreMatcher::from_bytes(&contents);
    if matcher.is_empty() {
        return ignore_stack;
    }

    ignore_stack.push(path.clone(), matcher)
}
