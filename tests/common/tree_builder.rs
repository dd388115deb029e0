//! Declarative snapshot builder
//!
//! Tests describe a snapshot as a flat set of file paths; `finalize`
//! derives the directory trees, hashes them bottom-up into
//! content-addressed ids, and registers every tree with a
//! [`FakeSource`]. Cloning a builder and editing the clone yields a
//! second snapshot that shares the ids (and therefore the stored trees)
//! of every unchanged subtree.

use crate::common::store::FakeSource;
use derive_new::new;
use sha1::{Digest, Sha1};
use sift::{EntryKind, ObjectId, Tree, TreeEntry};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, new)]
pub struct FileSpec {
    pub contents: String,
    pub kind: EntryKind,
}

#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    files: BTreeMap<String, FileSpec>,
    dirs: BTreeSet<String>,
    finalized: BTreeMap<String, ObjectId>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_file(&mut self, path: &str, contents: &str) {
        self.insert_new(path, FileSpec::new(contents.to_string(), EntryKind::Regular));
    }

    pub fn set_executable(&mut self, path: &str, contents: &str) {
        self.insert_new(path, FileSpec::new(contents.to_string(), EntryKind::Executable));
    }

    pub fn set_symlink(&mut self, path: &str, target: &str) {
        self.insert_new(path, FileSpec::new(target.to_string(), EntryKind::Symlink));
    }

    pub fn replace_file(&mut self, path: &str, contents: &str) {
        self.replace(path, FileSpec::new(contents.to_string(), EntryKind::Regular));
    }

    pub fn replace_executable(&mut self, path: &str, contents: &str) {
        self.replace(path, FileSpec::new(contents.to_string(), EntryKind::Executable));
    }

    pub fn replace_symlink(&mut self, path: &str, target: &str) {
        self.replace(path, FileSpec::new(target.to_string(), EntryKind::Symlink));
    }

    pub fn remove_file(&mut self, path: &str) {
        assert!(
            self.files.remove(path).is_some(),
            "remove_file: {path} does not exist"
        );
    }

    /// Add a directory that no file path would otherwise create.
    pub fn mkdir(&mut self, path: &str) {
        self.dirs.insert(path.to_string());
    }

    /// Hash every directory bottom-up and register the trees with `store`.
    ///
    /// With `ready` false the trees are registered unpublished; use the
    /// `set_*_ready` methods to release them one at a time.
    pub fn finalize(&mut self, store: &FakeSource, ready: bool) -> ObjectId {
        let all_dirs = self.all_dirs();
        let mut ids = BTreeMap::new();
        let root = self.register_dir("", &all_dirs, store, ready, &mut ids);
        self.finalized = ids;
        root
    }

    /// Register this builder's root tree under a short commit id.
    pub fn put_commit(&self, store: &FakeSource, commit: &str, ready: bool) {
        store.put_commit(super::test_id(commit), self.root_id(), ready);
    }

    pub fn root_id(&self) -> ObjectId {
        self.tree_id("")
    }

    pub fn tree_id(&self, dir: &str) -> ObjectId {
        *self
            .finalized
            .get(dir)
            .unwrap_or_else(|| panic!("tree_id: no tree at {dir:?}, finalize first"))
    }

    pub fn set_ready(&self, store: &FakeSource, dir: &str) {
        store.set_tree_ready(&self.tree_id(dir));
    }

    pub fn set_all_ready(&self, store: &FakeSource) {
        for id in self.finalized.values() {
            store.set_tree_ready(id);
        }
    }

    pub fn set_all_ready_under(&self, store: &FakeSource, prefix: &str) {
        let nested = format!("{prefix}/");
        for (dir, id) in &self.finalized {
            if dir == prefix || dir.starts_with(&nested) {
                store.set_tree_ready(id);
            }
        }
    }

    pub fn fail_tree(&self, store: &FakeSource, dir: &str, message: &str) {
        store.fail_tree(&self.tree_id(dir), message);
    }

    fn insert_new(&mut self, path: &str, spec: FileSpec) {
        let previous = self.files.insert(path.to_string(), spec);
        assert!(previous.is_none(), "set: {path} already exists, use replace");
    }

    fn replace(&mut self, path: &str, spec: FileSpec) {
        let previous = self.files.insert(path.to_string(), spec);
        assert!(previous.is_some(), "replace: {path} does not exist, use set");
    }

    /// Every directory in the snapshot: the root, each ancestor of a file
    /// path, and each explicit `mkdir`.
    fn all_dirs(&self) -> BTreeSet<String> {
        let mut dirs = BTreeSet::new();
        dirs.insert(String::new());

        for path in self.files.keys().chain(self.dirs.iter()) {
            let mut end = 0;
            while let Some(separator) = path[end..].find('/') {
                end += separator;
                dirs.insert(path[..end].to_string());
                end += 1;
            }
        }
        for dir in &self.dirs {
            dirs.insert(dir.clone());
        }

        dirs
    }

    fn register_dir(
        &self,
        dir: &str,
        all_dirs: &BTreeSet<String>,
        store: &FakeSource,
        ready: bool,
        ids: &mut BTreeMap<String, ObjectId>,
    ) -> ObjectId {
        let mut entries = Vec::new();

        for child in all_dirs {
            if !child.is_empty() && parent(child) == dir {
                let id = self.register_dir(child, all_dirs, store, ready, ids);
                entries.push(TreeEntry::new(basename(child), EntryKind::Tree, id));
            }
        }
        for (path, spec) in &self.files {
            if parent(path) == dir {
                entries.push(TreeEntry::new(
                    basename(path),
                    spec.kind,
                    blob_id(&spec.contents),
                ));
            }
        }

        let tree = Tree::new(entries);
        let id = tree_id_of(&tree);
        store.put_tree(id, tree, ready);
        ids.insert(dir.to_string(), id);
        id
    }
}

fn parent(path: &str) -> &str {
    path.rfind('/').map_or("", |index| &path[..index])
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

fn blob_id(contents: &str) -> ObjectId {
    let mut hasher = Sha1::new();
    hasher.update(format!("blob {}\0", contents.len()));
    hasher.update(contents.as_bytes());
    ObjectId::from_bytes(hasher.finalize().into())
}

fn tree_id_of(tree: &Tree) -> ObjectId {
    let mut hasher = Sha1::new();
    for entry in tree.entries() {
        let mode = match entry.kind() {
            EntryKind::Regular => "100644",
            EntryKind::Executable => "100755",
            EntryKind::Symlink => "120000",
            EntryKind::Tree => "40000",
        };
        hasher.update(mode);
        hasher.update(b" ");
        hasher.update(entry.name().as_bytes());
        hasher.update(b"\0");
        hasher.update(entry.id().as_bytes());
    }
    ObjectId::from_bytes(hasher.finalize().into())
}
