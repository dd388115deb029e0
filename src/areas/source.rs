//! Object loading
//!
//! Trees live in a content-addressed store that may be remote, cached, or
//! both; the engine only sees the [`ObjectSource`] trait and awaits each
//! load. Sources are expected to coalesce concurrent loads of the same
//! identifier, which is why [`LoadError`] is cloneable: one failure fans
//! out to every coalesced waiter.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::tree::Tree;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Error produced when an object cannot be loaded.
///
/// A failed load is not sticky: retrying the same identifier later may
/// succeed, and other identifiers are unaffected.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct LoadError {
    message: String,
}

impl LoadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Read-only async access to trees and commit roots.
#[async_trait]
pub trait ObjectSource: Send + Sync {
    /// Fetch the tree identified by `id`.
    async fn get_tree(&self, id: &ObjectId) -> Result<Arc<Tree>, LoadError>;

    /// Resolve a commit identifier to its root tree identifier.
    async fn get_commit_root(&self, id: &ObjectId) -> Result<ObjectId, LoadError>;
}

/// In-memory object source.
///
/// The reference implementation: every registered object is immediately
/// ready. Useful as a cache layer seed and in tests that do not need to
/// control load timing.
#[derive(Debug, Default)]
pub struct MemoryObjectSource {
    trees: RwLock<HashMap<ObjectId, Arc<Tree>>>,
    commits: RwLock<HashMap<ObjectId, ObjectId>>,
}

impl MemoryObjectSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tree under its identifier.
    pub async fn put_tree(&self, id: ObjectId, tree: Tree) {
        self.trees.write().await.insert(id, Arc::new(tree));
    }

    /// Map a commit identifier to its root tree identifier.
    pub async fn put_commit(&self, commit_id: ObjectId, root_id: ObjectId) {
        self.commits.write().await.insert(commit_id, root_id);
    }
}

#[async_trait]
impl ObjectSource for MemoryObjectSource {
    async fn get_tree(&self, id: &ObjectId) -> Result<Arc<Tree>, LoadError> {
        self.trees
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| LoadError::new(format!("tree {id} not found")))
    }

    async fn get_commit_root(&self, id: &ObjectId) -> Result<ObjectId, LoadError> {
        self.commits
            .read()
            .await
            .get(id)
            .copied()
            .ok_or_else(|| LoadError::new(format!("commit {id} not found")))
    }
}
