//! Diff event sinks
//!
//! The engine pushes results into a [`DiffCallback`] as it discovers
//! them. Events arrive from concurrently polled subtree futures in no
//! particular order; implementations only need to be safe for concurrent
//! invocation, and every emitted path is unique across a run.

use crate::artifacts::core::relative_path::RelativePath;
use crate::artifacts::status::{FileStatus, Status};
use parking_lot::Mutex;
use std::collections::BTreeMap;

/// Sink for per-path diff events.
pub trait DiffCallback: Send + Sync {
    /// A path present only in the new tree.
    fn added(&self, path: &RelativePath);

    /// A path present only in the old tree.
    fn removed(&self, path: &RelativePath);

    /// A path present in both trees with different kind or contents.
    fn modified(&self, path: &RelativePath);

    /// A path that would be added but matches an ignore rule.
    fn ignored(&self, path: &RelativePath);

    /// A subtree whose tree object could not be loaded.
    fn error(&self, path: &RelativePath, message: &str);
}

/// Reference callback accumulating events into a [`Status`].
#[derive(Debug, Default)]
pub struct StatusCollector {
    entries: Mutex<BTreeMap<String, FileStatus>>,
    errors: Mutex<BTreeMap<String, String>>,
}

impl StatusCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the collector and yield the accumulated status.
    pub fn into_status(self) -> Status {
        Status {
            entries: self.entries.into_inner(),
            errors: self.errors.into_inner(),
        }
    }

    fn record(&self, path: &RelativePath, status: FileStatus) {
        self.entries.lock().insert(path.to_string(), status);
    }
}

impl DiffCallback for StatusCollector {
    fn added(&self, path: &RelativePath) {
        self.record(path, FileStatus::Added);
    }

    fn removed(&self, path: &RelativePath) {
        self.record(path, FileStatus::Removed);
    }

    fn modified(&self, path: &RelativePath) {
        self.record(path, FileStatus::Modified);
    }

    fn ignored(&self, path: &RelativePath) {
        self.record(path, FileStatus::Ignored);
    }

    fn error(&self, path: &RelativePath, message: &str) {
        // both sides of a pair can fail at the same path; keep the first
        self.errors
            .lock()
            .entry(path.to_string())
            .or_insert_with(|| message.to_string());
    }
}
