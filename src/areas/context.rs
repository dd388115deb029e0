//! Per-run diff state
//!
//! A [`DiffContext`] bundles the collaborators one diff run needs:
//! where events go, where trees come from, how per-directory ignore
//! files are fetched, and which administrative directory names stay out
//! of the status. It is immutable for the duration of the run and shared
//! by reference across every concurrently polled subtree future.

use crate::areas::callback::DiffCallback;
use crate::areas::source::{LoadError, ObjectSource};
use crate::artifacts::core::relative_path::RelativePath;
use crate::artifacts::ignore::IgnoreStack;
use bytes::Bytes;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::collections::BTreeSet;
use tracing::debug;

/// Hook fetching the contents of a directory's ignore file.
///
/// Returning empty bytes means "no ignore file here"; errors are treated
/// the same way, since per-directory ignore data is advisory.
pub type GitignoreLoader =
    Box<dyn Fn(&RelativePath) -> BoxFuture<'static, Result<Bytes, LoadError>> + Send + Sync>;

/// Administrative directory names hidden from the status by default.
const DEFAULT_SUPPRESSED_ADMIN_NAMES: [&str; 2] = [".hg", ".eden"];

/// Immutable container carrying one diff run's collaborators.
pub struct DiffContext<'a> {
    callback: &'a dyn DiffCallback,
    source: &'a dyn ObjectSource,
    root_ignore: IgnoreStack,
    list_ignored: bool,
    load_gitignore: GitignoreLoader,
    suppressed_admin_names: BTreeSet<String>,
}

impl<'a> DiffContext<'a> {
    /// Create a context with default behavior: ignored paths are listed,
    /// no directory has an ignore file, and the default administrative
    /// names are suppressed.
    pub fn new(callback: &'a dyn DiffCallback, source: &'a dyn ObjectSource) -> Self {
        Self {
            callback,
            source,
            root_ignore: IgnoreStack::empty(),
            list_ignored: true,
            load_gitignore: Box::new(|_: &RelativePath| {
                futures::future::ready(Ok(Bytes::new())).boxed()
            }),
            suppressed_admin_names: DEFAULT_SUPPRESSED_ADMIN_NAMES
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }

    /// The user- and system-level ignore frames the traversal starts from.
    pub fn with_root_ignore(mut self, root_ignore: IgnoreStack) -> Self {
        self.root_ignore = root_ignore;
        self
    }

    /// Whether paths hidden by ignore rules are reported at all.
    pub fn with_list_ignored(mut self, list_ignored: bool) -> Self {
        self.list_ignored = list_ignored;
        self
    }

    pub fn with_gitignore_loader(mut self, loader: GitignoreLoader) -> Self {
        self.load_gitignore = loader;
        self
    }

    pub fn with_suppressed_admin_names(mut self, names: BTreeSet<String>) -> Self {
        self.suppressed_admin_names = names;
        self
    }

    pub fn callback(&self) -> &dyn DiffCallback {
        self.callback
    }

    pub fn source(&self) -> &dyn ObjectSource {
        self.source
    }

    pub fn root_ignore(&self) -> &IgnoreStack {
        &self.root_ignore
    }

    pub fn list_ignored(&self) -> bool {
        self.list_ignored
    }

    pub(crate) fn is_suppressed_admin_name(&self, name: &str) -> bool {
        self.suppressed_admin_names.contains(name)
    }

    /// Fetch `dir`'s ignore-file contents, falling back to empty on error.
    pub(crate) async fn gitignore_contents(&self, dir: &RelativePath) -> Bytes {
        match (self.load_gitignore)(dir).await {
            Ok(contents) => contents,
            Err(error) => {
                debug!(path = %dir, %error, "ignore file load failed, treating as absent");
                Bytes::new()
            }
        }
    }
}
