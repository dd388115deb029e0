//! Hierarchical ignore state
//!
//! As the diff descends into directories it accumulates the ignore files
//! in effect: the current directory's `.gitignore`, those of its
//! ancestors, then the user and system ignore files. The stack is a
//! persistent linked list; pushing a frame shares the tail, so sibling
//! subtrees reference the same ancestor frames without copying.

use crate::artifacts::core::relative_path::RelativePath;
use crate::artifacts::ignore::matcher::{IgnoreMatcher, MatchResult};
use std::sync::Arc;

#[derive(Debug)]
struct Frame {
    scope_root: RelativePath,
    matcher: IgnoreMatcher,
    outer: Option<Arc<Frame>>,
}

/// Chain of scoped ignore matchers, innermost first.
#[derive(Debug, Clone, Default)]
pub struct IgnoreStack {
    head: Option<Arc<Frame>>,
}

impl IgnoreStack {
    /// A stack with no ignore rules at all.
    pub fn empty() -> Self {
        Self { head: None }
    }

    /// The root-scope stack built from the user and system ignore files.
    ///
    /// The user frame sits inside the system frame, so user rules answer
    /// first. Empty contents contribute no frame.
    pub fn top_level(user_ignore: &[u8], system_ignore: &[u8]) -> Self {
        let mut stack = Self::empty();

        for contents in [system_ignore, user_ignore] {
            let matcher = IgnoreMatcher::from_bytes(contents);
            if !matcher.is_empty() {
                stack = stack.push(RelativePath::root(), matcher);
            }
        }

        stack
    }

    /// Return a new stack with `matcher` as the innermost frame, scoped at
    /// `scope_root`. The receiver is unchanged and shares its frames with
    /// the result.
    pub fn push(&self, scope_root: RelativePath, matcher: IgnoreMatcher) -> Self {
        Self {
            head: Some(Arc::new(Frame {
                scope_root,
                matcher,
                outer: self.head.clone(),
            })),
        }
    }

    /// Match `path` against the chain, innermost frame first.
    ///
    /// Each frame sees the path rewritten relative to its own scope root;
    /// the first frame that answers anything other than
    /// [`MatchResult::NoMatch`] decides. Note that an ancestor directory's
    /// exclusion is not re-checked here: the engine carries that as a
    /// sticky flag and never consults the stack beneath an excluded
    /// untracked directory.
    pub fn matches(&self, path: &RelativePath, is_dir: bool) -> MatchResult {
        let mut frame = self.head.as_deref();

        while let Some(current) = frame {
            if let Some(scoped) = path.strip_prefix(&current.scope_root) {
                match current.matcher.matches(scoped, is_dir) {
                    MatchResult::NoMatch => {}
                    decided => return decided,
                }
            }
            frame = current.outer.as_deref();
        }

        MatchResult::NoMatch
    }
}
