//! Single-file ignore matchers
//!
//! An [`IgnoreMatcher`] holds the parsed patterns of one ignore file and
//! answers scope-relative match queries with standard gitignore
//! semantics: last match wins, `!` re-includes, a trailing `/` restricts
//! a pattern to directories, a leading `/` (or any interior `/`) anchors
//! it to the matcher's scope root, and `**` crosses directories.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use ignore::Match;
use std::path::Path;

/// Outcome of matching one path against one ignore file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    /// A `!` pattern re-included the path.
    Include,
    /// An ignore pattern excluded the path.
    Exclude,
    /// No pattern matched; outer scopes decide.
    NoMatch,
}

/// One parsed ignore file.
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    inner: Gitignore,
}

impl IgnoreMatcher {
    /// Parse ignore-file contents.
    ///
    /// Blank lines and `#` comments carry no patterns; malformed patterns
    /// are skipped, leaving the remaining lines in effect.
    pub fn from_bytes(contents: &[u8]) -> Self {
        let mut builder = GitignoreBuilder::new("");

        for line in String::from_utf8_lossy(contents).lines() {
            if builder.add_line(None, line).is_err() {
                tracing::debug!(pattern = line, "skipping malformed ignore pattern");
            }
        }

        let inner = builder.build().unwrap_or_else(|_| Gitignore::empty());
        Self { inner }
    }

    /// True when no usable pattern was parsed.
    pub fn is_empty(&self) -> bool {
        self.inner.num_ignores() == 0 && self.inner.num_whitelists() == 0
    }

    /// Match a scope-relative path. Later patterns override earlier ones.
    pub fn matches(&self, path: &str, is_dir: bool) -> MatchResult {
        match self.inner.matched(Path::new(path), is_dir) {
            Match::None => MatchResult::NoMatch,
            Match::Ignore(_) => MatchResult::Exclude,
            Match::Whitelist(_) => MatchResult::Include,
        }
    }
}
