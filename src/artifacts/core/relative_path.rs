use std::fmt;

/// A repository-relative path made of `/`-separated components.
///
/// The repository root is the empty path. Paths never start or end with a
/// separator and never contain empty components, so string equality is
/// path equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(String);

impl RelativePath {
    /// The repository root.
    pub fn root() -> Self {
        Self(String::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a single component, returning the extended path.
    pub fn join(&self, component: &str) -> Self {
        debug_assert!(!component.is_empty() && !component.contains('/'));

        if self.0.is_empty() {
            return Self(component.to_string());
        }

        let mut path = String::with_capacity(self.0.len() + 1 + component.len());
        path.push_str(&self.0);
        path.push('/');
        path.push_str(component);
        Self(path)
    }

    /// The last component, or `None` at the root.
    pub fn name(&self) -> Option<&str> {
        if self.is_root() {
            None
        } else {
            self.0.rsplit('/').next()
        }
    }

    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|component| !component.is_empty())
    }

    /// Rewrite this path relative to `scope`.
    ///
    /// Returns `None` when the path is not beneath `scope`. The root scope
    /// leaves the path unchanged.
    pub fn strip_prefix(&self, scope: &RelativePath) -> Option<&str> {
        if scope.is_root() {
            return Some(&self.0);
        }

        self.0
            .strip_prefix(scope.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RelativePath {
    fn from(path: &str) -> Self {
        let trimmed = path.trim_matches('/');
        debug_assert!(!trimmed.split('/').any(str::is_empty) || trimmed.is_empty());
        Self(trimmed.to_string())
    }
}
