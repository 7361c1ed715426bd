//! Path resolution for project-scoped filesystem access.
//!
//! Provides [`PathGuard`], which turns agent-supplied path strings into
//! [`RelativePath`]s, and [`ProjectRoot`], the fixed directory those paths are
//! joined onto.

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// The forbidden traversal sequence. Matched as a plain substring.
const TRAVERSAL: &str = "..";

/// Error returned when a path cannot be accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathGuardError {
    /// The raw input that was rejected
    pub input: String,
    /// Why it was rejected
    pub kind: PathGuardErrorKind,
}

/// Specific path rejection reasons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathGuardErrorKind {
    /// The input contains `..` somewhere
    Traversal,
    /// The input is still rooted after stripping one leading separator
    Rooted,
    /// The project root itself is unusable
    InvalidRoot {
        /// The underlying reason
        reason: String,
    },
}

impl PathGuardError {
    /// Creates a new error for the given input.
    #[must_use]
    pub fn new(input: impl Into<String>, kind: PathGuardErrorKind) -> Self {
        Self {
            input: input.into(),
            kind,
        }
    }

    /// Returns true if the input was rejected for containing `..`.
    #[must_use]
    pub fn is_traversal(&self) -> bool {
        matches!(self.kind, PathGuardErrorKind::Traversal)
    }
}

impl fmt::Display for PathGuardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            PathGuardErrorKind::Traversal => write!(
                f,
                "the path '{}' cannot contain '..' as it would allow access to files outside of the project",
                self.input
            ),
            PathGuardErrorKind::Rooted => write!(
                f,
                "the path '{}' is absolute; use a path relative to the project root",
                self.input
            ),
            PathGuardErrorKind::InvalidRoot { reason } => write!(
                f,
                "project root '{}' is not usable: {}; pass an existing directory",
                self.input, reason
            ),
        }
    }
}

impl std::error::Error for PathGuardError {}

/// A validated path relative to the project root.
///
/// The empty path denotes the root itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct RelativePath(String);

impl RelativePath {
    /// The project root.
    #[must_use]
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Returns the path as it will be joined onto the root.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this path denotes the project root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

/// Validates and normalizes agent-supplied paths.
///
/// The rules are deliberately coarse:
/// - absent, empty or blank input is the project root
/// - any input containing `..` is rejected, even inside a file name
/// - exactly one leading separator is stripped, so `/src` and `src` agree
///
/// No symlink resolution or case folding happens here.
///
/// # Example
///
/// ```rust
/// use devhelper::tools::security::PathGuard;
///
/// let path = PathGuard::resolve(Some("/src/main.rs")).unwrap();
/// assert_eq!(path.as_str(), "src/main.rs");
///
/// assert!(PathGuard::resolve(Some("../secret.txt")).is_err());
/// assert!(PathGuard::resolve(None).unwrap().is_root());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PathGuard;

impl PathGuard {
    /// Resolves raw input to a [`RelativePath`].
    ///
    /// # Errors
    ///
    /// Returns `PathGuardError` if the input contains `..`, or if it is still
    /// rooted after one leading separator was removed (`//etc`, `C:\`).
    pub fn resolve(input: Option<&str>) -> Result<RelativePath, PathGuardError> {
        let raw = input.unwrap_or_default();

        if raw.contains(TRAVERSAL) {
            return Err(PathGuardError::new(raw, PathGuardErrorKind::Traversal));
        }

        if raw.trim().is_empty() {
            return Ok(RelativePath::root());
        }

        let stripped = match raw.chars().next() {
            Some(first) if std::path::is_separator(first) => &raw[first.len_utf8()..],
            _ => raw,
        };

        if stripped.trim().is_empty() {
            return Ok(RelativePath::root());
        }

        if Self::is_rooted(stripped) {
            return Err(PathGuardError::new(raw, PathGuardErrorKind::Rooted));
        }

        Ok(RelativePath(stripped.to_string()))
    }

    fn is_rooted(path: &str) -> bool {
        let path = Path::new(path);
        path.is_absolute()
            || matches!(
                path.components().next(),
                Some(Component::RootDir | Component::Prefix(_))
            )
    }
}

/// The directory every tool operation is confined to.
///
/// Canonicalized once at construction and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot(PathBuf);

impl ProjectRoot {
    /// Creates a project root from an existing directory.
    ///
    /// # Errors
    ///
    /// Returns `PathGuardError` with `InvalidRoot` if the directory cannot be
    /// canonicalized or is not a directory.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, PathGuardError> {
        let dir = dir.as_ref();
        let invalid = |reason: String| {
            PathGuardError::new(
                dir.display().to_string(),
                PathGuardErrorKind::InvalidRoot { reason },
            )
        };

        let canonical = dir.canonicalize().map_err(|e| invalid(e.to_string()))?;
        if !canonical.is_dir() {
            return Err(invalid("not a directory".to_string()));
        }

        Ok(Self(canonical))
    }

    /// Returns the absolute root directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Joins a validated relative path onto the root.
    #[must_use]
    pub fn join(&self, relative: &RelativePath) -> PathBuf {
        if relative.is_root() {
            self.0.clone()
        } else {
            self.0.join(relative)
        }
    }
}
