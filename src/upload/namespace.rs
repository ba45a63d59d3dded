//! Storage namespace resolution.
//!
//! A namespace is a directory under the storage root addressed by
//! ordered segments: `<root>/<username>` for permanent uploads,
//! `<root>/<username>/<ephemeral-token>` for temporary ones. Segments
//! are created on demand and never deleted or relocated here.

use std::fs;
use std::path::{Path, PathBuf};

use crate::{FiledropError, Result};

/// Resolves and materializes storage namespaces.
#[derive(Debug, Clone)]
pub struct NamespaceResolver {
    /// Root directory for all namespaces.
    root: PathBuf,
}

impl NamespaceResolver {
    /// Create a resolver rooted at the given directory.
    ///
    /// The root is created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;

        Ok(Self { root })
    }

    /// Get the storage root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a namespace from ordered segments, creating all missing
    /// directories (idempotent: a pre-existing directory is not an
    /// error).
    ///
    /// Every segment must pass [`is_safe_segment`]; usernames and
    /// ephemeral tokens can never address anything outside the root.
    pub fn resolve(&self, segments: &[&str]) -> Result<PathBuf> {
        let mut path = self.root.clone();
        for segment in segments {
            if !is_safe_segment(segment) {
                return Err(FiledropError::Storage(format!(
                    "invalid namespace segment: {segment:?}"
                )));
            }
            path.push(segment);
        }

        fs::create_dir_all(&path)?;
        Ok(path)
    }
}

/// Allow-list check for namespace segments.
///
/// Accepts ASCII alphanumerics, `-`, `_` and `.`, except the dot-only
/// names `.` and `..`. GitHub logins and UUID tokens both fit.
pub fn is_safe_segment(segment: &str) -> bool {
    if segment.is_empty() || segment == "." || segment == ".." {
        return false;
    }
    segment
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
